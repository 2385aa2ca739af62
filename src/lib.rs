// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod encoding;
pub mod error;
pub mod models;
pub mod parser;
pub mod serializer;
pub mod stats;
pub mod utils;
pub mod validator;

pub use error::{FecError, Result};
pub use models::{Amount, Entry, Ledger, Movement};
pub use parser::parse;
pub use serializer::serialize;
pub use stats::summarize;
pub use validator::{Report, Validator, validate};
