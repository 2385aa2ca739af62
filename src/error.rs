// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors that abort a whole parse, serialization or transcoding call.
///
/// Validation problems are never reported through this type, they end up in
/// a [Report](crate::validator::Report) instead.
#[derive(Error, Debug)]
pub enum FecError {
    /// The input is not shaped like a FEC file at all.
    #[error("invalid FEC file: {0}")]
    Format(String),
    /// Serialization was asked to write a ledger without entries.
    #[error("cannot write a FEC file without entries")]
    EmptyInput,
    #[error("error reading or writing delimited records")]
    Csv(#[from] csv::Error),
    /// A character has no ISO-8859-1 representation.
    #[error("character {ch:?} at line {line}, column {column} cannot be encoded as ISO-8859-1")]
    Unencodable { line: usize, column: usize, ch: char },
}

pub type Result<T> = std::result::Result<T, FecError>;
