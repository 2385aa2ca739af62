// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FecError, Result};

/// Caveat to show whenever serialized text leaves the engine without being
/// transcoded.
pub const ENCODING_ADVISORY: &str = "The FEC text is UTF-8. The tax administration expects \
ISO-8859-1 (Latin-1): transcode the file before filing, or it may be rejected as non-compliant.";

/// Transcodes text to ISO-8859-1 bytes. Every char up to U+00FF maps to the
/// byte of the same value; anything above is an error.
pub fn to_latin1(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push(b'\n');
        }
        for (col, ch) in line.chars().enumerate() {
            match u8::try_from(u32::from(ch)) {
                Ok(b) => out.push(b),
                Err(_) => {
                    return Err(FecError::Unencodable {
                        line: idx + 1,
                        column: col + 1,
                        ch,
                    });
                }
            }
        }
    }
    Ok(out)
}

/// Decodes ISO-8859-1 bytes. Never fails: every byte is a valid char.
pub fn from_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}
