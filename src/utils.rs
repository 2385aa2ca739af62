// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;

static FEC_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8}$").unwrap());
static SIREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").unwrap());

/// True for an unseparated `YYYYMMDD` date (8 ASCII digits).
pub fn is_fec_date(s: &str) -> bool {
    FEC_DATE.is_match(s)
}

/// Reads a FEC file, accepting UTF-8 and falling back to ISO-8859-1, the
/// encoding statutory files are filed in.
pub fn read_fec_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Open FEC file {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::debug!(path = %path.display(), "not UTF-8, decoding as ISO-8859-1");
            Ok(crate::encoding::from_latin1(err.as_bytes()))
        }
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Renders a `YYYYMMDD` date as `YYYY-MM-DD`, leaving anything else as is.
pub fn display_fec_date(s: &str) -> String {
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .map(|d| d.to_string())
        .unwrap_or_else(|_| s.to_string())
}

/// Statutory file name: `<SIREN>FEC<closing date YYYYMMDD>.txt`.
pub fn fec_file_name(siren: &str, closing: NaiveDate) -> Result<String> {
    let siren = siren.trim();
    if !SIREN.is_match(siren) {
        return Err(anyhow!("Invalid SIREN '{}', expected 9 digits", siren));
    }
    Ok(format!("{}FEC{}.txt", siren, closing.format("%Y%m%d")))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
