// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FecError, Result};
use crate::models::{Amount, Entry, FIELD_COUNT, Ledger};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

/// A data line dropped because its column count was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line in the source text.
    pub line: u64,
    pub found_columns: usize,
}

#[derive(Debug, Clone)]
pub struct ParsedLedger {
    pub ledger: Ledger,
    pub header: Vec<String>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses FEC text into a ledger, dropping malformed data lines.
pub fn parse(text: &str) -> Result<Ledger> {
    parse_with_report(text).map(|p| p.ledger)
}

/// Parses FEC text and also reports the data lines that were skipped.
///
/// Fails only when the text as a whole is not a FEC file: empty input, no
/// data line after the header, or a header without exactly 18 columns.
pub fn parse_with_report(text: &str) -> Result<ParsedLedger> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(FecError::Format("empty file".to_string()));
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut lines: Vec<(u64, StringRecord)> = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        if rec.len() == 1 && rec[0].is_empty() {
            continue;
        }
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        lines.push((line, rec));
    }

    if lines.len() < 2 {
        return Err(FecError::Format(format!(
            "expected a header and at least one entry line, found {} non-blank line(s)",
            lines.len()
        )));
    }

    let mut lines = lines.into_iter();
    let header = match lines.next() {
        Some((_, h)) => h,
        None => return Err(FecError::Format("empty file".to_string())),
    };
    if header.len() != FIELD_COUNT {
        return Err(FecError::Format(format!(
            "header has {} columns, expected {}",
            header.len(),
            FIELD_COUNT
        )));
    }

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for (line, rec) in lines {
        if rec.len() != FIELD_COUNT {
            tracing::warn!(
                line,
                found = rec.len(),
                expected = FIELD_COUNT,
                "skipping FEC line with wrong column count"
            );
            skipped.push(SkippedLine {
                line,
                found_columns: rec.len(),
            });
            continue;
        }
        entries.push(entry_from_record(&rec));
    }
    tracing::debug!(entries = entries.len(), skipped = skipped.len(), "parsed FEC text");

    Ok(ParsedLedger {
        ledger: Ledger::new(entries),
        header: header.iter().map(|s| s.to_string()).collect(),
        skipped,
    })
}

fn entry_from_record(rec: &StringRecord) -> Entry {
    let get = |i: usize| rec.get(i).unwrap_or("").to_string();
    let opt = |i: usize| {
        rec.get(i)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    };
    Entry {
        journal_code: get(0),
        journal_label: get(1),
        entry_number: get(2),
        entry_date: get(3),
        account_number: get(4),
        account_label: get(5),
        aux_account_number: opt(6),
        aux_account_label: opt(7),
        document_ref: get(8),
        document_date: get(9),
        entry_label: get(10),
        debit: Amount::from_wire(rec.get(11).unwrap_or("")),
        credit: Amount::from_wire(rec.get(12).unwrap_or("")),
        reconciliation_mark: opt(13),
        reconciliation_date: opt(14),
        validation_date: opt(15),
        foreign_amount: Amount::from_wire_opt(rec.get(16).unwrap_or("")),
        foreign_currency: opt(17),
    }
}
