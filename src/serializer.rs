// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FecError, Result};
use crate::models::{Entry, FIELDS, Ledger};
use csv::{QuoteStyle, Terminator, WriterBuilder};

const CRLF: &str = "\r\n";

/// Writes a ledger as FEC text: the header line, then one line per entry,
/// `|`-separated and joined with CRLF.
///
/// The result is still a Rust string. Filing requires ISO-8859-1 bytes, see
/// [encoding](crate::encoding).
pub fn serialize(ledger: &Ledger) -> Result<String> {
    if ledger.is_empty() {
        return Err(FecError::EmptyInput);
    }

    let mut wtr = WriterBuilder::new()
        .delimiter(b'|')
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    wtr.write_record(FIELDS)?;
    for entry in ledger {
        wtr.write_record(entry_to_record(entry).iter().map(|f| clean(f)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| FecError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| FecError::Format(e.to_string()))?;
    // Lines are joined, the last one carries no terminator
    if text.ends_with(CRLF) {
        text.truncate(text.len() - CRLF.len());
    }
    tracing::debug!(entries = ledger.len(), bytes = text.len(), "serialized ledger");
    Ok(text)
}

fn entry_to_record(e: &Entry) -> [String; 18] {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        e.journal_code.clone(),
        e.journal_label.clone(),
        e.entry_number.clone(),
        e.entry_date.clone(),
        e.account_number.clone(),
        e.account_label.clone(),
        opt(&e.aux_account_number),
        opt(&e.aux_account_label),
        e.document_ref.clone(),
        e.document_date.clone(),
        e.entry_label.clone(),
        e.debit.to_wire(),
        e.credit.to_wire(),
        opt(&e.reconciliation_mark),
        opt(&e.reconciliation_date),
        opt(&e.validation_date),
        e.foreign_amount.as_ref().map(|a| a.to_wire()).unwrap_or_default(),
        opt(&e.foreign_currency),
    ]
}

/// Drops the field delimiter and flattens line breaks, either of which
/// would shift the columns of the record.
fn clean(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '|')
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}
