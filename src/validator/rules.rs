// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Issue, IssueKind, LedgerContext, Rule};
use crate::config::FecConfig;
use crate::models::{Amount, Entry, MovementError};
use crate::utils::is_fec_date;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Field-level checks of each entry taken alone.
pub struct EntryFields;

/// Debit and credit totals must match for every piece (entries sharing a
/// PieceRef).
pub struct PieceBalance;

/// Entry dates must not decrease along the ledger.
pub struct Chronology;

pub struct DuplicateNumbers;

/// VAT accounts should carry an amount.
pub struct VatAmounts;

pub struct JournalCodes;

impl Rule for EntryFields {
    fn name(&self) -> &'static str {
        "entry-fields"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        for (pos, entry) in ctx.ledger.iter().enumerate() {
            let id = ctx.ledger.identifier(pos);
            for problem in entry_problems(entry, ctx.config) {
                issues.push(
                    Issue::new(IssueKind::EntryInvalid, format!("entry {}: {}", id, problem))
                        .for_entry(id.clone()),
                );
            }
        }
    }
}

fn entry_problems(e: &Entry, cfg: &FecConfig) -> Vec<String> {
    let mut problems = Vec::new();

    let required = [
        ("JournalCode", &e.journal_code),
        ("JournalLib", &e.journal_label),
        ("EcritureNum", &e.entry_number),
        ("EcritureDate", &e.entry_date),
        ("CompteNum", &e.account_number),
        ("CompteLib", &e.account_label),
        ("PieceRef", &e.document_ref),
        ("PieceDate", &e.document_date),
        ("EcritureLib", &e.entry_label),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            problems.push(format!("{} is missing", field));
        }
    }

    let dates = [
        ("EcritureDate", Some(e.entry_date.as_str())),
        ("PieceDate", Some(e.document_date.as_str())),
        ("ValidDate", e.validation_date.as_deref()),
    ];
    for (field, value) in dates {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            if !is_fec_date(v) {
                problems.push(format!("{} '{}' is not a YYYYMMDD date", field, v));
            }
        }
    }

    let account = e.account_number.as_str();
    if !account.trim().is_empty() {
        let len = account.chars().count();
        if !(3..=20).contains(&len) {
            problems.push(format!(
                "CompteNum '{}' has {} characters, expected 3 to 20",
                account, len
            ));
        }
        if e.account_class().is_none() {
            problems.push(format!(
                "CompteNum '{}' does not start with an account class digit (1-8)",
                account
            ));
        }
    }

    for (field, amount) in [("Debit", &e.debit), ("Credit", &e.credit)] {
        if let Some(p) = amount_problem(field, amount, cfg.max_amount) {
            problems.push(p);
        }
    }
    if let Some(Amount::Malformed(raw)) = &e.foreign_amount {
        problems.push(format!("Montantdevise '{}' is not a number", raw));
    }

    match e.movement() {
        Err(MovementError::BothZero) => {
            problems.push("debit and credit are both zero, exactly one must be set".to_string())
        }
        Err(MovementError::BothNonZero) => {
            problems.push("debit and credit are both set, exactly one must be".to_string())
        }
        // reported by amount_problem
        Err(MovementError::Malformed { .. }) | Ok(_) => {}
    }

    problems
}

fn amount_problem(field: &str, amount: &Amount, max: Decimal) -> Option<String> {
    match amount {
        Amount::Malformed(raw) => Some(format!("{} '{}' is not a number", field, raw)),
        Amount::Value(d) if d.is_sign_negative() && !d.is_zero() => {
            Some(format!("{} {} is negative", field, d))
        }
        Amount::Value(d) if d.normalize().scale() > 2 => {
            Some(format!("{} {} has more than 2 decimals", field, d))
        }
        Amount::Value(d) if *d > max => {
            Some(format!("{} {} exceeds the maximum of {:.2}", field, d, max))
        }
        Amount::Value(_) => None,
    }
}

impl Rule for PieceBalance {
    fn name(&self) -> &'static str {
        "piece-balance"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        // None once a running total no longer fits in a Decimal
        let mut pieces: BTreeMap<&str, Option<(Decimal, Decimal)>> = BTreeMap::new();
        for entry in ctx.ledger {
            let piece = entry.document_ref.as_str();
            // blank refs are reported by EntryFields
            if piece.trim().is_empty() {
                continue;
            }
            let totals = pieces
                .entry(piece)
                .or_insert(Some((Decimal::ZERO, Decimal::ZERO)));
            *totals = totals.and_then(|(debit, credit)| {
                Some((
                    debit.checked_add(entry.debit.or_zero())?,
                    credit.checked_add(entry.credit.or_zero())?,
                ))
            });
        }
        for (piece, totals) in pieces {
            let Some((debit, credit)) = totals else {
                issues.push(Issue::new(
                    IssueKind::BalanceError,
                    format!("piece {} cannot be balanced: its totals overflow", piece),
                ));
                continue;
            };
            let within = debit
                .checked_sub(credit)
                .is_some_and(|gap| gap.abs() <= ctx.config.balance_tolerance);
            if !within {
                issues.push(Issue::new(
                    IssueKind::BalanceError,
                    format!(
                        "piece {} is unbalanced: debit {:.2}, credit {:.2}",
                        piece, debit, credit
                    ),
                ));
            }
        }
    }
}

impl Rule for Chronology {
    fn name(&self) -> &'static str {
        "chronology"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        let mut previous: Option<(usize, &str)> = None;
        for (pos, entry) in ctx.ledger.iter().enumerate() {
            let date = entry.entry_date.as_str();
            // malformed dates are reported by EntryFields
            if !is_fec_date(date) {
                continue;
            }
            if let Some((prev_pos, prev_date)) = previous {
                if date < prev_date {
                    let id = ctx.ledger.identifier(pos);
                    issues.push(
                        Issue::new(
                            IssueKind::ChronologyWarning,
                            format!(
                                "entry {} dated {} comes after entry {} dated {}",
                                id,
                                date,
                                ctx.ledger.identifier(prev_pos),
                                prev_date
                            ),
                        )
                        .for_entry(id),
                    );
                }
            }
            previous = Some((pos, date));
        }
    }
}

impl Rule for DuplicateNumbers {
    fn name(&self) -> &'static str {
        "duplicate-numbers"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        let mut numbers: Vec<&str> = ctx
            .ledger
            .iter()
            .map(|e| e.entry_number.as_str())
            .filter(|n| !n.trim().is_empty())
            .collect();
        numbers.sort_unstable();
        for pair in numbers.windows(2) {
            if pair[0] == pair[1] {
                issues.push(
                    Issue::new(
                        IssueKind::DuplicateNum,
                        format!("entry number {} is used more than once", pair[1]),
                    )
                    .for_entry(pair[1]),
                );
            }
        }
    }
}

impl Rule for VatAmounts {
    fn name(&self) -> &'static str {
        "vat-amounts"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        let prefix = ctx.config.vat_prefix.as_str();
        if prefix.is_empty() {
            return;
        }
        for (pos, entry) in ctx.ledger.iter().enumerate() {
            if !entry.account_number.starts_with(prefix) {
                continue;
            }
            let debit = entry.debit.or_zero();
            let amount = if debit.is_zero() {
                entry.credit.or_zero()
            } else {
                debit
            };
            if amount.is_zero() {
                let id = ctx.ledger.identifier(pos);
                issues.push(
                    Issue::new(
                        IssueKind::VatWarning,
                        format!(
                            "entry {}: VAT account {} carries no amount",
                            id, entry.account_number
                        ),
                    )
                    .for_entry(id),
                );
            }
        }
    }
}

impl Rule for JournalCodes {
    fn name(&self) -> &'static str {
        "journal-codes"
    }

    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>) {
        for (pos, entry) in ctx.ledger.iter().enumerate() {
            let code = entry.journal_code.as_str();
            if code.trim().is_empty() || ctx.config.is_known_journal(code) {
                continue;
            }
            let id = ctx.ledger.identifier(pos);
            issues.push(
                Issue::new(
                    IssueKind::UnknownJournal,
                    format!("entry {}: journal code {} is not a known journal", id, code),
                )
                .for_entry(id),
            );
        }
    }
}
