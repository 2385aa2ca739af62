// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Ledger;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate figures of a ledger. Computing them never validates anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub entries: usize,
    /// Entries carrying a ValidDate.
    pub validated: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Set when a total outgrew `Decimal`; the total is then saturated.
    pub totals_overflowed: bool,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub by_journal: BTreeMap<String, usize>,
    /// Keyed by the first character of the account number, `?` when blank.
    pub by_class: BTreeMap<char, usize>,
}

impl Stats {
    /// Debit and credit totals agree within `tolerance`. Never true once a
    /// total has overflowed.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        !self.totals_overflowed
            && self
                .total_debit
                .checked_sub(self.total_credit)
                .is_some_and(|gap| gap.abs() <= tolerance)
    }
}

pub fn summarize(ledger: &Ledger) -> Stats {
    let mut stats = Stats {
        entries: ledger.len(),
        validated: 0,
        total_debit: Decimal::ZERO,
        total_credit: Decimal::ZERO,
        totals_overflowed: false,
        first_date: None,
        last_date: None,
        by_journal: BTreeMap::new(),
        by_class: BTreeMap::new(),
    };

    for e in ledger {
        if e.is_validated() {
            stats.validated += 1;
        }
        stats.totals_overflowed |= !accumulate(&mut stats.total_debit, e.debit.or_zero());
        stats.totals_overflowed |= !accumulate(&mut stats.total_credit, e.credit.or_zero());

        if !e.entry_date.is_empty() {
            let date = e.entry_date.as_str();
            if stats.first_date.as_deref().is_none_or(|d| date < d) {
                stats.first_date = Some(date.to_string());
            }
            if stats.last_date.as_deref().is_none_or(|d| date > d) {
                stats.last_date = Some(date.to_string());
            }
        }

        *stats.by_journal.entry(e.journal_code.clone()).or_insert(0) += 1;
        let class = e.account_number.chars().next().unwrap_or('?');
        *stats.by_class.entry(class).or_insert(0) += 1;
    }
    stats
}

/// Adds `amount` to `total`, saturating on overflow. Returns false when the
/// sum did not fit.
fn accumulate(total: &mut Decimal, amount: Decimal) -> bool {
    match total.checked_add(amount) {
        Some(sum) => {
            *total = sum;
            true
        }
        None => {
            *total = total.saturating_add(amount);
            false
        }
    }
}
