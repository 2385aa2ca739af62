// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use feckit::models::{Amount, Entry, Ledger, Movement};
use feckit::stats::summarize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn entry(journal: &str, num: &str, date: &str, account: &str, movement: Movement) -> Entry {
    Entry {
        journal_code: journal.into(),
        journal_label: journal.into(),
        entry_number: num.into(),
        entry_date: date.into(),
        account_number: account.into(),
        account_label: "Compte".into(),
        document_ref: num.into(),
        document_date: date.into(),
        entry_label: "Libellé".into(),
        ..Default::default()
    }
    .with_movement(movement)
}

#[test]
fn summarizes_counts_totals_and_period() {
    let mut entries = vec![
        entry("VE", "1", "20240315", "411000", Movement::Debit(dec!(120))),
        entry("VE", "2", "20240315", "707000", Movement::Credit(dec!(100))),
        entry("VE", "3", "20240315", "445710", Movement::Credit(dec!(20))),
        entry("BQ", "4", "20240102", "512000", Movement::Debit(dec!(50.25))),
        entry("BQ", "5", "20241231", "411000", Movement::Credit(dec!(50.25))),
    ];
    entries[0].validation_date = Some("20240401".into());
    entries[3].validation_date = Some("20240401".into());

    let stats = summarize(&Ledger::new(entries));
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.validated, 2);
    assert_eq!(stats.total_debit, dec!(170.25));
    assert_eq!(stats.total_credit, dec!(170.25));
    assert!(stats.is_balanced(dec!(0.01)));
    assert!(!stats.totals_overflowed);
    assert_eq!(stats.first_date.as_deref(), Some("20240102"));
    assert_eq!(stats.last_date.as_deref(), Some("20241231"));
    assert_eq!(stats.by_journal.get("VE"), Some(&3));
    assert_eq!(stats.by_journal.get("BQ"), Some(&2));
    assert_eq!(stats.by_class.get(&'4'), Some(&3));
    assert_eq!(stats.by_class.get(&'5'), Some(&1));
    assert_eq!(stats.by_class.get(&'7'), Some(&1));
}

#[test]
fn malformed_amounts_and_blank_fields_do_not_break_the_summary() {
    let mut odd = entry("OD", "9", "", "", Movement::Debit(dec!(1)));
    odd.debit = Amount::Malformed("x".into());
    odd.validation_date = Some("  ".into());
    let stats = summarize(&Ledger::new(vec![odd]));
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.validated, 0);
    assert_eq!(stats.total_debit, Decimal::ZERO);
    assert_eq!(stats.first_date, None);
    assert_eq!(stats.by_class.get(&'?'), Some(&1));
}

#[test]
fn empty_ledger_has_empty_stats() {
    let stats = summarize(&Ledger::default());
    assert_eq!(stats.entries, 0);
    assert!(stats.by_journal.is_empty());
    assert_eq!(stats.last_date, None);
}

#[test]
fn balance_allows_the_configured_tolerance() {
    let stats = summarize(&Ledger::new(vec![
        entry("OD", "1", "20240105", "471000", Movement::Debit(dec!(100.01))),
        entry("OD", "1", "20240105", "512000", Movement::Credit(dec!(100))),
    ]));
    assert!(stats.is_balanced(dec!(0.01)));
    assert!(!stats.is_balanced(Decimal::ZERO));
}

#[test]
fn oversized_totals_saturate_instead_of_panicking() {
    let stats = summarize(&Ledger::new(vec![
        entry("OD", "1", "20240105", "471000", Movement::Debit(Decimal::MAX)),
        entry("OD", "2", "20240105", "471000", Movement::Debit(Decimal::MAX)),
        entry("OD", "3", "20240105", "512000", Movement::Credit(Decimal::MAX)),
    ]));
    assert!(stats.totals_overflowed);
    assert_eq!(stats.total_debit, Decimal::MAX);
    assert_eq!(stats.total_credit, Decimal::MAX);
    assert!(!stats.is_balanced(dec!(0.01)));
}
