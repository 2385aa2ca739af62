// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column names of a FEC record, in wire order.
pub const FIELDS: [&str; 18] = [
    "JournalCode",
    "JournalLib",
    "EcritureNum",
    "EcritureDate",
    "CompteNum",
    "CompteLib",
    "CompAuxNum",
    "CompAuxLib",
    "PieceRef",
    "PieceDate",
    "EcritureLib",
    "Debit",
    "Credit",
    "EcritureLet",
    "DateLet",
    "ValidDate",
    "Montantdevise",
    "Idevise",
];

pub const FIELD_COUNT: usize = FIELDS.len();

/// A monetary cell as found on the wire.
///
/// Cells that do not read as a decimal number are kept verbatim so the
/// validator can point at them and the serializer can write them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Value(Decimal),
    Malformed(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Value(Decimal::ZERO)
    }
}

impl Amount {
    /// Reads a French decimal-comma cell ("1234,56"). Empty cells are zero.
    pub fn from_wire(raw: &str) -> Amount {
        let raw = raw.trim();
        if raw.is_empty() {
            return Amount::Value(Decimal::ZERO);
        }
        match Decimal::from_str(&raw.replace(',', ".")) {
            Ok(d) => Amount::Value(d),
            Err(_) => Amount::Malformed(raw.to_string()),
        }
    }

    /// Like [from_wire](Amount::from_wire) but empty cells are absent.
    pub fn from_wire_opt(raw: &str) -> Option<Amount> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Amount::from_wire(raw))
        }
    }

    /// Fixed two-decimal magnitude with a comma separator.
    pub fn to_wire(&self) -> String {
        match self {
            Amount::Value(d) => format!("{:.2}", d.abs()).replace('.', ","),
            Amount::Malformed(raw) => raw.clone(),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Value(d) => Some(*d),
            Amount::Malformed(_) => None,
        }
    }

    /// Parsed value, with malformed cells counting as zero.
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount::Value(d)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(d) => write!(f, "{:.2}", d),
            Amount::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// The single nonzero side of a well-formed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Debit(Decimal),
    Credit(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Debit => f.write_str("debit"),
            Side::Credit => f.write_str("credit"),
        }
    }
}

/// Why an entry does not carry exactly one nonzero side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MovementError {
    #[error("debit and credit are both zero")]
    BothZero,
    #[error("debit and credit are both nonzero")]
    BothNonZero,
    #[error("{side} '{raw}' is not a number")]
    Malformed { side: Side, raw: String },
}

/// Plan Comptable Général account classes, selected by the first digit of
/// an account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountClass {
    Capital,
    FixedAssets,
    Inventory,
    ThirdParties,
    Financial,
    Expenses,
    Revenues,
    Special,
}

impl AccountClass {
    pub fn from_digit(c: char) -> Option<AccountClass> {
        match c {
            '1' => Some(AccountClass::Capital),
            '2' => Some(AccountClass::FixedAssets),
            '3' => Some(AccountClass::Inventory),
            '4' => Some(AccountClass::ThirdParties),
            '5' => Some(AccountClass::Financial),
            '6' => Some(AccountClass::Expenses),
            '7' => Some(AccountClass::Revenues),
            '8' => Some(AccountClass::Special),
            _ => None,
        }
    }

    pub fn from_account(account_number: &str) -> Option<AccountClass> {
        account_number.chars().next().and_then(AccountClass::from_digit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountClass::Capital => "Comptes de capitaux",
            AccountClass::FixedAssets => "Comptes d'immobilisations",
            AccountClass::Inventory => "Comptes de stocks et en-cours",
            AccountClass::ThirdParties => "Comptes de tiers",
            AccountClass::Financial => "Comptes financiers",
            AccountClass::Expenses => "Comptes de charges",
            AccountClass::Revenues => "Comptes de produits",
            AccountClass::Special => "Comptes spéciaux",
        }
    }
}

/// One ledger line. JSON keys are the FEC column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(rename = "JournalCode")]
    pub journal_code: String,
    #[serde(rename = "JournalLib")]
    pub journal_label: String,
    #[serde(rename = "EcritureNum")]
    pub entry_number: String,
    #[serde(rename = "EcritureDate")]
    pub entry_date: String, // YYYYMMDD
    #[serde(rename = "CompteNum")]
    pub account_number: String,
    #[serde(rename = "CompteLib")]
    pub account_label: String,
    #[serde(rename = "CompAuxNum", default, skip_serializing_if = "Option::is_none")]
    pub aux_account_number: Option<String>,
    #[serde(rename = "CompAuxLib", default, skip_serializing_if = "Option::is_none")]
    pub aux_account_label: Option<String>,
    #[serde(rename = "PieceRef")]
    pub document_ref: String,
    #[serde(rename = "PieceDate")]
    pub document_date: String, // YYYYMMDD
    #[serde(rename = "EcritureLib")]
    pub entry_label: String,
    #[serde(rename = "Debit", default)]
    pub debit: Amount,
    #[serde(rename = "Credit", default)]
    pub credit: Amount,
    #[serde(rename = "EcritureLet", default, skip_serializing_if = "Option::is_none")]
    pub reconciliation_mark: Option<String>,
    #[serde(rename = "DateLet", default, skip_serializing_if = "Option::is_none")]
    pub reconciliation_date: Option<String>,
    #[serde(rename = "ValidDate", default, skip_serializing_if = "Option::is_none")]
    pub validation_date: Option<String>,
    #[serde(rename = "Montantdevise", default, skip_serializing_if = "Option::is_none")]
    pub foreign_amount: Option<Amount>,
    #[serde(rename = "Idevise", default, skip_serializing_if = "Option::is_none")]
    pub foreign_currency: Option<String>,
}

impl Entry {
    /// Sets debit and credit from a single movement.
    pub fn with_movement(mut self, movement: Movement) -> Entry {
        let (debit, credit) = match movement {
            Movement::Debit(d) => (d, Decimal::ZERO),
            Movement::Credit(c) => (Decimal::ZERO, c),
        };
        self.debit = Amount::Value(debit);
        self.credit = Amount::Value(credit);
        self
    }

    /// The entry's amount as a single tagged side, if it has exactly one
    /// nonzero side.
    pub fn movement(&self) -> Result<Movement, MovementError> {
        let debit = match &self.debit {
            Amount::Value(d) => *d,
            Amount::Malformed(raw) => {
                return Err(MovementError::Malformed {
                    side: Side::Debit,
                    raw: raw.clone(),
                });
            }
        };
        let credit = match &self.credit {
            Amount::Value(c) => *c,
            Amount::Malformed(raw) => {
                return Err(MovementError::Malformed {
                    side: Side::Credit,
                    raw: raw.clone(),
                });
            }
        };
        match (debit.is_zero(), credit.is_zero()) {
            (true, true) => Err(MovementError::BothZero),
            (false, false) => Err(MovementError::BothNonZero),
            (false, true) => Ok(Movement::Debit(debit)),
            (true, false) => Ok(Movement::Credit(credit)),
        }
    }

    pub fn account_class(&self) -> Option<AccountClass> {
        AccountClass::from_account(&self.account_number)
    }

    pub fn is_validated(&self) -> bool {
        self.validation_date
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// An ordered sequence of entries handled as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new(entries: Vec<Entry>) -> Ledger {
        Ledger { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How issues refer to the entry at `position` (0-based): its entry
    /// number, or its 1-based line in the ledger when the number is blank.
    pub fn identifier(&self, position: usize) -> String {
        match self.entries.get(position) {
            Some(e) if !e.entry_number.trim().is_empty() => e.entry_number.clone(),
            _ => format!("line {}", position + 1),
        }
    }
}

impl From<Vec<Entry>> for Ledger {
    fn from(entries: Vec<Entry>) -> Self {
        Ledger::new(entries)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
