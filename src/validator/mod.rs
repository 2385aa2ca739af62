// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compliance checks over a whole ledger.
//!
//! Every rule runs on every call and all findings are collected; nothing
//! short-circuits. Findings are split into blocking errors and advisory
//! warnings by the severity of their kind.

pub mod rules;

use crate::config::FecConfig;
use crate::models::Ledger;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    EmptyLedger,
    EntryInvalid,
    BalanceError,
    DuplicateNum,
    ChronologyWarning,
    VatWarning,
    UnknownJournal,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::EmptyLedger
            | IssueKind::EntryInvalid
            | IssueKind::BalanceError
            | IssueKind::DuplicateNum => Severity::Error,
            IssueKind::ChronologyWarning | IssueKind::VatWarning | IssueKind::UnknownJournal => {
                Severity::Warning
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::EmptyLedger => "EMPTY_LEDGER",
            IssueKind::EntryInvalid => "ENTRY_INVALID",
            IssueKind::BalanceError => "BALANCE_ERROR",
            IssueKind::DuplicateNum => "DUPLICATE_NUM",
            IssueKind::ChronologyWarning => "CHRONOLOGY_WARNING",
            IssueKind::VatWarning => "VAT_WARNING",
            IssueKind::UnknownJournal => "UNKNOWN_JOURNAL",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    /// Entry number of the offending entry, or `line N` when it has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Issue {
        Issue {
            kind,
            message: message.into(),
            entry: None,
        }
    }

    pub fn for_entry(mut self, entry: impl Into<String>) -> Issue {
        self.entry = Some(entry.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Report {
    fn from_issues(issues: Vec<Issue>) -> Report {
        let (errors, warnings): (Vec<Issue>, Vec<Issue>) = issues
            .into_iter()
            .partition(|i| i.kind.severity() == Severity::Error);
        Report {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues().filter(|i| i.kind == kind).count()
    }
}

/// What a rule gets to look at.
pub struct LedgerContext<'a> {
    pub ledger: &'a Ledger,
    pub config: &'a FecConfig,
}

/// One statutory check. Rules are independent of each other and only
/// append to `issues`.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &LedgerContext<'_>, issues: &mut Vec<Issue>);
}

pub struct Validator {
    config: FecConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    /// A validator running the standard rules, in order: entry fields,
    /// piece balance, chronology, duplicate numbers, VAT amounts, journal
    /// codes.
    pub fn new(config: FecConfig) -> Validator {
        Validator {
            config,
            rules: vec![
                Box::new(rules::EntryFields),
                Box::new(rules::PieceBalance),
                Box::new(rules::Chronology),
                Box::new(rules::DuplicateNumbers),
                Box::new(rules::VatAmounts),
                Box::new(rules::JournalCodes),
            ],
        }
    }

    /// Appends a rule after the ones already installed.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Validator {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, ledger: &Ledger) -> Report {
        if ledger.is_empty() {
            return Report::from_issues(vec![Issue::new(
                IssueKind::EmptyLedger,
                "the ledger has no entries",
            )]);
        }
        let ctx = LedgerContext {
            ledger,
            config: &self.config,
        };
        let mut issues = Vec::new();
        for rule in &self.rules {
            let before = issues.len();
            rule.check(&ctx, &mut issues);
            tracing::debug!(rule = rule.name(), found = issues.len() - before, "rule checked");
        }
        let report = Report::from_issues(issues);
        tracing::debug!(
            entries = ledger.len(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated ledger"
        );
        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(FecConfig::default())
    }
}

/// Validates with the default configuration.
pub fn validate(ledger: &Ledger) -> Report {
    Validator::default().validate(ledger)
}
