// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::FecConfig;
use crate::parser::{self, SkippedLine};
use crate::utils::{pretty_table, read_fec_text};
use crate::validator::{Report, Validator};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub path: String,
    pub entries: usize,
    pub skipped: Vec<SkippedLine>,
    pub report: Report,
}

pub fn handle(cfg: &FecConfig, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let outcome = run(cfg, Path::new(path))?;

    if sub.get_flag("json") || sub.get_flag("jsonl") {
        crate::utils::maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &outcome)?;
    } else {
        print_outcome(&outcome);
    }

    if !outcome.report.valid {
        return Err(anyhow!(
            "{} blocking error(s) in {}",
            outcome.report.errors.len(),
            outcome.path
        ));
    }
    Ok(())
}

/// Parses and validates one file.
pub fn run(cfg: &FecConfig, path: &Path) -> Result<CheckOutcome> {
    let text = read_fec_text(path)?;
    let parsed = parser::parse_with_report(&text)
        .with_context(|| format!("Parse FEC file {}", path.display()))?;
    let report = Validator::new(cfg.clone()).validate(&parsed.ledger);
    Ok(CheckOutcome {
        path: path.display().to_string(),
        entries: parsed.ledger.len(),
        skipped: parsed.skipped,
        report,
    })
}

fn print_outcome(outcome: &CheckOutcome) {
    println!("{}: {} entries", outcome.path, outcome.entries);
    if !outcome.skipped.is_empty() {
        let rows = outcome
            .skipped
            .iter()
            .map(|s| vec![s.line.to_string(), s.found_columns.to_string()])
            .collect();
        println!("{}", pretty_table(&["Skipped line", "Columns"], rows));
    }
    let rows: Vec<Vec<String>> = outcome
        .report
        .issues()
        .map(|i| {
            vec![
                format!("{:?}", i.kind.severity()).to_lowercase(),
                i.kind.to_string(),
                i.entry.clone().unwrap_or_default(),
                i.message.clone(),
            ]
        })
        .collect();
    if rows.is_empty() {
        println!("✅ no issues found");
    } else {
        println!(
            "{}",
            pretty_table(&["Severity", "Kind", "Entry", "Message"], rows)
        );
    }
}
