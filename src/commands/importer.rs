// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::FecConfig;
use crate::parser;
use crate::utils::read_fec_text;
use crate::validator::Validator;
use anyhow::{Context, Result, anyhow};
use std::path::Path;

pub fn handle(cfg: &FecConfig, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let out = sub.get_one::<String>("out").context("out missing")?.trim();
    let written = import_file(cfg, Path::new(path), Path::new(out))?;
    println!("Imported {} entries from {} into {}", written, path, out);
    Ok(())
}

/// Parses and validates a FEC file, then writes its ledger as JSON.
/// Nothing is written when the ledger has blocking errors.
pub fn import_file(cfg: &FecConfig, path: &Path, out: &Path) -> Result<usize> {
    let text = read_fec_text(path)?;
    let parsed = parser::parse_with_report(&text)
        .with_context(|| format!("Parse FEC file {}", path.display()))?;
    for s in &parsed.skipped {
        eprintln!(
            "Skipped line {} ({} columns instead of 18)",
            s.line, s.found_columns
        );
    }

    let report = Validator::new(cfg.clone()).validate(&parsed.ledger);
    for w in &report.warnings {
        eprintln!("warning: {}", w.message);
    }
    if !report.valid {
        for e in &report.errors {
            eprintln!("error: {}", e.message);
        }
        return Err(anyhow!(
            "Refusing to import {}: {} blocking error(s)",
            path.display(),
            report.errors.len()
        ));
    }

    let json = serde_json::to_string_pretty(&parsed.ledger)?;
    std::fs::write(out, json).with_context(|| format!("Write ledger {}", out.display()))?;
    tracing::info!(entries = parsed.ledger.len(), out = %out.display(), "imported FEC file");
    Ok(parsed.ledger.len())
}
