// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::FecConfig;
use crate::encoding::{ENCODING_ADVISORY, to_latin1};
use crate::models::Ledger;
use crate::serializer::serialize;
use crate::utils::{fec_file_name, parse_date};
use crate::validator::Validator;
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

pub fn handle(cfg: &FecConfig, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let target = match sub.get_one::<String>("out") {
        Some(out) => PathBuf::from(out.trim()),
        None => {
            let siren = sub.get_one::<String>("siren").context("siren missing")?;
            let closing = sub.get_one::<String>("closing").context("closing missing")?;
            let dir = sub.get_one::<String>("dir").map(String::as_str).unwrap_or(".");
            Path::new(dir.trim()).join(fec_file_name(siren, parse_date(closing.trim())?)?)
        }
    };
    let utf8 = sub.get_flag("utf8");

    export_file(cfg, Path::new(path), &target, utf8)?;
    if utf8 {
        eprintln!("⚠ {}", ENCODING_ADVISORY);
    } else {
        println!("Encoded as ISO-8859-1");
    }
    println!("Exported ledger to {}", target.display());
    Ok(())
}

/// Reads a JSON ledger and writes it as a FEC file, transcoded to
/// ISO-8859-1 unless `utf8` is set. Nothing is written on failure.
pub fn export_file(cfg: &FecConfig, path: &Path, target: &Path, utf8: bool) -> Result<()> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Open ledger {}", path.display()))?;
    let ledger: Ledger = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON ledger {}", path.display()))?;

    let report = Validator::new(cfg.clone()).validate(&ledger);
    if !report.valid {
        for e in &report.errors {
            eprintln!("error: {}", e.message);
        }
        return Err(anyhow!(
            "Refusing to export {}: {} blocking error(s)",
            path.display(),
            report.errors.len()
        ));
    }
    for w in &report.warnings {
        eprintln!("warning: {}", w.message);
    }

    let text = serialize(&ledger)?;
    let bytes = if utf8 {
        text.into_bytes()
    } else {
        to_latin1(&text)?
    };
    std::fs::write(target, bytes).with_context(|| format!("Write {}", target.display()))?;
    tracing::info!(entries = ledger.len(), target = %target.display(), "exported FEC file");
    Ok(())
}
