// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Feckit", "feckit"));

/// Tunables of the compliance rules. Any key missing from a config file
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FecConfig {
    /// Journal codes that do not raise an UNKNOWN_JOURNAL warning.
    pub known_journals: Vec<String>,
    /// Account-number prefix of VAT accounts.
    pub vat_prefix: String,
    /// Largest accepted gap between debit and credit totals of a piece.
    pub balance_tolerance: Decimal,
    /// Upper bound for a single debit or credit.
    pub max_amount: Decimal,
}

impl Default for FecConfig {
    fn default() -> Self {
        FecConfig {
            known_journals: ["AC", "VE", "BQ", "CA", "OD", "AN"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vat_prefix: "445".to_string(),
            balance_tolerance: Decimal::new(1, 2),
            max_amount: Decimal::new(99_999_999_999_999, 2),
        }
    }
}

impl FecConfig {
    pub fn is_known_journal(&self, code: &str) -> bool {
        self.known_journals.iter().any(|k| k == code)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

/// Loads the rule configuration.
///
/// An explicit path must exist. Without one, the platform config file is
/// read when present and the defaults are used otherwise.
pub fn load(explicit: Option<&Path>) -> Result<FecConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(anyhow!("Config file {} does not exist", p.display()));
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => {
                tracing::debug!("no config file found, using defaults");
                return Ok(FecConfig::default());
            }
        },
    };
    let raw =
        fs::read_to_string(&path).with_context(|| format!("Read config {}", path.display()))?;
    let cfg: FecConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}
