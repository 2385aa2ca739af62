// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::FecConfig;
use crate::models::AccountClass;
use crate::parser;
use crate::stats::{Stats, summarize};
use crate::utils::{display_fec_date, fmt_money, maybe_print_json, pretty_table, read_fec_text};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(cfg: &FecConfig, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let stats = stats_for(Path::new(path))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        return Ok(());
    }

    let date = |d: &Option<String>| d.as_deref().map(display_fec_date).unwrap_or_default();
    let overview = vec![
        vec!["Entries".to_string(), stats.entries.to_string()],
        vec!["Validated".to_string(), stats.validated.to_string()],
        vec!["Total debit".to_string(), fmt_money(&stats.total_debit)],
        vec!["Total credit".to_string(), fmt_money(&stats.total_credit)],
        vec!["Totals overflowed".to_string(), stats.totals_overflowed.to_string()],
        vec!["Balanced".to_string(), stats.is_balanced(cfg.balance_tolerance).to_string()],
        vec!["First date".to_string(), date(&stats.first_date)],
        vec!["Last date".to_string(), date(&stats.last_date)],
    ];
    println!("{}", pretty_table(&["Figure", "Value"], overview));

    let journals = stats
        .by_journal
        .iter()
        .map(|(code, n)| vec![code.clone(), n.to_string()])
        .collect();
    println!("{}", pretty_table(&["Journal", "Entries"], journals));

    let classes = stats
        .by_class
        .iter()
        .map(|(c, n)| {
            let label = AccountClass::from_digit(*c)
                .map(|k| k.label())
                .unwrap_or("(unknown class)");
            vec![c.to_string(), label.to_string(), n.to_string()]
        })
        .collect();
    println!("{}", pretty_table(&["Class", "Label", "Entries"], classes));
    Ok(())
}

pub fn stats_for(path: &Path) -> Result<Stats> {
    let text = read_fec_text(path)?;
    let ledger =
        parser::parse(&text).with_context(|| format!("Parse FEC file {}", path.display()))?;
    Ok(summarize(&ledger))
}
