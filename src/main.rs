// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feckit::{cli, commands, config};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feckit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = config::load(matches.get_one::<String>("config").map(Path::new))?;

    match matches.subcommand() {
        Some(("check", sub)) => commands::check::handle(&cfg, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&cfg, sub)?,
        Some(("import", sub)) => commands::importer::handle(&cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
