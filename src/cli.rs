// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn path_arg() -> Arg {
    Arg::new("path")
        .help("FEC file to read")
        .required(true)
        .value_name("PATH")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue)
            .conflicts_with("json"),
    )
}

pub fn build_cli() -> Command {
    command!()
        .name("feckit")
        .about("Parse, validate and write FEC (Fichier des Ecritures Comptables) ledgers")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Rule configuration (JSON); defaults to the platform config file"),
        )
        .subcommand(json_flags(
            Command::new("check")
                .about("Validate a FEC file and list errors and warnings")
                .arg(path_arg()),
        ))
        .subcommand(json_flags(
            Command::new("stats")
                .about("Summarize a FEC file")
                .arg(path_arg()),
        ))
        .subcommand(
            Command::new("import")
                .about("Parse and validate a FEC file, then write its entries as JSON")
                .arg(path_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_name("PATH")
                        .help("JSON ledger to write"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write a JSON ledger as a FEC file")
                .arg(
                    Arg::new("path")
                        .help("JSON ledger to read")
                        .required(true)
                        .value_name("PATH"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("PATH")
                        .help("FEC file to write")
                        .required_unless_present_all(["siren", "closing"])
                        .conflicts_with_all(["siren", "closing"]),
                )
                .arg(
                    Arg::new("siren")
                        .long("siren")
                        .value_name("SIREN")
                        .requires("closing")
                        .help("Company SIREN, used for the statutory file name"),
                )
                .arg(
                    Arg::new("closing")
                        .long("closing")
                        .value_name("YYYY-MM-DD")
                        .requires("siren")
                        .help("Fiscal year closing date, used for the statutory file name"),
                )
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .value_name("DIR")
                        .default_value(".")
                        .help("Directory for the statutory file name"),
                )
                .arg(
                    Arg::new("utf8")
                        .long("utf8")
                        .help("Keep UTF-8 instead of transcoding to ISO-8859-1")
                        .action(ArgAction::SetTrue),
                ),
        )
}
