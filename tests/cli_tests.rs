// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use feckit::commands::{check, exporter, importer, stats};
use feckit::config::{self, FecConfig};
use feckit::models::{FIELDS, Ledger};
use feckit::{cli, parser};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

const SALE: &str =
    "VE|Ventes|1|20240115|707000|Ventes|||F001|20240115|Vente marchandise|0|1000,00|||20240116||";
const CUSTOMER: &str =
    "VE|Ventes|2|20240115|411000|Client Hélène|||F001|20240115|Vente marchandise|1000,00|0|||20240116||";

fn fec_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut text = FIELDS.join("|");
    for l in lines {
        text.push_str("\r\n");
        text.push_str(l);
    }
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    let cfg = FecConfig::default();
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("check", sub)) => check::handle(&cfg, sub),
        Some(("stats", sub)) => stats::handle(&cfg, sub),
        Some(("import", sub)) => importer::handle(&cfg, sub),
        Some(("export", sub)) => exporter::handle(&cfg, sub),
        _ => panic!("no subcommand"),
    }
}

#[test]
fn check_accepts_a_balanced_file() {
    let file = fec_file(&[SALE, CUSTOMER]);
    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    run(&["feckit", "check", &padded]).unwrap();

    let outcome = check::run(&FecConfig::default(), file.path()).unwrap();
    assert_eq!(outcome.entries, 2);
    assert!(outcome.report.valid);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn check_fails_on_blocking_errors_and_lists_skipped_lines() {
    let short = &SALE[..SALE.len() - 1];
    let file = fec_file(&[SALE, short]);
    let path = file.path().to_str().unwrap().to_string();
    assert!(run(&["feckit", "check", "--json", &path]).is_err());

    let outcome = check::run(&FecConfig::default(), file.path()).unwrap();
    assert_eq!(outcome.entries, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(!outcome.report.valid);
}

#[test]
fn check_reads_latin1_files() {
    let mut file = NamedTempFile::new().unwrap();
    let text = format!("{}\r\n{}\r\n{}", FIELDS.join("|"), SALE, CUSTOMER);
    file.write_all(&feckit::encoding::to_latin1(&text).unwrap())
        .unwrap();
    file.flush().unwrap();

    let outcome = check::run(&FecConfig::default(), file.path()).unwrap();
    assert!(outcome.report.valid);
}

#[test]
fn check_rejects_an_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let err = run(&["feckit", "check", &path]).unwrap_err();
    assert!(format!("{:#}", err).contains("empty file"));
}

#[test]
fn import_writes_a_json_ledger() {
    let file = fec_file(&[SALE, CUSTOMER]);
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.json");
    let out_str = out.to_string_lossy().to_string();
    let path = file.path().to_str().unwrap().to_string();
    run(&["feckit", "import", &path, "--out", &out_str]).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["EcritureNum"], "1");
    assert_eq!(json[0]["Credit"], "1000.00");
    assert_eq!(json[1]["CompteLib"], "Client Hélène");

    let ledger: Ledger = serde_json::from_str(&raw).unwrap();
    assert_eq!(ledger.entries()[1].debit.value(), Some(dec!(1000)));
}

#[test]
fn import_refuses_an_invalid_ledger() {
    let file = fec_file(&[SALE]);
    let dir = tempdir().unwrap();
    let out = dir.path().join("ledger.json");
    let err = importer::import_file(&FecConfig::default(), file.path(), &out).unwrap_err();
    assert!(err.to_string().contains("1 blocking error"));
    assert!(!out.exists());
}

fn ledger_json() -> (tempfile::TempDir, std::path::PathBuf) {
    let text = format!("{}\r\n{}\r\n{}", FIELDS.join("|"), SALE, CUSTOMER);
    let ledger = parser::parse(&text).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, serde_json::to_string(&ledger).unwrap()).unwrap();
    (dir, path)
}

#[test]
fn export_writes_latin1_with_crlf() {
    let (dir, json) = ledger_json();
    let out = dir.path().join("out.txt");
    let out_str = out.to_string_lossy().to_string();
    let json_str = json.to_string_lossy().to_string();
    run(&["feckit", "export", &json_str, "--out", &out_str]).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"JournalCode|JournalLib|"));
    assert!(bytes.windows(2).any(|w| w == b"\r\n"));
    assert!(bytes.windows(3).any(|w| w == b"H\xe9l"));
    assert!(bytes.windows(13).any(|w| w == b"|0,00|1000,00"));
}

#[test]
fn export_keeps_utf8_on_request() {
    let (dir, json) = ledger_json();
    let out = dir.path().join("out.txt");
    exporter::export_file(&FecConfig::default(), &json, &out, true).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("Client Hélène"));
}

#[test]
fn export_uses_the_statutory_file_name() {
    let (dir, json) = ledger_json();
    let dir_str = dir.path().to_string_lossy().to_string();
    let json_str = json.to_string_lossy().to_string();
    run(&[
        "feckit",
        "export",
        &json_str,
        "--siren",
        "123456789",
        "--closing",
        "2024-12-31",
        "--dir",
        &dir_str,
    ])
    .unwrap();
    assert!(dir.path().join("123456789FEC20241231.txt").exists());

    assert!(
        run(&[
            "feckit",
            "export",
            &json_str,
            "--siren",
            "12345",
            "--closing",
            "2024-12-31",
            "--dir",
            &dir_str,
        ])
        .is_err()
    );
}

#[test]
fn export_refuses_an_empty_ledger() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("empty.json");
    std::fs::write(&json, "[]").unwrap();
    let out = dir.path().join("out.txt");
    assert!(exporter::export_file(&FecConfig::default(), &json, &out, false).is_err());
    assert!(!out.exists());
}

#[test]
fn stats_command_runs() {
    let file = fec_file(&[SALE, CUSTOMER]);
    let path = file.path().to_str().unwrap().to_string();
    run(&["feckit", "stats", "--json", &path]).unwrap();

    let s = stats::stats_for(file.path()).unwrap();
    assert_eq!(s.entries, 2);
    assert!(s.is_balanced(FecConfig::default().balance_tolerance));
}

#[test]
fn config_file_overrides_only_given_keys() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"known_journals": ["VT", "HA"], "balance_tolerance": "0.5"}}"#).unwrap();
    file.flush().unwrap();

    let cfg = config::load(Some(file.path())).unwrap();
    assert_eq!(cfg.known_journals, ["VT", "HA"]);
    assert_eq!(cfg.balance_tolerance, dec!(0.5));
    assert_eq!(cfg.vat_prefix, "445");
    assert_eq!(cfg.max_amount, FecConfig::default().max_amount);
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = tempdir().unwrap();
    assert!(config::load(Some(dir.path().join("missing.json").as_path())).is_err());
}

#[test]
fn statutory_file_name_format() {
    let closing = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(
        feckit::utils::fec_file_name("123456789", closing).unwrap(),
        "123456789FEC20241231.txt"
    );
    assert!(feckit::utils::fec_file_name("12345678A", closing).is_err());
}
