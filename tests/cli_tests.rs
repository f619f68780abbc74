// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use jointfund::commands::{doctor, records, settings, summary};
use jointfund::config::{self, Config};
use jointfund::models::{PeriodFilter, Transaction};
use jointfund::{cli, utils};
use rust_decimal::Decimal;
use tempfile::{NamedTempFile, tempdir};

fn sheet() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "타임스탬프,주체,구분,항목,금액\n2025-03-01 09:00:00,나,각출,,\"1,000\"\nbad,나,각출,,1"
    )
    .unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn config_init_writes_defaults_and_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let path_str = path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from(["jointfund", "config", "init", "--path", &path_str]);
    if let Some(("config", m)) = matches.subcommand() {
        settings::handle(m).unwrap();
    } else {
        panic!("config command not parsed");
    }
    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded, Config::default());

    let err = settings::init(&path, false).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    settings::init(&path, true).unwrap();
}

#[test]
fn partial_config_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"source": "https://example.com/x.csv", "targets": {{"actors": {{"me": 10}}, "total": "10"}}}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let cfg = config::load(Some(file.path())).unwrap();
    assert_eq!(cfg.source.as_deref(), Some("https://example.com/x.csv"));
    assert_eq!(cfg.targets.actors["me"], Decimal::from(10));
    assert_eq!(cfg.keywords.inflow, vec!["각출".to_string()]);
    assert_eq!(cfg.columns.actor, "주체");
    assert_eq!(cfg.aggregation().actors, vec!["me".to_string()]);
}

#[test]
fn malformed_config_names_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();
    file.flush().unwrap();
    let err = config::load(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("Invalid config file"));
}

#[test]
fn summary_and_doctor_run_against_file_source() {
    let file = sheet();
    let src = file.path().to_string_lossy().to_string();

    for (cmd, json) in [("summary", "--json"), ("summary", "--jsonl"), ("doctor", "--json")] {
        let matches = cli::build_cli().get_matches_from([
            "jointfund", cmd, "--source", &src, "--month", "2025-03", json,
        ]);
        match matches.subcommand() {
            Some(("summary", m)) => summary::handle(m).unwrap(),
            Some(("doctor", m)) => doctor::handle(m).unwrap(),
            _ => panic!("command not parsed"),
        }
    }
}

#[test]
fn records_lists_with_limit() {
    let file = sheet();
    let src = file.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "jointfund", "records", "--source", &src, "--all", "--limit", "5",
    ]);
    if let Some(("records", m)) = matches.subcommand() {
        records::handle(m).unwrap();
    } else {
        panic!("records command not parsed");
    }
}

#[test]
fn missing_source_is_reported() {
    let dir = tempdir().unwrap();
    let cfg_path = dir.path().join("config.json");
    config::save_to(&Config::default(), &cfg_path).unwrap();
    let cfg_str = cfg_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from(["jointfund", "summary", "--config", &cfg_str]);
    if let Some(("summary", m)) = matches.subcommand() {
        let err = summary::handle(m).unwrap_err();
        assert!(err.to_string().contains("No source configured"));
    } else {
        panic!("summary command not parsed");
    }
}

#[test]
fn unreachable_source_gives_retry_message() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.csv").to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "jointfund", "summary", "--source", &missing, "--month", "2025-03",
    ]);
    if let Some(("summary", m)) = matches.subcommand() {
        let err = summary::handle(m).unwrap_err();
        assert!(err.to_string().contains("try again later"));
        assert!(format!("{:#}", err).contains("Source unavailable"));
    } else {
        panic!("summary command not parsed");
    }
}

#[test]
fn recent_orders_newest_first() {
    let mk = |row: usize, day: u32| Transaction {
        row,
        timestamp: chrono::NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        actor: String::new(),
        category: String::new(),
        item: String::new(),
        status: String::new(),
        amount: Decimal::ZERO,
    };
    let txs = vec![mk(0, 2), mk(1, 9), mk(2, 9), mk(3, 1)];
    let out = records::recent(&txs, &PeriodFilter::All, Some(3));
    let rows: Vec<usize> = out.iter().map(|t| t.row).collect();
    assert_eq!(rows, vec![2, 1, 0]);
}

#[test]
fn month_argument_and_formatting() {
    let p = utils::period_from_arg(Some(&" 2025-03 ".to_string())).unwrap();
    assert_eq!(p, PeriodFilter::Month { year: 2025, month: 3 });
    assert_eq!(p.label(), "2025-03");
    assert!(utils::parse_month("2025-13").is_err());

    assert_eq!(utils::fmt_amount(&Decimal::from(1_250_000)), "1,250,000");
    assert_eq!(utils::fmt_amount(&Decimal::from(-476_000)), "-476,000");
    assert_eq!(utils::fmt_amount(&Decimal::new(9995, 1)), "1,000");
    assert_eq!(utils::fmt_amount(&Decimal::ZERO), "0");
    assert_eq!(utils::fmt_signed(&Decimal::from(20)), "+20");
    assert_eq!(utils::fmt_percent(&Decimal::new(5, 1)), "50.0%");
}
