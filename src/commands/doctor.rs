// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{month_period, run_pipeline};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let period = month_period(m)?;
    let report = run_pipeline(m, period)?;
    let normalized = &report.normalized;

    if maybe_print_json(json_flag, jsonl_flag, &normalized.rejections)? {
        return Ok(());
    }

    let mut rows = Vec::new();
    for r in &normalized.rejections {
        let place = match r.line {
            Some(line) => format!("line {}", line),
            None => format!("row {}", r.row + 1),
        };
        rows.push(vec!["dropped_row".into(), format!("{}: {}", place, r.reason)]);
    }
    if normalized.degraded_amounts > 0 {
        rows.push(vec![
            "amount_as_zero".into(),
            format!("{} row(s)", normalized.degraded_amounts),
        ]);
    }

    if rows.is_empty() {
        println!(
            "doctor: no issues found ({} rows)",
            normalized.transactions.len()
        );
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
