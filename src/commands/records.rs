// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{month_period, run_pipeline};
use crate::models::{PeriodFilter, Transaction};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let period = if m.get_flag("all") {
        PeriodFilter::All
    } else {
        month_period(m)?
    };
    let report = run_pipeline(m, period)?;
    let data = recent(
        &report.normalized.transactions,
        &period,
        m.get_one::<usize>("limit").copied(),
    );

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    t.actor.clone(),
                    t.category.clone(),
                    t.item.clone(),
                    fmt_amount(&t.amount),
                    t.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Time", "Actor", "Category", "Item", "Amount", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

/// Transactions inside `period`, newest first; ties keep the later sheet row first.
pub fn recent<'a>(
    transactions: &'a [Transaction],
    period: &PeriodFilter,
    limit: Option<usize>,
) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = transactions.iter().filter(|t| period.contains(t)).collect();
    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.row.cmp(&a.row)));
    if let Some(n) = limit {
        out.truncate(n);
    }
    out
}
