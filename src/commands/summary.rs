// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{month_period, run_pipeline};
use crate::pipeline::Report;
use crate::utils::{fmt_amount, fmt_percent, fmt_signed, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let period = month_period(m)?;
    let report = run_pipeline(m, period)?;
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &Report) {
    let agg = &report.aggregate;
    let progress = &report.progress;
    println!("Period {}  ({})", agg.period.label(), report.source);

    let rows: Vec<Vec<String>> = progress
        .actors
        .iter()
        .map(|(actor, p)| {
            vec![
                actor.clone(),
                fmt_amount(&p.actual),
                fmt_amount(&p.target),
                fmt_signed(&p.delta),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Actor", "Contributed", "Target", "Delta"], rows)
    );

    let totals = vec![
        vec!["Contributions".to_string(), fmt_amount(&agg.contribution_total)],
        vec!["Expenditure".to_string(), fmt_amount(&agg.expenditure_total)],
        vec!["Reserve".to_string(), fmt_amount(&agg.reserve_balance)],
        vec![
            "Target progress".to_string(),
            format!(
                "{} of {}",
                fmt_percent(&progress.ratio),
                fmt_amount(&progress.total_target)
            ),
        ],
        vec![
            "Recorded reserve".to_string(),
            match &agg.manual_reserve {
                Some(e) => format!("{} ({})", fmt_amount(&e.amount), e.timestamp.date()),
                None => "-".to_string(),
            },
        ],
    ];
    println!("{}", pretty_table(&["Total", "Amount"], totals));

    if !agg.obligations.is_empty() {
        let rows: Vec<Vec<String>> = agg
            .obligations
            .iter()
            .map(|(name, st)| {
                vec![
                    name.clone(),
                    if st.done { "done" } else { "pending" }.to_string(),
                    fmt_amount(&st.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Obligation", "Status", "Paid"], rows));
    }

    if report.dropped_rows > 0 {
        println!(
            "{} row(s) skipped for unreadable timestamps; run `jointfund doctor` for details.",
            report.dropped_rows
        );
    }
}
