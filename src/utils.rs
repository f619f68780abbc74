// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

use crate::models::PeriodFilter;

const UA: &str = concat!("jointfund/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Parse `YYYY-MM` into the first instant of that month.
pub fn parse_month(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    d.and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid month '{}'", s))
}

/// Month filter from an optional `--month` value, defaulting to the current local month.
pub fn period_from_arg(month: Option<&String>) -> Result<PeriodFilter> {
    let now = match month {
        Some(m) => parse_month(m)?,
        None => Local::now().naive_local(),
    };
    Ok(PeriodFilter::month_of(now))
}

/// Whole-unit amount with thousands separators, e.g. `-1,250,000`.
pub fn fmt_amount(d: &Decimal) -> String {
    let rounded = d.round_dp(0);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn fmt_signed(d: &Decimal) -> String {
    if d.is_sign_positive() && !d.is_zero() {
        format!("+{}", fmt_amount(d))
    } else {
        fmt_amount(d)
    }
}

pub fn fmt_percent(ratio: &Decimal) -> String {
    format!("{:.1}%", (*ratio * Decimal::ONE_HUNDRED).round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
