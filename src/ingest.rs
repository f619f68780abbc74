// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RowRejection;
use crate::models::{Normalized, RawRow, RowRejected, Transaction};

pub const DEFAULT_AMOUNT_COLUMN: &str = "금액";

/// Which source columns feed which transaction fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnHints {
    /// Falls back to the first column when unset or missing from a row.
    pub timestamp: Option<String>,
    /// Falls back to [`DEFAULT_AMOUNT_COLUMN`] when unset or missing from a row.
    pub amount: Option<String>,
    pub actor: String,
    pub category: String,
    pub item: String,
    pub status: String,
}

impl Default for ColumnHints {
    fn default() -> Self {
        Self {
            timestamp: None,
            amount: None,
            actor: "주체".to_string(),
            category: "구분".to_string(),
            item: "항목".to_string(),
            status: "상태".to_string(),
        }
    }
}

/// Strategy for locating one field's cell inside a raw row.
pub trait ColumnResolver {
    fn resolve<'a>(&self, row: &'a RawRow) -> Option<&'a str>;
}

/// Hinted column if the row has it, otherwise the row's first cell.
pub struct NamedOrFirst<'h>(pub Option<&'h str>);

impl ColumnResolver for NamedOrFirst<'_> {
    fn resolve<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        self.0.and_then(|name| row.get(name)).or_else(|| row.first())
    }
}

/// Hinted column if the row has it, otherwise a well-known column name.
pub struct NamedOrDefault<'h> {
    pub hint: Option<&'h str>,
    pub default: &'h str,
}

impl ColumnResolver for NamedOrDefault<'_> {
    fn resolve<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        self.hint
            .and_then(|name| row.get(name))
            .or_else(|| row.get(self.default))
    }
}

/// Exactly the named column; absent columns resolve to nothing.
pub struct Named<'h>(pub &'h str);

impl ColumnResolver for Named<'_> {
    fn resolve<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        row.get(self.0)
    }
}

/// Turn raw rows into transactions. Rows with an unreadable timestamp are
/// dropped and recorded; unreadable amounts become zero.
pub fn normalize(rows: &[RawRow], hints: &ColumnHints) -> Normalized {
    let ts_col = NamedOrFirst(hints.timestamp.as_deref());
    let amount_col = NamedOrDefault {
        hint: hints.amount.as_deref(),
        default: DEFAULT_AMOUNT_COLUMN,
    };
    let actor_col = Named(&hints.actor);
    let category_col = Named(&hints.category);
    let item_col = Named(&hints.item);
    let status_col = Named(&hints.status);

    let mut out = Normalized::default();
    for (idx, row) in rows.iter().enumerate() {
        let ts_raw = ts_col.resolve(row).unwrap_or("");
        let Some(timestamp) = parse_timestamp(ts_raw) else {
            tracing::debug!(row = idx, value = ts_raw, "dropping row with unparsable timestamp");
            out.rejections.push(RowRejected {
                row: idx,
                line: row.line(),
                reason: RowRejection::UnparsableTimestamp(ts_raw.to_string()),
            });
            out.dropped += 1;
            continue;
        };

        let amount_raw = amount_col.resolve(row);
        let amount = match amount_raw.and_then(parse_amount) {
            Some(a) => a,
            None => {
                tracing::debug!(row = idx, value = ?amount_raw, "amount degraded to zero");
                out.degraded_amounts += 1;
                Decimal::ZERO
            }
        };

        out.transactions.push(Transaction {
            row: idx,
            timestamp,
            actor: actor_col.resolve(row).unwrap_or_default().to_string(),
            category: category_col.resolve(row).unwrap_or_default().to_string(),
            item: item_col.resolve(row).unwrap_or_default().to_string(),
            status: status_col.resolve(row).unwrap_or_default().to_string(),
            amount,
        });
    }

    if out.degraded_amounts > 0 {
        tracing::warn!(count = out.degraded_amounts, "rows with unreadable amounts counted as zero");
    }
    tracing::info!(
        kept = out.transactions.len(),
        dropped = out.dropped,
        "normalized sheet rows"
    );
    out
}

// "2025. 1. 20." / "2025.01.20" style dates from Korean-locale sheets.
static DOTTED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})\.\s*(\d{1,2})\.\s*(\d{1,2})\.?").expect("valid dotted date regex")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a sheet timestamp, accepting the Korean `오전`/`오후` day-half markers.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let s = s.replace("오전", "AM").replace("오후", "PM");
    let s = DOTTED_DATE.replace(&s, "$1-$2-$3").into_owned();

    // Sheets writes the marker before the clock ("PM 3:04:05"); move it last.
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    if let Some(pos) = tokens.iter().position(|t| *t == "AM" || *t == "PM") {
        let marker = tokens.remove(pos);
        tokens.push(marker);
    }
    let s = tokens.join(" ");

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse a sheet amount after stripping thousands separators.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&s).ok())
}
