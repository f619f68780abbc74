// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RowRejection;

/// One source row as delivered: header name -> cell text, in source column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
    line: Option<u64>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells, line: None }
    }

    /// Attach the 1-based source line the row was read from.
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            line: None,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.cells.first().map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Zero-based position of the row in the fetched table.
    pub row: usize,
    pub timestamp: NaiveDateTime,
    pub actor: String,
    pub category: String,
    pub item: String,
    pub status: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejected {
    pub row: usize,
    /// Source line, when the source reports one.
    pub line: Option<u64>,
    #[serde(flatten)]
    pub reason: RowRejection,
}

/// Output of the ingestion normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    pub dropped: usize,
    pub degraded_amounts: usize,
    pub rejections: Vec<RowRejected>,
}

/// Calendar window used to scope aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodFilter {
    All,
    Month { year: i32, month: u32 },
}

impl PeriodFilter {
    pub fn month_of(instant: NaiveDateTime) -> Self {
        PeriodFilter::Month {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn contains(&self, tx: &Transaction) -> bool {
        match *self {
            PeriodFilter::All => true,
            PeriodFilter::Month { year, month } => {
                tx.timestamp.year() == year && tx.timestamp.month() == month
            }
        }
    }

    pub fn label(&self) -> String {
        match *self {
            PeriodFilter::All => "all".to_string(),
            PeriodFilter::Month { year, month } => format!("{:04}-{:02}", year, month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReserveEntry {
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
    pub row: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObligationStatus {
    pub done: bool,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub period: PeriodFilter,
    pub contributions: BTreeMap<String, Decimal>,
    pub contribution_total: Decimal,
    pub expenditure_total: Decimal,
    pub reserve_balance: Decimal,
    pub manual_reserve: Option<ReserveEntry>,
    pub obligations: BTreeMap<String, ObligationStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorProgress {
    pub actual: Decimal,
    pub target: Decimal,
    pub delta: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetProgress {
    pub actors: BTreeMap<String, ActorProgress>,
    pub total_actual: Decimal,
    pub total_target: Decimal,
    /// Share of the total target reached, clamped to `[0, 1]`.
    pub ratio: Decimal,
}
