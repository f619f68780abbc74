// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::PipelineError;
use crate::ingest::normalize;
use crate::models::{AggregateResult, Normalized, PeriodFilter, TargetProgress};
use crate::source::TableSource;

/// Everything one run produces, read-only for the presentation side.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    #[serde(skip)]
    pub normalized: Normalized,
    pub aggregate: AggregateResult,
    pub progress: TargetProgress,
    pub dropped_rows: usize,
    pub degraded_amounts: usize,
}

/// Fetch once, normalize, aggregate for `period`.
pub fn run(
    source: &dyn TableSource,
    cfg: &Config,
    period: &PeriodFilter,
) -> Result<Report, PipelineError> {
    let raw = source.fetch()?;
    let normalized = normalize(&raw, &cfg.columns);
    let aggregate = aggregate(&normalized.transactions, period, &cfg.aggregation());
    let progress = TargetProgress::compute(&aggregate, &cfg.targets);
    Ok(Report {
        source: source.location().to_string(),
        dropped_rows: normalized.dropped,
        degraded_amounts: normalized.degraded_amounts,
        normalized,
        aggregate,
        progress,
    })
}
