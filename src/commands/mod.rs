// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod summary;
pub mod records;
pub mod doctor;
pub mod settings;

use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::config;
use crate::models::PeriodFilter;
use crate::pipeline::{self, Report};
use crate::source::source_for;
use crate::utils::period_from_arg;

/// Resolve config and source from the shared flags and run the pipeline once.
pub(crate) fn run_pipeline(sub: &clap::ArgMatches, period: PeriodFilter) -> Result<Report> {
    let cfg = config::load(sub.get_one::<String>("config").map(Path::new))?;
    let location = sub
        .get_one::<String>("source")
        .cloned()
        .or_else(|| cfg.source.clone())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow!("No source configured; pass --source or set \"source\" in the config"))?;
    let source = source_for(&location);
    let report = pipeline::run(source.as_ref(), &cfg, &period)
        .context("Could not load the sheet; check the source and try again later")?;
    Ok(report)
}

pub(crate) fn month_period(sub: &clap::ArgMatches) -> Result<PeriodFilter> {
    period_from_arg(sub.get_one::<String>("month"))
}
