// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregationConfig, KeywordSet};
use crate::ingest::ColumnHints;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Jointfund", "jointfund"));

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

/// Contribution targets per actor plus the combined goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub actors: BTreeMap<String, Decimal>,
    pub total: Decimal,
}

impl Default for Targets {
    fn default() -> Self {
        let mut actors = BTreeMap::new();
        actors.insert("나".to_string(), Decimal::from(1_580_000));
        actors.insert("와이프".to_string(), Decimal::from(1_220_000));
        Self {
            actors,
            total: Decimal::from(2_800_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    pub inflow: Vec<String>,
    pub outflow: Vec<String>,
    pub manual_reserve: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            inflow: vec!["각출".to_string()],
            outflow: vec!["지출".to_string()],
            manual_reserve: vec!["비상금".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL or file path of the published sheet export.
    pub source: Option<String>,
    pub columns: ColumnHints,
    pub keywords: Keywords,
    pub targets: Targets,
    /// Obligation name -> item pattern; `|` separates alternatives.
    pub obligations: BTreeMap<String, String>,
    /// When set, only rows whose status equals this value settle an obligation.
    pub obligation_status: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut obligations = BTreeMap::new();
        obligations.insert("주택담보대출".to_string(), "주택담보대출".to_string());
        obligations.insert("신용대출".to_string(), "신용대출".to_string());
        Self {
            source: None,
            columns: ColumnHints::default(),
            keywords: Keywords::default(),
            targets: Targets::default(),
            obligations,
            obligation_status: None,
        }
    }
}

impl Config {
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig {
            actors: self.targets.actors.keys().cloned().collect(),
            inflow: KeywordSet::new(self.keywords.inflow.iter().cloned()),
            outflow: KeywordSet::new(self.keywords.outflow.iter().cloned()),
            manual_reserve: KeywordSet::new(self.keywords.manual_reserve.iter().cloned()),
            obligations: self
                .obligations
                .iter()
                .map(|(name, pattern)| (name.clone(), KeywordSet::from_pattern(pattern)))
                .collect(),
            obligation_status: self.obligation_status.clone(),
        }
    }
}

/// Load the config from an explicit path (must exist) or from the default
/// location (defaults when absent).
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_from(p),
        None => {
            let p = config_path()?;
            if p.exists() {
                load_from(&p)
            } else {
                tracing::debug!(path = %p.display(), "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    let cfg: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(cfg)
}

pub fn save_to(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Write config {}", path.display()))?;
    Ok(())
}
