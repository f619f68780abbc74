// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use thiserror::Error;

/// Errors that abort a pipeline run. Row-level problems never end up here.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The source could not be reached or did not contain a table at all.
    #[error("Source unavailable ({location}): {reason}")]
    SourceUnavailable { location: String, reason: String },
}

impl PipelineError {
    pub fn unavailable(location: &str, reason: impl ToString) -> Self {
        PipelineError::SourceUnavailable {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Why a single row was left out of the normalized set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "value", rename_all = "snake_case")]
pub enum RowRejection {
    UnparsableTimestamp(String),
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::UnparsableTimestamp(raw) => {
                write!(f, "unparsable timestamp '{}'", raw)
            }
        }
    }
}
