// Dweve PerfDigest - Benchmark Result Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Report document assembly and JSON export.
//!
//! A report is built once per run from the aggregation, the optional extras
//! payload and the optional baseline, then written to disk as pretty JSON
//! (2-space indentation). A written report can be fed back in as the baseline
//! of a later run.

use crate::aggregator::Aggregation;
use crate::comparator::{compare_to_baseline, BaselineDocument, ComparisonEntry};
use crate::config::MEMORY_DELTA_FIELD;
use crate::error::{PerfError, Result};
use crate::stats::StatsTable;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// The structured output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// UTC generation time, ISO-8601 with a `Z` suffix.
    pub generated_at: String,
    /// Statistics per metric key.
    pub metrics: StatsTable,
    /// Statistics per component.
    #[serde(default)]
    pub components: StatsTable,
    /// Side-channel payload, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Path of the baseline used for comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,
    /// Per-metric deltas against the baseline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<Vec<ComparisonEntry>>,
}

/// Memory delta of one component, in kilobytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDelta {
    /// Component name.
    pub component: String,
    /// Resident set size delta; `None` if missing or not numeric.
    pub rss_kb: Option<f64>,
    /// Proportional set size delta; `None` if missing or not numeric.
    pub pss_kb: Option<f64>,
}

impl ReportDocument {
    /// Assembles a report stamped with the current time.
    pub fn assemble(
        aggregation: &Aggregation,
        extras: Option<Value>,
        baseline: Option<(&Path, &BaselineDocument)>,
    ) -> Self {
        Self::assemble_at(Utc::now(), aggregation, extras, baseline)
    }

    /// Assembles a report with an explicit generation time.
    pub fn assemble_at(
        generated_at: DateTime<Utc>,
        aggregation: &Aggregation,
        extras: Option<Value>,
        baseline: Option<(&Path, &BaselineDocument)>,
    ) -> Self {
        let (baseline, comparisons) = match baseline {
            Some((path, document)) => (
                Some(path.display().to_string()),
                Some(compare_to_baseline(&aggregation.metrics, document)),
            ),
            None => (None, None),
        };

        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            metrics: aggregation.metrics.clone(),
            components: aggregation.components.clone(),
            extras,
            baseline,
            comparisons,
        }
    }

    /// Serializes the report to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PerfError::Serialize(e.to_string()))
    }

    /// Writes the report, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PerfError::io_error(parent, e))?;
            }
        }

        fs::write(path, json).map_err(|e| PerfError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "wrote report");
        Ok(())
    }

    /// Reads a previously written report.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PerfError::io_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| PerfError::Baseline {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Per-component memory deltas from `extras.component_memory_delta_kb`,
    /// sorted by component name.
    ///
    /// Returns `None` when the extras carry no such table.
    pub fn memory_deltas(&self) -> Option<Vec<MemoryDelta>> {
        let table = self.extras.as_ref()?.get(MEMORY_DELTA_FIELD)?.as_object()?;

        let mut deltas: Vec<MemoryDelta> = table
            .iter()
            .map(|(component, values)| MemoryDelta {
                component: component.clone(),
                rss_kb: values.get("rss").and_then(Value::as_f64),
                pss_kb: values.get("pss").and_then(Value::as_f64),
            })
            .collect();
        deltas.sort_by(|a, b| a.component.cmp(&b.component));
        Some(deltas)
    }
}

/// Loads the extras payload.
///
/// Returns `Ok(None)` when the file does not exist or cannot be opened.
///
/// # Errors
///
/// Returns [`PerfError::Extras`] when the file exists but is not valid JSON.
pub fn load_extras(path: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "extras not found, omitting");
            } else {
                tracing::warn!(path = %path.display(), error = %e, "extras unreadable, omitting");
            }
            return Ok(None);
        }
    };

    let value = serde_json::from_str(&content).map_err(|e| PerfError::Extras {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(value))
}
