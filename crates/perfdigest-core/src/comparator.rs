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

//! Baseline comparison.
//!
//! Compares the current per-metric statistics with those of a previously
//! written report. Only keys present on both sides are compared; a metric that
//! was added or removed between runs is not an error.

use crate::error::{PerfError, Result};
use crate::stats::StatsTable;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// The parts of a previous report needed for comparison.
///
/// Everything except `metrics` is ignored, as are extra fields inside each
/// metric entry. Entries without numeric `avg_ms` and `p95_ms` (including
/// `null`) are dropped, so they never take part in a comparison.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BaselineDocument {
    /// Baseline statistics per metric key.
    #[serde(default, deserialize_with = "usable_metrics")]
    pub metrics: HashMap<String, BaselineStats>,
}

fn usable_metrics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<HashMap<String, BaselineStats>, D::Error> {
    let raw: Option<HashMap<String, Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match BaselineStats::deserialize(&value) {
            Ok(stats) => Some((key, stats)),
            Err(e) => {
                tracing::debug!(metric = %key, error = %e, "skipping unusable baseline entry");
                None
            }
        })
        .collect())
}

/// Baseline values for one metric key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Baseline mean in milliseconds.
    pub avg_ms: f64,
    /// Baseline 95th percentile in milliseconds.
    pub p95_ms: f64,
}

impl BaselineDocument {
    /// Builds a baseline from a current stats table.
    pub fn from_table(table: &StatsTable) -> Self {
        let metrics = table
            .iter()
            .map(|(key, stats)| {
                (
                    key.to_string(),
                    BaselineStats {
                        avg_ms: stats.avg_ms,
                        p95_ms: stats.p95_ms,
                    },
                )
            })
            .collect();
        Self { metrics }
    }
}

/// Delta between current and baseline statistics for one metric key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Metric key.
    pub metric: String,
    /// `current.avg_ms - baseline.avg_ms`.
    pub avg_delta_ms: f64,
    /// `current.p95_ms - baseline.p95_ms`.
    pub p95_delta_ms: f64,
    /// Average delta as a percentage of the baseline (0 when baseline is 0).
    pub avg_delta_pct: f64,
    /// p95 delta as a percentage of the baseline (0 when baseline is 0).
    pub p95_delta_pct: f64,
}

/// Compares current metric statistics to a baseline.
///
/// Entries follow the insertion order of `current`.
pub fn compare_to_baseline(current: &StatsTable, baseline: &BaselineDocument) -> Vec<ComparisonEntry> {
    let mut comparisons = Vec::new();

    for (key, stats) in current.iter() {
        let Some(base) = baseline.metrics.get(key) else {
            continue;
        };

        let avg_delta_ms = stats.avg_ms - base.avg_ms;
        let p95_delta_ms = stats.p95_ms - base.p95_ms;

        comparisons.push(ComparisonEntry {
            metric: key.to_string(),
            avg_delta_ms,
            p95_delta_ms,
            avg_delta_pct: delta_pct(avg_delta_ms, base.avg_ms),
            p95_delta_pct: delta_pct(p95_delta_ms, base.p95_ms),
        });
    }

    tracing::debug!(
        compared = comparisons.len(),
        current = current.len(),
        baseline = baseline.metrics.len(),
        "compared against baseline"
    );

    comparisons
}

/// Percentage change relative to `base`; a zero baseline yields `0.0`.
fn delta_pct(delta: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        (delta / base) * 100.0
    }
}

/// Loads a baseline report.
///
/// Returns `Ok(None)` when the file does not exist or cannot be opened; the
/// comparison is then skipped.
///
/// # Errors
///
/// Returns [`PerfError::Baseline`] when the file exists but is not a valid
/// report.
pub fn load_baseline(path: &Path) -> Result<Option<BaselineDocument>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "baseline not found, skipping comparison");
            return Ok(None);
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "baseline unreadable, skipping comparison");
            return Ok(None);
        }
    };

    let baseline = serde_json::from_str(&content).map_err(|e| PerfError::Baseline {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(baseline))
}
