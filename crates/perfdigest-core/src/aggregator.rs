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

//! Result aggregation and statistics computation.
//!
//! Groups measurement records twice over the same input: once per metric key
//! (`component.name`) and once per component, pooling every duration of that
//! component regardless of operation name.

use crate::record::MeasurementRecord;
use crate::stats::{rank_by_avg, AggregateStats, StatsTable};
use std::collections::HashMap;

/// Aggregated statistics for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Statistics per metric key, in first-seen order.
    pub metrics: StatsTable,
    /// Statistics per component, in first-seen order.
    pub components: StatsTable,
    /// Component that first produced each metric key.
    owners: HashMap<String, String>,
}

impl Aggregation {
    /// Returns the metric entries belonging to `component`, in first-seen order.
    pub fn metrics_for_component(&self, component: &str) -> Vec<(&str, &AggregateStats)> {
        self.metrics
            .iter()
            .filter(|(key, _)| self.owners.get(*key).map(String::as_str) == Some(component))
            .collect()
    }

    /// Top `limit` metrics of a component by average duration, slowest first.
    pub fn top_metrics_for_component(
        &self,
        component: &str,
        limit: usize,
    ) -> Vec<(&str, &AggregateStats)> {
        let mut ranked = rank_by_avg(self.metrics_for_component(component).into_iter());
        ranked.truncate(limit);
        ranked
    }
}

/// Aggregates records into per-metric and per-component statistics.
///
/// # Examples
///
/// ```
/// use perfdigest_core::aggregator::aggregate;
/// use perfdigest_core::record::MeasurementRecord;
///
/// let records = vec![
///     MeasurementRecord::new("db", "read", 10.0),
///     MeasurementRecord::new("db", "read", 20.0),
///     MeasurementRecord::new("db", "write", 30.0),
/// ];
/// let agg = aggregate(&records);
/// assert_eq!(agg.metrics.get("db.read").unwrap().avg_ms, 15.0);
/// assert_eq!(agg.components.get("db").unwrap().count, 3);
/// ```
pub fn aggregate(records: &[MeasurementRecord]) -> Aggregation {
    let mut owners = HashMap::new();
    for record in records {
        owners
            .entry(record.metric_key())
            .or_insert_with(|| record.component.clone());
    }

    let aggregation = Aggregation {
        metrics: summarize_by_metric(records),
        components: summarize_by_component(records),
        owners,
    };

    tracing::debug!(
        records = records.len(),
        metrics = aggregation.metrics.len(),
        components = aggregation.components.len(),
        "aggregated measurements"
    );

    aggregation
}

/// Statistics per metric key.
pub fn summarize_by_metric(records: &[MeasurementRecord]) -> StatsTable {
    summarize(group_durations(records, MeasurementRecord::metric_key))
}

/// Statistics per component, pooling all of its metrics.
pub fn summarize_by_component(records: &[MeasurementRecord]) -> StatsTable {
    summarize(group_durations(records, |r| r.component.clone()))
}

/// Groups durations by a derived key, keeping first-seen key order.
fn group_durations<F>(records: &[MeasurementRecord], key_of: F) -> Vec<(String, Vec<f64>)>
where
    F: Fn(&MeasurementRecord) -> String,
{
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = key_of(record);
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(record.duration_ms),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record.duration_ms]));
            }
        }
    }

    groups
}

fn summarize(groups: Vec<(String, Vec<f64>)>) -> StatsTable {
    groups
        .into_iter()
        .map(|(key, durations)| (key, AggregateStats::from_samples(&durations)))
        .collect()
}
