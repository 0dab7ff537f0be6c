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

//! Descriptive statistics and the ordered table that holds them.

use crate::config::{P95, P99};
use crate::percentile::percentile_sorted;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Statistical summary of one group of durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean in milliseconds.
    pub avg_ms: f64,
    /// Smallest sample.
    pub min_ms: f64,
    /// Largest sample.
    pub max_ms: f64,
    /// Nearest-rank 95th percentile.
    pub p95_ms: f64,
    /// Nearest-rank 99th percentile.
    pub p99_ms: f64,
}

impl AggregateStats {
    /// Computes statistics over a set of durations in milliseconds.
    ///
    /// An empty sample yields a zeroed summary with `count == 0`.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                avg_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
                p95_ms: 0.0,
                p99_ms: 0.0,
            };
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            count: sorted.len(),
            avg_ms: mean(&sorted),
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            p95_ms: percentile_sorted(&sorted, P95),
            p99_ms: percentile_sorted(&sorted, P99),
        }
    }
}

/// Arithmetic mean that stays finite for finite samples.
///
/// Falls back to a running mean when the plain sum overflows.
fn mean(samples: &[f64]) -> f64 {
    let total: f64 = samples.iter().sum();
    if total.is_finite() {
        return total / samples.len() as f64;
    }

    let mut mean = 0.0;
    for (i, &x) in samples.iter().enumerate() {
        mean += (x - mean) / (i + 1) as f64;
    }
    mean
}

/// Mapping from key to [`AggregateStats`] that remembers first-seen order.
///
/// Serialized as a JSON object whose keys appear in insertion order;
/// deserialization keeps the order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    entries: Vec<(String, AggregateStats)>,
    index: HashMap<String, usize>,
}

impl StatsTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, stats: AggregateStats) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = stats,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, stats));
            }
        }
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&AggregateStats> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Returns whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregateStats)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries sorted by key ascending.
    pub fn sorted_by_key(&self) -> Vec<(&str, &AggregateStats)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    /// Entries ranked by average duration, slowest first.
    ///
    /// The sort is stable: equal averages keep insertion order.
    pub fn ranked_by_avg(&self) -> Vec<(&str, &AggregateStats)> {
        rank_by_avg(self.iter())
    }
}

/// Stable descending sort on `avg_ms`.
pub(crate) fn rank_by_avg<'a>(
    entries: impl Iterator<Item = (&'a str, &'a AggregateStats)>,
) -> Vec<(&'a str, &'a AggregateStats)> {
    let mut ranked: Vec<_> = entries.collect();
    ranked.sort_by(|a, b| b.1.avg_ms.total_cmp(&a.1.avg_ms));
    ranked
}

impl Serialize for StatsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, stats) in &self.entries {
            map.serialize_entry(key, stats)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatsTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = StatsTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keys to aggregate statistics")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StatsTable, A::Error> {
                let mut table = StatsTable::new();
                while let Some((key, stats)) = access.next_entry::<String, AggregateStats>()? {
                    table.insert(key, stats);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl<K: Into<String>> FromIterator<(K, AggregateStats)> for StatsTable {
    fn from_iter<I: IntoIterator<Item = (K, AggregateStats)>>(iter: I) -> Self {
        let mut table = StatsTable::new();
        for (key, stats) in iter {
            table.insert(key, stats);
        }
        table
    }
}
