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

//! PerfDigest core
//!
//! Turns a newline-delimited stream of timed measurements into descriptive
//! statistics, compares them with a previous run and renders the result.
//!
//! ## Pipeline
//!
//! 1. [`record::load_records`] reads one JSON object per line
//! 2. [`aggregator::aggregate`] groups by metric key and by component
//! 3. [`comparator::compare_to_baseline`] diffs against an earlier report
//! 4. [`report::ReportDocument`] assembles and writes the JSON report
//! 5. [`console::render_summary`] prints the ranked summary
//!
//! ## Usage
//!
//! ```no_run
//! use perfdigest_core::{aggregate, load_records, ConsoleOptions, ReportDocument};
//! use std::path::Path;
//!
//! # fn main() -> perfdigest_core::Result<()> {
//! let records = load_records(Path::new("results/run.jsonl"))?;
//! let aggregation = aggregate(&records);
//! let report = ReportDocument::assemble(&aggregation, None, None);
//! report.write(Path::new("results/summary.json"))?;
//! perfdigest_core::console::print_summary(&report, &aggregation, &ConsoleOptions::default())
//!     .expect("stdout");
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod comparator;
pub mod config;
pub mod console;
pub mod error;
pub mod percentile;
pub mod record;
pub mod report;
pub mod stats;

pub use aggregator::{aggregate, summarize_by_component, summarize_by_metric, Aggregation};
pub use comparator::{
    compare_to_baseline, load_baseline, BaselineDocument, BaselineStats, ComparisonEntry,
};
pub use console::{print_summary, render_summary, ConsoleOptions};
pub use error::{PerfError, Result};
pub use percentile::percentile;
pub use record::{load_records, metric_key, parse_records, MeasurementRecord};
pub use report::{load_extras, MemoryDelta, ReportDocument};
pub use stats::{AggregateStats, StatsTable};
