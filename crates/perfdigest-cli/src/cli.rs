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

//! Command-line argument definitions.

use crate::analyze::{analyze, AnalyzeOptions};
use clap::Parser;
use perfdigest_core::config::{DEFAULT_PRINT_COMPONENT_TOP, DEFAULT_PRINT_TOP};
use perfdigest_core::{ConsoleOptions, Result};
use std::path::PathBuf;

/// PerfDigest - benchmark result aggregation
///
/// Reads newline-delimited JSON measurements, writes a JSON report with
/// per-metric and per-component statistics, and prints a ranked summary.
///
/// # Examples
///
/// ```bash
/// # Aggregate a run
/// perfdigest --input results/run.jsonl --output results/summary.json
///
/// # Compare against the previous summary
/// perfdigest --input run.jsonl --output summary.json --baseline previous.json
///
/// # Only print the comparison and component tables
/// perfdigest --input run.jsonl --output summary.json --print-top 0 --print-component-top 0
/// ```
#[derive(Parser, Debug)]
#[command(name = "perfdigest")]
#[command(author, version, about = "PerfDigest - benchmark result aggregation", long_about = None)]
pub struct Cli {
    /// Newline-delimited JSON measurement file
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Where to write the JSON report
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Previous report to compare against (skipped if the file is absent)
    #[arg(long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// JSON document merged into the report as `extras` (skipped if absent)
    #[arg(long, value_name = "PATH")]
    pub extras: Option<PathBuf>,

    /// Number of slowest metrics to print (0 disables)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PRINT_TOP)]
    pub print_top: usize,

    /// Number of slowest metrics to print per component (0 disables)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PRINT_COMPONENT_TOP)]
    pub print_component_top: usize,
}

impl Cli {
    /// Converts parsed arguments into analyze options.
    pub fn options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            baseline: self.baseline.clone(),
            extras: self.extras.clone(),
            console: ConsoleOptions {
                top_metrics: self.print_top,
                top_per_component: self.print_component_top,
            },
        }
    }

    /// Execute the analysis described by these arguments.
    pub fn execute(self) -> Result<()> {
        analyze(&self.options()).map(|_| ())
    }
}
