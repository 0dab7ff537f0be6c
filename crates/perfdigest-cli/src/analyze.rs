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

//! Analyze command - aggregates a measurement file into a report
//!
//! Runs the whole pipeline in one synchronous pass: load, aggregate, compare
//! (when a baseline is available), write the report, print the summary.

use colored::Colorize;
use perfdigest_core::{
    aggregate, load_baseline, load_extras, load_records, render_summary, Aggregation,
    ConsoleOptions, PerfError, ReportDocument, Result,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Inputs of one analyze run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Newline-delimited JSON measurement file.
    pub input: PathBuf,
    /// Report destination.
    pub output: PathBuf,
    /// Previous report to compare against.
    pub baseline: Option<PathBuf>,
    /// Side-channel JSON merged in as `extras`.
    pub extras: Option<PathBuf>,
    /// Console section sizes.
    pub console: ConsoleOptions,
}

impl AnalyzeOptions {
    /// Creates options with default console section sizes and no optional inputs.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            baseline: None,
            extras: None,
            console: ConsoleOptions::default(),
        }
    }
}

/// Run the analysis and print the console summary.
///
/// # Errors
///
/// Returns `Err` if:
/// - The input file does not exist ([`PerfError::MissingInput`])
/// - Any input line is not a valid measurement record
/// - The baseline or extras file exists but is not valid JSON
/// - The report cannot be written
///
/// A baseline or extras path that does not resolve to a file is not an
/// error; that part of the report is simply omitted.
pub fn analyze(options: &AnalyzeOptions) -> Result<ReportDocument> {
    if !options.input.is_file() {
        return Err(PerfError::MissingInput {
            path: options.input.clone(),
        });
    }

    let records = load_records(&options.input)?;
    let aggregation = aggregate(&records);

    let baseline_path = non_empty(options.baseline.as_deref());
    let baseline = match baseline_path {
        Some(path) => load_baseline(path)?.map(|doc| (path, doc)),
        None => None,
    };

    let extras = match non_empty(options.extras.as_deref()) {
        Some(path) => load_extras(path)?,
        None => None,
    };

    let report = ReportDocument::assemble(
        &aggregation,
        extras,
        baseline.as_ref().map(|(path, doc)| (*path, doc)),
    );
    report.write(&options.output)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &options.output, &report, &aggregation, &options.console)
        .map_err(|e| PerfError::io_error("<stdout>", e))?;

    Ok(report)
}

/// Writes the confirmation line followed by the console summary.
fn write_summary<W: Write>(
    out: &mut W,
    output: &Path,
    report: &ReportDocument,
    aggregation: &Aggregation,
    console: &ConsoleOptions,
) -> io::Result<()> {
    writeln!(
        out,
        "{} Summary written to {}",
        "✓".green().bold(),
        output.display()
    )?;
    render_summary(out, report, aggregation, console)
}

/// Treats an empty path argument as absent.
fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
