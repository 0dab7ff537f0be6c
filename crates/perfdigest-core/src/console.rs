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

//! Console reporter for aggregated results.
//!
//! Renders the human-readable summary of a run. Every section is optional:
//! ranked lists are elided when their count is zero, and the memory and
//! comparison tables only appear when the report carries that data. None of
//! this affects the written report.

use crate::aggregator::Aggregation;
use crate::config::{DEFAULT_PRINT_COMPONENT_TOP, DEFAULT_PRINT_TOP};
use crate::report::ReportDocument;
use crate::stats::AggregateStats;
use std::io::{self, Write};

/// Section sizes for the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Metrics in the global ranking; `0` disables the section.
    pub top_metrics: usize,
    /// Metrics per component; `0` disables the section.
    pub top_per_component: usize,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            top_metrics: DEFAULT_PRINT_TOP,
            top_per_component: DEFAULT_PRINT_COMPONENT_TOP,
        }
    }
}

/// Prints the summary to stdout.
pub fn print_summary(
    report: &ReportDocument,
    aggregation: &Aggregation,
    options: &ConsoleOptions,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_summary(&mut out, report, aggregation, options)
}

/// Writes the summary to `out`.
///
/// The global ranking header counts the metrics actually listed. The
/// per-component header shows the requested limit, since each component may
/// list fewer.
pub fn render_summary<W: Write>(
    out: &mut W,
    report: &ReportDocument,
    aggregation: &Aggregation,
    options: &ConsoleOptions,
) -> io::Result<()> {
    if options.top_metrics > 0 && !report.metrics.is_empty() {
        render_top_metrics(out, report, options.top_metrics)?;
    }

    if !report.components.is_empty() {
        render_components(out, report)?;
    }

    if options.top_per_component > 0 && !report.components.is_empty() {
        render_top_per_component(out, report, aggregation, options.top_per_component)?;
    }

    render_memory_deltas(out, report)?;
    render_comparisons(out, report)?;
    Ok(())
}

fn render_top_metrics<W: Write>(out: &mut W, report: &ReportDocument, limit: usize) -> io::Result<()> {
    let mut ranked = report.metrics.ranked_by_avg();
    ranked.truncate(limit);

    writeln!(out)?;
    writeln!(out, "Top {} metrics by avg duration:", ranked.len())?;
    let width = key_width(ranked.iter().map(|(k, _)| *k));
    for (key, stats) in ranked {
        writeln!(
            out,
            "  {:<width$}  avg {:>9.2}ms  p95 {:>9.2}ms  p99 {:>9.2}ms  (n={})",
            key,
            stats.avg_ms,
            stats.p95_ms,
            stats.p99_ms,
            stats.count,
            width = width
        )?;
    }
    Ok(())
}

fn render_components<W: Write>(out: &mut W, report: &ReportDocument) -> io::Result<()> {
    let sorted = report.components.sorted_by_key();

    writeln!(out)?;
    writeln!(out, "Component summary:")?;
    let width = key_width(sorted.iter().map(|(k, _)| *k));
    for (component, stats) in sorted {
        writeln!(out, "  {:<width$}  {}", component, describe(stats), width = width)?;
    }
    Ok(())
}

fn render_top_per_component<W: Write>(
    out: &mut W,
    report: &ReportDocument,
    aggregation: &Aggregation,
    limit: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Top {} metrics per component:", limit)?;
    for (component, _) in report.components.sorted_by_key() {
        let top = aggregation.top_metrics_for_component(component, limit);
        if top.is_empty() {
            continue;
        }
        writeln!(out, "  {}:", component)?;
        let width = key_width(top.iter().map(|(k, _)| *k));
        for (key, stats) in top {
            writeln!(
                out,
                "    {:<width$}  avg {:>9.2}ms  p95 {:>9.2}ms  (n={})",
                key,
                stats.avg_ms,
                stats.p95_ms,
                stats.count,
                width = width
            )?;
        }
    }
    Ok(())
}

fn render_memory_deltas<W: Write>(out: &mut W, report: &ReportDocument) -> io::Result<()> {
    let Some(deltas) = report.memory_deltas() else {
        return Ok(());
    };
    if deltas.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Component memory delta (KB):")?;
    let width = key_width(deltas.iter().map(|d| d.component.as_str()));
    for delta in &deltas {
        writeln!(
            out,
            "  {:<width$}  rss {:>10}  pss {:>10}",
            delta.component,
            format_kb(delta.rss_kb),
            format_kb(delta.pss_kb),
            width = width
        )?;
    }
    Ok(())
}

fn render_comparisons<W: Write>(out: &mut W, report: &ReportDocument) -> io::Result<()> {
    let Some(comparisons) = report.comparisons.as_ref() else {
        return Ok(());
    };
    if comparisons.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Baseline comparison:")?;
    for item in comparisons {
        writeln!(
            out,
            "- {}: avg {:+.2}ms ({:+.1}%), p95 {:+.2}ms ({:+.1}%)",
            item.metric, item.avg_delta_ms, item.avg_delta_pct, item.p95_delta_ms, item.p95_delta_pct
        )?;
    }
    Ok(())
}

fn describe(stats: &AggregateStats) -> String {
    format!(
        "count {:>5}  avg {:>9.2}ms  min {:>9.2}ms  max {:>9.2}ms  p95 {:>9.2}ms  p99 {:>9.2}ms",
        stats.count, stats.avg_ms, stats.min_ms, stats.max_ms, stats.p95_ms, stats.p99_ms
    )
}

fn key_width<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.map(|k| k.chars().count()).max().unwrap_or(0)
}

fn format_kb(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.0}", v),
        None => "n/a".to_string(),
    }
}
