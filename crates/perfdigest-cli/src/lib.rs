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

//! PerfDigest CLI library for argument parsing and execution.
//!
//! # Usage
//!
//! ```no_run
//! use perfdigest_cli::analyze::{analyze, AnalyzeOptions};
//!
//! # fn main() -> perfdigest_core::Result<()> {
//! let mut options = AnalyzeOptions::new("results/run.jsonl", "results/summary.json");
//! options.baseline = Some("results/previous.json".into());
//! analyze(&options)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics go through `tracing` to stderr. Set `RUST_LOG=perfdigest_core=debug`
//! for per-stage details.
//!
//! # Environment
//!
//! - `PERFDIGEST_MAX_FILE_SIZE`: maximum input size in bytes (default 1 GB)

pub mod analyze;
pub mod cli;

pub use analyze::{analyze, AnalyzeOptions};
pub use cli::Cli;
