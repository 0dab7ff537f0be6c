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

//! Shared configuration constants and environment overrides.

/// Percentile fraction reported as `p95_ms`.
pub const P95: f64 = 0.95;

/// Percentile fraction reported as `p99_ms`.
pub const P99: f64 = 0.99;

/// Default number of metrics listed in the global ranking.
pub const DEFAULT_PRINT_TOP: usize = 5;

/// Default number of metrics listed per component.
pub const DEFAULT_PRINT_COMPONENT_TOP: usize = 3;

/// Default maximum input size (1 GB).
/// Can be overridden via the `PERFDIGEST_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable holding the maximum input size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "PERFDIGEST_MAX_FILE_SIZE";

/// Extras field holding the per-component memory delta table.
pub const MEMORY_DELTA_FIELD: &str = "component_memory_delta_kb";

/// Get the maximum input size from the environment or use the default.
///
/// Invalid values fall back to [`DEFAULT_MAX_FILE_SIZE`].
pub fn max_file_size() -> u64 {
    parse_max_file_size(std::env::var(MAX_FILE_SIZE_ENV).ok().as_deref())
}

fn parse_max_file_size(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}
