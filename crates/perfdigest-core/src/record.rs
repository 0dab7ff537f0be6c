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

//! Measurement records and the newline-delimited JSON loader.
//!
//! Each non-blank line of the input is one self-contained JSON object with at
//! least `component`, `name` and `duration_ms`. Any other fields are kept in
//! [`MeasurementRecord::extra`] untouched. A single malformed line aborts the
//! whole load.

use crate::config::max_file_size;
use crate::error::{PerfError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// One observed timing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Subsystem the measurement belongs to (e.g. `"db"`).
    pub component: String,
    /// Operation name within the component (e.g. `"read"`).
    pub name: String,
    /// Observed duration in milliseconds.
    pub duration_ms: f64,
    /// Producer-specific fields, carried verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeasurementRecord {
    /// Creates a record without extra fields.
    pub fn new(component: impl Into<String>, name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
            duration_ms,
            extra: Map::new(),
        }
    }

    /// Returns the metric key `component.name` identifying this operation.
    pub fn metric_key(&self) -> String {
        metric_key(&self.component, &self.name)
    }
}

/// Builds the metric key for a (component, name) pair.
pub fn metric_key(component: &str, name: &str) -> String {
    format!("{}.{}", component, name)
}

/// Loads all records from a newline-delimited JSON file.
///
/// # Errors
///
/// - [`PerfError::MissingInput`] if the file does not exist
/// - [`PerfError::FileTooLarge`] if it exceeds the configured size limit
/// - [`PerfError::Io`] if it cannot be opened
/// - [`PerfError::Load`] if any non-blank line is not a valid record
pub fn load_records(path: &Path) -> Result<Vec<MeasurementRecord>> {
    let metadata = fs::metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PerfError::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            PerfError::io_error(path, e)
        }
    })?;

    let max = max_file_size();
    if metadata.len() > max {
        return Err(PerfError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max,
        });
    }

    let file = File::open(path).map_err(|e| PerfError::io_error(path, e))?;
    let records = parse_records(BufReader::new(file), path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded measurement records");
    Ok(records)
}

/// Parses records from any buffered reader.
///
/// `source` is only used to label errors.
pub fn parse_records<R: BufRead>(reader: R, source: &Path) -> Result<Vec<MeasurementRecord>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| PerfError::load_error(source, line_no, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: MeasurementRecord = serde_json::from_str(trimmed)
            .map_err(|e| PerfError::load_error(source, line_no, e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}
