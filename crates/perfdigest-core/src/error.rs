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

//! Structured error types for PerfDigest.
//!
//! Every fallible operation in the pipeline returns [`Result<T>`]. All variants
//! are fatal for a run: absent optional inputs (baseline, extras) are modelled
//! as `Ok(None)` by their loaders rather than as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for PerfDigest operations
pub type Result<T> = std::result::Result<T, PerfError>;

/// Errors that can occur while loading, aggregating or reporting measurements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerfError {
    /// The required measurement input does not exist.
    #[error("Missing input file: {}", path.display())]
    MissingInput {
        /// The path that was requested
        path: PathBuf,
    },

    /// The measurement input exceeds the configured size limit.
    #[error("File '{}' is too large ({actual} bytes). Maximum allowed: {max} bytes", path.display())]
    FileTooLarge {
        /// The oversized file
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured maximum in bytes
        max: u64,
    },

    /// I/O operation failed (read, write, or directory creation).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A measurement line could not be decoded into a record.
    #[error("Failed to load records from '{}' (line {line}): {message}", path.display())]
    Load {
        /// Source file
        path: PathBuf,
        /// 1-based line number of the offending record
        line: usize,
        /// Decoder message
        message: String,
    },

    /// The baseline file exists but is not a readable report.
    #[error("Invalid baseline '{}': {message}", path.display())]
    Baseline {
        /// Baseline path
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// The extras file exists but is not valid JSON.
    #[error("Invalid extras '{}': {message}", path.display())]
    Extras {
        /// Extras path
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(String),
}

impl PerfError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a record decoding error for a given line.
    pub fn load_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
