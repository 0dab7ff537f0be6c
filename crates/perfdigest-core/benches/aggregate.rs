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

//! Aggregation throughput benchmarks.
//!
//! Measures record parsing, grouping and percentile computation over
//! synthetic measurement streams of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use perfdigest_core::{aggregate, parse_records, percentile, MeasurementRecord};
use std::io::Cursor;
use std::path::Path;

const SIZES: &[usize] = &[100, 1_000, 10_000, 100_000];
const COMPONENTS: &[&str] = &["shell", "bar", "launcher", "notifications", "dialog"];
const OPERATIONS: &[&str] = &["launch", "render", "update", "reload", "close", "toggle"];

/// Deterministic pseudo-random records (LCG, no external RNG).
fn generate_records(count: usize) -> Vec<MeasurementRecord> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    (0..count)
        .map(|i| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let ms = (state >> 33) as f64 / 1_000_000.0;
            MeasurementRecord::new(
                COMPONENTS[i % COMPONENTS.len()],
                OPERATIONS[(i / COMPONENTS.len()) % OPERATIONS.len()],
                ms,
            )
        })
        .collect()
}

fn generate_jsonl(count: usize) -> String {
    generate_records(count)
        .iter()
        .map(|r| serde_json::to_string(r).expect("record serializes"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for &size in SIZES {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| aggregate(black_box(records)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_records");

    for &size in SIZES {
        let input = generate_jsonl(size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse_records(Cursor::new(black_box(input.as_bytes())), Path::new("bench.jsonl")))
        });
    }

    group.finish();
}

fn bench_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentile");

    for &size in SIZES {
        let values: Vec<f64> = generate_records(size).iter().map(|r| r.duration_ms).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| percentile(black_box(values), 0.95))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_parse, bench_percentile);
criterion_main!(benches);
