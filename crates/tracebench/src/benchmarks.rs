//! Static benchmark catalogue and the deployable-functions export.
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::util::bisect_right_u64;
use crate::workload::WorkloadTable;

/// Container image and default footprint for one benchmark.
pub struct BenchmarkInfo {
    pub image: &'static str,
    /// Default memory footprint in MiB, used when a workload does not
    /// declare its own.
    pub memory_mb: u64,
    /// Process-launch override, where the image entrypoint is not enough.
    pub process_args: Option<&'static str>,
}

/// The supported FunctionBench-derived benchmarks.
pub const BENCHMARKS: &[(&str, BenchmarkInfo)] = &[
    (
        "chameleon",
        BenchmarkInfo {
            image: "docker.io/functionbench/chameleon:0.1.0",
            memory_mb: 640,
            process_args: None,
        },
    ),
    (
        "rnn_serving",
        BenchmarkInfo {
            image: "docker.io/functionbench/rnn_serving:0.1.0",
            memory_mb: 384,
            process_args: Some("/usr/local/bin/python3 /bench/server.py"),
        },
    ),
    (
        "cnn_serving_geol",
        BenchmarkInfo {
            image: "docker.io/functionbench/cnn_serving_geol:0.1.0",
            memory_mb: 384,
            process_args: None,
        },
    ),
    (
        "cnn_serving",
        BenchmarkInfo {
            image: "docker.io/functionbench/cnn_serving:0.1.0",
            memory_mb: 256,
            process_args: None,
        },
    ),
    (
        "helloworld",
        BenchmarkInfo {
            image: "docker.io/functionbench/helloworld:0.1.0",
            memory_mb: 128,
            process_args: None,
        },
    ),
    (
        "image_rotate",
        BenchmarkInfo {
            image: "docker.io/functionbench/image_rotate:0.1.0",
            memory_mb: 128,
            process_args: None,
        },
    ),
    (
        "json_serdes",
        BenchmarkInfo {
            image: "docker.io/functionbench/json_serdes:0.1.0",
            memory_mb: 256,
            process_args: None,
        },
    ),
    (
        "new_lr_serving",
        BenchmarkInfo {
            image: "docker.io/functionbench/new_lr_serving:0.1.0",
            memory_mb: 256,
            process_args: None,
        },
    ),
    (
        "lr_serving",
        BenchmarkInfo {
            image: "docker.io/functionbench/lr_serving:0.1.0",
            memory_mb: 256,
            process_args: None,
        },
    ),
    (
        "lr_training",
        BenchmarkInfo {
            image: "docker.io/functionbench/lr_training:0.1.0",
            memory_mb: 448,
            process_args: None,
        },
    ),
    (
        "matmul_fb",
        BenchmarkInfo {
            image: "docker.io/functionbench/matmul_fb:0.1.0",
            memory_mb: 192,
            process_args: None,
        },
    ),
    (
        "pyaes",
        BenchmarkInfo {
            image: "docker.io/functionbench/pyaes:0.1.0",
            memory_mb: 128,
            process_args: None,
        },
    ),
    (
        "video_processing",
        BenchmarkInfo {
            image: "docker.io/functionbench/video_processing:0.1.0",
            memory_mb: 128,
            process_args: None,
        },
    ),
];

pub fn benchmark_info(name: &str) -> Option<&'static BenchmarkInfo> {
    BENCHMARKS.iter().find(|(n, _)| *n == name).map(|(_, info)| info)
}

/// Extra memory consumed by the microVM around the function container.
const MICROVM_EXTRA_MEM_MB: u64 = 50;

/// Memory sizes with at most two set bits which are at most three positions
/// apart. Ascending by construction.
fn quantized_mem_values() -> Vec<u64> {
    let mut values = Vec::new();
    for e in [7u32, 8, 9] {
        for i in [0u32, 3, 2, 1] {
            let base = 1u64 << e;
            values.push(if i == 0 { base } else { base + (1u64 << (e - i)) });
        }
    }
    values
}

/// Rounds a memory footprint (plus the microVM overhead) up to the next
/// quantized size.
pub fn quantize_mem_size(mem_mb: u64) -> Result<u64> {
    let values = quantized_mem_values();
    let idx = bisect_right_u64(&values, mem_mb + MICROVM_EXTRA_MEM_MB);
    values.get(idx).copied().ok_or(Error::MemoryOutOfRange(mem_mb))
}

/// One deployable function entry of the exported catalogue.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub image: String,
    pub memory: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_args: Option<String>,
}

/// Compiles the deployable-functions catalogue from the workload table:
/// one entry per workload, sorted by id. Derived names must be globally
/// unique; a duplicate is an internal-consistency failure.
pub fn catalog_entries(workloads: &WorkloadTable) -> Result<Vec<CatalogEntry>> {
    let mut seen = FxHashSet::<String>::default();
    let mut entries = Vec::new();
    for workload in workloads.iter() {
        let info = benchmark_info(&workload.benchmark)
            .ok_or_else(|| Error::UnknownBenchmark(workload.benchmark.clone()))?;
        let id = workload.name();
        if !seen.insert(id.clone()) {
            return Err(Error::DuplicateWorkloadName(id));
        }
        let memory_mb = workload.memory_mb.unwrap_or(info.memory_mb);
        entries.push(CatalogEntry {
            id,
            image: info.image.to_string(),
            memory: quantize_mem_size(memory_mb)?,
            process_args: info.process_args.map(str::to_string),
        });
    }
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(entries)
}
