use serde_json::{json, Map};

use tracebench::benchmarks::{benchmark_info, catalog_entries, quantize_mem_size};
use tracebench::error::Error;
use tracebench::workload::{Workload, WorkloadTable};

fn workload(benchmark: &str, n: u64, exec_time_ms: u64, memory_mb: Option<u64>) -> Workload {
    let mut payload = Map::new();
    payload.insert("n".to_string(), json!(n));
    Workload {
        benchmark: benchmark.to_string(),
        payload,
        exec_time_ms,
        memory_mb,
    }
}

#[test]
fn test_quantization_picks_next_larger_value() {
    // 50 MiB of microVM overhead is added before quantizing
    assert_eq!(quantize_mem_size(128).unwrap(), 192);
    assert_eq!(quantize_mem_size(640).unwrap(), 768);
    assert_eq!(quantize_mem_size(1).unwrap(), 128);
    // a value landing exactly on a step still moves up
    assert_eq!(quantize_mem_size(78).unwrap(), 144);
}

#[test]
fn test_quantization_rejects_oversized_footprints() {
    assert!(matches!(quantize_mem_size(750), Err(Error::MemoryOutOfRange(750))));
}

#[test]
fn test_static_catalogue_lookup() {
    let pyaes = benchmark_info("pyaes").unwrap();
    assert_eq!(pyaes.memory_mb, 128);
    assert!(pyaes.process_args.is_none());
    assert!(benchmark_info("rnn_serving").unwrap().process_args.is_some());
    assert!(benchmark_info("nonexistent").is_none());
}

#[test]
fn test_catalog_entries_sorted_by_id() {
    let table = WorkloadTable::new(vec![
        workload("pyaes", 1, 100, None),
        workload("chameleon", 1, 250, None),
        workload("pyaes", 2, 150, None),
    ]);
    let entries = catalog_entries(&table).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_catalog_memory_defaults_and_overrides() {
    let table = WorkloadTable::new(vec![
        workload("pyaes", 1, 100, None),
        workload("chameleon", 1, 250, Some(600)),
    ]);
    let entries = catalog_entries(&table).unwrap();
    let chameleon = entries.iter().find(|e| e.id.starts_with("chameleon")).unwrap();
    // declared 600 MiB + 50 overhead quantizes to 768
    assert_eq!(chameleon.memory, 768);
    let pyaes = entries.iter().find(|e| e.id.starts_with("pyaes")).unwrap();
    // default 128 MiB footprint + 50 overhead quantizes to 192
    assert_eq!(pyaes.memory, 192);
}

#[test]
fn test_catalog_rejects_duplicate_names() {
    // same benchmark and payload at different durations share a derived name
    let table = WorkloadTable::new(vec![workload("pyaes", 1, 100, None), workload("pyaes", 1, 200, None)]);
    assert!(matches!(
        catalog_entries(&table),
        Err(Error::DuplicateWorkloadName(_))
    ));
}

#[test]
fn test_catalog_rejects_unknown_benchmark() {
    let table = WorkloadTable::new(vec![workload("mystery", 1, 100, None)]);
    assert!(matches!(catalog_entries(&table), Err(Error::UnknownBenchmark(_))));
}
