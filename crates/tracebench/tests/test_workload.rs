use serde_json::{json, Map};

use tracebench::workload::{Workload, WorkloadTable, WORKLOAD_NAME_LEN};

fn payload_n(n: u64) -> Map<String, serde_json::Value> {
    let mut payload = Map::new();
    payload.insert("n".to_string(), json!(n));
    payload
}

#[test]
fn test_derived_name_is_fixed_length() {
    let workload = Workload {
        benchmark: "pyaes".to_string(),
        payload: payload_n(5),
        exec_time_ms: 100,
        memory_mb: None,
    };
    // sha256 of {"n":5} starts with 11d0a8967009cbcdf468f0...
    assert_eq!(workload.name(), "pyaes-11d0a8967009cbcdf4");
    assert_eq!(workload.name().len(), WORKLOAD_NAME_LEN);
}

#[test]
fn test_name_depends_on_payload() {
    let a = Workload {
        benchmark: "pyaes".to_string(),
        payload: payload_n(1),
        exec_time_ms: 100,
        memory_mb: None,
    };
    let b = Workload {
        benchmark: "pyaes".to_string(),
        payload: payload_n(2),
        exec_time_ms: 100,
        memory_mb: None,
    };
    assert_ne!(a.name(), b.name());
}

#[test]
fn test_display_is_loadgen_compatible_json() {
    let workload = Workload {
        benchmark: "pyaes".to_string(),
        payload: payload_n(5),
        exec_time_ms: 100,
        memory_mb: None,
    };
    assert_eq!(
        workload.to_string(),
        r#"{"mean":100,"bench":"pyaes-11d0a8967009cbcdf4","payload":"{\"n\":5}"}"#
    );
}

#[test]
fn test_table_groups_by_ascending_duration() {
    let table = WorkloadTable::new(vec![
        Workload {
            benchmark: "chameleon".to_string(),
            payload: payload_n(1),
            exec_time_ms: 300,
            memory_mb: None,
        },
        Workload {
            benchmark: "pyaes".to_string(),
            payload: payload_n(1),
            exec_time_ms: 10,
            memory_mb: None,
        },
        Workload {
            benchmark: "pyaes".to_string(),
            payload: payload_n(2),
            exec_time_ms: 10,
            memory_mb: None,
        },
    ]);
    assert_eq!(table.durations(), &[10.0, 300.0]);
    assert_eq!(table.group(0).len(), 2);
    // insertion order is kept inside a duration group
    assert_eq!(table.group(0)[0].payload["n"], json!(1));
    assert_eq!(table.group(0)[1].payload["n"], json!(2));
    assert_eq!(table.group(1)[0].benchmark, "chameleon");
}

#[test]
fn test_catalogue_parsing() {
    let raw = r#"[
        {"bench": "pyaes", "payload": "{\"n\": 5}", "mean": 100, "stdev": 3.5},
        {"bench": "chameleon", "payload": "{\"rows\": 2, \"cols\": 4}", "mean": 250, "mem_mib": 600}
    ]"#;
    let table = WorkloadTable::from_json_reader(raw.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    let pyaes = &table.group(0)[0];
    assert_eq!(pyaes.benchmark, "pyaes");
    assert_eq!(pyaes.exec_time_ms, 100);
    assert_eq!(pyaes.memory_mb, None);
    let chameleon = &table.group(1)[0];
    assert_eq!(chameleon.memory_mb, Some(600));
    // payload field order survives parsing
    let keys: Vec<&String> = chameleon.payload.keys().collect();
    assert_eq!(keys, ["rows", "cols"]);
}
