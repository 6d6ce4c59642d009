//! Synthetic benchmark workloads and the catalogue grouped by execution time.
use std::fmt;
use std::io::Read;

use itertools::Itertools;
use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Length of the derived workload name, benchmark prefix included.
pub const WORKLOAD_NAME_LEN: usize = 24;

/// A concrete (benchmark, payload) pair representing one synthetic request
/// type with an expected execution time. Immutable value; two workloads are
/// the same entity iff their derived [`name`](Workload::name) matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Benchmark identifier, e.g. "pyaes".
    pub benchmark: String,
    /// Invocation payload; only its serialized form matters, so field order
    /// is preserved as found in the catalogue file.
    pub payload: Map<String, Value>,
    /// Expected execution time in milliseconds.
    pub exec_time_ms: u64,
    /// Declared memory size in MiB, if the catalogue carries one.
    pub memory_mb: Option<u64>,
}

impl Workload {
    /// Derived identity: the benchmark name followed by a truncated SHA-256
    /// of the payload's compact JSON form, `WORKLOAD_NAME_LEN` chars total.
    pub fn name(&self) -> String {
        let payload = serde_json::to_string(&self.payload).unwrap();
        let digest = hex::encode(Sha256::digest(payload.as_bytes()));
        let keep = WORKLOAD_NAME_LEN.saturating_sub(self.benchmark.len() + 1);
        format!("{}-{}", self.benchmark, &digest[..keep])
    }
}

/// The wire form consumed by the load generator: a JSON object with the mean
/// execution time, the derived name and the payload as a JSON string.
impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obj = serde_json::json!({
            "mean": self.exec_time_ms,
            "bench": self.name(),
            "payload": serde_json::to_string(&self.payload).unwrap(),
        });
        write!(f, "{}", obj)
    }
}

#[derive(Deserialize)]
struct RawWorkload {
    bench: String,
    /// JSON-encoded payload object.
    payload: String,
    mean: u64,
    #[serde(default)]
    mem_mib: Option<u64>,
}

/// Workload catalogue grouped by ascending distinct execution time.
/// Within a duration group, workloads keep their catalogue-file order.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTable {
    durations: Vec<f64>,
    groups: Vec<Vec<Workload>>,
}

impl WorkloadTable {
    pub fn new(mut workloads: Vec<Workload>) -> Self {
        // stable sort keeps insertion order inside each duration bucket
        workloads.sort_by_key(|w| w.exec_time_ms);
        let mut durations = Vec::new();
        let mut groups = Vec::new();
        for (dur, group) in &workloads.into_iter().group_by(|w| w.exec_time_ms) {
            durations.push(dur as f64);
            groups.push(group.collect());
        }
        Self { durations, groups }
    }

    /// Loads the catalogue from its JSON file: an array of
    /// `{bench, payload, mean, [stdev], [mem_mib]}` records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: Vec<RawWorkload> = serde_json::from_reader(reader)?;
        let mut workloads = Vec::with_capacity(raw.len());
        for r in raw {
            let payload: Map<String, Value> = serde_json::from_str(&r.payload)?;
            workloads.push(Workload {
                benchmark: r.bench,
                payload,
                exec_time_ms: r.mean,
                memory_mb: r.mem_mib,
            });
        }
        Ok(Self::new(workloads))
    }

    /// Ascending distinct execution times, one per group.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Workloads sharing the `idx`-th execution time, in catalogue order.
    pub fn group(&self, idx: usize) -> &[Workload] {
        &self.groups[idx]
    }

    /// All workloads, ascending by duration, catalogue order within a group.
    pub fn iter(&self) -> impl Iterator<Item = &Workload> {
        self.groups.iter().flatten()
    }

    /// Number of distinct execution times.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}
