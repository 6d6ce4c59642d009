//! Mapping of trace functions onto concrete workloads.
use indexmap::IndexSet;
use log::info;
use rustc_hash::FxHashMap;

use crate::balancing::greedy_balance;
use crate::error::{Error, Result};
use crate::matching::pick_candidates;
use crate::trace::{ExecTimeKey, TraceTable};
use crate::workload::{Workload, WorkloadTable};

/// A complete trace-function → workload mapping: exactly one workload per
/// trace function, chosen so that aggregate invocation load stays balanced
/// across benchmarks. Built once, read-only afterwards.
pub struct FunctionMapping {
    trace: TraceTable,
    mapping: Vec<Workload>,
    exec_time_index: FxHashMap<ExecTimeKey, usize>,
}

impl FunctionMapping {
    /// Matches every trace function against the workload catalogue (±1%
    /// radius with nearest-neighbor fallback), balances the distinct
    /// benchmarks reachable per function with the greedy heuristic, then
    /// picks the first candidate workload of the chosen benchmark
    /// (candidates in ascending duration order, catalogue order within a
    /// duration bucket).
    pub fn new(trace: TraceTable, workloads: &WorkloadTable) -> Result<Self> {
        let trace_durations = trace.durations();
        let candidates = pick_candidates(&trace_durations, workloads.durations());

        // distinct benchmarks reachable per function, interned to dense
        // machine ids in first-encounter order
        let mut machines: IndexSet<&str> = IndexSet::new();
        let mut permitted: Vec<Vec<usize>> = Vec::with_capacity(candidates.len());
        for cand in &candidates {
            let mut per_function: IndexSet<usize> = IndexSet::new();
            for &w_idx in cand {
                for wl in workloads.group(w_idx) {
                    let (machine, _) = machines.insert_full(wl.benchmark.as_str());
                    per_function.insert(machine);
                }
            }
            permitted.push(per_function.into_iter().collect());
        }

        let supply: Vec<u64> = trace.functions().iter().map(|f| f.inv_count).collect();
        let chosen = greedy_balance(&permitted, &supply, machines.len());

        let mut mapping = Vec::with_capacity(candidates.len());
        for (i, cand) in candidates.iter().enumerate() {
            let benchmark = *machines
                .get_index(chosen[i])
                .expect("chosen machine id out of range");
            let workload = cand
                .iter()
                .flat_map(|&w_idx| workloads.group(w_idx))
                .find(|wl| wl.benchmark == benchmark)
                .ok_or_else(|| Error::NoCandidateWorkload {
                    benchmark: benchmark.to_string(),
                    dur_ms: trace_durations[i],
                })?;
            mapping.push(workload.clone());
        }

        let mut exec_time_index = FxHashMap::default();
        for (i, &t) in trace_durations.iter().enumerate() {
            exec_time_index.insert(ExecTimeKey::new(t), i);
        }

        info!(
            "mapped {} trace functions onto workloads across {} benchmarks",
            trace.len(),
            machines.len()
        );
        Ok(Self {
            trace,
            mapping,
            exec_time_index,
        })
    }

    /// Returns the workload mapped to the trace function with execution time
    /// `exec_time`. The time must be bit-exact equal to a duration present
    /// in the trace table; anything else is a lookup failure.
    pub fn lookup(&self, exec_time: f64) -> Result<&Workload> {
        let idx = self
            .exec_time_index
            .get(&ExecTimeKey::new(exec_time))
            .ok_or(Error::UnknownExecTime(exec_time))?;
        Ok(&self.mapping[*idx])
    }

    pub fn trace(&self) -> &TraceTable {
        &self.trace
    }

    /// The mapped workloads, indexed by trace function position.
    pub fn workloads(&self) -> &[Workload] {
        &self.mapping
    }
}
