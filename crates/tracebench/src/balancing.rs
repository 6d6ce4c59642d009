//! Greedy generalized load balancing of trace functions over benchmarks.
//!
//! Jobs are trace functions (supply = invocation count), machines are
//! benchmark identifiers. Each job must go to one of its permitted machines
//! while keeping the peak accumulated supply per machine low. The heuristic:
//! prefer a machine that is not loaded yet and will not have many chances to
//! get picked later, i.e. minimize `load + remaining_quota`. This is a
//! makeshift heuristic, not an approximation-guaranteed algorithm.

/// Assigns one machine to every job. `permitted_machines[j]` lists the
/// machine ids job `j` may use (at least one per job); machine ids are dense
/// in `0..machine_count`.
///
/// Jobs are processed in descending supply order (stable: ties keep the
/// original index order). A tie between machines goes to the first minimum
/// in the job's permitted list.
pub fn greedy_balance(permitted_machines: &[Vec<usize>], supply: &[u64], machine_count: usize) -> Vec<usize> {
    let num_jobs = permitted_machines.len();
    let mut load = vec![0u64; machine_count];
    let mut remaining_quota = vec![0u64; machine_count];
    for (j, machines) in permitted_machines.iter().enumerate() {
        for &m in machines {
            remaining_quota[m] += supply[j];
        }
    }

    let mut order: Vec<usize> = (0..num_jobs).collect();
    order.sort_by(|&a, &b| supply[b].cmp(&supply[a]));

    let mut scheduling = vec![0usize; num_jobs];
    for &j in &order {
        let chosen = permitted_machines[j]
            .iter()
            .copied()
            .min_by_key(|&m| load[m] + remaining_quota[m])
            .expect("job with no permitted machine");
        scheduling[j] = chosen;
        load[chosen] += supply[j];
        for &m in &permitted_machines[j] {
            remaining_quota[m] -= supply[j];
        }
    }
    scheduling
}
