//! Candidate matching of trace durations against workload durations.

/// Relative matching radius: a workload duration is a candidate for trace
/// duration `t` when it falls within `[0.99 * t, 1.01 * t]`.
pub const MATCH_RADIUS_FRAC: f64 = 0.01;

/// For each trace duration, collects the indices of workload durations within
/// the relative radius, in ascending duration order. When the window is
/// empty, the nearest neighbor is used instead (both neighbors on an exact
/// distance tie), so the candidate list is never empty for a nonempty
/// workload set.
///
/// Both inputs must be sorted ascending. A single cursor walks the workload
/// durations; since windows of consecutive trace durations may overlap, the
/// cursor first backs off to the current window's left border.
pub fn pick_candidates(trace_durations: &[f64], workload_durations: &[f64]) -> Vec<Vec<usize>> {
    let mut guarded = Vec::with_capacity(workload_durations.len() + 2);
    guarded.push(f64::NEG_INFINITY);
    guarded.extend_from_slice(workload_durations);
    guarded.push(f64::INFINITY);

    let mut candidates: Vec<Vec<usize>> = vec![Vec::new(); trace_durations.len()];
    let mut s = 1; // skip the left guard
    for (t_idx, &t) in trace_durations.iter().enumerate() {
        let left = (1.0 - MATCH_RADIUS_FRAC) * t;
        let right = (1.0 + MATCH_RADIUS_FRAC) * t;

        // the previous window's tail may overlap this window
        while guarded[s] > left {
            s -= 1;
        }
        while guarded[s] < left {
            s += 1;
        }
        while guarded[s] <= right {
            candidates[t_idx].push(s - 1);
            s += 1;
        }

        if candidates[t_idx].is_empty() {
            let l_dist = t - guarded[s - 1];
            let r_dist = guarded[s] - t;
            if l_dist <= r_dist {
                candidates[t_idx].push(s - 2);
            }
            if l_dist >= r_dist {
                candidates[t_idx].push(s - 1);
            }
        }
    }
    candidates
}
