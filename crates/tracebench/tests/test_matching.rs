use tracebench::matching::{pick_candidates, MATCH_RADIUS_FRAC};

#[test]
fn test_candidates_within_radius() {
    let trace = [100.0];
    let workloads = [98.5, 99.5, 100.5, 101.5];
    let candidates = pick_candidates(&trace, &workloads);
    assert_eq!(candidates, vec![vec![1, 2]]);
}

#[test]
fn test_nearest_neighbor_fallback() {
    let trace = [100.0];
    let workloads = [90.0, 105.0];
    // window [99, 101] is empty, 105 is closer than 90
    let candidates = pick_candidates(&trace, &workloads);
    assert_eq!(candidates, vec![vec![1]]);
}

#[test]
fn test_nearest_neighbor_tie_includes_both() {
    let trace = [100.0];
    let workloads = [95.0, 105.0];
    let candidates = pick_candidates(&trace, &workloads);
    assert_eq!(candidates, vec![vec![0, 1]]);
}

#[test]
fn test_overlapping_windows_backtrack() {
    let trace = [100.0, 100.5];
    let workloads = [99.5, 100.0, 100.9];
    let candidates = pick_candidates(&trace, &workloads);
    // the second window starts before the first one ended
    assert_eq!(candidates, vec![vec![0, 1, 2], vec![0, 1, 2]]);
}

#[test]
fn test_candidate_sets_never_empty() {
    let trace = [0.5, 3.0, 55.5, 801.0, 12000.0];
    let workloads = [10.0, 20.0, 30.0, 800.0];
    let candidates = pick_candidates(&trace, &workloads);
    for (t_idx, cand) in candidates.iter().enumerate() {
        assert!(!cand.is_empty());
        let t = trace[t_idx];
        let in_radius = cand.iter().all(|&c| (workloads[c] - t).abs() <= MATCH_RADIUS_FRAC * t);
        if !in_radius {
            // fallback: every candidate is a nearest neighbor
            let best = workloads
                .iter()
                .map(|s| (s - t).abs())
                .fold(f64::INFINITY, f64::min);
            for &c in cand {
                assert_eq!((workloads[c] - t).abs(), best);
            }
        }
    }
}
