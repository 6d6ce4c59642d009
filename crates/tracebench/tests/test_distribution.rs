mod common;
use common::assert_float_eq;

use tracebench::distribution::Distribution;
use tracebench::error::Error;

#[test]
fn test_cdf_bounds_and_merging() {
    // duplicate value 2.0 merges its weights into one bucket
    let dist = Distribution::new(&[2.0, 1.0, 2.0], &[1, 2, 3]);
    assert_float_eq(dist.cdf(0.5), 0.0, 1e-12);
    assert_float_eq(dist.cdf(1.0), 2.0 / 6.0, 1e-12);
    assert_float_eq(dist.cdf(1.5), 2.0 / 6.0, 1e-12);
    assert_float_eq(dist.cdf(2.0), 1.0, 1e-12);
    assert_float_eq(dist.cdf(100.0), 1.0, 1e-12);
}

#[test]
fn test_cdf_is_nondecreasing() {
    let dist = Distribution::new(&[4.0, 8.0, 2.0, 16.0], &[1, 1, 5, 2]);
    let mut prev = 0.0;
    for x in [1.0, 2.0, 3.0, 4.0, 8.0, 16.0, 32.0] {
        let y = dist.cdf(x);
        assert!(y >= prev);
        prev = y;
    }
    assert_float_eq(prev, 1.0, 1e-12);
}

#[test]
fn test_inverse_cdf_returns_sample_values() {
    let values = [4.0, 8.0, 2.0, 16.0];
    let dist = Distribution::new(&values, &[1, 1, 5, 2]);
    for u in [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 0.99, 1.0] {
        let x = dist.inverse_cdf(u).unwrap();
        assert!(values.contains(&x), "{} not a sample value", x);
    }
}

#[test]
fn test_weighted_scenario() {
    // cumulative mass: 0.25 at 5.0, 1.0 at 15.0
    let dist = Distribution::new(&[5.0, 15.0], &[1, 3]);
    assert_float_eq(dist.cdf(5.0), 0.25, 1e-12);
    assert_float_eq(dist.cdf(15.0), 1.0, 1e-12);
    assert_eq!(dist.inverse_cdf(0.1).unwrap(), 5.0);
    assert_eq!(dist.inverse_cdf(0.5).unwrap(), 15.0);
    assert_eq!(dist.inverse_cdf(1.0).unwrap(), 15.0);
}

#[test]
fn test_non_invertible_at_step_boundaries() {
    // inverse_cdf reads at the insertion point while cdf reads one slot to
    // the left, so a round trip at a step value lands on the next step
    let dist = Distribution::new(&[5.0, 15.0], &[1, 3]);
    let u = dist.cdf(5.0);
    assert_eq!(dist.inverse_cdf(u).unwrap(), 15.0);
}

#[test]
fn test_inverse_cdf_validates_probability() {
    let dist = Distribution::new(&[1.0], &[1]);
    assert!(matches!(dist.inverse_cdf(-0.1), Err(Error::ProbabilityOutOfRange(_))));
    assert!(matches!(dist.inverse_cdf(1.5), Err(Error::ProbabilityOutOfRange(_))));
}
