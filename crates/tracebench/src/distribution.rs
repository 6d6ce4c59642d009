//! Piecewise-constant empirical distribution over weighted samples.
use crate::error::{Error, Result};
use crate::util::bisect_right;

/// An empirical CDF built from (value, weight) pairs, stored as a step
/// function: ascending distinct x values (with a −∞ left guard) and the
/// normalized cumulative weight reached at each step. Immutable once built.
#[derive(Debug, Clone)]
pub struct Distribution {
    cdf_x: Vec<f64>,
    cdf_y: Vec<f64>,
}

impl Distribution {
    /// Builds the CDF. Values are sorted, duplicates (bit-exact equality)
    /// merge their weights into a single bucket, and cumulative weights are
    /// normalized so the last y is exactly 1.0.
    pub fn new(values: &[f64], weights: &[u64]) -> Self {
        assert_eq!(values.len(), weights.len(), "#values != #weights");
        assert!(!values.is_empty(), "empty sample set");
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        let mut cdf_x = vec![f64::NEG_INFINITY];
        let mut bucket_weights = vec![0u64];
        for &i in &order {
            if *cdf_x.last().unwrap() == values[i] {
                *bucket_weights.last_mut().unwrap() += weights[i];
            } else {
                cdf_x.push(values[i]);
                bucket_weights.push(weights[i]);
            }
        }

        let total: u64 = bucket_weights.iter().sum();
        let mut cdf_y = Vec::with_capacity(bucket_weights.len());
        let mut cumulative = 0u64;
        for w in bucket_weights {
            cumulative += w;
            cdf_y.push(cumulative as f64 / total as f64);
        }
        Self { cdf_x, cdf_y }
    }

    /// Cumulative probability mass at or below `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let pos = bisect_right(&self.cdf_x, x);
        self.cdf_y[pos - 1]
    }

    /// Quantile lookup: the x value at the rightmost insertion point of `u`
    /// into the y sequence. Note the asymmetry with [`cdf`](Self::cdf),
    /// which reads one slot to the left: at step boundaries
    /// `inverse_cdf(cdf(x))` may not return `x`. `u` above the last step
    /// (only `u == 1.0`) resolves to the largest sample value.
    pub fn inverse_cdf(&self, u: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&u) {
            return Err(Error::ProbabilityOutOfRange(u));
        }
        let pos = bisect_right(&self.cdf_y, u).min(self.cdf_x.len() - 1);
        Ok(self.cdf_x[pos])
    }
}
