//! Small shared helpers.

/// Returns the rightmost insertion point for `x` in the ascending slice `xs`,
/// i.e. the number of elements less than or equal to `x`. Equal elements end
/// up to the left of the insertion point.
///
/// `xs` must be sorted in ascending order and free of NaN.
pub fn bisect_right(xs: &[f64], x: f64) -> usize {
    xs.partition_point(|v| *v <= x)
}

/// Same insertion-point rule for integer slices.
pub fn bisect_right_u64(xs: &[u64], x: u64) -> usize {
    xs.partition_point(|v| *v <= x)
}
