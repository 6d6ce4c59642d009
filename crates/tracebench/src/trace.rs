//! Aggregated trace functions and the table keyed by execution time.

/// Number of per-minute invocation columns in a one-day trace.
pub const TRACE_MINUTES: usize = 1440;

/// An aggregated real-world function from the source invocation trace,
/// keyed by its mean execution duration.
#[derive(Debug, Clone)]
pub struct TraceFunction {
    /// Mean execution duration in milliseconds.
    pub dur_ms: f64,
    /// Total invocation count over the traced day.
    pub inv_count: u64,
    /// Per-minute invocation counts, `TRACE_MINUTES` entries.
    pub minutes: Vec<u64>,
}

/// Trace functions sorted ascending by duration. Rows sharing a bit-exact
/// duration are merged by summing their weight and minute vectors.
/// Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct TraceTable {
    functions: Vec<TraceFunction>,
}

impl TraceTable {
    pub fn from_rows(mut rows: Vec<TraceFunction>) -> Self {
        for row in rows.iter() {
            assert_eq!(row.minutes.len(), TRACE_MINUTES);
        }
        rows.sort_by(|a, b| a.dur_ms.total_cmp(&b.dur_ms));
        let mut functions: Vec<TraceFunction> = Vec::new();
        for row in rows {
            match functions.last_mut() {
                Some(last) if last.dur_ms == row.dur_ms => {
                    last.inv_count += row.inv_count;
                    for (acc, x) in last.minutes.iter_mut().zip(row.minutes) {
                        *acc += x;
                    }
                }
                _ => functions.push(row),
            }
        }
        Self { functions }
    }

    pub fn functions(&self) -> &[TraceFunction] {
        &self.functions
    }

    /// Ascending, pairwise distinct durations.
    pub fn durations(&self) -> Vec<f64> {
        self.functions.iter().map(|f| f.dur_ms).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Bit-exact key over an execution time, derived once at table construction.
/// Lookups only succeed for a duration that round-trips the very same bits;
/// any arithmetic on a duration before lookup breaks equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecTimeKey(u64);

impl ExecTimeKey {
    pub fn new(dur_ms: f64) -> Self {
        Self(dur_ms.to_bits())
    }
}
