//! Error taxonomy shared by the whole crate.
use thiserror::Error;

use crate::generator::GenerationMode;

/// Failures reported by the mapping and generation pipeline.
///
/// The variants fall into three classes: configuration mismatch
/// ([`Error::ModeMismatch`]), internal-consistency violations
/// ([`Error::DuplicateWorkloadName`], [`Error::UnknownExecTime`],
/// [`Error::NegativeSample`], [`Error::NoCandidateWorkload`]) and input
/// validation (the rest, including the I/O and parsing wrappers used by the
/// boundary loaders). None of them is recoverable: callers are expected to
/// print the error and exit with a non-zero status.
#[derive(Debug, Error)]
pub enum Error {
    #[error("generator configured for {configured} mode, operation requires {requested}")]
    ModeMismatch {
        configured: GenerationMode,
        requested: GenerationMode,
    },
    #[error("workload name \"{0}\" is not unique")]
    DuplicateWorkloadName(String),
    #[error("execution time {0} ms is not present in the trace table")]
    UnknownExecTime(f64),
    #[error("inverse CDF produced a negative execution time {0}")]
    NegativeSample(f64),
    #[error("no candidate workload of benchmark \"{benchmark}\" for trace duration {dur_ms} ms")]
    NoCandidateWorkload { benchmark: String, dur_ms: f64 },
    #[error("probability {0} out of range [0, 1]")]
    ProbabilityOutOfRange(f64),
    #[error("{total} trace minutes cannot be split into {target} equal blocks")]
    IndivisibleMinutes { total: usize, target: usize },
    #[error("minute range [{first}, {first} + {target}) exceeds the {total} trace minutes")]
    MinuteRangeOutOfBounds {
        first: usize,
        target: usize,
        total: usize,
    },
    #[error("selected minute window contains no invocations")]
    EmptyMinuteWindow,
    #[error("unknown benchmark \"{0}\"")]
    UnknownBenchmark(String),
    #[error("memory footprint {0} MiB exceeds the quantization table")]
    MemoryOutOfRange(u64),
    #[error("malformed trace: {0}")]
    MalformedTrace(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
