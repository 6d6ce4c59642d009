//! A library for mapping serverless platform invocation traces onto a fixed
//! catalogue of synthetic benchmark workloads and synthesizing scaled-down
//! request schedules for a load generator.
//!
//! The pipeline: an ingested trace ([`trace::TraceTable`]) and a workload
//! catalogue ([`workload::WorkloadTable`]) are combined into a
//! [`mapping::FunctionMapping`] (candidate matching within a ±1% execution
//! time radius plus greedy load balancing across benchmarks), which a
//! [`generator::RequestGenerator`] turns into a
//! [`specification::Specification`] with per-minute request counts, either by
//! deterministic time/rate rescaling or by seeded inverse-transform sampling
//! over an empirical [`distribution::Distribution`].

pub mod azure;
pub mod balancing;
pub mod benchmarks;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod matching;
pub mod specification;
pub mod trace;
pub mod util;
pub mod workload;
