//! Request-schedule generation from a function mapping.
use std::fmt;

use indexmap::IndexMap;
use log::debug;
use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::mapping::FunctionMapping;
use crate::specification::{Specification, SpecificationRow};
use crate::trace::TRACE_MINUTES;
use crate::workload::Workload;

/// Default seed for Smirnov-mode sampling.
pub const DEFAULT_SEED: u64 = 0xF0F0_F0F0_F0F0_F0F0;

/// The two mutually exclusive generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Deterministic time/rate rescaling of the trace.
    Spec,
    /// Stochastic inverse-transform sampling over the trace's durations.
    Smirnov,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Spec => write!(f, "spec"),
            GenerationMode::Smirnov => write!(f, "smirnov"),
        }
    }
}

/// Time-scaling policy for spec mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScaling {
    /// Collapse the 1440 trace minutes into `target_minutes` equal
    /// contiguous blocks, summing each block into one column. Requires
    /// `1440 % target_minutes == 0`.
    Thumbnails,
    /// Take `target_minutes` consecutive minute columns starting at
    /// `first_minute`, unchanged. The slice must fit within the trace.
    MinuteRange { first_minute: usize },
}

/// Generator parameters, fixed at construction.
pub struct GeneratorConfig {
    pub mode: GenerationMode,
    /// Only consulted in spec mode.
    pub time_scaling: TimeScaling,
    /// Target maximum number of requests per second.
    pub max_rps: u64,
    /// Target duration of the experiment, in minutes.
    pub target_minutes: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Spec,
            time_scaling: TimeScaling::Thumbnails,
            max_rps: 1,
            target_minutes: 60,
        }
    }
}

/// Rounds a scaled request rate: down, unless the fractional part is at
/// least 0.35, in which case up. The asymmetric threshold keeps more of the
/// low-rate rows alive than standard rounding would.
pub fn scale_round(value: f64) -> u64 {
    let floor = value.floor();
    if value - floor < 0.35 {
        floor as u64
    } else {
        value.ceil() as u64
    }
}

/// Turns a [`FunctionMapping`] into a [`Specification`] using the configured
/// generation mode. Invoking the operation of the other mode fails fast with
/// a configuration error.
pub struct RequestGenerator {
    config: GeneratorConfig,
    mapping: FunctionMapping,
    /// Empirical distribution over (duration, invocation count), built only
    /// for Smirnov mode.
    exec_time_dist: Option<Distribution>,
}

impl RequestGenerator {
    pub fn new(mapping: FunctionMapping, config: GeneratorConfig) -> Self {
        let exec_time_dist = (config.mode == GenerationMode::Smirnov).then(|| {
            let values = mapping.trace().durations();
            let weights: Vec<u64> = mapping.trace().functions().iter().map(|f| f.inv_count).collect();
            Distribution::new(&values, &weights)
        });
        Self {
            config,
            mapping,
            exec_time_dist,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn mapping(&self) -> &FunctionMapping {
        &self.mapping
    }

    /// Spec mode: rescales the trace's per-minute invocation matrix in time
    /// (thumbnails or minute range) and in rate (peak column total scaled to
    /// `max_rps * 60`), drops functions whose scaled row is all zero, and
    /// orders the rest by descending original invocation count (stable).
    pub fn generate_spec(&self) -> Result<Specification> {
        if self.config.mode != GenerationMode::Spec {
            return Err(Error::ModeMismatch {
                configured: self.config.mode,
                requested: GenerationMode::Spec,
            });
        }
        let functions = self.mapping.trace().functions();
        let target_minutes = self.config.target_minutes;

        let (mut minutes, minute_labels): (Vec<Vec<u64>>, Vec<String>) = match self.config.time_scaling {
            TimeScaling::Thumbnails => {
                if TRACE_MINUTES % target_minutes != 0 {
                    return Err(Error::IndivisibleMinutes {
                        total: TRACE_MINUTES,
                        target: target_minutes,
                    });
                }
                let per_block = TRACE_MINUTES / target_minutes;
                let scaled = functions
                    .iter()
                    .map(|f| {
                        (0..target_minutes)
                            .map(|b| f.minutes[per_block * b..per_block * (b + 1)].iter().sum())
                            .collect()
                    })
                    .collect();
                let labels = (0..target_minutes)
                    .map(|b| format!("{}-{}", per_block * b + 1, per_block * (b + 1)))
                    .collect();
                (scaled, labels)
            }
            TimeScaling::MinuteRange { first_minute } => {
                let end = first_minute + target_minutes;
                if end > TRACE_MINUTES {
                    return Err(Error::MinuteRangeOutOfBounds {
                        first: first_minute,
                        target: target_minutes,
                        total: TRACE_MINUTES,
                    });
                }
                let scaled = functions.iter().map(|f| f.minutes[first_minute..end].to_vec()).collect();
                let labels = (first_minute..end).map(|m| m.to_string()).collect();
                (scaled, labels)
            }
        };

        let mut max_rpm = 0u64;
        for col in 0..target_minutes {
            let total: u64 = minutes.iter().map(|row| row[col]).sum();
            max_rpm = max_rpm.max(total);
        }
        if max_rpm == 0 {
            return Err(Error::EmptyMinuteWindow);
        }
        let target_max_rpm = (self.config.max_rps * 60) as f64;
        debug!("max_rpm = {}, target_max_rpm = {}", max_rpm, target_max_rpm);
        let factor = target_max_rpm / max_rpm as f64;
        for row in minutes.iter_mut() {
            for cell in row.iter_mut() {
                *cell = scale_round(*cell as f64 * factor);
            }
        }

        let mut order: Vec<usize> = (0..functions.len()).collect();
        order.sort_by(|&a, &b| functions[b].inv_count.cmp(&functions[a].inv_count));

        let mut rows = Vec::new();
        for i in order {
            if minutes[i].iter().all(|&c| c == 0) {
                continue;
            }
            let workload = self.mapping.lookup(functions[i].dur_ms)?.clone();
            rows.push(SpecificationRow::new(
                functions[i].dur_ms,
                workload,
                std::mem::take(&mut minutes[i]),
            ));
        }
        Ok(Specification::new(headers(minute_labels), rows))
    }

    /// Smirnov mode: draws `max_rps * 60` samples per simulated minute from
    /// the seeded generator, resolves each through the inverse CDF and the
    /// exact-match lookup, and accumulates counts per workload. Rows appear
    /// in first-seen order, finally sorted by descending total count
    /// (stable).
    pub fn generate_smirnov(&self, seed: u64) -> Result<Specification> {
        let dist = self.smirnov_distribution()?;
        let mut gen = Pcg64::seed_from_u64(seed);

        let mut generated: IndexMap<String, SpecificationRow> = IndexMap::new();
        for minute in 0..self.config.target_minutes {
            for _ in 0..self.config.max_rps * 60 {
                let (exec_time, workload) = self.sample_with(dist, &mut gen)?;
                let row = generated.entry(workload.name()).or_insert_with(|| {
                    SpecificationRow::new(exec_time, workload.clone(), vec![0; self.config.target_minutes])
                });
                row.minutes_mut()[minute] += 1;
            }
        }

        let mut rows: Vec<SpecificationRow> = generated.into_iter().map(|(_, row)| row).collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.total_requests()));

        let labels = (1..=self.config.target_minutes).map(|m| m.to_string()).collect();
        Ok(Specification::new(headers(labels), rows))
    }

    /// Draws a single request: a uniform sample through the inverse CDF,
    /// resolved to a workload by exact execution-time lookup. The generator
    /// is threaded by reference so sequences stay reproducible.
    pub fn sample_request(&self, gen: &mut Pcg64) -> Result<(f64, &Workload)> {
        let dist = self.smirnov_distribution()?;
        self.sample_with(dist, gen)
    }

    fn smirnov_distribution(&self) -> Result<&Distribution> {
        self.exec_time_dist.as_ref().ok_or(Error::ModeMismatch {
            configured: self.config.mode,
            requested: GenerationMode::Smirnov,
        })
    }

    fn sample_with(&self, dist: &Distribution, gen: &mut Pcg64) -> Result<(f64, &Workload)> {
        let u = gen.gen_range(0.0..1.0);
        let exec_time = dist.inverse_cdf(u)?;
        if exec_time < 0.0 {
            return Err(Error::NegativeSample(exec_time));
        }
        let workload = self.mapping.lookup(exec_time)?;
        Ok((exec_time, workload))
    }
}

fn headers(minute_labels: Vec<String>) -> Vec<String> {
    let mut headers = Vec::with_capacity(minute_labels.len() + 2);
    headers.push("avg".to_string());
    headers.push("mapped_wreq".to_string());
    headers.extend(minute_labels);
    headers
}
