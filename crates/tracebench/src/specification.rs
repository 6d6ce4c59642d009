//! Generated request schedules and their CSV export.
use std::io::Write;

use crate::error::Result;
use crate::workload::Workload;

/// One schedule row. The identity part (trace execution time and mapped
/// workload) is fixed at construction and only readable; the per-minute
/// request counts are a separately owned accumulator that generation fills
/// in through [`minutes_mut`](Self::minutes_mut).
#[derive(Debug, Clone)]
pub struct SpecificationRow {
    trace_exec_time: f64,
    workload: Workload,
    minutes: Vec<u64>,
}

impl SpecificationRow {
    pub fn new(trace_exec_time: f64, workload: Workload, minutes: Vec<u64>) -> Self {
        Self {
            trace_exec_time,
            workload,
            minutes,
        }
    }

    pub fn trace_exec_time(&self) -> f64 {
        self.trace_exec_time
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn minutes(&self) -> &[u64] {
        &self.minutes
    }

    /// Mutable access to the per-minute accumulator.
    pub fn minutes_mut(&mut self) -> &mut [u64] {
        &mut self.minutes
    }

    /// Total request count across all minutes.
    pub fn total_requests(&self) -> u64 {
        self.minutes.iter().sum()
    }

    fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.minutes.len() + 2);
        record.push(format!("{:?}", self.trace_exec_time));
        record.push(self.workload.to_string());
        record.extend(self.minutes.iter().map(|c| c.to_string()));
        record
    }
}

/// A full request schedule: the header row followed by ordered data rows.
/// Row order is part of the contract and is produced by the generator.
#[derive(Debug, Clone)]
pub struct Specification {
    headers: Vec<String>,
    rows: Vec<SpecificationRow>,
}

impl Specification {
    pub fn new(headers: Vec<String>, rows: Vec<SpecificationRow>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SpecificationRow] {
        &self.rows
    }

    /// Writes the schedule as CSV: one header line, one line per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.headers)?;
        for row in &self.rows {
            out.write_record(row.to_record())?;
        }
        out.flush()?;
        Ok(())
    }
}
