//! Ingestion of the Azure Functions 2019 trace.
//! Trace description: https://github.com/Azure/AzurePublicDataset/blob/master/AzureFunctionsDataset2019.md
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::trace::{TraceFunction, TraceTable, TRACE_MINUTES};

struct InvocationRow {
    inv_count: u64,
    minutes: Vec<u64>,
}

fn column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MalformedTrace(format!("column {} missing in {}", name, path.display())))
}

fn triplet_key(record: &StringRecord, owner: usize, app: usize, func: usize) -> String {
    let mut id = record[owner].to_string();
    id.push('_');
    id.push_str(&record[app]);
    id.push('_');
    id.push_str(&record[func]);
    id
}

/// Parses `invocations_per_function_md.anon.dNN.csv`: one row per function
/// with 1440 per-minute invocation counts. Rows containing any negative
/// count are dropped; rows sharing a hash triplet are merged by summation.
fn read_invocations(path: &Path) -> Result<FxHashMap<String, InvocationRow>> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();
    let owner = column(&headers, "HashOwner", path)?;
    let app = column(&headers, "HashApp", path)?;
    let func = column(&headers, "HashFunction", path)?;
    let first_minute = column(&headers, "1", path)?;
    if headers.get(first_minute + TRACE_MINUTES - 1) != Some("1440") {
        return Err(Error::MalformedTrace(format!(
            "expected {} per-minute columns in {}",
            TRACE_MINUTES,
            path.display()
        )));
    }

    let mut rows = FxHashMap::<String, InvocationRow>::default();
    'records: for rec in reader.records() {
        let record = rec?;
        let mut minutes = Vec::with_capacity(TRACE_MINUTES);
        for m in 0..TRACE_MINUTES {
            let field = record.get(first_minute + m).unwrap_or("");
            let count = i64::from_str(field.trim()).map_err(|_| {
                Error::MalformedTrace(format!("bad invocation count {:?} in {}", field, path.display()))
            })?;
            if count < 0 {
                continue 'records;
            }
            minutes.push(count as u64);
        }
        let entry = rows
            .entry(triplet_key(&record, owner, app, func))
            .or_insert_with(|| InvocationRow {
                inv_count: 0,
                minutes: vec![0; TRACE_MINUTES],
            });
        entry.inv_count += minutes.iter().sum::<u64>();
        for (acc, x) in entry.minutes.iter_mut().zip(minutes) {
            *acc += x;
        }
    }
    Ok(rows)
}

/// Parses `function_durations_percentiles.anon.dNN.csv` and inner-joins it
/// with the invocation rows on the hash triplet. A negative mean duration
/// falls back to the median; rows invalid even then are dropped.
fn read_durations(path: &Path, invocations: &FxHashMap<String, InvocationRow>) -> Result<Vec<TraceFunction>> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let headers = reader.headers()?.clone();
    let owner = column(&headers, "HashOwner", path)?;
    let app = column(&headers, "HashApp", path)?;
    let func = column(&headers, "HashFunction", path)?;
    let avg = column(&headers, "Average", path)?;
    let p50 = column(&headers, "percentile_Average_50", path)?;

    let mut rows = Vec::new();
    for rec in reader.records() {
        let record = rec?;
        let mean = match f64::from_str(record[avg].trim()) {
            Ok(v) if !v.is_nan() => v,
            _ => continue,
        };
        let median = match f64::from_str(record[p50].trim()) {
            Ok(v) if !v.is_nan() => v,
            _ => continue,
        };
        let dur_ms = if mean >= 0.0 { mean } else { median };
        if dur_ms < 0.0 {
            continue;
        }
        if let Some(inv) = invocations.get(&triplet_key(&record, owner, app, func)) {
            rows.push(TraceFunction {
                dur_ms,
                inv_count: inv.inv_count,
                minutes: inv.minutes.clone(),
            });
        }
    }
    Ok(rows)
}

/// Loads one day of the Azure Functions 2019 trace from `dir` and aggregates
/// it into a [`TraceTable`] keyed by execution duration.
pub fn load_azure_trace(dir: &Path, day: u32) -> Result<TraceTable> {
    let inv_path = dir.join(format!("invocations_per_function_md.anon.d{:02}.csv", day));
    let dur_path = dir.join(format!("function_durations_percentiles.anon.d{:02}.csv", day));
    let invocations = read_invocations(&inv_path)?;
    debug!("parsed {} invocation rows from {}", invocations.len(), inv_path.display());
    let rows = read_durations(&dur_path, &invocations)?;
    debug!("joined {} duration rows from {}", rows.len(), dur_path.display());
    Ok(TraceTable::from_rows(rows))
}
