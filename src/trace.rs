//! Trace ingestion
//!
//! Reads the extractor's JSON output into a [`Trace`]. The document has the
//! shape `{ "lines": [record, ...] }` where every record is
//!
//! ```text
//! [timeEnter, timeExit, filename, lineNumber, lineText, sideEffects...]
//! ```
//!
//! Times and line numbers arrive as strings (numbers are accepted too).
//! Side effects are either a single nested string array or the trailing
//! string elements of the record. Each record's position becomes its
//! `step_uid`, and `index`/`length` start at their step-mode defaults.

use crate::error::{FlowPlotError, Result, ResultExt};
use crate::types::{FlowPoint, Trace};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Number of fixed fields before the side effects
const FIXED_FIELDS: usize = 5;

#[derive(Debug, Deserialize)]
struct TraceDocument {
    lines: Vec<Vec<Value>>,
}

/// Load a trace from a JSON file on disk
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file {:?}", path))?;
    let trace = parse_trace(&content).with_context(|| format!("Failed to parse {:?}", path))?;
    tracing::info!("Loaded {} flow points from {:?}", trace.len(), path);
    Ok(trace)
}

/// Parse a trace from its JSON text
pub fn parse_trace(json: &str) -> Result<Trace> {
    let document: TraceDocument = serde_json::from_str(json)?;
    let points = document
        .lines
        .iter()
        .enumerate()
        .map(|(position, record)| parse_record(position, record))
        .collect::<Result<Vec<_>>>()?;
    Ok(Trace::new(points))
}

fn parse_record(position: usize, record: &[Value]) -> Result<FlowPoint> {
    let bad = |message: String| FlowPlotError::TraceFormat {
        record: position,
        message,
    };

    if record.len() < FIXED_FIELDS {
        return Err(bad(format!(
            "expected at least {} fields, found {}",
            FIXED_FIELDS,
            record.len()
        )));
    }

    let time_enter = parse_float(&record[0]).ok_or_else(|| bad("invalid enter time".into()))?;
    let time_exit = parse_float(&record[1]).ok_or_else(|| bad("invalid exit time".into()))?;
    if time_enter > time_exit {
        return Err(bad(format!(
            "enter time {} is after exit time {}",
            time_enter, time_exit
        )));
    }

    let filename = as_text(&record[2]).ok_or_else(|| bad("filename is not a string".into()))?;
    let line_number =
        parse_line_number(&record[3]).ok_or_else(|| bad("invalid line number".into()))?;
    let line_text = as_text(&record[4]).ok_or_else(|| bad("line text is not a string".into()))?;
    let side_effects = parse_side_effects(&record[FIXED_FIELDS..])
        .ok_or_else(|| bad("side effects must be strings".into()))?;

    Ok(FlowPoint::new(
        position as u64,
        time_enter,
        time_exit,
        filename,
        line_number,
        line_text,
        side_effects,
    ))
}

fn parse_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn parse_line_number(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn parse_side_effects(rest: &[Value]) -> Option<Vec<String>> {
    match rest {
        [Value::Array(nested)] => nested.iter().map(as_text).collect(),
        _ => rest.iter().map(as_text).collect(),
    }
}
