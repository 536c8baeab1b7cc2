//! YAML encoding and decoding for workflow documents.

use std::cmp::Ordering;

use serde_yaml::{Mapping, Value};

use crate::domain::{AppError, TimedJob, Workflow};

/// Keys emitted before all others, in this order, in every mapping.
const PREFERRED_KEYS: [&str; 3] = ["name", "on", "if"];

/// Decode a workflow document.
pub fn decode_workflow(content: &str) -> Result<Workflow, AppError> {
    serde_yaml::from_str(content).map_err(|e| AppError::ParseError {
        what: "workflow file".to_string(),
        details: e.to_string(),
    })
}

/// Decode a YAML sequence of jobs, each carrying a `time` key.
pub fn decode_jobs(content: &str) -> Result<Vec<TimedJob>, AppError> {
    serde_yaml::from_str(content).map_err(|e| AppError::ParseError {
        what: "jobs file".to_string(),
        details: e.to_string(),
    })
}

/// Encode a workflow with deterministic key order.
///
/// Every mapping, at any depth, lists `name`, `on`, `if` first and the rest
/// of its keys lexicographically.
pub fn encode_workflow(workflow: &Workflow) -> Result<String, AppError> {
    let value = serde_yaml::to_value(workflow).map_err(|e| AppError::SerializeError {
        what: "workflow".to_string(),
        details: e.to_string(),
    })?;

    serde_yaml::to_string(&order_keys(value)).map_err(|e| AppError::SerializeError {
        what: "workflow".to_string(),
        details: e.to_string(),
    })
}

fn order_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> =
                mapping.into_iter().map(|(key, value)| (key, order_keys(value))).collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            Value::Mapping(entries.into_iter().collect::<Mapping>())
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(order_keys).collect()),
        Value::Tagged(mut tagged) => {
            let value = std::mem::take(&mut tagged.value);
            tagged.value = order_keys(value);
            Value::Tagged(tagged)
        }
        other => other,
    }
}

/// Preferred keys first, then other string keys lexicographically. Non-string
/// keys sort last and keep their relative order.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    key_rank(a).cmp(&key_rank(b)).then_with(|| match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => a.cmp(b),
        _ => Ordering::Equal,
    })
}

fn key_rank(key: &Value) -> usize {
    match key.as_str() {
        Some(text) => PREFERRED_KEYS
            .iter()
            .position(|preferred| *preferred == text)
            .unwrap_or(PREFERRED_KEYS.len()),
        None => PREFERRED_KEYS.len() + 1,
    }
}
