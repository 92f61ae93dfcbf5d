use std::fmt;

use foundation::{ValueBounds, fnv1a_32};
use serde_json::Value;

use crate::categories::CategoryRegistry;
use crate::point::{CategoryId, Point};

/// Errors from seed normalization. Any failure aborts the whole call: no
/// partial output, no silently substituted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    Parse(String),
    NotAnArray,
    InvalidPoint { index: usize, reason: String },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::Parse(msg) => write!(f, "seed payload is not valid JSON: {msg}"),
            NormalizeError::NotAnArray => write!(f, "seed payload must be a JSON array"),
            NormalizeError::InvalidPoint { index, reason } => {
                write!(f, "invalid seed point at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Parse a raw seed payload and normalize it.
pub fn normalize_seed_points_str(
    payload: &str,
    registry: &CategoryRegistry,
    values: ValueBounds,
) -> Result<Vec<Point>, NormalizeError> {
    let raw: Value =
        serde_json::from_str(payload).map_err(|e| NormalizeError::Parse(e.to_string()))?;
    normalize_seed_points(&raw, registry, values)
}

/// Validate and complete a raw seed dataset.
///
/// Each record needs a `position` of exactly two finite numbers; that is the
/// only hard requirement. `value`, `category`, and `id` are self-healing:
/// when absent or mistyped they are derived from the record's seed key (both
/// coordinates formatted to six decimals), so a given location always heals
/// to the same fields no matter which session or process runs this. Output
/// preserves input length and order.
pub fn normalize_seed_points(
    raw: &Value,
    registry: &CategoryRegistry,
    values: ValueBounds,
) -> Result<Vec<Point>, NormalizeError> {
    debug_assert!(values.is_valid());
    let records = raw.as_array().ok_or(NormalizeError::NotAnArray)?;

    let mut out = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        out.push(normalize_record(record, index, registry, values)?);
    }
    Ok(out)
}

fn normalize_record(
    record: &Value,
    index: usize,
    registry: &CategoryRegistry,
    values: ValueBounds,
) -> Result<Point, NormalizeError> {
    let (lng, lat) =
        parse_position(record).map_err(|reason| NormalizeError::InvalidPoint { index, reason })?;

    let seed_key = format!("{lng:.6},{lat:.6}");

    let value = match record.get("value").and_then(Value::as_f64) {
        Some(v) if v.is_finite() => values.clamp(v.round() as i32),
        _ => derive_value(&seed_key, values),
    };

    let category = match record.get("category").and_then(Value::as_str) {
        Some(s) => registry.intern(s),
        None => derive_category(&seed_key, registry),
    };

    let id = match record.get("id").and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => derive_id(&seed_key, index),
    };

    Ok(Point {
        id,
        position: [lng, lat],
        value,
        category,
    })
}

fn parse_position(record: &Value) -> Result<(f64, f64), String> {
    let position = match record.get("position").and_then(Value::as_array) {
        Some(position) => position,
        None => return Err("missing position array".to_string()),
    };
    if position.len() != 2 {
        return Err(format!(
            "position must have exactly 2 elements, got {}",
            position.len()
        ));
    }
    let lng = position[0].as_f64().filter(|v| v.is_finite());
    let lat = position[1].as_f64().filter(|v| v.is_finite());
    match (lng, lat) {
        (Some(lng), Some(lat)) => Ok((lng, lat)),
        _ => Err("position components must be finite numbers".to_string()),
    }
}

fn derive_value(seed_key: &str, values: ValueBounds) -> i32 {
    let h = fnv1a_32(seed_key);
    (i64::from(values.min) + (u64::from(h) % values.span()) as i64) as i32
}

fn derive_category(seed_key: &str, registry: &CategoryRegistry) -> CategoryId {
    let h = fnv1a_32(&format!("{seed_key}|cat"));
    registry.categories()[h as usize % registry.len()].id.clone()
}

fn derive_id(seed_key: &str, index: usize) -> String {
    let h = fnv1a_32(&format!("{seed_key}|id"));
    format!("pt_{index}_{h:x}")
}
