//! Turns weighted hierarchical input into flat treemap items.
//!
//! The accepted shape is an object of objects:
//!
//! ```json
//! { "host1": { "high": 12, "medium": 4, "low": 0 } }
//! ```
//!
//! The outer key becomes the label, the inner numbers are summed into the weight and the first
//! inner key with a positive number is the color key. Anything else is skipped silently.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetItem {
    pub weight: f64,
    pub label: String,
    pub color_key: String,
}

/// Ordered treemap items, in the iteration order of the input object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    pub items: Vec<DatasetItem>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.weight).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    pub fn color_keys(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.color_key.as_str()).collect()
    }

    /// Splits into the parallel `(weights, labels, color_keys)` sequences.
    pub fn into_parts(self) -> (Vec<f64>, Vec<String>, Vec<String>) {
        let mut weights = Vec::with_capacity(self.items.len());
        let mut labels = Vec::with_capacity(self.items.len());
        let mut color_keys = Vec::with_capacity(self.items.len());
        for item in self.items {
            weights.push(item.weight);
            labels.push(item.label);
            color_keys.push(item.color_key);
        }
        (weights, labels, color_keys)
    }

    /// Largest weight first. Ties keep their input order.
    pub fn sorted_descending(&self) -> Self {
        let mut items = self.items.clone();
        items.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { items }
    }
}

/// JSON numbers as `f64`; booleans count as `1`/`0`.
fn json_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .or_else(|| n.as_i64().map(|n| n as f64))
            .or_else(|| n.as_u64().map(|n| n as f64)),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn shape_entry(label: &str, value: &Value) -> Option<DatasetItem> {
    let Value::Object(entries) = value else {
        tracing::debug!(label, "skipping treemap entry: value is not an object");
        return None;
    };

    let mut sum = 0.0;
    let mut color_key: Option<&str> = None;
    for (key, v) in entries {
        let Some(n) = json_number(v) else {
            continue;
        };
        sum += n;
        if color_key.is_none() && n > 0.0 {
            color_key = Some(key.as_str());
        }
    }

    match color_key {
        Some(color_key) if sum > 0.0 => Some(DatasetItem {
            weight: sum,
            label: label.to_string(),
            color_key: color_key.to_string(),
        }),
        _ => {
            tracing::debug!(label, sum, "skipping treemap entry: no positive weight");
            None
        }
    }
}

/// Shapes `data` into treemap items. Never fails; unsupported input yields an empty dataset.
pub fn shape(data: &Value) -> Dataset {
    let Value::Object(map) = data else {
        return Dataset::default();
    };
    let items = map
        .iter()
        .filter_map(|(label, value)| shape_entry(label, value))
        .collect();
    Dataset { items }
}
