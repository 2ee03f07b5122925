use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, GraphResult};

/// One input row: an insertion-ordered mapping of field name to JSON value.
///
/// Cloning is cheap (shared storage), so projected shapes keep a clone as the
/// back-reference to their source row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Arc<IndexMap<String, Value>>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: Arc::new(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.fields).insert(key.into(), value.into());
        self
    }

    /// Parses a JSON object into a record.
    pub fn from_json(value: Value) -> GraphResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_fields(map)),
            other => Err(GraphError::InvalidData(format!(
                "record must be a JSON object, got `{other}`"
            ))),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Numeric view of a field.
    ///
    /// `None` when the field is absent. Present but non-numeric values
    /// (`null`, unparsable strings, arrays, objects) yield `NaN`.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).map(coerce_number)
    }

    /// Numeric view where an absent field counts as `0`.
    #[must_use]
    pub fn number_or_zero(&self, key: &str) -> f64 {
        self.number(key).unwrap_or(0.0)
    }

    /// String identity of the row, `None` when the field is absent or `null`.
    #[must_use]
    pub fn identity(&self, index_by: &str) -> Option<String> {
        match self.fields.get(index_by)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), format_number)),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Formats a float the way a JavaScript string conversion would for the
/// common cases: integral values print without a fractional part.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_formats_numbers_without_trailing_zero() {
        let record = Record::new().with("index", 3.0);
        assert_eq!(record.identity("index").as_deref(), Some("3"));

        let record = Record::new().with("index", 2.5);
        assert_eq!(record.identity("index").as_deref(), Some("2.5"));
    }

    #[test]
    fn identity_is_none_for_missing_or_null() {
        let record = Record::from_json(json!({ "index": null, "a": 1 })).expect("object");
        assert_eq!(record.identity("index"), None);
        assert_eq!(record.identity("other"), None);
    }

    #[test]
    fn number_coercion_distinguishes_missing_from_nan() {
        let record = Record::from_json(json!({ "a": "4.5", "b": null, "c": "x" })).expect("object");
        assert_eq!(record.number("a"), Some(4.5));
        assert!(record.number("b").is_some_and(f64::is_nan));
        assert!(record.number("c").is_some_and(f64::is_nan));
        assert_eq!(record.number("d"), None);
        assert_eq!(record.number_or_zero("d"), 0.0);
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = Record::from_json(json!([1, 2])).expect_err("array is not a record");
        assert!(matches!(err, GraphError::InvalidData(_)));
    }
}
