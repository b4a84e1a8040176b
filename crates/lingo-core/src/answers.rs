//! Per-attempt answer store.
//!
//! Answers are keyed by section prefix and ordinal (`q0`, `ex2`, `comp1`, ...).
//! Nothing is validated on write; the scoring engine decides per section
//! whether a stored value is comparable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A typed answer entered by the learner.
///
/// Deserializing maps integral numbers (`1` and `1.0` alike) to `Index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Index(i64),
    Text(String),
    /// Anything else a caller chose to store. Never matches a correct answer.
    Other(Value),
}

impl AnswerValue {
    /// Classify a raw JSON answer.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(b) => AnswerValue::Bool(b),
            Value::String(s) => AnswerValue::Text(s),
            number @ Value::Number(_) => match integral_index(&number) {
                Some(i) => AnswerValue::Index(i),
                None => AnswerValue::Other(number),
            },
            other => AnswerValue::Other(other),
        }
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            AnswerValue::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(b) => write!(f, "{b}"),
            AnswerValue::Index(i) => write!(f, "{i}"),
            AnswerValue::Text(s) => write!(f, "{s}"),
            AnswerValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Index(value)
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(AnswerValue::from_json)
    }
}

/// Integral JSON numbers only; `1.0` counts, `"1"` and `1.5` do not.
pub fn integral_index(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

/// At most one answer per key; later writes overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    entries: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous answer under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.entries.get(key)
    }

    /// Read-only view of every stored answer, ordered by key.
    pub fn snapshot(&self) -> &BTreeMap<String, AnswerValue> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerStore
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = AnswerStore::new();
        for (key, value) in iter {
            store.set(key, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_write_overwrites() {
        let mut store = AnswerStore::new();
        store.set("q0", 1i64);
        store.set("q0", 2i64);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("q0"), Some(&AnswerValue::Index(2)));
    }

    #[test]
    fn accepts_any_value_type_under_any_key() {
        let mut store = AnswerStore::new();
        store.set("q0", true);
        store.set("ex0", "Suis");
        store.set("anything", AnswerValue::Other(serde_json::json!({"x": 1})));
        assert_eq!(store.get("q0").and_then(AnswerValue::as_bool), Some(true));
        assert_eq!(store.get("ex0").and_then(AnswerValue::as_text), Some("Suis"));
        assert!(store.get("missing").is_none());
        assert_eq!(store.snapshot().keys().collect::<Vec<_>>(), vec!["anything", "ex0", "q0"]);
    }

    #[test]
    fn deserializes_typed_values() {
        let store: AnswerStore = serde_json::from_str(
            r#"{"q0": 1, "q1": true, "ex0": "x", "comp0": null, "match0": 1.5}"#,
        )
        .unwrap();
        assert_eq!(store.get("q0"), Some(&AnswerValue::Index(1)));
        assert_eq!(store.get("q1"), Some(&AnswerValue::Bool(true)));
        assert_eq!(store.get("ex0"), Some(&AnswerValue::Text("x".into())));
        assert!(matches!(store.get("comp0"), Some(AnswerValue::Other(_))));
        assert!(matches!(store.get("match0"), Some(AnswerValue::Other(_))));
    }

    #[test]
    fn integral_floats_are_indices() {
        let store: AnswerStore =
            serde_json::from_str(r#"{"q0": 1.0, "q1": -2.0, "q2": 2.5}"#).unwrap();
        assert_eq!(store.get("q0"), Some(&AnswerValue::Index(1)));
        assert_eq!(store.get("q1"), Some(&AnswerValue::Index(-2)));
        assert!(matches!(store.get("q2"), Some(AnswerValue::Other(_))));
    }

    #[test]
    fn serializes_untagged() {
        let store: AnswerStore = [("q0", AnswerValue::Index(1)), ("ex0", "suis".into())]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&store).unwrap(),
            r#"{"ex0":"suis","q0":1}"#
        );
    }

    #[test]
    fn collects_from_pairs() {
        let store: AnswerStore = [("q0", 0i64), ("q1", 3i64)].into_iter().collect();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("q1").and_then(AnswerValue::as_index), Some(3));
    }
}
