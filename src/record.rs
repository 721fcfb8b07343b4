//! Field records: the values of a structured series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A record of named numeric fields plus opaque passthrough fields
///
/// Numeric fields can take part in arithmetic when the owning series
/// declares them as value keys. Passthrough fields are never combined, only
/// carried and forward-filled.
///
/// # Example
/// ```
/// use sparseries::Record;
///
/// let r = Record::new().with_value("v", 1.0).with_meta("by", "me");
/// assert_eq!(r.value("v"), Some(1.0));
/// assert_eq!(r.meta("by").and_then(|m| m.as_str()), Some("me"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    values: BTreeMap<String, f64>,
    #[serde(default)]
    meta: BTreeMap<String, Json>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Json>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Json> {
        self.meta.get(key)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<Json>) {
        self.meta.insert(key.into(), value.into());
    }

    /// Numeric fields in key order
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Passthrough fields in key order
    pub fn metas(&self) -> impl Iterator<Item = (&str, &Json)> {
        self.meta.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the record carries no fields at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.meta.is_empty()
    }

    /// Overlay the fields of `newer` onto `self`
    ///
    /// Fields present in `newer` replace those in `self`; fields only in
    /// `self` persist.
    pub fn update(&mut self, newer: &Self) {
        self.values.extend(newer.values.iter().map(|(k, &v)| (k.clone(), v)));
        self.meta.extend(newer.meta.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// `self` overlaid with `newer`, see [`Record::update`]
    #[must_use]
    pub fn merged(&self, newer: &Self) -> Self {
        let mut out = self.clone();
        out.update(newer);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_newer_overrides_and_old_persists() {
        let old = Record::new().with_value("v", 1.0).with_value("k", 2.0).with_meta("by", "me");
        let new = Record::new().with_value("v", 3.0).with_meta("by", "you");
        let m = old.merged(&new);
        assert_eq!(m.value("v"), Some(3.0));
        assert_eq!(m.value("k"), Some(2.0));
        assert_eq!(m.meta("by"), Some(&Json::from("you")));
    }

    #[test]
    fn test_deserialize_partial_record() {
        let r: Record = serde_json::from_str(r#"{"values": {"v": 1.5}}"#).unwrap();
        assert_eq!(r.value("v"), Some(1.5));
        assert_eq!(r.metas().count(), 0);
    }
}
