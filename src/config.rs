//! Per-series query configuration.

use serde::{Deserialize, Serialize};

/// Query behaviour of a series, fixed at construction
///
/// Carried unchanged into every series derived by slicing or transforming,
/// and inherited from the left operand when two series are combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig<V> {
    /// Linearly interpolate between neighbours at times that are not recorded,
    /// instead of holding the prior value
    pub interpolate: bool,
    /// For queries before the first recorded time, answer with the first
    /// recorded value instead of `first_val`
    pub use_first_value: bool,
    /// Value answered for queries before the first recorded time
    pub first_val: V,
}

impl<V: Default> Default for SeriesConfig<V> {
    fn default() -> Self {
        Self {
            interpolate: false,
            use_first_value: false,
            first_val: V::default(),
        }
    }
}

impl<V> SeriesConfig<V> {
    #[must_use]
    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    #[must_use]
    pub fn with_use_first_value(mut self, use_first_value: bool) -> Self {
        self.use_first_value = use_first_value;
        self
    }

    #[must_use]
    pub fn with_first_val(mut self, first_val: V) -> Self {
        self.first_val = first_val;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: SeriesConfig<f64> = serde_json::from_str(r#"{"interpolate": true}"#).unwrap();
        assert!(cfg.interpolate);
        assert!(!cfg.use_first_value);
        assert_eq!(cfg.first_val, 0.0);
    }

    #[test]
    fn test_builder() {
        let cfg = SeriesConfig::default().with_first_val(-1.0).with_use_first_value(true);
        assert_eq!(cfg.first_val, -1.0);
        assert!(cfg.use_first_value);
        assert!(!cfg.interpolate);
    }
}
