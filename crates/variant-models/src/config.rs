//! Configuration axes a provider can report.

use serde::{Deserialize, Serialize};

/// One axis of variation a build may select against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFeatureConfig {
    /// Axis name (e.g., "version", "sve").
    pub name: String,
    /// Acceptable values in priority order, highest preference first.
    pub values: Vec<String>,
    /// Whether more than one value may be selected at once.
    #[serde(default)]
    pub multi_value: bool,
}

impl VariantFeatureConfig {
    /// Single-value axis with the given priority-ordered values.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            multi_value: false,
        }
    }

    /// Boolean axis whose only value is `"on"`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ["on"])
    }
}
