//! Namespaced variant properties and their canonical text form.
//!
//! A property is written `<namespace> :: <feature> :: <value>`. The form is
//! case- and whitespace-sensitive: the separator is exactly `" :: "`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};

const SEPARATOR: &str = " :: ";

/// One concrete selection against a provider's axis.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantProperty {
    /// Provider namespace (e.g., "aarch64").
    pub namespace: String,
    /// Axis name within the namespace (e.g., "version", "sve").
    pub feature: String,
    /// Selected value (e.g., "8.4a", "on").
    pub value: String,
}

impl VariantProperty {
    pub fn new(
        namespace: impl Into<String>,
        feature: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            feature: feature.into(),
            value: value.into(),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

fn is_value(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'.')
}

impl FromStr for VariantProperty {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [namespace, feature, value] = parts[..] else {
            return Err(DescriptorError::Malformed(s.to_string()));
        };

        if !is_identifier(namespace) {
            return Err(DescriptorError::InvalidSegment {
                segment: "namespace",
                value: namespace.to_string(),
            });
        }
        if !is_identifier(feature) {
            return Err(DescriptorError::InvalidSegment {
                segment: "feature",
                value: feature.to_string(),
            });
        }
        if !is_value(value) {
            return Err(DescriptorError::InvalidSegment {
                segment: "value",
                value: value.to_string(),
            });
        }

        Ok(Self::new(namespace, feature, value))
    }
}

impl fmt::Display for VariantProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.namespace, self.feature, self.value
        )
    }
}
