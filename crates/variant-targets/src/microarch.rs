//! Microarchitecture model.
//!
//! Defines a named CPU design point, its feature set, and its position
//! in the backward-compatibility lattice of its architecture family.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Vendor string marking an architecture-level (non-vendor) target.
pub const GENERIC_VENDOR: &str = "generic";

/// A named microarchitecture with its resolved ancestry.
///
/// Identity is the name: two values with the same name compare equal.
#[derive(Debug, Clone)]
pub struct Microarchitecture {
    /// Target name (e.g., "cortex_a72", "armv8.4a", "aarch64").
    pub name: String,
    /// Vendor (e.g., "ARM", "Fujitsu", or [`GENERIC_VENDOR`]).
    pub vendor: String,
    /// Feature names the target supports.
    pub features: BTreeSet<String>,
    /// Directly compatible predecessors, in declaration order.
    pub parents: Vec<Arc<Microarchitecture>>,
    /// All compatible predecessors, most specific first, without duplicates.
    pub ancestors: Vec<Arc<Microarchitecture>>,
}

impl Microarchitecture {
    /// Build a target from its direct parents, resolving the ancestor list.
    ///
    /// Ancestors are the parents in order, followed by each parent's own
    /// ancestors that are not already present.
    pub fn new<I, S>(
        name: impl Into<String>,
        vendor: impl Into<String>,
        features: I,
        parents: Vec<Arc<Microarchitecture>>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ancestors: Vec<Arc<Microarchitecture>> = parents.clone();
        for parent in &parents {
            for ancestor in &parent.ancestors {
                if !ancestors.iter().any(|a| a.name == ancestor.name) {
                    ancestors.push(Arc::clone(ancestor));
                }
            }
        }

        Self {
            name: name.into(),
            vendor: vendor.into(),
            features: features.into_iter().map(Into::into).collect(),
            parents,
            ancestors,
        }
    }

    /// Whether this is an architecture-level target rather than a vendor part.
    pub fn is_generic(&self) -> bool {
        self.vendor == GENERIC_VENDOR
    }

    /// Whether the target declares `feature`.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Whether `name` is this target or one of its ancestors.
    pub fn derives_from(&self, name: &str) -> bool {
        self.name == name || self.ancestors.iter().any(|a| a.name == name)
    }

    /// The most specific generic target among `self` and its ancestors.
    ///
    /// Falls back to `self` when nothing in the ancestry is generic.
    pub fn generic(&self) -> &Microarchitecture {
        std::iter::once(self)
            .chain(self.ancestors.iter().map(AsRef::as_ref))
            .filter(|m| m.is_generic())
            .max_by_key(|m| m.ancestors.len())
            .unwrap_or(self)
    }

    /// The root of the lattice this target belongs to (e.g., "aarch64").
    pub fn family(&self) -> &Microarchitecture {
        self.ancestors
            .iter()
            .rev()
            .map(AsRef::as_ref)
            .find(|a| a.parents.is_empty())
            .unwrap_or(self)
    }
}

impl PartialEq for Microarchitecture {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Microarchitecture {}

impl fmt::Display for Microarchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
