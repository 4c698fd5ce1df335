//! JSON parsing, ancestry resolution, and lookup for target definitions.
//!
//! Target definitions use the archspec `microarchitectures.json` layout. A
//! copy covering the AArch64 and x86-64 lattices is bundled with the crate;
//! [`TargetTable::load`] reads an alternative file from disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{ArchError, Result};
use crate::microarch::Microarchitecture;

const BUNDLED_TARGETS: &str = include_str!("../data/microarchitectures.json");

#[derive(Debug, Deserialize)]
struct TargetsFile {
    microarchitectures: BTreeMap<String, TargetEntry>,
    #[serde(default)]
    conversions: Conversions,
}

#[derive(Debug, Deserialize)]
struct TargetEntry {
    #[serde(default)]
    from: Vec<String>,
    vendor: String,
    #[serde(default)]
    features: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Conversions {
    #[serde(default)]
    arm_vendors: BTreeMap<String, String>,
}

/// A resolved set of microarchitectures, keyed by name.
#[derive(Debug, Clone)]
pub struct TargetTable {
    targets: BTreeMap<String, Arc<Microarchitecture>>,
    arm_vendors: BTreeMap<String, String>,
}

impl TargetTable {
    /// The table bundled with this crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUNDLED_TARGETS)
    }

    /// Load a table from an archspec-format JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ArchError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a table from an archspec-format JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TargetsFile = serde_json::from_str(json)?;

        let mut targets = BTreeMap::new();
        let mut visiting = BTreeSet::new();
        for name in file.microarchitectures.keys() {
            resolve(name, &file.microarchitectures, &mut targets, &mut visiting)?;
        }
        tracing::debug!(targets = targets.len(), "resolved target table");

        Ok(Self {
            targets,
            arm_vendors: file.conversions.arm_vendors,
        })
    }

    /// Look up a target by name.
    pub fn get(&self, name: &str) -> Option<Arc<Microarchitecture>> {
        self.targets.get(name).cloned()
    }

    /// Iterate over all targets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Microarchitecture>> {
        self.targets.values()
    }

    /// Number of targets in the table.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Vendor name for an ARM `CPU implementer` code (e.g., "0x41" -> "ARM").
    pub fn arm_vendor(&self, implementer: &str) -> Option<&str> {
        self.arm_vendors.get(implementer).map(String::as_str)
    }
}

fn resolve(
    name: &str,
    entries: &BTreeMap<String, TargetEntry>,
    resolved: &mut BTreeMap<String, Arc<Microarchitecture>>,
    visiting: &mut BTreeSet<String>,
) -> Result<Arc<Microarchitecture>> {
    if let Some(done) = resolved.get(name) {
        return Ok(Arc::clone(done));
    }
    if !visiting.insert(name.to_string()) {
        return Err(ArchError::Cycle {
            target: name.to_string(),
        });
    }

    let entry = entries
        .get(name)
        .ok_or_else(|| ArchError::UnknownTarget(name.to_string()))?;

    let mut parents = Vec::with_capacity(entry.from.len());
    for parent in &entry.from {
        if !entries.contains_key(parent) {
            return Err(ArchError::UnknownParent {
                target: name.to_string(),
                parent: parent.clone(),
            });
        }
        parents.push(resolve(parent, entries, resolved, visiting)?);
    }

    let target = Arc::new(Microarchitecture::new(
        name,
        entry.vendor.clone(),
        entry.features.iter().cloned(),
        parents,
    ));
    visiting.remove(name);
    resolved.insert(name.to_string(), Arc::clone(&target));
    Ok(target)
}
