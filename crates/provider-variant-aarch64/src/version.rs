//! ISA version ladder.
//!
//! Renders generic AArch64 targets as short version labels
//! (`aarch64` -> `8a`, `armv8.4a` -> `8.4a`) and walks a target's
//! ancestry to produce the labels it is compatible with.

use variant_targets::Microarchitecture;

use crate::error::{ProviderError, Result};

/// Root target of the AArch64 family.
pub const BASELINE: &str = "aarch64";

/// Label of [`BASELINE`].
pub const BASELINE_LABEL: &str = "8a";

/// `<digits>` or `<digits>.<digits>`.
fn is_version_number(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    parts.all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Version label of a generic target.
///
/// Only the baseline and names shaped `armv<N>[.<M>]a` have a label; any
/// other name means the database knows targets this ladder does not.
pub fn label_for(microarch: &Microarchitecture) -> Result<String> {
    if microarch.name == BASELINE {
        return Ok(BASELINE_LABEL.to_string());
    }
    microarch
        .name
        .strip_prefix("armv")
        .and_then(|rest| rest.strip_suffix('a'))
        .filter(|number| is_version_number(number))
        .map(|number| format!("{number}a"))
        .ok_or_else(|| ProviderError::UnsupportedIdentity(microarch.name.clone()))
}

/// Labels of `microarch` and its ancestors, most specific first.
pub fn ladder(microarch: &Microarchitecture) -> Result<Vec<String>> {
    std::iter::once(microarch)
        .chain(microarch.ancestors.iter().map(AsRef::as_ref))
        .map(label_for)
        .collect()
}

/// The generic target to build a host's ladder from.
///
/// This is the host's generic target, unless that target is newer than
/// `max_known`, in which case `max_known` is used instead.
pub fn capped_generic<'a>(
    microarch: &'a Microarchitecture,
    max_known: &'a Microarchitecture,
) -> &'a Microarchitecture {
    let generic = microarch.generic();
    if generic.ancestors.iter().any(|a| a.name == max_known.name) {
        tracing::debug!(
            generic = %generic.name,
            ceiling = %max_known.name,
            "capping version ladder"
        );
        max_known
    } else {
        generic
    }
}
