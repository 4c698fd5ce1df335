//! Feature catalog.
//!
//! Every CPU feature this provider reports, in global preference order:
//! features of newer cores first, the ARMv8.0 base set last.

use variant_targets::Microarchitecture;

/// The only value a feature axis accepts.
pub const FEATURE_ON: &str = "on";

/// All known features, sorted in preference order.
pub const ALL_FEATURES: &[&str] = &[
    // neoverse_n2/v2 (armv9.0)
    "sve2",
    "flagm2",
    "frint",
    "sb",
    // m2 (armv8.5)
    "btiecv",
    // m1 (armv8.4)
    "paca",
    "pacg",
    "ssbs",
    // neoverse_v1 (armv8.4)
    "asimdfhm",
    "bf16",
    "dcpodp",
    "dgh",
    "dit",
    "flagm",
    "i8mm",
    "ilrcpc",
    "jscvt",
    "rng",
    "sha3",
    "sha512",
    "svebf16",
    "svei8mm",
    "uscat",
    // neoverse_n1 (armv8.2)
    "asimddp",
    "lrcpc",
    // a64fx (armv8.2)
    "asimdhp",
    "dcpop",
    "fcma",
    "fphp",
    "sve",
    // thunderx2 (armv8.1)
    "asimdrdmatomics",
    // cortex_a72 (armv8.0)
    "aes",
    "asimd",
    "cpuid",
    "crc32",
    "evtstrm",
    "fp",
    "pmull",
    "sha1",
    "sha2",
];

/// Whether `feature` is in the catalog.
pub fn is_known(feature: &str) -> bool {
    ALL_FEATURES.contains(&feature)
}

/// Catalog features `microarch` declares, in catalog order.
pub fn features_of(microarch: &Microarchitecture) -> impl Iterator<Item = &'static str> + '_ {
    ALL_FEATURES
        .iter()
        .copied()
        .filter(move |feature| microarch.has_feature(feature))
}
