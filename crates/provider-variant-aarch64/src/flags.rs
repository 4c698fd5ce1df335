//! Compiler flag translation.
//!
//! Only the `version` axis maps to flags today: `8.4a` becomes
//! `-march=armv8.4-a`. Feature axes are accepted but produce no flags.

use std::collections::BTreeMap;
use std::fmt;

use variant_models::VariantProperty;

use crate::error::{ProviderError, Result};

/// Axis name carrying the ISA version.
pub const VERSION_FEATURE: &str = "version";

/// Compiled languages flags can be produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    C,
    Cxx,
    Fortran,
}

impl Language {
    /// Parse a language name (`c`, `c++`/`cxx`/`cpp`, `fortran`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "c" => Some(Language::C),
            "c++" | "cxx" | "cpp" => Some(Language::Cxx),
            "fortran" => Some(Language::Fortran),
            _ => None,
        }
    }

    /// Build-setup key holding this language's flags.
    pub fn flags_key(self) -> &'static str {
        match self {
            Language::C => "cflags",
            Language::Cxx => "cxxflags",
            Language::Fortran => "fflags",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::C => "c",
            Language::Cxx => "c++",
            Language::Fortran => "fortran",
        })
    }
}

/// Compiler families; all of them take GCC-style `-march`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompilerFamily {
    Gcc,
    Clang,
    ArmClang,
}

impl CompilerFamily {
    /// Parse a compiler name (`gcc`, `clang`, `armclang` and aliases).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "gcc" | "gnu" | "gfortran" | "g++" => Some(CompilerFamily::Gcc),
            "clang" | "llvm" | "apple-clang" | "appleclang" | "flang" => Some(CompilerFamily::Clang),
            "armclang" | "arm-clang" | "armflang" => Some(CompilerFamily::ArmClang),
            _ => None,
        }
    }
}

/// Resolve a language/compiler pair, rejecting anything not served.
pub fn toolchain(language: &str, compiler: &str) -> Result<(Language, CompilerFamily)> {
    match (Language::from_name(language), CompilerFamily::from_name(compiler)) {
        (Some(lang), Some(family)) => Ok((lang, family)),
        _ => Err(ProviderError::UnsupportedToolchain {
            language: language.to_string(),
            compiler: compiler.to_string(),
        }),
    }
}

/// `-march` flag for a version label.
pub fn march_flag(version: &str) -> String {
    format!("-march=armv{}", version.replace('a', "-a"))
}

/// Check that every property belongs to `namespace`.
pub fn check_namespace(namespace: &str, properties: &[VariantProperty]) -> Result<()> {
    match properties.iter().find(|p| p.namespace != namespace) {
        Some(foreign) => Err(ProviderError::ContractViolation {
            expected: namespace.to_string(),
            found: foreign.namespace.clone(),
        }),
        None => Ok(()),
    }
}

/// Flags for the first `version` property, or none without one.
pub fn version_flags(namespace: &str, properties: &[VariantProperty]) -> Result<Vec<String>> {
    check_namespace(namespace, properties)?;
    Ok(properties
        .iter()
        .find(|p| p.feature == VERSION_FEATURE)
        .map(|p| vec![march_flag(&p.value)])
        .unwrap_or_default())
}

/// Flags bucketed by build-setup key (`cflags`, `cxxflags`).
///
/// Empty when no flags are needed.
pub fn build_setup(
    namespace: &str,
    properties: &[VariantProperty],
) -> Result<BTreeMap<String, Vec<String>>> {
    let flags = version_flags(namespace, properties)?;
    if flags.is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok([Language::C, Language::Cxx]
        .into_iter()
        .map(|lang| (lang.flags_key().to_string(), flags.clone()))
        .collect())
}
