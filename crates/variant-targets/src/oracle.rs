//! CPU identity oracles.
//!
//! An oracle answers "which target is this machine?" and resolves target
//! names. [`DeclaredHost`] returns a caller-chosen target; [`DetectedHost`]
//! inspects the running machine.

use std::path::PathBuf;
use std::sync::Arc;

use crate::detect::{family_root, CpuInfo};
use crate::error::{ArchError, Result};
use crate::microarch::Microarchitecture;
use crate::table::TargetTable;

/// Environment variable naming a target that replaces host detection.
pub const HOST_OVERRIDE_ENV: &str = "VARIANT_TARGETS_HOST";

const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// Source of CPU identities.
pub trait CpuOracle {
    /// The microarchitecture of the machine being described.
    fn host(&self) -> Result<Arc<Microarchitecture>>;

    /// Look up a target by name.
    fn target(&self, name: &str) -> Option<Arc<Microarchitecture>>;
}

/// An oracle whose host is fixed by the caller.
#[derive(Debug, Clone)]
pub struct DeclaredHost {
    table: TargetTable,
    host: Arc<Microarchitecture>,
}

impl DeclaredHost {
    /// Declare an arbitrary target, which need not be part of `table`.
    pub fn new(table: TargetTable, host: Arc<Microarchitecture>) -> Self {
        Self { table, host }
    }

    /// Declare a target from `table` by name.
    pub fn named(table: TargetTable, name: &str) -> Result<Self> {
        let host = table
            .get(name)
            .ok_or_else(|| ArchError::UnknownTarget(name.to_string()))?;
        Ok(Self { table, host })
    }
}

impl CpuOracle for DeclaredHost {
    fn host(&self) -> Result<Arc<Microarchitecture>> {
        Ok(Arc::clone(&self.host))
    }

    fn target(&self, name: &str) -> Option<Arc<Microarchitecture>> {
        self.table.get(name)
    }
}

/// An oracle that detects the running machine.
///
/// Setting [`HOST_OVERRIDE_ENV`] to a target name skips detection.
#[derive(Debug, Clone)]
pub struct DetectedHost {
    table: TargetTable,
    arch: String,
    cpuinfo_path: PathBuf,
}

impl DetectedHost {
    /// Detect using the compile-time architecture and `/proc/cpuinfo`.
    pub fn new(table: TargetTable) -> Self {
        Self {
            table,
            arch: std::env::consts::ARCH.to_string(),
            cpuinfo_path: PathBuf::from(PROC_CPUINFO),
        }
    }

    /// Read cpuinfo text from `path` instead of `/proc/cpuinfo`.
    pub fn with_cpuinfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpuinfo_path = path.into();
        self
    }

    /// Treat the machine as belonging to the `arch` family.
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    fn resolve_host(&self, forced: Option<&str>) -> Result<Arc<Microarchitecture>> {
        if let Some(name) = forced {
            tracing::debug!(microarch = name, "host overridden by {HOST_OVERRIDE_ENV}");
            return self
                .table
                .get(name)
                .ok_or_else(|| ArchError::UnknownTarget(name.to_string()));
        }

        if !self.cpuinfo_path.exists() {
            tracing::warn!(
                path = %self.cpuinfo_path.display(),
                "cpuinfo unavailable, using family root"
            );
            return Ok(family_root(&self.table, &self.arch));
        }

        let cpuinfo = std::fs::read_to_string(&self.cpuinfo_path)?;
        Ok(CpuInfo::parse(&self.arch, &cpuinfo, &self.table).best_target(&self.table))
    }
}

impl CpuOracle for DetectedHost {
    fn host(&self) -> Result<Arc<Microarchitecture>> {
        let forced = std::env::var(HOST_OVERRIDE_ENV).ok();
        self.resolve_host(forced.as_deref().filter(|name| !name.is_empty()))
    }

    fn target(&self, name: &str) -> Option<Arc<Microarchitecture>> {
        self.table.get(name)
    }
}
