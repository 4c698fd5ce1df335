//! Microarchitecture database and host CPU detection.
//!
//! Target data follows the archspec `microarchitectures.json` layout:
//! - **Microarchitecture:** name, vendor, features, compatible parents
//! - **Target table:** the resolved lattice, bundled or loaded from disk
//! - **Oracle:** the host CPU, either declared by the caller or detected

pub mod detect;
pub mod error;
pub mod microarch;
pub mod oracle;
pub mod table;

pub use detect::CpuInfo;
pub use error::{ArchError, Result};
pub use microarch::Microarchitecture;
pub use oracle::{CpuOracle, DeclaredHost, DetectedHost};
pub use table::TargetTable;
