//! Wheel-variant provider with properties specific to AArch64 CPUs.
//!
//! Reports two kinds of axes under the `aarch64` namespace:
//! - **version:** the ISA version ladder (e.g., `8.2a`, `8.1a`, `8a`)
//! - **features:** one `on`-only axis per CPU feature in [`catalog::ALL_FEATURES`]
//!
//! and turns a chosen `version` back into `-march` compiler flags.

pub mod catalog;
pub mod config;
pub mod error;
pub mod flags;
pub mod provider;
pub mod version;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use flags::{CompilerFamily, Language};
pub use provider::AArch64Provider;
