//! Variant descriptor value types shared by wheel-variant providers.
//!
//! A provider answers two questions for its namespace:
//! - **Which axes can this machine satisfy?** ([`VariantFeatureConfig`])
//! - **Which flags build for a chosen selection?** ([`VariantProperty`])

pub mod config;
pub mod error;
pub mod property;
pub mod provider;

pub use config::VariantFeatureConfig;
pub use error::{DescriptorError, Result};
pub use property::VariantProperty;
pub use provider::VariantProvider;
