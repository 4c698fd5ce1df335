//! Error types for the AArch64 provider.

use std::path::PathBuf;

use variant_models::DescriptorError;
use variant_targets::ArchError;

/// Errors raised by the AArch64 provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The database produced a target name the version ladder cannot render.
    #[error("unsupported microarchitecture name '{0}'")]
    UnsupportedIdentity(String),

    /// Flags were requested for a toolchain this provider does not serve.
    #[error("unsupported toolchain: language '{language}', compiler '{compiler}'")]
    UnsupportedToolchain { language: String, compiler: String },

    /// A property from another namespace was routed to this provider.
    #[error("property namespace '{found}' routed to provider '{expected}'")]
    ContractViolation { expected: String, found: String },

    /// The configured known-maximum version is not in the target database.
    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    /// Target database or host detection error.
    #[error(transparent)]
    Targets(#[from] ArchError),

    /// Malformed descriptor text.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file not found.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
