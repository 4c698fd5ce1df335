//! The interface a host packaging tool drives a provider through.

use crate::config::VariantFeatureConfig;
use crate::property::VariantProperty;

/// A provider owns one namespace of variant properties.
///
/// All methods are pure over the provider's (immutable) data, so a provider
/// may be shared across threads without coordination.
pub trait VariantProvider {
    /// Error raised for contract violations and unusable inputs.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Namespace every property handled by this provider carries.
    fn namespace(&self) -> &str;

    /// Whether supported configs depend on state beyond the machine itself.
    fn is_dynamic(&self) -> bool {
        false
    }

    /// Every axis this provider could ever report, regardless of machine.
    fn all_configs(&self) -> Vec<VariantFeatureConfig>;

    /// Axes the current machine satisfies. Empty when the provider does not
    /// apply to this machine at all.
    fn supported_configs(&self) -> Result<Vec<VariantFeatureConfig>, Self::Error>;

    /// Whether `property` names a known axis with an acceptable value.
    fn validate_property(&self, property: &VariantProperty) -> Result<bool, Self::Error>;

    /// Compiler flags realising `properties` for one language and compiler.
    fn compiler_flags(
        &self,
        language: &str,
        compiler_name: &str,
        compiler_version: &str,
        properties: &[VariantProperty],
    ) -> Result<Vec<String>, Self::Error>;
}
