//! The AArch64 variant provider.
//!
//! Combines the version ladder, the feature catalog, and flag translation
//! behind the [`VariantProvider`] interface.

use std::collections::BTreeMap;
use std::slice;
use std::sync::Arc;

use variant_models::{VariantFeatureConfig, VariantProperty, VariantProvider};
use variant_targets::{CpuOracle, DetectedHost, Microarchitecture};

use crate::catalog::{self, ALL_FEATURES, FEATURE_ON};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::flags::{self, VERSION_FEATURE};
use crate::version::{self, BASELINE};

/// Variant provider for AArch64 CPUs.
///
/// The known-maximum target and its ladder are resolved once at
/// construction; every query afterwards is a pure function of the oracle's
/// data.
#[derive(Debug, Clone)]
pub struct AArch64Provider<O> {
    oracle: O,
    config: ProviderConfig,
    max_known: Arc<Microarchitecture>,
    known_versions: Vec<String>,
}

impl AArch64Provider<DetectedHost> {
    /// Provider for the running machine, using the config's target table.
    pub fn detect(config: ProviderConfig) -> Result<Self> {
        let table = config.target_table()?;
        Self::new(DetectedHost::new(table), config)
    }
}

impl<O: CpuOracle> AArch64Provider<O> {
    /// Build a provider, resolving the configured known-maximum version.
    pub fn new(oracle: O, config: ProviderConfig) -> Result<Self> {
        let max_known = oracle
            .target(&config.max_known_version)
            .ok_or_else(|| ProviderError::UnknownTarget(config.max_known_version.clone()))?;
        let known_versions = version::ladder(&max_known)?;
        tracing::debug!(
            namespace = %config.namespace,
            ceiling = %max_known.name,
            versions = ?known_versions,
            "initialised aarch64 provider"
        );

        Ok(Self {
            oracle,
            config,
            max_known,
            known_versions,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Every version label up to the known maximum, newest first.
    pub fn known_versions(&self) -> &[String] {
        &self.known_versions
    }

    /// Supported axes for a declared CPU.
    ///
    /// Empty when the CPU is not an AArch64 part.
    pub fn supported_configs_for(
        &self,
        microarch: &Microarchitecture,
    ) -> Result<Vec<VariantFeatureConfig>> {
        let covered =
            microarch.generic().name == BASELINE || microarch.derives_from(BASELINE);
        if !covered {
            tracing::debug!(microarch = %microarch.name, "not an aarch64 target");
            return Ok(Vec::new());
        }

        let generic = version::capped_generic(microarch, &self.max_known);
        let versions = version::ladder(generic)?;
        tracing::debug!(
            microarch = %microarch.name,
            generic = %generic.name,
            versions = ?versions,
            "resolved version ladder"
        );

        let mut configs = vec![VariantFeatureConfig::new(VERSION_FEATURE, versions)];
        configs.extend(catalog::features_of(microarch).map(VariantFeatureConfig::flag));
        Ok(configs)
    }

    /// Parse a `<namespace> :: <feature> :: <value>` descriptor and validate it.
    pub fn validate_descriptor(&self, descriptor: &str) -> Result<bool> {
        let property: VariantProperty = descriptor.parse()?;
        self.validate_property(&property)
    }

    /// Flags bucketed by build-setup key; see [`flags::build_setup`].
    pub fn build_setup(
        &self,
        properties: &[VariantProperty],
    ) -> Result<BTreeMap<String, Vec<String>>> {
        flags::build_setup(&self.config.namespace, properties)
    }
}

impl<O: CpuOracle> VariantProvider for AArch64Provider<O> {
    type Error = ProviderError;

    fn namespace(&self) -> &str {
        &self.config.namespace
    }

    fn all_configs(&self) -> Vec<VariantFeatureConfig> {
        let mut configs = vec![VariantFeatureConfig::new(
            VERSION_FEATURE,
            self.known_versions.iter().cloned(),
        )];
        configs.extend(ALL_FEATURES.iter().copied().map(VariantFeatureConfig::flag));
        configs
    }

    fn supported_configs(&self) -> Result<Vec<VariantFeatureConfig>> {
        let host = self.oracle.host()?;
        self.supported_configs_for(&host)
    }

    fn validate_property(&self, property: &VariantProperty) -> Result<bool> {
        flags::check_namespace(&self.config.namespace, slice::from_ref(property))?;
        let valid = if property.feature == VERSION_FEATURE {
            self.known_versions.contains(&property.value)
        } else {
            catalog::is_known(&property.feature) && property.value == FEATURE_ON
        };
        Ok(valid)
    }

    fn compiler_flags(
        &self,
        language: &str,
        compiler_name: &str,
        compiler_version: &str,
        properties: &[VariantProperty],
    ) -> Result<Vec<String>> {
        let (language, compiler) = flags::toolchain(language, compiler_name)?;
        let flags = flags::version_flags(&self.config.namespace, properties)?;
        tracing::debug!(
            %language,
            ?compiler,
            compiler_version,
            flags = ?flags,
            "translated properties to compiler flags"
        );
        Ok(flags)
    }
}
