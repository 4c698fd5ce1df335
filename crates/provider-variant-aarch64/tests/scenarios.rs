//! End-to-end tests for the AArch64 provider against the bundled targets.

use std::sync::Arc;

use provider_variant_aarch64::{AArch64Provider, ProviderConfig, ProviderError};
use variant_models::{VariantFeatureConfig, VariantProperty, VariantProvider};
use variant_targets::{DeclaredHost, DetectedHost, Microarchitecture, TargetTable};

fn provider_for(host: &str) -> AArch64Provider<DeclaredHost> {
    let oracle = DeclaredHost::named(TargetTable::builtin().unwrap(), host).unwrap();
    AArch64Provider::new(oracle, ProviderConfig::default()).unwrap()
}

fn version(values: &[&str]) -> VariantFeatureConfig {
    VariantFeatureConfig::new("version", values.iter().copied())
}

fn on(names: &[&str]) -> Vec<VariantFeatureConfig> {
    names.iter().copied().map(VariantFeatureConfig::flag).collect()
}

fn aarch64(feature: &str, value: &str) -> VariantProperty {
    VariantProperty::new("aarch64", feature, value)
}

#[test]
fn cortex_a72_configs() {
    let mut expected = vec![version(&["8a"])];
    expected.extend(on(&[
        "aes", "asimd", "cpuid", "crc32", "evtstrm", "fp", "pmull", "sha1", "sha2",
    ]));
    assert_eq!(provider_for("cortex_a72").supported_configs().unwrap(), expected);
}

#[test]
fn a64fx_configs() {
    let mut expected = vec![version(&["8.2a", "8.1a", "8a"])];
    expected.extend(on(&[
        "asimdhp", "dcpop", "fcma", "fphp", "sve", "asimd", "cpuid", "crc32", "evtstrm", "fp",
        "sha1", "sha2",
    ]));
    assert_eq!(provider_for("a64fx").supported_configs().unwrap(), expected);
}

#[test]
fn armv84a_configs() {
    assert_eq!(
        provider_for("armv8.4a").supported_configs().unwrap(),
        vec![version(&["8.4a", "8.3a", "8.2a", "8.1a", "8a"])]
    );
}

#[test]
fn aarch64_configs() {
    assert_eq!(
        provider_for("aarch64").supported_configs().unwrap(),
        vec![version(&["8a"])]
    );
}

#[test]
fn non_arm_configs() {
    assert!(provider_for("nehalem").supported_configs().unwrap().is_empty());
    assert!(provider_for("x86_64").supported_configs().unwrap().is_empty());
}

#[test]
fn foreign_arch_hosts_have_no_configs() {
    for arch in ["riscv64", "arm", "x86_64"] {
        let oracle = DetectedHost::new(TargetTable::builtin().unwrap())
            .with_arch(arch)
            .with_cpuinfo_path("/nonexistent/cpuinfo");
        let provider = AArch64Provider::new(oracle, ProviderConfig::default()).unwrap();
        assert_eq!(provider.supported_configs().unwrap(), vec![], "{arch}");
    }
}

#[test]
fn level_cap() {
    let table = TargetTable::builtin().unwrap();
    let ceiling = table.get("armv9.0a").unwrap();
    let armv91a = Arc::new(Microarchitecture::new(
        "armv9.1a",
        "generic",
        Vec::<String>::new(),
        vec![ceiling],
    ));
    let frobnicator = Arc::new(Microarchitecture::new(
        "frobnicator",
        "Frobco",
        Vec::<String>::new(),
        vec![armv91a],
    ));

    let provider =
        AArch64Provider::new(DeclaredHost::new(table, frobnicator), ProviderConfig::default())
            .unwrap();
    assert_eq!(
        provider.supported_configs().unwrap(),
        vec![version(&["9.0a", "8.5a", "8.4a", "8.3a", "8.2a", "8.1a", "8a"])]
    );
}

#[test]
fn compiler_flags_for_version() {
    let provider = provider_for("aarch64");
    let flags = provider
        .compiler_flags(
            "c",
            "gcc",
            "13.2.0",
            &[aarch64("version", "8.4a"), aarch64("sve", "on")],
        )
        .unwrap();
    assert_eq!(flags, vec!["-march=armv8.4-a"]);
}

#[test]
fn compiler_flags_without_version() {
    let provider = provider_for("aarch64");
    assert!(provider
        .compiler_flags("c++", "clang", "17.0.6", &[aarch64("sve", "on")])
        .unwrap()
        .is_empty());
    assert!(provider
        .compiler_flags("c++", "clang", "17.0.6", &[])
        .unwrap()
        .is_empty());
}

#[test]
fn compiler_flags_for_foreign_namespace() {
    let provider = provider_for("aarch64");
    let err = provider
        .compiler_flags(
            "c",
            "gcc",
            "13.2.0",
            &[VariantProperty::new("x86_64", "level", "v3")],
        )
        .unwrap_err();
    assert!(matches!(err, ProviderError::ContractViolation { .. }));
}

#[test]
fn build_setup_for_version() {
    let provider = provider_for("aarch64");
    let setup = provider
        .build_setup(&[aarch64("version", "8.4a"), aarch64("sve", "on")])
        .unwrap();
    assert_eq!(setup.len(), 2);
    assert_eq!(setup["cflags"], vec!["-march=armv8.4-a"]);
    assert_eq!(setup["cxxflags"], vec!["-march=armv8.4-a"]);
    assert!(provider.build_setup(&[]).unwrap().is_empty());
}

#[test]
fn validate_properties() {
    let provider = provider_for("aarch64");
    assert!(provider.validate_property(&aarch64("version", "9.0a")).unwrap());
    assert!(provider.validate_property(&aarch64("version", "8a")).unwrap());
    assert!(!provider.validate_property(&aarch64("version", "7.3a")).unwrap());
    assert!(!provider.validate_property(&aarch64("version", "9.1a")).unwrap());
    assert!(!provider.validate_property(&aarch64("version", "8.5b")).unwrap());
    assert!(provider.validate_property(&aarch64("crc32", "on")).unwrap());
    assert!(!provider.validate_property(&aarch64("crc32", "off")).unwrap());
    assert!(!provider.validate_property(&aarch64("atomics", "on")).unwrap());
}

#[test]
fn validate_foreign_namespace() {
    let provider = provider_for("aarch64");
    assert!(matches!(
        provider.validate_property(&VariantProperty::new("x86_64", "level", "v3")),
        Err(ProviderError::ContractViolation { .. })
    ));
}

#[test]
fn provider_identity() {
    let provider = provider_for("aarch64");
    assert_eq!(provider.namespace(), "aarch64");
    assert!(!provider.is_dynamic());
}
