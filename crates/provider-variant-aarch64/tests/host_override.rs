//! Host detection driven through `VARIANT_TARGETS_HOST`.
//!
//! These tests mutate the process environment and are serialized.

use provider_variant_aarch64::{AArch64Provider, ProviderConfig, ProviderError};
use serial_test::serial;
use variant_models::{VariantFeatureConfig, VariantProvider};
use variant_targets::oracle::HOST_OVERRIDE_ENV;
use variant_targets::{ArchError, CpuOracle, DetectedHost, TargetTable};

const CORTEX_A72: &str = "\
processor\t: 0
Features\t: fp asimd evtstrm aes pmull sha1 sha2 crc32 cpuid
CPU implementer\t: 0x41
CPU part\t: 0xd08
";

#[test]
#[serial(variant_env)]
fn override_names_the_host() {
    let configs = temp_env::with_var(HOST_OVERRIDE_ENV, Some("a64fx"), || {
        AArch64Provider::detect(ProviderConfig::default())
            .unwrap()
            .supported_configs()
            .unwrap()
    });

    let mut expected = vec![VariantFeatureConfig::new("version", ["8.2a", "8.1a", "8a"])];
    expected.extend(
        [
            "asimdhp", "dcpop", "fcma", "fphp", "sve", "asimd", "cpuid", "crc32", "evtstrm", "fp",
            "sha1", "sha2",
        ]
        .into_iter()
        .map(VariantFeatureConfig::flag),
    );
    assert_eq!(configs, expected);
}

#[test]
#[serial(variant_env)]
fn empty_override_falls_back_to_detection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cpuinfo");
    std::fs::write(&path, CORTEX_A72).unwrap();

    let host = temp_env::with_var(HOST_OVERRIDE_ENV, Some(""), || {
        DetectedHost::new(TargetTable::builtin().unwrap())
            .with_arch("aarch64")
            .with_cpuinfo_path(&path)
            .host()
            .unwrap()
    });
    assert_eq!(host.name, "cortex_a72");
}

#[test]
#[serial(variant_env)]
fn unknown_override_is_an_error() {
    let result = temp_env::with_var(HOST_OVERRIDE_ENV, Some("frobnicator"), || {
        AArch64Provider::detect(ProviderConfig::default())
            .unwrap()
            .supported_configs()
    });
    assert!(matches!(
        result,
        Err(ProviderError::Targets(ArchError::UnknownTarget(ref name))) if name == "frobnicator"
    ));
}
