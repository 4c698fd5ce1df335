//! Host CPU detection from `/proc/cpuinfo`.
//!
//! Detection reduces the raw cpuinfo text to a [`CpuInfo`] (family, vendor,
//! feature flags) and then picks the most specific vendor target of that
//! family whose declared features the host provides.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::microarch::{Microarchitecture, GENERIC_VENDOR};
use crate::table::TargetTable;

/// Facts about a CPU as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    /// Architecture family, named like its root target (e.g., "aarch64").
    pub arch: String,
    /// Vendor, spelled the way target definitions spell it.
    pub vendor: String,
    /// Feature flags the kernel reports.
    pub features: BTreeSet<String>,
}

/// Root target of the `arch` family.
///
/// An architecture the table does not describe gets a bare generic root of
/// that name, so callers see a foreign family rather than a lookup failure.
pub fn family_root(table: &TargetTable, arch: &str) -> Arc<Microarchitecture> {
    table.get(arch).unwrap_or_else(|| {
        tracing::debug!(arch, "architecture not in target table");
        Arc::new(Microarchitecture::new(
            arch,
            GENERIC_VENDOR,
            Vec::<String>::new(),
            vec![],
        ))
    })
}

/// First value for `key` in cpuinfo text (`key<ws>: value` lines).
fn cpuinfo_value<'a>(cpuinfo: &'a str, key: &str) -> Option<&'a str> {
    cpuinfo.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim())
    })
}

impl CpuInfo {
    /// Parse cpuinfo text for a machine of architecture `arch`.
    ///
    /// ARM implementer codes are translated to vendor names through the
    /// table's conversions; an unknown code yields the generic vendor.
    pub fn parse(arch: &str, cpuinfo: &str, table: &TargetTable) -> Self {
        let (vendor, features) = match arch {
            "aarch64" => {
                let vendor = cpuinfo_value(cpuinfo, "CPU implementer")
                    .and_then(|code| table.arm_vendor(code))
                    .unwrap_or(GENERIC_VENDOR);
                (vendor, cpuinfo_value(cpuinfo, "Features"))
            }
            _ => {
                let vendor = cpuinfo_value(cpuinfo, "vendor_id").unwrap_or(GENERIC_VENDOR);
                (vendor, cpuinfo_value(cpuinfo, "flags"))
            }
        };

        Self {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            features: features
                .map(|f| f.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// Pick the best matching target for this CPU.
    ///
    /// Candidates are vendor targets of the same family, made by the same
    /// vendor, whose features are all present on the host. The candidate
    /// with the longest ancestry wins, then the one with most features.
    /// Without a candidate the family root is returned.
    pub fn best_target(&self, table: &TargetTable) -> Arc<Microarchitecture> {
        let root = family_root(table, &self.arch);

        let best = table
            .iter()
            .filter(|t| !t.is_generic())
            .filter(|t| t.vendor == self.vendor)
            .filter(|t| t.family().name == root.name)
            .filter(|t| t.features.is_subset(&self.features))
            .max_by(|a, b| {
                a.ancestors
                    .len()
                    .cmp(&b.ancestors.len())
                    .then_with(|| a.features.len().cmp(&b.features.len()))
                    .then_with(|| b.name.cmp(&a.name))
            });

        match best {
            Some(target) => {
                tracing::debug!(
                    microarch = %target.name,
                    vendor = %self.vendor,
                    features = self.features.len(),
                    "detected host microarchitecture"
                );
                Arc::clone(target)
            }
            None => {
                tracing::warn!(
                    arch = %self.arch,
                    vendor = %self.vendor,
                    "no vendor target matches host, using family root"
                );
                root
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITON2: &str = "\
processor\t: 0
BogoMIPS\t: 243.75
Features\t: fp asimd evtstrm aes pmull sha1 sha2 crc32 atomics fphp asimdhp cpuid asimdrdm lrcpc dcpop asimddp ssbs
CPU implementer\t: 0x41
CPU architecture: 8
CPU variant\t: 0x3
CPU part\t: 0xd0c

processor\t: 1
Features\t: fp
CPU implementer\t: 0x41
";

    const NEHALEM: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU X5570
flags\t\t: fpu vme de pse mmx sse sse2 ssse3 cx16 sse4_1 sse4_2 popcnt lahf_lm
";

    #[test]
    fn parse_aarch64_cpuinfo() {
        let table = TargetTable::builtin().unwrap();
        let info = CpuInfo::parse("aarch64", GRAVITON2, &table);
        assert_eq!(info.vendor, "ARM");
        assert!(info.features.contains("asimddp"));
        assert_eq!(info.features.len(), 17);
    }

    #[test]
    fn parse_x86_cpuinfo() {
        let table = TargetTable::builtin().unwrap();
        let info = CpuInfo::parse("x86_64", NEHALEM, &table);
        assert_eq!(info.vendor, "GenuineIntel");
        assert!(info.features.contains("sse4_2"));
    }

    #[test]
    fn neoverse_n1_is_detected() {
        let table = TargetTable::builtin().unwrap();
        let info = CpuInfo::parse("aarch64", GRAVITON2, &table);
        assert_eq!(info.best_target(&table).name, "neoverse_n1");
    }

    #[test]
    fn nehalem_is_detected() {
        let table = TargetTable::builtin().unwrap();
        let info = CpuInfo::parse("x86_64", NEHALEM, &table);
        assert_eq!(info.best_target(&table).name, "nehalem");
    }

    #[test]
    fn unknown_implementer_falls_back_to_root() {
        let table = TargetTable::builtin().unwrap();
        let cpuinfo = "Features\t: fp asimd\nCPU implementer\t: 0xee\n";
        let info = CpuInfo::parse("aarch64", cpuinfo, &table);
        assert_eq!(info.vendor, GENERIC_VENDOR);
        assert_eq!(info.best_target(&table).name, "aarch64");
    }

    #[test]
    fn unknown_arch_gets_bare_root() {
        let table = TargetTable::builtin().unwrap();
        let info = CpuInfo::parse("riscv64", "isa\t: rv64imafdc\n", &table);
        let target = info.best_target(&table);
        assert_eq!(target.name, "riscv64");
        assert!(target.is_generic());
        assert!(target.ancestors.is_empty());
        assert!(table.get("riscv64").is_none());
    }

    #[test]
    fn ties_prefer_more_features() {
        let json = r#"{"microarchitectures": {
            "aarch64": {"from": [], "vendor": "generic"},
            "alpha": {"from": ["aarch64"], "vendor": "ARM", "features": ["fp"]},
            "omega": {"from": ["aarch64"], "vendor": "ARM", "features": ["fp", "asimd"]}
        }, "conversions": {"arm_vendors": {"0x41": "ARM"}}}"#;
        let table = TargetTable::from_json_str(json).unwrap();
        let cpuinfo = "Features\t: fp asimd\nCPU implementer\t: 0x41\n";
        let info = CpuInfo::parse("aarch64", cpuinfo, &table);
        assert_eq!(info.best_target(&table).name, "omega");
    }
}
