//! Mono VM discovery
//!
//! XBuild runs on the Mono VM, so its architecture is the VM's. `mono --version`
//! prints something like:
//!
//! ```text
//! Mono JIT compiler version 6.12.0.182 (tarball Tue Jun 14 22:33:33 UTC 2022)
//! ...
//!     Architecture:  amd64
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::discovery::host::host_arch;
use crate::discovery::path::{find_executable, search_path};
use crate::discovery::probe::run_tool;
use crate::tool::{Arch, MonoVm, Version};

pub struct MonoInspector {
    /// Regex for `Mono JIT compiler version 6.12.0.182`
    version_re: Regex,
    /// Regex for `Architecture:  amd64`
    arch_re: Regex,
}

impl MonoInspector {
    pub fn new() -> Self {
        Self {
            version_re: Regex::new(r"Mono JIT compiler version\s+([0-9]+(?:\.[0-9]+)*)").unwrap(),
            arch_re: Regex::new(r"Architecture:\s*(\S+)").unwrap(),
        }
    }

    /// Build a [`MonoVm`] from `mono --version` output
    ///
    /// Falls back to the host architecture when the output has no
    /// architecture line or names an unknown one.
    pub fn parse_version_output(&self, output: &str, path: &Path) -> Option<MonoVm> {
        let version: Version = self
            .version_re
            .captures(output)?
            .get(1)?
            .as_str()
            .parse()
            .ok()?;

        let arch = self
            .arch_re
            .captures(output)
            .and_then(|caps| caps.get(1))
            .and_then(|name| mono_arch(name.as_str()))
            .unwrap_or_else(host_arch);

        Some(MonoVm {
            version,
            arch,
            path: path.to_path_buf(),
        })
    }

    /// Look up `mono` in `search_dirs` and inspect it
    pub fn find(&self, search_dirs: &[PathBuf]) -> Option<MonoVm> {
        let path = find_executable("mono", search_dirs)?;

        let output = run_tool(&path, &["--version"])
            .inspect_err(|e| warn!("{}", e))
            .ok()?;

        let vm = self.parse_version_output(&output, &path);
        match &vm {
            Some(vm) => debug!("Found {}", vm),
            None => warn!("Unrecognized version output from {:?}", path),
        }
        vm
    }
}

impl Default for MonoInspector {
    fn default() -> Self {
        Self::new()
    }
}

/// Inspect the `mono` found on PATH
pub fn find_mono_vm() -> Option<MonoVm> {
    MonoInspector::new().find(&search_path())
}

/// Word size of a Mono architecture name
fn mono_arch(name: &str) -> Option<Arch> {
    match name {
        "amd64" | "arm64" | "ia64" => Some(Arch::X64),
        "x86" | "arm" | "armel,vfp+hard" => Some(Arch::X86),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::test_support::fake_tool;
    use rstest::rstest;
    use tempfile::TempDir;

    const MONO_OUTPUT: &str = "Mono JIT compiler version 6.12.0.182 (tarball Tue Jun 14 22:33:33 UTC 2022)
Copyright (C) 2002-2014 Novell, Inc, Xamarin Inc and Contributors. www.mono-project.com
	TLS:           __thread
	SIGSEGV:       altstack
	Architecture:  x86
	Disabled:      none";

    #[rstest]
    #[case("amd64", Some(Arch::X64))]
    #[case("arm64", Some(Arch::X64))]
    #[case("ia64", Some(Arch::X64))]
    #[case("x86", Some(Arch::X86))]
    #[case("arm", Some(Arch::X86))]
    #[case("armel,vfp+hard", Some(Arch::X86))]
    #[case("s390x", None)]
    fn mono_arch_maps_known_names(#[case] name: &str, #[case] expected: Option<Arch>) {
        assert_eq!(mono_arch(name), expected);
    }

    #[test]
    fn parse_version_output_reads_version_and_arch() {
        let vm = MonoInspector::new()
            .parse_version_output(MONO_OUTPUT, Path::new("/usr/bin/mono"))
            .unwrap();

        assert_eq!(
            vm,
            MonoVm {
                version: Version::from([6, 12, 0, 182]),
                arch: Arch::X86,
                path: PathBuf::from("/usr/bin/mono"),
            }
        );
    }

    #[test]
    fn parse_version_output_without_arch_uses_host_arch() {
        let vm = MonoInspector::new()
            .parse_version_output("Mono JIT compiler version 4.6.2", Path::new("/usr/bin/mono"))
            .unwrap();

        assert_eq!(vm.arch, host_arch());
    }

    #[test]
    fn parse_version_output_rejects_other_output() {
        assert_eq!(
            MonoInspector::new().parse_version_output("bash: mono: not found", Path::new("mono")),
            None
        );
    }

    #[test]
    fn find_without_mono_on_path_returns_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(MonoInspector::new().find(&[dir.path().to_path_buf()]), None);
    }

    #[cfg(unix)]
    #[test]
    fn find_runs_mono_from_search_dirs() {
        let dir = TempDir::new().unwrap();
        let path = fake_tool(dir.path(), "mono", MONO_OUTPUT);

        let vm = MonoInspector::new()
            .find(&[dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(vm.path, path);
        assert_eq!(vm.version, Version::from([6, 12, 0, 182]));
        assert_eq!(vm.arch, Arch::X86);
    }
}
