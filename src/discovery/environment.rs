//! Finder for tools named by environment variables
//!
//! - `MSBUILD_PATH`: an MSBuild binary, or the dotnet CLI when its file name is `dotnet`
//! - `XBUILD_PATH`: an XBuild binary
//!
//! Both are reported as 32bit.

use std::env;
use std::path::PathBuf;

use crate::config::{MSBUILD_PATH_ENV, XBUILD_PATH_ENV};
use crate::discovery::probe::ToolProber;
use crate::search::finder::Finder;
use crate::tool::{Arch, ToolEntry};

pub struct EnvironmentFinder {
    msbuild: Option<PathBuf>,
    xbuild: Option<PathBuf>,
    prober: ToolProber,
}

impl EnvironmentFinder {
    pub fn new(msbuild: Option<PathBuf>, xbuild: Option<PathBuf>) -> Self {
        Self {
            msbuild,
            xbuild,
            prober: ToolProber::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(path_var(MSBUILD_PATH_ENV), path_var(XBUILD_PATH_ENV))
    }
}

impl Finder for EnvironmentFinder {
    fn name(&self) -> &str {
        "environment"
    }

    fn find(&self) -> Option<Vec<ToolEntry>> {
        let mut entries = Vec::new();

        if let Some(path) = &self.msbuild {
            let is_dotnet = path
                .file_stem()
                .is_some_and(|stem| stem.eq_ignore_ascii_case("dotnet"));

            if is_dotnet {
                entries.extend(self.prober.probe_dotnet_build(path, Arch::X86));
            } else {
                entries.extend(self.prober.probe_msbuild(path, Arch::X86, None));
            }
        }

        if let Some(path) = &self.xbuild {
            entries.extend(self.prober.probe_xbuild(path, Arch::X86));
        }

        Some(entries)
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{DOTNET_BUILD, MSBUILD, XBUILD};
    use tempfile::TempDir;

    #[test]
    fn find_without_variables_reports_nothing() {
        assert_eq!(EnvironmentFinder::new(None, None).find(), Some(vec![]));
    }

    #[test]
    fn find_with_missing_binaries_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let finder = EnvironmentFinder::new(
            Some(dir.path().join("MSBuild.exe")),
            Some(dir.path().join("xbuild")),
        );

        assert_eq!(finder.find(), Some(vec![]));
    }

    #[cfg(unix)]
    #[test]
    fn find_probes_msbuild_and_xbuild_as_32bit() {
        use crate::discovery::test_support::fake_tool;

        let dir = TempDir::new().unwrap();
        let msbuild = fake_tool(
            dir.path(),
            "msbuild",
            "Microsoft (R) Build Engine version 15.9.21+g9802d43bc3",
        );
        let xbuild = fake_tool(dir.path(), "xbuild", "XBuild Engine Version 14.0");

        let entries = EnvironmentFinder::new(Some(msbuild.clone()), Some(xbuild.clone()))
            .find()
            .unwrap();

        assert_eq!(
            entries,
            vec![
                ToolEntry::new(MSBUILD, [15, 9, 21], Arch::X86, None, msbuild),
                ToolEntry::new(XBUILD, [14, 0], Arch::X86, None, xbuild),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn find_treats_dotnet_msbuild_path_as_dotnet_build() {
        use crate::discovery::test_support::fake_tool;

        let dir = TempDir::new().unwrap();
        let dotnet = fake_tool(dir.path(), "dotnet", "MSBuild version 17.8.3+195e7f5a3 for .NET");

        let entries = EnvironmentFinder::new(Some(dotnet), None).find().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, DOTNET_BUILD);
    }
}
