//! PATH search finder
//!
//! Looks for `msbuild`, `dotnet` and `xbuild` on the PATH of non-Windows
//! hosts. Entries are tagged with the host architecture, except xbuild which
//! takes the architecture of the Mono VM running it when one is found.

use std::env;
use std::path::{Path, PathBuf};

use crate::discovery::host::{host_arch, is_windows};
use crate::discovery::mono::MonoInspector;
use crate::discovery::probe::ToolProber;
use crate::search::finder::Finder;
use crate::tool::ToolEntry;

pub struct PathFinder {
    search_dirs: Vec<PathBuf>,
    applicable: bool,
    prober: ToolProber,
    mono: MonoInspector,
}

impl PathFinder {
    /// Finder over explicit search directories
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            applicable: true,
            prober: ToolProber::new(),
            mono: MonoInspector::new(),
        }
    }

    /// Finder over the directories of the PATH environment variable
    pub fn from_env() -> Self {
        Self {
            applicable: !is_windows(),
            ..Self::new(search_path())
        }
    }
}

impl Finder for PathFinder {
    fn name(&self) -> &str {
        "path"
    }

    fn find(&self) -> Option<Vec<ToolEntry>> {
        if !self.applicable {
            return None;
        }

        let arch = host_arch();
        let mut entries = Vec::new();

        if let Some(msbuild) = find_executable("msbuild", &self.search_dirs) {
            entries.extend(self.prober.probe_msbuild(&msbuild, arch, None));
        }

        if let Some(dotnet) = find_executable("dotnet", &self.search_dirs) {
            entries.extend(self.prober.probe_dotnet_build(&dotnet, arch));
        }

        if let Some(xbuild) = find_executable("xbuild", &self.search_dirs) {
            let vm_arch = self
                .mono
                .find(&self.search_dirs)
                .map_or(arch, |vm| vm.arch);
            entries.extend(self.prober.probe_xbuild(&xbuild, vm_arch));
        }

        Some(entries)
    }
}

/// Directories listed in the PATH environment variable
pub fn search_path() -> Vec<PathBuf> {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default()
}

/// First executable file named `name` in `search_dirs`
pub fn find_executable(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| candidates(dir, name))
        .find(|candidate| is_executable(candidate))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    if is_windows() {
        vec![dir.join(format!("{name}.exe")), dir.join(name)]
    } else {
        vec![dir.join(name)]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
