//! Visual Studio 2017+ install layout finder
//!
//! Installs live under
//! `<Program Files>/Microsoft Visual Studio/<year>/<edition>/MSBuild/<toolset>/Bin/MSBuild.exe`
//! where `<edition>` is `BuildTools` (the standalone build tools) or the IDE tier.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::discovery::host::is_windows;
use crate::discovery::probe::ToolProber;
use crate::search::finder::Finder;
use crate::tool::{Arch, Edition, ToolEntry};

const VISUAL_STUDIO_DIR: &str = "Microsoft Visual Studio";
const TOOLSETS: [&str; 2] = ["Current", "15.0"];

pub struct VisualStudioFinder {
    /// Program Files roots with the architecture of the binaries they hold
    roots: Vec<(PathBuf, Arch)>,
    applicable: bool,
    prober: ToolProber,
}

impl VisualStudioFinder {
    pub fn new(roots: Vec<(PathBuf, Arch)>) -> Self {
        Self {
            roots,
            applicable: true,
            prober: ToolProber::new(),
        }
    }

    /// Finder over `ProgramFiles(x86)` (32bit) and `ProgramFiles` (64bit)
    pub fn from_env() -> Self {
        let roots = [("ProgramFiles(x86)", Arch::X86), ("ProgramFiles", Arch::X64)]
            .into_iter()
            .filter_map(|(var, arch)| std::env::var_os(var).map(|dir| (PathBuf::from(dir), arch)))
            .collect();

        Self {
            applicable: is_windows(),
            ..Self::new(roots)
        }
    }

    fn scan_root(&self, root: &Path, arch: Arch) -> Vec<ToolEntry> {
        let mut entries = Vec::new();

        for year in sorted_subdirs(&root.join(VISUAL_STUDIO_DIR)) {
            for install in sorted_subdirs(&year) {
                let Some(edition) = install_edition(&install) else {
                    continue;
                };

                for toolset in TOOLSETS {
                    let msbuild = install
                        .join("MSBuild")
                        .join(toolset)
                        .join("Bin")
                        .join("MSBuild.exe");
                    if !msbuild.is_file() {
                        continue;
                    }

                    debug!("Found Visual Studio MSBuild at {:?}", msbuild);
                    entries.extend(self.prober.probe_msbuild(&msbuild, arch, Some(edition)));
                }
            }
        }

        entries
    }
}

impl Finder for VisualStudioFinder {
    fn name(&self) -> &str {
        "visual-studio"
    }

    fn find(&self) -> Option<Vec<ToolEntry>> {
        if !self.applicable {
            return None;
        }

        Some(
            self.roots
                .iter()
                .flat_map(|(root, arch)| self.scan_root(root, *arch))
                .collect(),
        )
    }
}

/// Edition of an install directory such as `2019/Community`
fn install_edition(install: &Path) -> Option<Edition> {
    let name = install.file_name()?.to_str()?;

    if name.eq_ignore_ascii_case("BuildTools") {
        return Some(Edition::Standalone);
    }

    Edition::from_str(name)
        .inspect_err(|e| warn!("Skipping {:?}: {}", install, e))
        .ok()
}

fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}
