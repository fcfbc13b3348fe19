//! Finder for the dotnet CLI in its default Windows install locations
//!
//! `%ProgramW6432%\dotnet\dotnet.exe` is the 64bit CLI and
//! `%ProgramFiles(x86)%\dotnet\dotnet.exe` the 32bit one.

use std::path::PathBuf;

use tracing::debug;

use crate::discovery::host::is_windows;
use crate::discovery::probe::ToolProber;
use crate::search::finder::Finder;
use crate::tool::{Arch, ToolEntry};

pub struct DotnetCliFinder {
    /// Program Files roots with the architecture of the CLI they hold
    roots: Vec<(PathBuf, Arch)>,
    applicable: bool,
    prober: ToolProber,
}

impl DotnetCliFinder {
    pub fn new(roots: Vec<(PathBuf, Arch)>) -> Self {
        Self {
            roots,
            applicable: true,
            prober: ToolProber::new(),
        }
    }

    pub fn from_env() -> Self {
        let roots = [("ProgramW6432", Arch::X64), ("ProgramFiles(x86)", Arch::X86)]
            .into_iter()
            .filter_map(|(var, arch)| std::env::var_os(var).map(|dir| (PathBuf::from(dir), arch)))
            .collect();

        Self {
            applicable: is_windows(),
            ..Self::new(roots)
        }
    }
}

impl Finder for DotnetCliFinder {
    fn name(&self) -> &str {
        "dotnet-cli"
    }

    fn find(&self) -> Option<Vec<ToolEntry>> {
        if !self.applicable {
            return None;
        }

        let entries = self
            .roots
            .iter()
            .filter_map(|(root, arch)| {
                let cli = root.join("dotnet").join("dotnet.exe");
                if !cli.is_file() {
                    return None;
                }
                debug!("Found dotnet CLI at {:?}", cli);
                self.prober.probe_dotnet_build(&cli, *arch)
            })
            .collect();

        Some(entries)
    }
}
