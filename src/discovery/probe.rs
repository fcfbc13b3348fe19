//! Version probing of build tool binaries
//!
//! Runs a tool with its version switch and scrapes the version banner:
//! - msbuild / dotnet build: `Microsoft (R) Build Engine version 15.9.21+g9802d43bc3`
//!   or `MSBuild version 17.8.3+195e7f5a3`
//! - xbuild: `XBuild Engine Version 14.0`

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::tool::{Arch, DOTNET_BUILD, Edition, MSBUILD, ToolEntry, Version, XBUILD};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to run {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unrecognized version output from {path:?}")]
    UnrecognizedOutput { path: PathBuf },
}

/// Runs build tools and turns their version output into [`ToolEntry`] records
pub struct ToolProber {
    /// Regex for the MSBuild banner, shared by `dotnet build`
    msbuild_re: Regex,
    /// Regex for the XBuild banner
    xbuild_re: Regex,
}

impl ToolProber {
    pub fn new() -> Self {
        Self {
            msbuild_re: Regex::new(
                r"(?:Microsoft \(R\) Build Engine version|MSBuild version)\s+([0-9]+(?:\.[0-9]+)+)",
            )
            .unwrap(),
            xbuild_re: Regex::new(r"XBuild Engine Version\s+([0-9]+(?:\.[0-9]+)+)").unwrap(),
        }
    }

    pub fn parse_msbuild_version(&self, output: &str) -> Option<Version> {
        capture_version(&self.msbuild_re, output)
    }

    pub fn parse_xbuild_version(&self, output: &str) -> Option<Version> {
        capture_version(&self.xbuild_re, output)
    }

    /// Probe an MSBuild binary with `/version`
    pub fn probe_msbuild(
        &self,
        path: &Path,
        arch: Arch,
        edition: Option<Edition>,
    ) -> Option<ToolEntry> {
        self.probe(path, &["/version"], MSBUILD, arch, edition, |output| {
            self.parse_msbuild_version(output)
        })
    }

    /// Probe the dotnet CLI with `build /version`
    pub fn probe_dotnet_build(&self, path: &Path, arch: Arch) -> Option<ToolEntry> {
        self.probe(path, &["build", "/version"], DOTNET_BUILD, arch, None, |output| {
            self.parse_msbuild_version(output)
        })
    }

    /// Probe an XBuild binary with `/version`
    pub fn probe_xbuild(&self, path: &Path, arch: Arch) -> Option<ToolEntry> {
        self.probe(path, &["/version"], XBUILD, arch, None, |output| {
            self.parse_xbuild_version(output)
        })
    }

    fn probe(
        &self,
        path: &Path,
        args: &[&str],
        name: &str,
        arch: Arch,
        edition: Option<Edition>,
        parse: impl Fn(&str) -> Option<Version>,
    ) -> Option<ToolEntry> {
        let output = run_tool(path, args)
            .and_then(|output| {
                parse(&output).ok_or_else(|| ProbeError::UnrecognizedOutput {
                    path: path.to_path_buf(),
                })
            })
            .inspect_err(|e| warn!("{}", e));

        let version = output.ok()?;
        debug!("Found {} {} at {:?}", name, version, path);
        Some(ToolEntry::new(name, version, arch, edition, path))
    }
}

impl Default for ToolProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a binary and return its combined stdout and stderr
pub fn run_tool(path: &Path, args: &[&str]) -> Result<String, ProbeError> {
    let output = Command::new(path)
        .args(args)
        .output()
        .map_err(|source| ProbeError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}

fn capture_version(re: &Regex, output: &str) -> Option<Version> {
    let caps = re.captures(output)?;
    caps.get(1)?.as_str().parse().ok()
}
