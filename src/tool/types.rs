//! Records produced by finders and consumed by the filter engine

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::tool::version::Version;

/// Tool name reported by MSBuild finders
pub const MSBUILD: &str = "msbuild";
/// Tool name reported by Mono's XBuild finders
pub const XBUILD: &str = "xbuild";
/// Tool name reported for the dotnet CLI build command
pub const DOTNET_BUILD: &str = "dotnet build";

/// Architecture of a tool installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    /// 32bit
    X86,
    /// 64bit
    X64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "32bit",
            Arch::X64 => "64bit",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32bit" => Ok(Arch::X86),
            "64bit" => Ok(Arch::X64),
            _ => Err(()),
        }
    }
}

impl Serialize for Arch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Visual Studio distribution tier of an MSBuild installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Community,
    Professional,
    Enterprise,
    Ultimate,
    /// Build Tools installed without the IDE
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown edition: {0}")]
pub struct EditionError(pub String);

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Community => "community",
            Edition::Professional => "professional",
            Edition::Enterprise => "enterprise",
            Edition::Ultimate => "ultimate",
            Edition::Standalone => "standalone",
        }
    }

    /// Sort rank of an optional edition, cheapest tier first.
    ///
    /// Installations without an edition rank with the standalone Build Tools,
    /// after every IDE tier.
    pub fn rank(edition: Option<Edition>) -> u8 {
        match edition {
            Some(Edition::Community) => 1,
            Some(Edition::Professional) => 2,
            Some(Edition::Enterprise | Edition::Ultimate) => 3,
            Some(Edition::Standalone) | None => 4,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Edition {
    type Err = EditionError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "community" => Ok(Edition::Community),
            "professional" => Ok(Edition::Professional),
            "enterprise" => Ok(Edition::Enterprise),
            "ultimate" => Ok(Edition::Ultimate),
            "standalone" => Ok(Edition::Standalone),
            _ => Err(EditionError(s.to_string())),
        }
    }
}

impl Serialize for Edition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A discovered build tool binary
///
/// Two entries describe the same installation only when every field is equal,
/// so entries reported by several finders collapse in a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ToolEntry {
    /// Tool family, e.g. "msbuild", "xbuild" or "dotnet build"
    pub name: String,
    pub version: Version,
    pub arch: Arch,
    /// Only MSBuild shipped with Visual Studio 2017 or later reports an edition
    pub edition: Option<Edition>,
    /// Absolute path to the binary
    pub path: PathBuf,
}

impl ToolEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<Version>,
        arch: Arch,
        edition: Option<Edition>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            arch,
            edition,
            path: path.into(),
        }
    }
}

impl fmt::Display for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.version, self.arch)?;
        if let Some(edition) = self.edition {
            write!(f, " {edition}")?;
        }
        write!(f, " {}", self.path.display())
    }
}

/// A Mono runtime binary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MonoVm {
    pub version: Version,
    pub arch: Arch,
    pub path: PathBuf,
}

impl fmt::Display for MonoVm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mono {} {} {}", self.version, self.arch, self.path.display())
    }
}
