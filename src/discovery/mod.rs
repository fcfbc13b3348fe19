//! Built-in finders
//!
//! Each finder looks in one kind of place and probes the binaries it finds:
//!
//! | Finder | Looks at | Applies on |
//! |--------|----------|------------|
//! | [`EnvironmentFinder`] | `MSBUILD_PATH`, `XBUILD_PATH` | everywhere |
//! | [`PathFinder`] | `PATH` directories | non-Windows |
//! | [`VisualStudioFinder`] | Visual Studio 2017+ install layout | Windows |
//! | [`DotnetCliFinder`] | `Program Files\dotnet` | Windows |

pub mod dotnet_cli;
pub mod environment;
pub mod host;
pub mod mono;
pub mod path;
pub mod probe;
pub mod visual_studio;

pub use dotnet_cli::DotnetCliFinder;
pub use environment::EnvironmentFinder;
pub use mono::{MonoInspector, find_mono_vm};
pub use path::PathFinder;
pub use probe::{ProbeError, ToolProber};
pub use visual_studio::VisualStudioFinder;

use tracing::info;

use crate::config::FindersConfig;
use crate::search::registry::FinderRegistry;

/// Register the enabled built-in finders, in the order they are consulted
pub fn register_default_finders(registry: &mut FinderRegistry, config: &FindersConfig) {
    if config.environment.enabled {
        registry.register(EnvironmentFinder::from_env());
    }
    if config.path.enabled {
        registry.register(PathFinder::from_env());
    }
    if config.visual_studio.enabled {
        registry.register(VisualStudioFinder::from_env());
    }
    if config.dotnet_cli.enabled {
        registry.register(DotnetCliFinder::from_env());
    }

    info!("Registered {} built-in finders", registry.len());
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Write a shell script that prints `output` whatever its arguments
    pub fn fake_tool(dir: &Path, name: &str, output: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(
            &path,
            format!("#!/bin/sh\ncat <<'__OUTPUT__'\n{output}\n__OUTPUT__\n"),
        )
        .unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        path
    }
}
