//! Data records flowing from finders to the filter engine
//! - version.rs: Version with zero-padded comparison
//! - types.rs: Arch, Edition, ToolEntry, MonoVm

pub mod types;
pub mod version;

pub use types::{Arch, DOTNET_BUILD, Edition, EditionError, MSBUILD, MonoVm, ToolEntry, XBUILD};
pub use version::Version;
