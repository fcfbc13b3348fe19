//! Finder trait for discovering tool installations

#[cfg(test)]
use mockall::automock;

use crate::tool::ToolEntry;

/// A discovery callback producing tool entries from the host environment
///
/// Finders handle their own OS-level failures (missing binaries, unreadable
/// directories) and report them as `None` or an empty list.
#[cfg_attr(test, automock)]
pub trait Finder: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Discover tools
    ///
    /// # Returns
    /// * `None` - The finder does not apply to this host (e.g. wrong OS)
    /// * `Some(entries)` - The tools found, possibly none
    fn find(&self) -> Option<Vec<ToolEntry>>;
}

/// Finder backed by a closure
pub struct FnFinder<F> {
    name: String,
    find: F,
}

impl<F> FnFinder<F>
where
    F: Fn() -> Option<Vec<ToolEntry>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, find: F) -> Self {
        Self {
            name: name.into(),
            find,
        }
    }
}

impl<F> Finder for FnFinder<F>
where
    F: Fn() -> Option<Vec<ToolEntry>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self) -> Option<Vec<ToolEntry>> {
        (self.find)()
    }
}
