use std::sync::Arc;

use indexmap::IndexSet;
use tracing::debug;

use crate::filter::compile_tool_filter;
use crate::search::finder::Finder;
use crate::search::registry::FinderRegistry;
use crate::tool::ToolEntry;
use crate::version::error::SyntaxError;

/// Runs a set of finders and filters their combined results
#[derive(Clone, Default)]
pub struct Searcher {
    finders: Vec<Arc<dyn Finder>>,
}

impl Searcher {
    /// Searcher without any finders
    pub fn new() -> Self {
        Self::default()
    }

    /// Searcher populated with the finders currently in `registry`
    pub fn with_registry(registry: &FinderRegistry) -> Self {
        Self {
            finders: registry.finders(),
        }
    }

    pub fn add_finder(&mut self, finder: impl Finder + 'static) {
        self.finders.push(Arc::new(finder));
    }

    pub fn add_finder_arc(&mut self, finder: Arc<dyn Finder>) {
        self.finders.push(finder);
    }

    /// Copy of this searcher's finders
    pub fn finders(&self) -> Vec<Arc<dyn Finder>> {
        self.finders.clone()
    }

    /// Run every finder and return the distinct entries, optionally filtered.
    ///
    /// Without a filter (or with a blank one) entries are returned in the order
    /// they were first reported. With a filter they are ordered as described in
    /// [`crate::filter::ToolFilter::apply`].
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] when the filter does not compile. The filter is
    /// compiled before any finder runs.
    pub fn find(&self, filter: Option<&str>) -> Result<Vec<ToolEntry>, SyntaxError> {
        let filter = filter
            .filter(|f| !f.trim().is_empty())
            .map(compile_tool_filter)
            .transpose()?;

        let entries = self.collect();

        Ok(match filter {
            Some(filter) => {
                let result = filter.apply(&entries);
                debug!(
                    "Filter '{}' selected {} of {} entries",
                    filter,
                    result.len(),
                    entries.len()
                );
                result
            }
            None => entries.into_iter().collect(),
        })
    }

    /// Best match for `filter`, if any
    pub fn find_first(&self, filter: Option<&str>) -> Result<Option<ToolEntry>, SyntaxError> {
        Ok(self.find(filter)?.into_iter().next())
    }

    fn collect(&self) -> IndexSet<ToolEntry> {
        let mut entries = IndexSet::new();

        for finder in &self.finders {
            match finder.find() {
                Some(found) => {
                    debug!("Finder {} reported {} entries", finder.name(), found.len());
                    entries.extend(found);
                }
                None => debug!("Finder {} does not apply to this host", finder.name()),
            }
        }

        debug!(
            "{} finders reported {} distinct entries",
            self.finders.len(),
            entries.len()
        );
        entries
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field(
                "finders",
                &self
                    .finders
                    .iter()
                    .map(|finder| finder.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::finder::{FnFinder, MockFinder};
    use crate::tool::{Arch, MSBUILD, XBUILD};

    fn msbuild(version: [u64; 2], arch: Arch) -> ToolEntry {
        ToolEntry::new(MSBUILD, version, arch, None, format!("/msbuild/{arch}"))
    }

    fn mock_finder(name: &str, result: Option<Vec<ToolEntry>>) -> MockFinder {
        let mut finder = MockFinder::new();
        finder.expect_name().return_const(name.to_string());
        finder.expect_find().times(1).return_const(result);
        finder
    }

    #[test]
    fn find_deduplicates_entries_reported_by_several_finders() {
        let mut searcher = Searcher::new();
        searcher.add_finder(mock_finder("a", Some(vec![msbuild([14, 0], Arch::X64)])));
        searcher.add_finder(mock_finder("b", Some(vec![msbuild([14, 0], Arch::X64)])));

        let result = searcher.find(None).unwrap();
        assert_eq!(result, vec![msbuild([14, 0], Arch::X64)]);
    }

    #[test]
    fn find_skips_inapplicable_finders() {
        let mut searcher = Searcher::new();
        searcher.add_finder(mock_finder("none", None));
        searcher.add_finder(mock_finder("empty", Some(vec![])));
        searcher.add_finder(mock_finder("one", Some(vec![msbuild([12, 0], Arch::X86)])));

        assert_eq!(searcher.find(None).unwrap().len(), 1);
    }

    #[test]
    fn find_without_filter_keeps_first_seen_order() {
        let mut searcher = Searcher::new();
        searcher.add_finder(FnFinder::new("first", || {
            Some(vec![msbuild([12, 0], Arch::X86), msbuild([15, 0], Arch::X86)])
        }));
        searcher.add_finder(FnFinder::new("second", || {
            Some(vec![msbuild([14, 0], Arch::X64), msbuild([12, 0], Arch::X86)])
        }));

        let versions: Vec<String> = searcher
            .find(None)
            .unwrap()
            .iter()
            .map(|e| e.version.to_string())
            .collect();
        assert_eq!(versions, vec!["12.0", "15.0", "14.0"]);
    }

    #[test]
    fn find_applies_filter_and_ordering() {
        let mut searcher = Searcher::new();
        searcher.add_finder(FnFinder::new("mixed", || {
            Some(vec![
                ToolEntry::new(XBUILD, [14, 0], Arch::X64, None, "/usr/bin/xbuild"),
                msbuild([14, 0], Arch::X86),
                msbuild([14, 0], Arch::X64),
                msbuild([12, 0], Arch::X64),
            ])
        }));

        let result = searcher.find(Some("msbuild 14.*")).unwrap();
        assert_eq!(
            result,
            vec![msbuild([14, 0], Arch::X64), msbuild([14, 0], Arch::X86)]
        );
    }

    #[test]
    fn find_treats_blank_filter_as_absent() {
        let mut searcher = Searcher::new();
        searcher.add_finder(FnFinder::new("one", || Some(vec![msbuild([12, 0], Arch::X86)])));

        assert_eq!(searcher.find(Some("  ")).unwrap().len(), 1);
    }

    #[test]
    fn find_rejects_malformed_filter_before_running_finders() {
        let mut finder = MockFinder::new();
        finder.expect_name().return_const("never".to_string());
        finder.expect_find().never();

        let mut searcher = Searcher::new();
        searcher.add_finder(finder);

        assert_eq!(
            searcher.find(Some("msbuild >=*")),
            Err(SyntaxError::OperatorOnWildcard(">=*".to_string()))
        );
    }

    #[test]
    fn find_first_returns_best_match() {
        let mut searcher = Searcher::new();
        searcher.add_finder(FnFinder::new("two", || {
            Some(vec![msbuild([12, 0], Arch::X64), msbuild([14, 0], Arch::X86)])
        }));

        assert_eq!(
            searcher.find_first(Some("msbuild *")).unwrap(),
            Some(msbuild([14, 0], Arch::X86))
        );
        assert_eq!(searcher.find_first(Some("xbuild *")).unwrap(), None);
    }

    #[test]
    fn with_registry_copies_current_finders_only() {
        let mut registry = FinderRegistry::new();
        registry.register(FnFinder::new("early", || Some(vec![msbuild([12, 0], Arch::X86)])));

        let searcher = Searcher::with_registry(&registry);
        registry.register(FnFinder::new("late", || Some(vec![msbuild([15, 0], Arch::X86)])));

        assert_eq!(searcher.finders().len(), 1);
        assert_eq!(searcher.find(None).unwrap(), vec![msbuild([12, 0], Arch::X86)]);
        assert_eq!(Searcher::with_registry(&registry).find(None).unwrap().len(), 2);
    }
}
