//! Default finder registry
//!
//! Discovery modules register their finders here from an explicit
//! initialization routine (see [`crate::discovery::register_default_finders`]).
//! A registry normally lives for the whole process; each [`Searcher`] built
//! from it copies the finders registered at that moment, so later
//! registrations do not affect existing searchers.
//!
//! [`Searcher`]: crate::search::Searcher

use std::sync::Arc;

use tracing::debug;

use crate::search::finder::Finder;

#[derive(Clone, Default)]
pub struct FinderRegistry {
    finders: Vec<Arc<dyn Finder>>,
}

impl FinderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, finder: impl Finder + 'static) {
        self.register_arc(Arc::new(finder));
    }

    pub fn register_arc(&mut self, finder: Arc<dyn Finder>) {
        debug!("Registered default finder: {}", finder.name());
        self.finders.push(finder);
    }

    /// Copy of the currently registered finders
    pub fn finders(&self) -> Vec<Arc<dyn Finder>> {
        self.finders.clone()
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }
}

impl std::fmt::Debug for FinderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.finders.iter().map(|finder| finder.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::finder::FnFinder;

    #[test]
    fn register_appends_in_order() {
        let mut registry = FinderRegistry::new();
        assert!(registry.is_empty());

        registry.register(FnFinder::new("first", || None));
        registry.register(FnFinder::new("second", || Some(vec![])));

        let names: Vec<String> = registry
            .finders()
            .iter()
            .map(|finder| finder.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn finders_returns_a_snapshot() {
        let mut registry = FinderRegistry::new();
        registry.register(FnFinder::new("first", || None));

        let snapshot = registry.finders();
        registry.register(FnFinder::new("second", || None));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }
}
