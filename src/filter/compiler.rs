//! Tool filter compilation
//!
//! A filter is a `|`-separated OR-chain of clauses, e.g.
//! `msbuild 15.* | msbuild >=12<15.* 64bit | xbuild *`.
//!
//! The first clause that mentions a tool name fixes that name's sort priority
//! for the whole chain.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::filter::clause::FilterClause;
use crate::tool::{Arch, Edition, ToolEntry, Version};
use crate::version::error::SyntaxError;

/// (priority, version descending, arch rank, edition rank, path)
type SortKey<'e> = (usize, Reverse<&'e Version>, u8, u8, &'e PathBuf);

/// A compiled OR-chain of filter clauses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFilter {
    clauses: Vec<FilterClause>,
    /// Tool name -> index of the first clause naming it
    priorities: IndexMap<String, usize>,
}

impl ToolFilter {
    /// Sort priority of a tool name, lower sorts first
    pub fn priority(&self, name: &str) -> Option<usize> {
        self.priorities.get(name).copied()
    }

    /// True when at least one clause matches the entry
    pub fn matches(&self, entry: &ToolEntry) -> bool {
        self.clauses.iter().any(|clause| clause.matches(entry))
    }

    /// Select the matching entries and order them.
    ///
    /// Ordering: clause priority of the tool name, then version descending,
    /// then 64bit before 32bit, then edition rank ascending, then path.
    pub fn apply<'a, I>(&self, entries: I) -> Vec<ToolEntry>
    where
        I: IntoIterator<Item = &'a ToolEntry>,
    {
        let mut output: Vec<ToolEntry> = entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect();

        output.sort_by(|a, b| self.compare(a, b));
        output
    }

    fn compare(&self, a: &ToolEntry, b: &ToolEntry) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    fn sort_key<'e>(&self, entry: &'e ToolEntry) -> SortKey<'e> {
        let priority = self.priority(&entry.name).unwrap_or(usize::MAX);
        let arch = match entry.arch {
            Arch::X64 => 0u8,
            Arch::X86 => 1,
        };

        (
            priority,
            Reverse(&entry.version),
            arch,
            Edition::rank(entry.edition),
            &entry.path,
        )
    }
}

impl fmt::Display for ToolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl FromStr for ToolFilter {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile_tool_filter(s)
    }
}

/// Compile a tool filter expression.
///
/// Compilation is all-or-nothing: one malformed clause fails the whole chain.
pub fn compile_tool_filter(filter: &str) -> Result<ToolFilter, SyntaxError> {
    let mut clauses = Vec::new();
    let mut priorities = IndexMap::new();

    for (index, src) in filter.trim().split('|').enumerate() {
        let clause = FilterClause::parse(src)?;
        priorities.entry(clause.name.clone()).or_insert(index);
        clauses.push(clause);
    }

    Ok(ToolFilter {
        clauses,
        priorities,
    })
}
