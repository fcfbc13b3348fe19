//! Single tool filter clause
//!
//! Grammar: `name [version_constraint] [arch] [edition]`, whitespace separated.
//! - `name`: one or more words of `[A-Za-z_-]`, e.g. `msbuild` or `dotnet build`
//! - `version_constraint`: see [`crate::version::constraint`]; may contain spaces
//! - `arch`: `32bit` or `64bit`
//! - `edition`: a bare word, compared case-insensitively

use std::fmt;

use crate::tool::{Arch, ToolEntry};
use crate::version::constraint::{VersionMatcher, compile_matcher};
use crate::version::error::SyntaxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub name: String,
    pub version: Option<VersionMatcher>,
    pub arch: Option<Arch>,
    /// Lowercased edition name
    pub edition: Option<String>,
}

/// Position reached while scanning the words of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Name,
    Version,
    Arch,
    Edition,
}

impl FilterClause {
    pub fn parse(src: &str) -> Result<Self, SyntaxError> {
        let clause = src.trim();
        let invalid = || SyntaxError::InvalidClause(clause.to_string());

        if clause.is_empty() {
            return Err(SyntaxError::EmptyClause(src.to_string()));
        }

        let mut section = Section::Name;
        let mut name_words: Vec<&str> = Vec::new();
        let mut version = String::new();
        let mut arch = None;
        let mut edition = None;

        for word in clause.split_whitespace() {
            if section == Section::Version && continues_version(&version) {
                version.push_str(word);
            } else if let Ok(parsed) = word.parse::<Arch>() {
                if section > Section::Version {
                    return Err(invalid());
                }
                arch = Some(parsed);
                section = Section::Arch;
            } else if starts_version(word) {
                if section > Section::Version {
                    return Err(invalid());
                }
                version.push_str(word);
                section = Section::Version;
            } else if section == Section::Name && is_name_word(word) {
                name_words.push(word);
            } else if section < Section::Edition
                && section > Section::Name
                && word.bytes().all(|b| b.is_ascii_alphabetic())
            {
                edition = Some(word.to_ascii_lowercase());
                section = Section::Edition;
            } else {
                return Err(invalid());
            }
        }

        if name_words.is_empty() {
            return Err(SyntaxError::MissingName(clause.to_string()));
        }

        let version = if version.is_empty() {
            None
        } else {
            Some(compile_matcher(&version)?)
        };

        Ok(Self {
            name: name_words.join(" "),
            version,
            arch,
            edition,
        })
    }

    /// Check a single entry against every constraint present in this clause
    pub fn matches(&self, entry: &ToolEntry) -> bool {
        entry.name == self.name
            && self
                .version
                .as_ref()
                .is_none_or(|matcher| matcher.matches(&entry.version))
            && self.arch.is_none_or(|arch| arch == entry.arch)
            && self.edition.as_deref().is_none_or(|wanted| {
                entry
                    .edition
                    .is_some_and(|edition| edition.as_str() == wanted)
            })
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, " {version}")?;
        }
        if let Some(arch) = self.arch {
            write!(f, " {arch}")?;
        }
        if let Some(edition) = &self.edition {
            write!(f, " {edition}")?;
        }
        Ok(())
    }
}

fn starts_version(word: &str) -> bool {
    word.bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'*' | b'<' | b'>' | b'.'))
}

/// Version text that cannot end here, e.g. `12.` or `>=`
fn continues_version(version: &str) -> bool {
    version.ends_with(['.', '<', '>', '='])
}

fn is_name_word(word: &str) -> bool {
    word.bytes()
        .all(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'-')
}
