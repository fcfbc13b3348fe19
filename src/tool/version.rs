//! Numeric tool versions
//!
//! A version is a sequence of non-negative integers of any length. Versions of
//! different lengths compare as if the shorter one were padded with zeros on the
//! right, so `12` and `12.0` are the same version. The stored components are
//! never padded or truncated.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::version::error::VersionError;

#[derive(Debug, Clone)]
pub struct Version(Vec<u64>);

impl Version {
    /// Create a version from its components. An empty sequence becomes `0`.
    pub fn new(components: Vec<u64>) -> Self {
        if components.is_empty() {
            Self(vec![0])
        } else {
            Self(components)
        }
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Component at `index`, or 0 past the end
    pub fn component(&self, index: usize) -> u64 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// Components without trailing zeros; equal versions share this slice.
    fn significant(&self) -> &[u64] {
        let end = self
            .0
            .iter()
            .rposition(|c| *c != 0)
            .map_or(0, |last| last + 1);
        &self.0[..end]
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parse a dotted version such as `"15.9"`. Whitespace is insignificant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(VersionError::Empty);
        }

        compact
            .split('.')
            .map(|part| {
                let invalid = || VersionError::InvalidComponent {
                    component: part.to_string(),
                    version: s.to_string(),
                };
                // u64::from_str would also accept a leading '+'
                if !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Version::new)
    }
}

impl From<Vec<u64>> for Version {
    fn from(components: Vec<u64>) -> Self {
        Version::new(components)
    }
}

impl From<&[u64]> for Version {
    fn from(components: &[u64]) -> Self {
        Version::new(components.to_vec())
    }
}

impl<const N: usize> From<[u64; N]> for Version {
    fn from(components: [u64; N]) -> Self {
        Version::new(components.to_vec())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
