//! Version constraint matcher
//!
//! Compiles a dotted constraint expression into a per-component predicate over
//! a [`Version`]. Each component is one of:
//! - `12` - exact match
//! - `*` - any value
//! - `>=12`, `>12`, `<=12`, `<12` - comparison against the component value
//! - `>=12<15` - bounded range, both comparisons must hold
//!
//! Whitespace is insignificant. When the version has fewer components than the
//! constraint, the missing ones are treated as 0; extra version components are
//! ignored.

use std::fmt;
use std::str::FromStr;

use crate::tool::version::Version;
use crate::version::error::{SyntaxError, VersionError};

/// Relational operator usable on a single version component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
        }
    }

    fn apply(self, left: u64, right: u64) -> bool {
        match self {
            Operator::Lt => left < right,
            Operator::Gt => left > right,
            Operator::Lte => left <= right,
            Operator::Gte => left >= right,
        }
    }
}

/// Compiled predicate for one version component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentMatcher {
    /// `*`
    Any,
    /// `12`
    Exact(u64),
    /// `>=12`
    Compare(Operator, u64),
    /// `>=12<15`: the first operator applies to the component value, the
    /// second to the trailing bound
    Range(Operator, u64, Operator, u64),
}

impl ComponentMatcher {
    pub fn matches(&self, value: u64) -> bool {
        match *self {
            ComponentMatcher::Any => true,
            ComponentMatcher::Exact(expected) => value == expected,
            ComponentMatcher::Compare(op, arg) => op.apply(value, arg),
            ComponentMatcher::Range(op, arg, op_two, arg_two) => {
                op.apply(value, arg) && op_two.apply(value, arg_two)
            }
        }
    }

    /// Parse one whitespace-free component:
    /// `[op] (INTEGER | '*') [op INTEGER]`
    fn parse(src: &str) -> Result<Self, SyntaxError> {
        let invalid = || SyntaxError::InvalidComponent(src.to_string());
        let mut cursor = Cursor::new(src);

        let primary = cursor.operator();

        // None is the wildcard
        let value = if cursor.eat(b'*') {
            None
        } else {
            Some(cursor.integer().ok_or_else(invalid)?)
        };

        let secondary = match cursor.operator() {
            Some(op) => {
                let arg = if cursor.eat(b'*') {
                    None
                } else {
                    Some(cursor.integer().ok_or_else(invalid)?)
                };
                Some((op, arg))
            }
            None => None,
        };

        if !cursor.is_done() {
            return Err(invalid());
        }

        match (primary, value, secondary) {
            (None, None, None) => Ok(ComponentMatcher::Any),
            (_, None, _) | (_, _, Some((_, None))) => {
                Err(SyntaxError::OperatorOnWildcard(src.to_string()))
            }
            (None, Some(_), Some(_)) => Err(SyntaxError::SecondaryWithoutPrimary(src.to_string())),
            (None, Some(value), None) => Ok(ComponentMatcher::Exact(value)),
            (Some(op), Some(value), None) => Ok(ComponentMatcher::Compare(op, value)),
            (Some(op), Some(value), Some((op_two, Some(arg_two)))) => {
                Ok(ComponentMatcher::Range(op, value, op_two, arg_two))
            }
        }
    }
}

impl fmt::Display for ComponentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentMatcher::Any => f.write_str("*"),
            ComponentMatcher::Exact(value) => write!(f, "{value}"),
            ComponentMatcher::Compare(op, value) => write!(f, "{}{value}", op.as_str()),
            ComponentMatcher::Range(op, value, op_two, arg_two) => {
                write!(f, "{}{value}{}{arg_two}", op.as_str(), op_two.as_str())
            }
        }
    }
}

/// Byte cursor over a single constraint component
struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.src[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.rest().first() == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn operator(&mut self) -> Option<Operator> {
        // two-character operators first
        let (op, len) = match self.rest() {
            [b'<', b'=', ..] => (Operator::Lte, 2),
            [b'>', b'=', ..] => (Operator::Gte, 2),
            [b'<', ..] => (Operator::Lt, 1),
            [b'>', ..] => (Operator::Gt, 1),
            _ => return None,
        };
        self.pos += len;
        Some(op)
    }

    /// Consume a run of ASCII digits. None when there are no digits or the
    /// value does not fit in a u64.
    fn integer(&mut self) -> Option<u64> {
        let len = self
            .rest()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        let digits = std::str::from_utf8(&self.rest()[..len]).ok()?;
        let value = digits.parse().ok()?;
        self.pos += len;
        Some(value)
    }
}

/// A compiled version constraint
///
/// The number of components is fixed when the constraint is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatcher {
    components: Vec<ComponentMatcher>,
}

impl VersionMatcher {
    pub fn components(&self) -> &[ComponentMatcher] {
        &self.components
    }

    /// Check whether `version` satisfies every component of this constraint
    pub fn matches(&self, version: &Version) -> bool {
        self.components
            .iter()
            .enumerate()
            .all(|(i, matcher)| matcher.matches(version.component(i)))
    }

    /// Parse a dotted version string and match it
    pub fn matches_str(&self, version: &str) -> Result<bool, VersionError> {
        let version: Version = version.parse()?;
        Ok(self.matches(&version))
    }
}

impl fmt::Display for VersionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionMatcher {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile_matcher(s)
    }
}

/// Compile a version constraint expression such as `">=12<15.*"`
pub fn compile_matcher(constraint: &str) -> Result<VersionMatcher, SyntaxError> {
    let compact: String = constraint.chars().filter(|c| !c.is_whitespace()).collect();

    let components = compact
        .split('.')
        .map(ComponentMatcher::parse)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VersionMatcher { components })
}
