//! Version constraint layer
//!
//! Compiles textual version constraints into matchers over [`Version`] values.
//! The same grammar is embedded in tool filter clauses (see [`crate::filter`]).
//!
//! # Modules
//!
//! - [`constraint`]: Component grammar parser and compiled [`VersionMatcher`]
//! - [`error`]: Syntax and version parse errors
//!
//! [`Version`]: crate::tool::Version
//! [`VersionMatcher`]: constraint::VersionMatcher

pub mod constraint;
pub mod error;

pub use constraint::{ComponentMatcher, Operator, VersionMatcher, compile_matcher};
pub use error::{SyntaxError, VersionError};
