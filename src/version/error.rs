use thiserror::Error;

/// Grammar violation in a version constraint or tool filter expression
///
/// Raised when the expression is compiled, never when it is matched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax error in version filter: {0}")]
    InvalidComponent(String),

    #[error("Cannot use operators against wildcard expression. Offending filter: {0}")]
    OperatorOnWildcard(String),

    #[error(
        "Secondary version component operator must be used with a primary version component operator. Offending filter: {0}"
    )]
    SecondaryWithoutPrimary(String),

    #[error("Syntax error in filter: \"{0}\"")]
    InvalidClause(String),

    #[error("Filter clause has no tool name: \"{0}\"")]
    MissingName(String),

    #[error("Empty clause in filter: \"{0}\"")]
    EmptyClause(String),
}

/// A version string that is not a dotted sequence of non-negative integers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version component '{component}' in '{version}'")]
    InvalidComponent { component: String, version: String },
}
