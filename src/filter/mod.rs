//! Tool filter layer
//! - clause.rs: single clause grammar (`name [version] [arch] [edition]`)
//! - compiler.rs: `|` OR-chain compilation, priorities and result ordering

pub mod clause;
pub mod compiler;

pub use clause::FilterClause;
pub use compiler::{ToolFilter, compile_tool_filter};
