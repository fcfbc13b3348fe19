//! Search layer
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Searcher   │────▶│ Tool Filter │
//! │ (finders)   │copy │ (aggregate) │     │ (select +   │
//! └─────────────┘     └─────────────┘     │  order)     │
//!                            ▲            └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │   Finders   │
//!                     │ (discovery) │
//!                     └─────────────┘
//! ```
//!
//! - [`finder`]: Finder trait and closure adapter
//! - [`registry`]: Explicit default-finder registry
//! - [`searcher`]: Aggregation, deduplication and filtering

pub mod finder;
pub mod registry;
pub mod searcher;

pub use finder::{Finder, FnFinder};
pub use registry::FinderRegistry;
pub use searcher::Searcher;
