pub mod config;
pub mod discovery;
pub mod filter;
pub mod logging;
pub mod search;
pub mod tool;
pub mod version;
