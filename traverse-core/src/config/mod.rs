//! Configuration types
//!
//! Board-agnostic configuration structures, their validation, and the
//! parser for the embedded `stage.toml` text.

pub mod hardware;
pub mod parse;
pub mod types;

pub use hardware::*;
pub use parse::{parse_config, ParseError};
pub use types::*;
