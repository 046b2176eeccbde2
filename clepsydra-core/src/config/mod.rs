//! Configuration types
//!
//! Board-agnostic device configuration, parsed from a small TOML file.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
