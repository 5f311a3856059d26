//! Jamdex - browse game-jam results from the terminal.
//!
//! The binary wraps [`jamdex_seeker`] with three commands:
//!
//! - `schema` prints the filterable properties of a dataset.
//! - `list` applies a filter token, pages the matches and prints them.
//! - `link` prints the canonical query string for a filter state, the
//!   same one `list` reports, so a view can be shared and reopened.
//!
//! Output is styled or plain text, or the view serialized as JSON, YAML or
//! CSV (see [`OutputMode`]).

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod paging;
pub mod render;
pub mod views;

pub use cli::Cli;
pub use commands::{run, Session};
pub use config::{Config, ConfigError};
pub use output::{serialize_structured, OutputMode, SerializeError, TextMode};
