//! modmap CLI - maps the imports and exports of a JavaScript/TypeScript tree.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing with clap
//! - [`config`] - `modmap.config.json` / environment / CLI merging
//! - [`commands`] - `analyze` and `schema`
//! - [`render`] - `registries.json`, `links.json` and the `tree.html` diagram
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Terminal status messages
//!
//! The registry itself is built by `modmap-graph`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod render;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
