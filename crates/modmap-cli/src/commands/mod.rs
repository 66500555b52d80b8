//! Command implementations for the modmap CLI.
//!
//! - [`analyze`] - Build the registry and write its outputs
//! - [`schema`] - Print the config JSON schema

pub mod analyze;
pub mod schema;

pub use analyze::execute as analyze_execute;
pub use schema::execute as schema_execute;
