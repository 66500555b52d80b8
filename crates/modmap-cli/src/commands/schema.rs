//! `modmap schema`: print the JSON schema of `modmap.config.json`.

use crate::config::ModmapConfig;
use crate::error::Result;

/// Print the schema to stdout.
pub fn execute() -> Result<()> {
    let schema = ModmapConfig::json_schema()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
