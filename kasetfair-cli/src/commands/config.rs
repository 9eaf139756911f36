use std::fs;
use std::io::Write;

use anyhow::{Result, bail};
use shared::config::client::ClientConfig;

/// Generates a configuration file in the specified format.
///
/// # Arguments
/// * `format` - The format of the configuration file ("toml" or "json").
///
/// # Errors
/// Returns an error if the format is unsupported or if writing the file fails.
pub fn generate_config(format: &str) -> Result<()> {
    let file_name = file_name_for(format)?;
    let serialized = render_config(&ClientConfig::with_defaults(), format)?;

    let mut file = fs::File::create(file_name)?;
    file.write_all(serialized.as_bytes())?;

    println!("Configuration file '{file_name}' generated successfully.");
    Ok(())
}

fn file_name_for(format: &str) -> Result<&'static str> {
    match format {
        "toml" => Ok("kasetfair.toml"),
        "json" => Ok("kasetfair.json"),
        _ => bail!("Unsupported format. Use 'toml' or 'json'."),
    }
}

fn render_config(config: &ClientConfig, format: &str) -> Result<String> {
    Ok(match format {
        "toml" => toml::to_string_pretty(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        _ => bail!("Unsupported format. Use 'toml' or 'json'."),
    })
}
