//! Config command - inspect the effective configuration

use crate::{CrucibleError, cli::ConfigCommands, config::CrucibleConfig};
use std::path::Path;

type Result<T> = std::result::Result<T, CrucibleError>;

/// Execute the config command
///
/// # Errors
/// Returns an error if the configuration cannot be serialized
pub fn execute(config: &CrucibleConfig, config_path: &Path, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| CrucibleError::InvalidInput(format!("Failed to serialize config: {e}")))?;
            print!("{rendered}");
        }
        ConfigCommands::Path => println!("{}", config_path.display()),
    }
    Ok(())
}
