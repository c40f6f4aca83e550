//! The `vista config` command for configuration management.

use clap::{Args, Subcommand};
use vista_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration (literal API keys are masked)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let mut config = Config::load()?;
            config.gemini.api_key = mask_api_key(&config.gemini.api_key);
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Defaults reference ${GOOGLE_API_KEY}, so no secret is written
            let toml = Config::default().to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Keep `${ENV_VAR}` references visible; hide literal keys.
fn mask_api_key(value: &str) -> String {
    if value.is_empty() || (value.starts_with("${") && value.ends_with('}')) {
        value.to_string()
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_env_references() {
        assert_eq!(mask_api_key("${GOOGLE_API_KEY}"), "${GOOGLE_API_KEY}");
        assert_eq!(mask_api_key(""), "");
    }

    #[test]
    fn mask_hides_literal_keys() {
        assert_eq!(mask_api_key("AIzaSyExample"), "***");
    }
}
