//! Command handlers.

pub mod ask;
pub mod config;
pub mod models;
pub mod types;

use std::path::{Path, PathBuf};
use vista_core::{Config, Credential, GeminiClient, VisualAssistant};

/// Settings shared by every command that talks to Gemini.
pub struct Session {
    config: Config,
    api_key: Option<String>,
}

impl Session {
    pub fn new(config: Config, api_key: Option<String>) -> Self {
        Self { config, api_key }
    }

    /// Build the assistant, failing early if no API key is available.
    pub fn assistant(&self) -> anyhow::Result<VisualAssistant> {
        Ok(VisualAssistant::new(self.api_key.as_deref(), &self.config)?)
    }

    /// Build a bare Gemini client (for model listing).
    pub fn client(&self) -> anyhow::Result<GeminiClient> {
        let credential = Credential::resolve(self.api_key.as_deref(), &self.config.gemini.api_key)?;
        Ok(GeminiClient::new(credential, &self.config.gemini)?)
    }
}

/// Expand a leading `~` in a user-supplied image path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
