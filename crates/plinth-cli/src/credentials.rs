use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use plinth_api::TokenPair;
use tracing::warn;

/// On-disk storage for the signed-in session.
///
/// Tokens are written as JSON so a login survives across invocations. A
/// missing or unreadable file reads as "signed out" rather than an error.
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let dirs = ProjectDirs::from("", "", "plinth")
                    .context("Could not determine the user config directory")?;
                dirs.config_dir().join("credentials.json")
            }
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the stored token pair, if any.
    pub fn load(&self) -> Option<TokenPair> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Ignoring malformed credentials file");
                None
            }
        }
    }

    /// Writes the token pair, creating parent directories as needed.
    pub fn save(&self, tokens: &TokenPair) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(tokens)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Removes the stored tokens. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}
