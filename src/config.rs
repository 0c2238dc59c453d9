//! Host configuration persistence
//!
//! Stores user preferences in `~/.config/dockhost/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Document host configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Veto closing documents that have unsaved changes
    #[serde(default = "default_true")]
    pub guard_unsaved_changes: bool,

    /// Log every close attempt at debug level
    #[serde(default = "default_true")]
    pub log_close_requests: bool,

    /// Base name for new untitled documents ("Untitled", "Untitled-2", ...)
    #[serde(default = "default_untitled_prefix")]
    pub untitled_prefix: String,
}

fn default_true() -> bool {
    true
}

fn default_untitled_prefix() -> String {
    "Untitled".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            guard_unsaved_changes: default_true(),
            log_close_requests: default_true(),
            untitled_prefix: default_untitled_prefix(),
        }
    }
}

impl HostConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file()
            .context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
