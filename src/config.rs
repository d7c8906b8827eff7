//! Demo configuration: selection mode and explorer options, loaded from a
//! JSON file with graceful fallback to defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::explorer::ExplorerOptions;
use crate::listing::SelectionMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selection policy for the listing pane.
    pub selection_mode: SelectionMode,
    pub explorer: ExplorerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Restrict the tree pane to one document type.
    pub type_filter: Option<String>,
    pub allow_multi_select: bool,
    pub allow_drag_and_drop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Multiple,
            explorer: ExplorerConfig::default(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            type_filter: None,
            allow_multi_select: true,
            allow_drag_and_drop: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load from `path` when given; any failure logs a warning and falls
    /// back to defaults rather than refusing to start.
    pub fn load_or_default(path: Option<&Path>) -> Config {
        let Some(path) = path else {
            return Config::default();
        };
        match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("using default config: {err:#}");
                Config::default()
            }
        }
    }
}

impl ExplorerConfig {
    pub fn options(&self) -> ExplorerOptions {
        ExplorerOptions {
            allow_multi_select: self.allow_multi_select,
            allow_drag_and_drop: self.allow_drag_and_drop,
            type_filter: self.type_filter.clone(),
        }
    }
}
