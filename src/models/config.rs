//! Annotator configuration (annotator.toml)

use crate::error::{AnnotateError, AnnotateResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local config file
pub const CONFIG_FILE_NAME: &str = "annotator.toml";

/// User-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Directory for output artifacts (defaults to the working directory)
    pub output_dir: Option<PathBuf>,

    /// Show a progress bar while annotating
    pub show_progress: bool,

    /// Column at which long field values are wrapped when displayed
    pub wrap_width: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            show_progress: true,
            wrap_width: 100,
        }
    }
}

impl AnnotatorConfig {
    /// Load config from `<project_root>/annotator.toml`, falling back to the
    /// user config directory, then to defaults.
    pub fn load(project_root: &Path) -> AnnotateResult<Self> {
        let local = project_root.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::user_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> AnnotateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AnnotateError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// `<config_dir>/annotator/config.toml`, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("annotator").join("config.toml"))
    }

    /// Directory output artifacts are written to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
