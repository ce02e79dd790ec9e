//! Chart configuration (stitch.yaml) parsing.
//!
//! The config file supplies defaults for the CLI: output format, render
//! options, extra named colours and the include nesting bound.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StitchError};
use crate::parser::DEFAULT_INCLUDE_DEPTH;
use crate::render::{Format, RenderOptions};
use crate::types::NamedColors;

/// File looked up in the working directory when no config is given.
pub const CONFIG_FILE: &str = "stitch.yaml";

/// Chart configuration loaded from stitch.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChartConfig {
    /// Default output format.
    pub format: Option<Format>,

    /// Render options as `key=value`, applied before CLI options.
    pub options: Vec<String>,

    /// Extra named colours layered over the built-in table.
    pub colors: BTreeMap<String, String>,

    /// Maximum include nesting.
    #[serde(default = "default_include_depth")]
    pub include_depth: usize,
}

fn default_include_depth() -> usize {
    DEFAULT_INCLUDE_DEPTH
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            format: None,
            options: vec![],
            colors: BTreeMap::new(),
            include_depth: default_include_depth(),
        }
    }
}

impl ChartConfig {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| StitchError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })
    }

    /// Load the config at `explicit`, or `stitch.yaml` under `dir` when it
    /// exists, or the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path: PathBuf = dir.join(CONFIG_FILE);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "using discovered config");
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Built-in colours overlaid with the configured ones.
    pub fn named_colors(&self) -> NamedColors {
        let mut colors = NamedColors::builtin();
        colors.extend(self.colors.iter().map(|(k, v)| (k.clone(), v.clone())));
        colors
    }

    /// Render options from config followed by `overrides`.
    pub fn render_options<I, S>(&self, overrides: I) -> Result<RenderOptions>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = RenderOptions::new();
        options.apply(&self.options)?;
        options.apply(overrides)?;
        Ok(options)
    }
}
