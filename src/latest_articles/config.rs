//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from a TOML
//! file and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `LATEST_ARTICLES_TEMPLATES_DIR`, `LATEST_ARTICLES_LOG_LEVEL`.
//! 2. **Config file**: `latest-articles.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `templates` | `[{ path = "latest_articles/default.html", label = "Default" }]` | Presentation templates editors may pick from; the first is the default |
//! | `templates_dir` | unset | Directory holding template files other than the built-in one |
//! | `log_level` | `warn` | Log filter used when `RUST_LOG` is not set |
//!
//! ## Example
//!
//! ```toml
//! templates_dir = "/srv/site/templates"
//!
//! [[templates]]
//! path = "latest_articles/default.html"
//! label = "Default"
//!
//! [[templates]]
//! path = "latest_articles/compact.html"
//! label = "Compact list"
//! ```

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILENAME: &str = "latest-articles.toml";
pub const DEFAULT_TEMPLATE: &str = "latest_articles/default.html";
pub const DEFAULT_TEMPLATE_LABEL: &str = "Default";

/// One selectable presentation template: its key and the label editors see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateChoice {
    pub path: String,
    pub label: String,
}

impl TemplateChoice {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

pub fn default_templates() -> Vec<TemplateChoice> {
    vec![TemplateChoice::new(DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_LABEL)]
}

/// Configuration for the block, stored in `latest-articles.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlocksConfig {
    /// Ordered template choices. When absent, only the built-in default is offered.
    pub templates: Option<Vec<TemplateChoice>>,

    /// Where to load non-builtin templates from.
    #[config(env = "LATEST_ARTICLES_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Log filter (e.g. "warn", "debug", "latest_articles=trace").
    #[config(default = "warn", env = "LATEST_ARTICLES_LOG_LEVEL")]
    pub log_level: String,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            templates: None,
            templates_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl BlocksConfig {
    /// Load from `dir/latest-articles.toml` and the environment. A missing file is fine.
    pub fn load(dir: &Path) -> Result<Self> {
        let config = BlocksConfig::builder()
            .env()
            .file(dir.join(CONFIG_FILENAME))
            .load()?;
        Ok(config)
    }

    /// Template choices, using the built-in default if none are configured.
    pub fn templates(&self) -> Vec<TemplateChoice> {
        match &self.templates {
            Some(templates) if !templates.is_empty() => templates.clone(),
            _ => default_templates(),
        }
    }

    /// Key of the first template choice.
    pub fn default_template(&self) -> String {
        self.templates()
            .into_iter()
            .next()
            .map(|t| t.path)
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
    }
}
