//! # Presentation Templates
//!
//! Blocks are rendered through minijinja templates. One template ships with the crate and
//! is compiled in; any other template named in the configuration is loaded on demand from
//! `templates_dir`.
//!
//! Templates receive two values:
//!
//! - `articles`: the filtered, limited list, in display order.
//! - `instance`: the block configuration (`instance.title`, `instance.cards_quantity`, ...).
//!
//! Template keys ending in `.html` are auto-escaped.

use minijinja::{path_loader, Environment};
use serde::Serialize;
use std::path::Path;

use crate::config::DEFAULT_TEMPLATE;
use crate::error::Result;

pub const DEFAULT_HTML_TEMPLATE: &str = include_str!("templates/default.html");

/// Registry of named templates backed by a minijinja environment.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// A renderer holding only the built-in template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(DEFAULT_TEMPLATE, DEFAULT_HTML_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Resolve templates that are not registered explicitly from `dir`.
    pub fn with_templates_dir(mut self, dir: &Path) -> Self {
        self.env.set_loader(path_loader(dir));
        self
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(data)?)
    }
}
