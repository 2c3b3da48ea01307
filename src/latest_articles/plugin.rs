//! # Latest Articles Plugin
//!
//! The render path for one block:
//!
//! ```text
//! ArticlePluginParams ──► ArticleQuerySetMaker::from_plugin_params
//!                                  │
//!                Viewer ──► apply_privacy_filter
//!                                  │
//!                          ArticleFilter::call ──► articles
//!                                  │
//!                RenderContext { articles, instance, template } ──► HTML
//! ```
//!
//! Nothing is cached: the list depends on the viewer and on live article data, so every
//! render starts over.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BlocksConfig, TemplateChoice};
use crate::error::Result;
use crate::maker::{ArticleQuerySetMaker, CallOptions};
use crate::model::{Article, ArticlePluginParams, Viewer};
use crate::privacy::{apply_privacy_filter, ArticleFilter};
use crate::store::DataStore;
use crate::templates::TemplateRenderer;

pub const PLUGIN_NAME: &str = "Latest Article Plugin";

/// What a block template receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub articles: Vec<Article>,
    pub instance: ArticlePluginParams,
    /// Template selected by the block configuration.
    #[serde(skip)]
    pub template: String,
}

/// Build the filter for a block as seen by `viewer`.
pub fn filter_article_params(instance: &ArticlePluginParams, viewer: &Viewer) -> ArticleFilter {
    let maker = ArticleQuerySetMaker::from_plugin_params(instance);
    apply_privacy_filter(instance.privacy_criterion, viewer, maker)
}

pub struct LatestArticlesPlugin {
    renderer: TemplateRenderer,
    templates: Vec<TemplateChoice>,
}

impl LatestArticlesPlugin {
    pub fn new(config: &BlocksConfig) -> Result<Self> {
        let mut renderer = TemplateRenderer::new()?;
        if let Some(dir) = &config.templates_dir {
            renderer = renderer.with_templates_dir(dir);
        }
        Ok(Self {
            renderer,
            templates: config.templates(),
        })
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Template choices offered to editors, default first.
    pub fn templates(&self) -> &[TemplateChoice] {
        &self.templates
    }

    /// Register an extra template source under `name`.
    pub fn add_template(&mut self, name: &str, label: &str, source: &str) -> Result<()> {
        self.renderer.add_template(name, source)?;
        if !self.templates.iter().any(|t| t.path == name) {
            self.templates.push(TemplateChoice::new(name, label));
        }
        Ok(())
    }

    pub fn render<S: DataStore>(
        &self,
        store: &S,
        instance: &ArticlePluginParams,
        viewer: &Viewer,
    ) -> Result<RenderContext> {
        self.render_on(store, instance, viewer, Utc::now().date_naive())
    }

    /// Like [`render`](Self::render), with an explicit reference date for the
    /// publication window.
    pub fn render_on<S: DataStore>(
        &self,
        store: &S,
        instance: &ArticlePluginParams,
        viewer: &Viewer,
        today: NaiveDate,
    ) -> Result<RenderContext> {
        if !self.templates.iter().any(|t| t.path == instance.template) {
            warn!(block = %instance.id, template = %instance.template, "block uses a template that is not among the configured choices");
        }

        let filter = filter_article_params(instance, viewer);
        let articles = filter
            .call_on(store, CallOptions::default(), today)?
            .into_vec();
        debug!(block = %instance.id, count = articles.len(), "block rendered");

        Ok(RenderContext {
            articles,
            instance: instance.clone(),
            template: instance.template.clone(),
        })
    }

    pub fn render_html(&self, context: &RenderContext) -> Result<String> {
        self.renderer.render(&context.template, context)
    }
}
