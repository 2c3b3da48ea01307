//! # Command Layer
//!
//! This module contains the business logic for managing and rendering blocks. Each
//! command lives in its own submodule and is a plain function over a [`DataStore`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr or terminal concerns
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected_blocks`: Blocks created or modified
//! - `listed_blocks`: Blocks to display
//! - `rendered`: Output of the `render` command
//! - `messages`: Structured messages with levels (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and cover every branch, including validation
//! failures and missing blocks.
//!
//! ## Command Modules
//!
//! - [`create`]: Place a new block in a placeholder
//! - [`configure`]: Change an existing block
//! - [`delete`]: Remove a block
//! - [`list`]: List blocks, optionally for one placeholder
//! - [`duplicate`]: Copy a block, relations included, as pages are duplicated
//! - [`render`]: Resolve and render a block for a viewer

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::config::TemplateChoice;
use crate::error::{LatestError, Result};
use crate::model::{ArticlePluginParams, CategoryId, PrivacyCriterion, Status, TagId};
use crate::plugin::RenderContext;
use crate::store::DataStore;

pub mod configure;
pub mod create;
pub mod delete;
pub mod duplicate;
pub mod list;
pub mod render;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A rendered block: the template context and the produced markup.
#[derive(Debug, Clone)]
pub struct RenderedBlock {
    pub context: RenderContext,
    pub html: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_blocks: Vec<ArticlePluginParams>,
    pub listed_blocks: Vec<ArticlePluginParams>,
    pub rendered: Option<RenderedBlock>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_blocks(mut self, blocks: Vec<ArticlePluginParams>) -> Self {
        self.affected_blocks = blocks;
        self
    }

    pub fn with_listed_blocks(mut self, blocks: Vec<ArticlePluginParams>) -> Self {
        self.listed_blocks = blocks;
        self
    }

    pub fn with_rendered(mut self, rendered: RenderedBlock) -> Self {
        self.rendered = Some(rendered);
        self
    }
}

/// Editor changes to a block. `None` leaves a field as it is.
///
/// `status` and `featured` are doubly optional: `Some(None)` clears the filter.
#[derive(Debug, Clone, Default)]
pub struct BlockChanges {
    pub title: Option<String>,
    pub cards_quantity: Option<u32>,
    pub categories: Option<BTreeSet<CategoryId>>,
    pub tags: Option<BTreeSet<TagId>>,
    pub status: Option<Option<Status>>,
    pub featured: Option<Option<bool>>,
    pub privacy_criterion: Option<PrivacyCriterion>,
    pub template: Option<String>,
}

impl BlockChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn cards_quantity(mut self, quantity: u32) -> Self {
        self.cards_quantity = Some(quantity);
        self
    }

    pub fn categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = Some(ids.into_iter().collect());
        self
    }

    pub fn tags(mut self, ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = Some(ids.into_iter().collect());
        self
    }

    pub fn status(mut self, status: Option<Status>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn featured(mut self, featured: Option<bool>) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn privacy_criterion(mut self, criterion: PrivacyCriterion) -> Self {
        self.privacy_criterion = Some(criterion);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.cards_quantity.is_none()
            && self.categories.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.featured.is_none()
            && self.privacy_criterion.is_none()
            && self.template.is_none()
    }

    pub fn apply_to(self, block: &mut ArticlePluginParams) {
        if let Some(title) = self.title {
            block.title = title;
        }
        if let Some(quantity) = self.cards_quantity {
            block.cards_quantity = quantity;
        }
        if let Some(categories) = self.categories {
            block.categories = categories;
        }
        if let Some(tags) = self.tags {
            block.tags = tags;
        }
        if let Some(status) = self.status {
            block.status = status;
        }
        if let Some(featured) = self.featured {
            block.featured = featured;
        }
        if let Some(criterion) = self.privacy_criterion {
            block.privacy_criterion = criterion;
        }
        if let Some(template) = self.template {
            block.template = template;
        }
    }
}

/// Validate a block and save it if valid.
fn validate_and_save<S: DataStore>(
    store: &mut S,
    templates: &[TemplateChoice],
    block: &ArticlePluginParams,
) -> Result<()> {
    block.validate(templates).map_err(LatestError::Validation)?;
    store.save_block(block)
}

/// Warnings for category or tag ids the article store does not know about.
///
/// Unknown ids are kept: they simply match no article.
fn unknown_relation_warnings<S: DataStore>(
    store: &S,
    block: &ArticlePluginParams,
) -> Result<Vec<CmdMessage>> {
    let mut messages = Vec::new();

    let known: HashSet<CategoryId> = store.list_categories()?.iter().map(|c| c.id).collect();
    for id in block.categories.iter().filter(|id| !known.contains(id)) {
        messages.push(CmdMessage::warning(format!("Unknown category id: {}", id)));
    }

    let known: HashSet<TagId> = store.list_tags()?.iter().map(|t| t.id).collect();
    for id in block.tags.iter().filter(|id| !known.contains(id)) {
        messages.push(CmdMessage::warning(format!("Unknown tag id: {}", id)));
    }

    Ok(messages)
}
