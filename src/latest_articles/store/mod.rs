//! # Storage Layer
//!
//! This module defines the storage abstraction behind the block. The [`DataStore`] trait
//! covers two very different kinds of data:
//!
//! 1. **Articles** (with their categories and tags): owned by the article store and
//!    read-only from here. Listing returns an [`ArticleQuerySet`] in natural order.
//! 2. **Blocks**: one [`ArticlePluginParams`] record per placed block, each naming the
//!    placeholder that owns it. Created, reconfigured, duplicated and removed through
//!    the command layer.
//!
//! Nothing is cached between calls: every render lists articles afresh, because what a
//! block shows depends on who is looking.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── articles.json          # {"articles": [...], "categories": [...], "tags": [...]}
//! ├── blocks.json            # {"<uuid>": ArticlePluginParams, ...}
//! └── latest-articles.toml   # Optional configuration
//! ```

use crate::error::Result;
use crate::model::{ArticlePluginParams, Category, Tag};
use crate::queryset::ArticleQuerySet;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for article and block storage.
pub trait DataStore {
    /// All articles, in natural order.
    fn list_articles(&self) -> Result<ArticleQuerySet>;

    fn list_categories(&self) -> Result<Vec<Category>>;

    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Save a block (create or update)
    fn save_block(&mut self, block: &ArticlePluginParams) -> Result<()>;

    /// Get a block by ID
    fn get_block(&self, id: &Uuid) -> Result<ArticlePluginParams>;

    /// List every stored block
    fn list_blocks(&self) -> Result<Vec<ArticlePluginParams>>;

    /// Delete a block permanently
    fn delete_block(&mut self, id: &Uuid) -> Result<()>;
}
