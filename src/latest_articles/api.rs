//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for block operations, whatever the front-end.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (block ids given in full or as a unique prefix)
//! - **Owns the plugin** so templates are compiled once per process
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//!
//! ## Block Ids
//!
//! Block ids are UUIDs. Anywhere an id is expected, a prefix of at least
//! [`MIN_ID_PREFIX`] characters is accepted as long as exactly one stored block
//! matches it, so `latest-articles render 3f2a` works like `git show 3f2a`.
//!
//! ## Generic Over DataStore
//!
//! `BlocksApi<S: DataStore>` is generic over the storage backend:
//! - Production: `BlocksApi<FileStore>`
//! - Testing: `BlocksApi<InMemoryStore>`

use uuid::Uuid;

use crate::commands::{self, BlockChanges, CmdResult};
use crate::config::{BlocksConfig, TemplateChoice};
use crate::error::{LatestError, Result};
use crate::model::Viewer;
use crate::plugin::LatestArticlesPlugin;
use crate::store::DataStore;

pub use crate::commands::{CmdMessage, MessageLevel, RenderedBlock};

pub const MIN_ID_PREFIX: usize = 4;

/// The main API facade for block operations.
pub struct BlocksApi<S: DataStore> {
    store: S,
    config: BlocksConfig,
    plugin: LatestArticlesPlugin,
}

impl<S: DataStore> BlocksApi<S> {
    pub fn new(store: S, config: BlocksConfig) -> Result<Self> {
        let plugin = LatestArticlesPlugin::new(&config)?;
        Ok(Self {
            store,
            config,
            plugin,
        })
    }

    pub fn create_block(&mut self, placeholder: &str, changes: BlockChanges) -> Result<CmdResult> {
        commands::create::run(&mut self.store, &self.config, placeholder, changes)
    }

    pub fn configure_block(&mut self, id: &str, changes: BlockChanges) -> Result<CmdResult> {
        let id = self.resolve_block_id(id)?;
        commands::configure::run(&mut self.store, &self.config, &id, changes)
    }

    pub fn delete_block(&mut self, id: &str) -> Result<CmdResult> {
        let id = self.resolve_block_id(id)?;
        commands::delete::run(&mut self.store, &id)
    }

    pub fn list_blocks(&self, placeholder: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.store, placeholder)
    }

    pub fn duplicate_block(&mut self, id: &str, placeholder: Option<&str>) -> Result<CmdResult> {
        let id = self.resolve_block_id(id)?;
        commands::duplicate::run(&mut self.store, &id, placeholder)
    }

    pub fn render_block(&self, id: &str, viewer: &Viewer) -> Result<CmdResult> {
        let id = self.resolve_block_id(id)?;
        commands::render::run(&self.store, &self.plugin, &id, viewer)
    }

    pub fn templates(&self) -> &[TemplateChoice] {
        self.plugin.templates()
    }

    /// Turn user input into a stored block id.
    pub fn resolve_block_id(&self, input: &str) -> Result<Uuid> {
        let input = input.trim();
        if let Ok(id) = Uuid::parse_str(input) {
            return Ok(id);
        }
        if input.len() < MIN_ID_PREFIX {
            return Err(LatestError::Api(format!(
                "Block id must be a UUID or a prefix of at least {} characters: {}",
                MIN_ID_PREFIX, input
            )));
        }

        let prefix = input.to_lowercase();
        let matches: Vec<Uuid> = self
            .store
            .list_blocks()?
            .into_iter()
            .map(|b| b.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(LatestError::Api(format!("No block matches: {}", input))),
            _ => Err(LatestError::Api(format!(
                "Ambiguous block id {}: {} blocks match",
                input,
                matches.len()
            ))),
        }
    }
}
