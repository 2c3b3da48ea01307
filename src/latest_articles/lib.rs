//! # Latest Articles Architecture
//!
//! A "latest articles" block shows a short, filtered list of recent articles inside a
//! page region (a *placeholder*). Editors place blocks and configure what they show;
//! readers see the list rendered through a template, restricted by who they are.
//!
//! This is a library that happens to have a CLI client, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id prefixes → UUIDs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Block lifecycle: create, configure, delete, duplicate    │
//! │  - Rendering through the plugin                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (plugin.rs, privacy.rs, maker.rs, queryset.rs)        │
//! │  - Block parameters → query maker → privacy → articles      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Filtering
//!
//! [`maker::ArticleQuerySetMaker`] narrows the article store in a fixed order:
//! featured, categories, tags, status, privacy, publication window, limit. The privacy
//! step is decided per viewer by [`privacy::apply_privacy_filter`]; anonymous readers
//! never see private articles.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns Rust types. It never
//! writes to stdout or stderr and never exits the process. Diagnostics go through
//! `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`plugin`]: Rendering a block for a viewer
//! - [`privacy`]: Viewer and privacy criterion → privacy flags
//! - [`maker`]: The filter pipeline over articles
//! - [`queryset`]: Ordered, chainable article queries
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Article`, `ArticlePluginParams`, `Viewer`)
//! - [`templates`]: Template registry
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod maker;
pub mod model;
pub mod plugin;
pub mod privacy;
pub mod queryset;
pub mod store;
pub mod templates;

#[cfg(test)]
pub mod test_utils;
