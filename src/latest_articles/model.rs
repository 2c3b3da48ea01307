//! # Domain Model
//!
//! Core data types for the latest-articles block.
//!
//! ## Articles Are Read-Only
//!
//! [`Article`], [`Category`] and [`Tag`] mirror what the article store holds. This crate
//! only reads them: filtering never mutates an article, and no command edits one.
//!
//! ## Block Configuration
//!
//! [`ArticlePluginParams`] is what an editor configures when placing a block in a page
//! region (a *placeholder*). It is persisted per block and is the only thing the render
//! path reads besides the article store itself.
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `title` | `"Articles"` | Display title, 1 to 50 characters |
//! | `cards_quantity` | `5` | How many articles to show, at least 3 |
//! | `categories` | empty | Restrict to any of these categories (empty: no restriction) |
//! | `tags` | empty | Restrict to any of these tags (empty: no restriction) |
//! | `status` | `Published` | Restrict to this status (`None`: any status) |
//! | `featured` | `Some(false)` | Restrict to this featured flag (`None`: either) |
//! | `privacy_criterion` | `PublicOnly` | Which visibilities the viewer may be shown |
//! | `template` | first configured choice | Presentation template key |
//!
//! ## Natural Ordering
//!
//! Articles are listed newest first: `publish_date` descending, then `publish_time`
//! descending, then `title` ascending. See [`Article::natural_cmp`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::{TemplateChoice, DEFAULT_TEMPLATE};
use crate::error::ValidationError;

pub const DEFAULT_TITLE: &str = "Articles";
pub const DEFAULT_QUANTITY: u32 = 5;
pub const MIN_QUANTITY: u32 = 3;
pub const TITLE_MAX_LENGTH: usize = 50;
pub const TEMPLATE_MAX_LENGTH: usize = 150;

pub type CategoryId = u64;
pub type TagId = u64;

/// Publication status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
}

impl Status {
    /// Numeric code used by the article store.
    pub fn code(&self) -> i16 {
        match self {
            Status::Draft => 0,
            Status::Published => 10,
        }
    }

    pub fn from_code(code: i16) -> Option<Status> {
        [Status::Draft, Status::Published]
            .into_iter()
            .find(|status| status.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Status::Draft),
            "published" => Ok(Status::Published),
            other => other
                .parse()
                .ok()
                .and_then(Status::from_code)
                .ok_or_else(|| format!("Unknown status: {}", other)),
        }
    }
}

/// Policy controlling whether private articles are eligible for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyCriterion {
    PrivateOnly,
    PublicAndPrivate,
    #[default]
    PublicOnly,
}

impl PrivacyCriterion {
    pub const ALL: [PrivacyCriterion; 3] = [
        PrivacyCriterion::PrivateOnly,
        PrivacyCriterion::PublicAndPrivate,
        PrivacyCriterion::PublicOnly,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PrivacyCriterion::PrivateOnly => "private_only",
            PrivacyCriterion::PublicAndPrivate => "public_and_private",
            PrivacyCriterion::PublicOnly => "public_only",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrivacyCriterion::PrivateOnly => "Private only if accessible",
            PrivacyCriterion::PublicAndPrivate => "Public and private if accessible",
            PrivacyCriterion::PublicOnly => "Public only",
        }
    }
}

impl fmt::Display for PrivacyCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PrivacyCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        PrivacyCriterion::ALL
            .into_iter()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| format!("Unknown privacy criterion: {}", s))
    }
}

/// Who is looking at the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated { username: String },
}

impl Viewer {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Viewer::Authenticated {
            username: username.into(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Viewer::Anonymous)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub introduction: String,
    pub status: Status,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub featured: bool,
    pub publish_date: NaiveDate,
    #[serde(default = "midnight")]
    pub publish_time: NaiveTime,
    #[serde(default)]
    pub publish_end: Option<NaiveDate>,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

fn midnight() -> NaiveTime {
    NaiveTime::MIN
}

impl Article {
    /// Store ordering: newest publication first, ties broken by title.
    pub fn natural_cmp(a: &Article, b: &Article) -> Ordering {
        b.publish_date
            .cmp(&a.publish_date)
            .then_with(|| b.publish_time.cmp(&a.publish_time))
            .then_with(|| a.title.cmp(&b.title))
    }
}

/// Configuration of one "latest articles" block placed in a page region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePluginParams {
    pub id: Uuid,
    /// Name of the page region (placeholder) owning this block.
    pub placeholder: String,
    pub title: String,
    pub cards_quantity: u32,
    #[serde(default)]
    pub categories: BTreeSet<CategoryId>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub privacy_criterion: PrivacyCriterion,
    pub template: String,
}

impl Default for ArticlePluginParams {
    fn default() -> Self {
        Self::new("content")
    }
}

impl ArticlePluginParams {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            placeholder: placeholder.into(),
            title: DEFAULT_TITLE.to_string(),
            cards_quantity: DEFAULT_QUANTITY,
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
            status: Some(Status::Published),
            featured: Some(false),
            privacy_criterion: PrivacyCriterion::PublicOnly,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Check every field against the editor form rules.
    ///
    /// All failures are collected so the editor sees them at once.
    pub fn validate(&self, templates: &[TemplateChoice]) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "This field is required.");
        } else if self.title.chars().count() > TITLE_MAX_LENGTH {
            errors.add(
                "title",
                format!(
                    "Ensure this value has at most {} characters.",
                    TITLE_MAX_LENGTH
                ),
            );
        }

        if self.cards_quantity < MIN_QUANTITY {
            errors.add(
                "cards_quantity",
                format!(
                    "Ensure this value is greater than or equal to {}.",
                    MIN_QUANTITY
                ),
            );
        }

        if self.template.is_empty() {
            errors.add("template", "This field is required.");
        } else if self.template.chars().count() > TEMPLATE_MAX_LENGTH {
            errors.add(
                "template",
                format!(
                    "Ensure this value has at most {} characters.",
                    TEMPLATE_MAX_LENGTH
                ),
            );
        } else if !templates.iter().any(|t| t.path == self.template) {
            errors.add(
                "template",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    self.template
                ),
            );
        }

        errors.into_result()
    }

    /// Copy category and tag associations from `old`, replacing the current ones.
    ///
    /// Used when the owning page is duplicated.
    pub fn copy_relations(&mut self, old: &ArticlePluginParams) {
        self.tags = old.tags.clone();
        self.categories = old.categories.clone();
    }
}
