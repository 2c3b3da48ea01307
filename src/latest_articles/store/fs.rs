use super::DataStore;
use crate::error::{LatestError, Result};
use crate::model::{Article, ArticlePluginParams, Category, Tag};
use crate::queryset::ArticleQuerySet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const ARTICLES_FILENAME: &str = "articles.json";
pub const BLOCKS_FILENAME: &str = "blocks.json";

/// Contents of `articles.json`, as exported from the article store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArticleData {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LatestError::Io)?;
        }
        Ok(())
    }

    fn load_article_data(&self) -> Result<ArticleData> {
        let path = self.root.join(ARTICLES_FILENAME);
        if !path.exists() {
            return Ok(ArticleData::default());
        }
        let content = fs::read_to_string(&path).map_err(LatestError::Io)?;
        serde_json::from_str(&content).map_err(LatestError::Serialization)
    }

    /// Replace `articles.json`. The block itself never writes articles; this is
    /// for importing an export of the article store.
    pub fn save_article_data(&self, data: &ArticleData) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(data).map_err(LatestError::Serialization)?;
        write_atomic(&self.root.join(ARTICLES_FILENAME), &content)
    }

    fn load_blocks(&self) -> Result<HashMap<Uuid, ArticlePluginParams>> {
        let path = self.root.join(BLOCKS_FILENAME);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&path).map_err(LatestError::Io)?;
        serde_json::from_str(&content).map_err(LatestError::Serialization)
    }

    fn save_blocks(&self, blocks: &HashMap<Uuid, ArticlePluginParams>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(blocks).map_err(LatestError::Serialization)?;
        write_atomic(&self.root.join(BLOCKS_FILENAME), &content)
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(LatestError::Io)?;
    fs::rename(&tmp, path).map_err(LatestError::Io)?;
    Ok(())
}

impl DataStore for FileStore {
    fn list_articles(&self) -> Result<ArticleQuerySet> {
        let data = self.load_article_data()?;
        Ok(ArticleQuerySet::ordered(data.articles))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.load_article_data()?.categories)
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.load_article_data()?.tags)
    }

    fn save_block(&mut self, block: &ArticlePluginParams) -> Result<()> {
        let mut blocks = self.load_blocks()?;
        blocks.insert(block.id, block.clone());
        self.save_blocks(&blocks)
    }

    fn get_block(&self, id: &Uuid) -> Result<ArticlePluginParams> {
        self.load_blocks()?
            .remove(id)
            .ok_or(LatestError::BlockNotFound(*id))
    }

    fn list_blocks(&self) -> Result<Vec<ArticlePluginParams>> {
        let mut blocks: Vec<_> = self.load_blocks()?.into_values().collect();
        blocks.sort_by(|a, b| a.placeholder.cmp(&b.placeholder).then(a.id.cmp(&b.id)));
        Ok(blocks)
    }

    fn delete_block(&mut self, id: &Uuid) -> Result<()> {
        let mut blocks = self.load_blocks()?;
        if blocks.remove(id).is_none() {
            return Err(LatestError::BlockNotFound(*id));
        }
        self.save_blocks(&blocks)
    }
}
