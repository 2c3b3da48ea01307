use super::DataStore;
use crate::error::{LatestError, Result};
use crate::model::{Article, ArticlePluginParams, Category, Tag};
use crate::queryset::ArticleQuerySet;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory store for testing.
#[derive(Default)]
pub struct InMemoryStore {
    articles: Vec<Article>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    blocks: HashMap<Uuid, ArticlePluginParams>,
    simulate_read_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(mut self, articles: Vec<Article>) -> Self {
        self.articles = articles;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn add_article(&mut self, article: Article) {
        self.articles.push(article);
    }

    /// Make article reads fail, for testing error propagation.
    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }
}

impl DataStore for InMemoryStore {
    fn list_articles(&self) -> Result<ArticleQuerySet> {
        if self.simulate_read_error {
            return Err(LatestError::Store("Simulated read error".to_string()));
        }
        Ok(ArticleQuerySet::ordered(self.articles.clone()))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn save_block(&mut self, block: &ArticlePluginParams) -> Result<()> {
        self.blocks.insert(block.id, block.clone());
        Ok(())
    }

    fn get_block(&self, id: &Uuid) -> Result<ArticlePluginParams> {
        self.blocks
            .get(id)
            .cloned()
            .ok_or(LatestError::BlockNotFound(*id))
    }

    fn list_blocks(&self) -> Result<Vec<ArticlePluginParams>> {
        let mut blocks: Vec<_> = self.blocks.values().cloned().collect();
        blocks.sort_by(|a, b| a.placeholder.cmp(&b.placeholder).then(a.id.cmp(&b.id)));
        Ok(blocks)
    }

    fn delete_block(&mut self, id: &Uuid) -> Result<()> {
        self.blocks
            .remove(id)
            .map(|_| ())
            .ok_or(LatestError::BlockNotFound(*id))
    }
}
