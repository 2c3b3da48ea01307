use crate::model::{Article, Category, CategoryId, Status, Tag, TagId};
use crate::store::memory::InMemoryStore;
use crate::store::fs::FileStore;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Builds articles the way the store would hold them.
///
/// Defaults: published, public, not featured, published yesterday with no end.
/// Publish time grows with the id so later ids sort first on the same day.
pub struct ArticleBuilder {
    article: Article,
}

impl ArticleBuilder {
    pub fn new(id: u64, title: &str) -> Self {
        let seconds = ((id * 60) % 86_400) as u32;
        Self {
            article: Article {
                id,
                title: title.to_string(),
                language: "en".to_string(),
                introduction: String::new(),
                status: Status::Published,
                private: false,
                featured: false,
                publish_date: today() - Duration::days(1),
                publish_time: NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                    .unwrap_or(NaiveTime::MIN),
                publish_end: None,
                categories: Vec::new(),
                tags: Vec::new(),
            },
        }
    }

    pub fn status(mut self, status: Status) -> Self {
        self.article.status = status;
        self
    }

    pub fn private(mut self, private: bool) -> Self {
        self.article.private = private;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.article.featured = featured;
        self
    }

    pub fn publish_date(mut self, date: NaiveDate) -> Self {
        self.article.publish_date = date;
        self
    }

    pub fn publish_end(mut self, date: NaiveDate) -> Self {
        self.article.publish_end = Some(date);
        self
    }

    pub fn categories(mut self, ids: &[CategoryId]) -> Self {
        self.article.categories = ids.to_vec();
        self
    }

    pub fn tags(mut self, ids: &[TagId]) -> Self {
        self.article.tags = ids.to_vec();
        self
    }

    pub fn build(self) -> Article {
        self.article
    }
}

/// Four articles covering every status/privacy pairing used by render tests:
/// 1 published+public, 2 published+private, 3 draft+private, 4 draft+private.
pub fn visibility_articles() -> Vec<Article> {
    vec![
        ArticleBuilder::new(1, "published and public")
            .categories(&[1])
            .build(),
        ArticleBuilder::new(2, "published and private")
            .private(true)
            .categories(&[2])
            .build(),
        ArticleBuilder::new(3, "unpublished and private")
            .status(Status::Draft)
            .private(true)
            .categories(&[2])
            .build(),
        ArticleBuilder::new(4, "unpublished and public")
            .status(Status::Draft)
            .private(true)
            .categories(&[2])
            .build(),
    ]
}

pub fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            title: "Category 1".to_string(),
            language: "en".to_string(),
        },
        Category {
            id: 2,
            title: "Category 2".to_string(),
            language: "fr".to_string(),
        },
    ]
}

pub fn tags() -> Vec<Tag> {
    vec![
        Tag {
            id: 1,
            name: "tag_1".to_string(),
        },
        Tag {
            id: 2,
            name: "tag_2".to_string(),
        },
    ]
}

pub fn store_with(articles: Vec<Article>) -> InMemoryStore {
    InMemoryStore::new()
        .with_articles(articles)
        .with_categories(categories())
        .with_tags(tags())
}

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}
