//! Ordered article queries.
//!
//! [`ArticleQuerySet`] is the query capability the block is built on: a sequence of
//! articles in store order that can be narrowed with [`Lookup`] predicates, deduplicated
//! and sliced. Every operation consumes the queryset and returns a new one, so a chain of
//! filters reads like the pipeline it is.
//!
//! Filters are conjunctive and commutative: applying the same lookups in any order yields
//! the same set, and relative order of the survivors is always preserved.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::model::{Article, CategoryId, Status, TagId};

/// A single predicate over an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// `featured` equals the value.
    Featured(bool),
    /// Associated with at least one of the categories.
    CategoryIn(BTreeSet<CategoryId>),
    /// Associated with at least one of the tags.
    TagIn(BTreeSet<TagId>),
    /// `status` equals the value.
    Status(Status),
    /// `private` equals the value.
    Private(bool),
    /// `publish_date` is strictly after the date.
    PublishDateAfter(NaiveDate),
    /// `publish_end` is set and strictly before the date.
    PublishEndBefore(NaiveDate),
}

impl Lookup {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Lookup::Featured(value) => article.featured == *value,
            Lookup::CategoryIn(ids) => article.categories.iter().any(|c| ids.contains(c)),
            Lookup::TagIn(ids) => article.tags.iter().any(|t| ids.contains(t)),
            Lookup::Status(status) => article.status == *status,
            Lookup::Private(value) => article.private == *value,
            Lookup::PublishDateAfter(date) => article.publish_date > *date,
            Lookup::PublishEndBefore(date) => matches!(article.publish_end, Some(end) if end < *date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleQuerySet {
    articles: Vec<Article>,
}

impl ArticleQuerySet {
    /// Wrap articles that are already in the desired order.
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Wrap articles, sorting them into natural store order first.
    pub fn ordered(mut articles: Vec<Article>) -> Self {
        articles.sort_by(Article::natural_cmp);
        Self { articles }
    }

    /// An always-empty queryset.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn filter(mut self, lookup: Lookup) -> Self {
        self.articles.retain(|a| lookup.matches(a));
        self
    }

    pub fn exclude(mut self, lookup: Lookup) -> Self {
        self.articles.retain(|a| !lookup.matches(a));
        self
    }

    /// Drop repeated rows, keeping the first occurrence of each article id.
    pub fn distinct(mut self) -> Self {
        let mut seen = HashSet::new();
        self.articles.retain(|a| seen.insert(a.id));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.articles.truncate(n);
        self
    }

    pub fn count(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn first(&self) -> Option<&Article> {
        self.articles.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.articles.iter().map(|a| a.id).collect()
    }

    pub fn into_vec(self) -> Vec<Article> {
        self.articles
    }
}

impl IntoIterator for ArticleQuerySet {
    type Item = Article;
    type IntoIter = std::vec::IntoIter<Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArticleQuerySet {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

impl FromIterator<Article> for ArticleQuerySet {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
