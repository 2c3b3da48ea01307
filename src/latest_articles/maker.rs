//! # Article Query Maker
//!
//! [`ArticleQuerySetMaker`] turns a block's filter values into the final list of
//! articles. It is plain data plus a pipeline of independent stages:
//!
//! 1. **Featured**: exact match when set.
//! 2. **Categories**: any-of match when non-empty.
//! 3. **Tags**: any-of match when non-empty.
//! 4. **Status**: exact match when set.
//! 5. **Privacy**: public articles only, private articles only, or both.
//! 6. **Publication window**: always applied against a reference date.
//! 7. **Limit**: construction-time limit wins over call-time limit.
//!
//! Stages 1 to 6 commute. Duplicates are removed before the limit is applied.
//!
//! The privacy flags are normally left unset at construction and filled in by
//! [`crate::privacy::apply_privacy_filter`] once the viewer is known.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::Result;
use crate::model::{ArticlePluginParams, CategoryId, Status, TagId};
use crate::queryset::{ArticleQuerySet, Lookup};
use crate::store::DataStore;

/// Values that may be supplied when invoking a maker.
///
/// Each is only consulted when the maker itself leaves the matching value unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub limit: Option<usize>,
    pub public_only: Option<bool>,
    pub private_only: Option<bool>,
}

impl CallOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuerySetMaker {
    pub categories: BTreeSet<CategoryId>,
    pub tags: BTreeSet<TagId>,
    pub status: Option<Status>,
    pub public_only: Option<bool>,
    pub private_only: Option<bool>,
    pub featured: Option<bool>,
    pub limit: Option<usize>,
    /// Set once the privacy flags were decided for a viewer. Call-time privacy
    /// values are ignored from then on, even when both flags are unset.
    pub privacy_resolved: bool,
}

impl ArticleQuerySetMaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a block configuration.
    ///
    /// Privacy flags stay unset: they depend on the viewer, not on the block.
    pub fn from_plugin_params(params: &ArticlePluginParams) -> Self {
        Self {
            categories: params.categories.clone(),
            tags: params.tags.clone(),
            status: params.status,
            featured: params.featured,
            limit: Some(params.cards_quantity as usize),
            public_only: None,
            private_only: None,
            privacy_resolved: false,
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn with_public_only(mut self, public_only: bool) -> Self {
        self.public_only = Some(public_only);
        self
    }

    pub fn with_private_only(mut self, private_only: bool) -> Self {
        self.private_only = Some(private_only);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the pipeline against the store using the current UTC date.
    pub fn call<S: DataStore>(&self, store: &S, options: CallOptions) -> Result<ArticleQuerySet> {
        self.call_on(store, options, Utc::now().date_naive())
    }

    /// Run the pipeline against the store with an explicit reference date.
    pub fn call_on<S: DataStore>(
        &self,
        store: &S,
        options: CallOptions,
        today: NaiveDate,
    ) -> Result<ArticleQuerySet> {
        let qs = store.list_articles()?.distinct();
        let qs = self.filter_by_feature(qs);
        let qs = self.filter_by_categories(qs);
        let qs = self.filter_by_tags(qs);
        let qs = self.filter_by_status(qs);
        let qs = self.with_call_privacy(options).filter_by_privacy(qs);
        let qs = self.filter_by_date(qs, today);
        let qs = self.apply_limit(qs, options.limit);
        debug!(count = qs.count(), %today, "article query evaluated");
        Ok(qs)
    }

    /// Fill in call-time privacy flags when this maker carries none of its own
    /// and its privacy has not been resolved for a viewer.
    fn with_call_privacy(&self, options: CallOptions) -> PrivacyFlags {
        if self.privacy_resolved || self.public_only.is_some() || self.private_only.is_some() {
            PrivacyFlags {
                public_only: self.public_only,
                private_only: self.private_only,
            }
        } else {
            PrivacyFlags {
                public_only: options.public_only,
                private_only: options.private_only,
            }
        }
    }

    pub fn filter_by_feature(&self, qs: ArticleQuerySet) -> ArticleQuerySet {
        match self.featured {
            Some(featured) => qs.filter(Lookup::Featured(featured)),
            None => qs,
        }
    }

    pub fn filter_by_categories(&self, qs: ArticleQuerySet) -> ArticleQuerySet {
        if self.categories.is_empty() {
            return qs;
        }
        qs.filter(Lookup::CategoryIn(self.categories.clone()))
    }

    pub fn filter_by_tags(&self, qs: ArticleQuerySet) -> ArticleQuerySet {
        if self.tags.is_empty() {
            return qs;
        }
        qs.filter(Lookup::TagIn(self.tags.clone()))
    }

    pub fn filter_by_status(&self, qs: ArticleQuerySet) -> ArticleQuerySet {
        match self.status {
            Some(status) => qs.filter(Lookup::Status(status)),
            None => qs,
        }
    }

    pub fn filter_by_privacy(&self, qs: ArticleQuerySet) -> ArticleQuerySet {
        PrivacyFlags {
            public_only: self.public_only,
            private_only: self.private_only,
        }
        .filter_by_privacy(qs)
    }

    /// Drop articles not yet published or already expired on `today`.
    pub fn filter_by_date(&self, qs: ArticleQuerySet, today: NaiveDate) -> ArticleQuerySet {
        qs.exclude(Lookup::PublishDateAfter(today))
            .exclude(Lookup::PublishEndBefore(today))
    }

    /// Truncate to the construction-time limit, else the call-time one, else keep all.
    pub fn apply_limit(&self, qs: ArticleQuerySet, limit: Option<usize>) -> ArticleQuerySet {
        match self.limit.filter(|n| *n > 0).or(limit.filter(|n| *n > 0)) {
            Some(n) => qs.limit(n),
            None => qs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PrivacyFlags {
    public_only: Option<bool>,
    private_only: Option<bool>,
}

impl PrivacyFlags {
    fn filter_by_privacy(self, qs: ArticleQuerySet) -> ArticleQuerySet {
        let public_only = self.public_only.unwrap_or(false);
        let private_only = self.private_only.unwrap_or(false);
        match (public_only, private_only) {
            (true, false) => qs.filter(Lookup::Private(false)),
            (false, true) => qs.filter(Lookup::Private(true)),
            _ => qs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::{store_with, today, ArticleBuilder};
    use chrono::Duration;

    /// Four articles:
    /// 1 published public (cat 1), 2 draft private (cat 2),
    /// 3 published private featured (cat 1, tag 1), 4 published public (cat 1, tag 2).
    fn fixture() -> InMemoryStore {
        store_with(vec![
            ArticleBuilder::new(1, "Test Article 1").categories(&[1]).build(),
            ArticleBuilder::new(2, "Test Article 2")
                .status(Status::Draft)
                .private(true)
                .categories(&[2])
                .build(),
            ArticleBuilder::new(3, "Test Article 3")
                .private(true)
                .featured(true)
                .categories(&[1])
                .tags(&[1])
                .build(),
            ArticleBuilder::new(4, "Test Article 4")
                .categories(&[1])
                .tags(&[2])
                .build(),
        ])
    }

    fn run(maker: &ArticleQuerySetMaker, store: &InMemoryStore) -> Vec<u64> {
        maker.call(store, CallOptions::default()).unwrap().ids()
    }

    #[test]
    fn init_no_parameters() {
        let maker = ArticleQuerySetMaker::new();
        assert!(maker.categories.is_empty());
        assert!(maker.tags.is_empty());
        assert_eq!(maker.status, None);
        assert_eq!(maker.public_only, None);
        assert_eq!(maker.private_only, None);
        assert_eq!(maker.limit, None);
        assert_eq!(maker.featured, None);
        assert!(!maker.privacy_resolved);
    }

    #[test]
    fn from_plugin_params_maps_fields() {
        let mut params = ArticlePluginParams::new("content");
        params.cards_quantity = 10;
        params.categories.extend([1, 2]);
        params.tags.extend([5]);
        params.featured = Some(true);

        let maker = ArticleQuerySetMaker::from_plugin_params(&params);
        assert_eq!(maker.limit, Some(10));
        assert_eq!(maker.categories, BTreeSet::from([1, 2]));
        assert_eq!(maker.tags, BTreeSet::from([5]));
        assert_eq!(maker.status, Some(Status::Published));
        assert_eq!(maker.featured, Some(true));
        assert_eq!(maker.public_only, None);
        assert_eq!(maker.private_only, None);
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let store = fixture();
        assert_eq!(run(&ArticleQuerySetMaker::new(), &store), vec![4, 3, 2, 1]);
    }

    #[test]
    fn private_only() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_private_only(true);
        assert_eq!(run(&maker, &store), vec![3, 2]);
    }

    #[test]
    fn public_only() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_public_only(true);
        assert_eq!(run(&maker, &store), vec![4, 1]);
    }

    #[test]
    fn both_privacy_flags_false_is_no_restriction() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new()
            .with_public_only(false)
            .with_private_only(false);
        assert_eq!(run(&maker, &store).len(), 4);
    }

    #[test]
    fn both_privacy_flags_true_is_no_restriction() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new()
            .with_public_only(true)
            .with_private_only(true);
        assert_eq!(run(&maker, &store).len(), 4);
    }

    #[test]
    fn status_filter() {
        let store = fixture();
        let published = ArticleQuerySetMaker::new().with_status(Status::Published);
        assert_eq!(run(&published, &store), vec![4, 3, 1]);

        let draft = ArticleQuerySetMaker::new().with_status(Status::Draft);
        assert_eq!(run(&draft, &store), vec![2]);
    }

    #[test]
    fn category_filter() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_categories([1]);
        assert_eq!(run(&maker, &store), vec![4, 3, 1]);

        let maker = ArticleQuerySetMaker::new().with_categories([2]);
        assert_eq!(run(&maker, &store), vec![2]);
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_categories([9999]);
        assert!(run(&maker, &store).is_empty());
    }

    #[test]
    fn featured_filter() {
        let store = fixture();
        let featured = ArticleQuerySetMaker::new().with_featured(true);
        assert_eq!(run(&featured, &store), vec![3]);

        let not_featured = ArticleQuerySetMaker::new().with_featured(false);
        assert_eq!(run(&not_featured, &store), vec![4, 2, 1]);
    }

    #[test]
    fn tag_filter_matches_any_tag() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_tags([1, 2]);
        assert_eq!(run(&maker, &store), vec![4, 3]);
    }

    #[test]
    fn empty_category_and_tag_sets_are_noops() {
        let store = fixture();
        let base = ArticleQuerySetMaker::new().with_status(Status::Published);
        let with_empty = base.clone().with_categories([]).with_tags([]);
        assert_eq!(run(&base, &store), run(&with_empty, &store));
    }

    #[test]
    fn publication_window_applies_regardless_of_filters() {
        let now = today();
        let store = store_with(vec![
            ArticleBuilder::new(1, "past")
                .publish_date(now - Duration::days(10))
                .build(),
            ArticleBuilder::new(2, "future")
                .publish_date(now + Duration::days(10))
                .build(),
            ArticleBuilder::new(3, "expired")
                .publish_date(now - Duration::days(20))
                .publish_end(now - Duration::days(10))
                .build(),
            ArticleBuilder::new(4, "ends today")
                .publish_date(now - Duration::days(20))
                .publish_end(now)
                .build(),
            ArticleBuilder::new(5, "starts today").publish_date(now).build(),
        ]);

        for maker in [
            ArticleQuerySetMaker::new(),
            ArticleQuerySetMaker::new().with_public_only(true),
            ArticleQuerySetMaker::new().with_status(Status::Published),
        ] {
            let qs = maker.call_on(&store, CallOptions::default(), now).unwrap();
            let mut ids = qs.ids();
            ids.sort();
            assert_eq!(ids, vec![1, 4, 5]);
        }
    }

    #[test]
    fn call_evaluates_window_on_utc_date() {
        let utc_today = Utc::now().date_naive();
        let store = store_with(vec![
            ArticleBuilder::new(1, "starts today").publish_date(utc_today).build(),
            ArticleBuilder::new(2, "starts tomorrow")
                .publish_date(utc_today + Duration::days(1))
                .build(),
            ArticleBuilder::new(3, "ended yesterday")
                .publish_date(utc_today - Duration::days(5))
                .publish_end(utc_today - Duration::days(1))
                .build(),
        ]);
        assert_eq!(run(&ArticleQuerySetMaker::new(), &store), vec![1]);
    }

    #[test]
    fn limit() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_limit(3);
        assert_eq!(run(&maker, &store), vec![4, 3, 2]);
    }

    #[test]
    fn construction_limit_wins_over_call_limit() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new().with_limit(3);
        let qs = maker.call(&store, CallOptions::with_limit(10)).unwrap();
        assert_eq!(qs.count(), 3);
    }

    #[test]
    fn construction_limit_larger_than_matches() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new()
            .with_limit(3)
            .with_status(Status::Draft);
        let qs = maker.call(&store, CallOptions::with_limit(10)).unwrap();
        assert_eq!(qs.count(), 1);
    }

    #[test]
    fn call_limit_used_when_unset() {
        let store = fixture();
        let qs = ArticleQuerySetMaker::new()
            .call(&store, CallOptions::with_limit(2))
            .unwrap();
        assert_eq!(qs.ids(), vec![4, 3]);
    }

    #[test]
    fn call_privacy_used_only_when_unset() {
        let store = fixture();
        let options = CallOptions {
            private_only: Some(true),
            ..Default::default()
        };

        let unset = ArticleQuerySetMaker::new();
        assert_eq!(unset.call(&store, options).unwrap().ids(), vec![3, 2]);

        let assigned = ArticleQuerySetMaker::new()
            .with_public_only(true)
            .with_private_only(false);
        assert_eq!(assigned.call(&store, options).unwrap().ids(), vec![4, 1]);
    }

    #[test]
    fn all_params() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new()
            .with_status(Status::Published)
            .with_categories([1])
            .with_private_only(true)
            .with_limit(1)
            .with_featured(true)
            .with_tags([1]);
        assert_eq!(run(&maker, &store), vec![3]);
    }

    #[test]
    fn duplicates_removed_before_limit() {
        let a = ArticleBuilder::new(1, "a").build();
        let store = store_with(vec![
            a.clone(),
            a,
            ArticleBuilder::new(2, "b").build(),
        ]);
        let maker = ArticleQuerySetMaker::new().with_limit(2);
        let mut ids = run(&maker, &store);
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let store = fixture();
        let maker = ArticleQuerySetMaker::new()
            .with_categories([1])
            .with_limit(2);
        let first = maker.call(&store, CallOptions::default()).unwrap();
        let second = maker.call(&store, CallOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn individual_stages_can_run_alone() {
        let store = fixture();
        let all = store.list_articles().unwrap();

        let maker = ArticleQuerySetMaker::new().with_status(Status::Draft);
        assert_eq!(maker.filter_by_status(all.clone()).count(), 1);
        assert_eq!(maker.filter_by_feature(all.clone()).count(), 4);
        assert_eq!(maker.filter_by_categories(all.clone()).count(), 4);
        assert_eq!(maker.apply_limit(all, None).count(), 4);
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = fixture();
        store.set_simulate_read_error(true);
        assert!(ArticleQuerySetMaker::new()
            .call(&store, CallOptions::default())
            .is_err());
    }
}
