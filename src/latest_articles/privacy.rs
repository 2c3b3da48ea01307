//! Privacy resolution.
//!
//! Maps the viewer and the block's [`PrivacyCriterion`] to the privacy flags of an
//! [`ArticleQuerySetMaker`]:
//!
//! | Viewer | Criterion | Result |
//! |--------|-----------|--------|
//! | anonymous | private only | nothing, ever |
//! | anonymous | public only / public and private | public only |
//! | authenticated | public only | public only |
//! | authenticated | private only | private only |
//! | authenticated | public and private | no privacy restriction |

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::maker::{ArticleQuerySetMaker, CallOptions};
use crate::model::{PrivacyCriterion, Viewer};
use crate::queryset::ArticleQuerySet;
use crate::store::DataStore;

/// A maker ready to run, or the decision that nothing may be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    Query(ArticleQuerySetMaker),
    Nothing,
}

impl ArticleFilter {
    pub fn call<S: DataStore>(&self, store: &S, options: CallOptions) -> Result<ArticleQuerySet> {
        match self {
            ArticleFilter::Query(maker) => maker.call(store, options),
            ArticleFilter::Nothing => Ok(ArticleQuerySet::none()),
        }
    }

    pub fn call_on<S: DataStore>(
        &self,
        store: &S,
        options: CallOptions,
        today: NaiveDate,
    ) -> Result<ArticleQuerySet> {
        match self {
            ArticleFilter::Query(maker) => maker.call_on(store, options, today),
            ArticleFilter::Nothing => Ok(ArticleQuerySet::none()),
        }
    }

    pub fn maker(&self) -> Option<&ArticleQuerySetMaker> {
        match self {
            ArticleFilter::Query(maker) => Some(maker),
            ArticleFilter::Nothing => None,
        }
    }
}

pub fn apply_privacy_filter(
    criterion: PrivacyCriterion,
    viewer: &Viewer,
    mut maker: ArticleQuerySetMaker,
) -> ArticleFilter {
    let (public_only, private_only) = match (viewer, criterion) {
        (Viewer::Anonymous, PrivacyCriterion::PrivateOnly) => {
            debug!(%criterion, "anonymous viewer, block shows nothing");
            return ArticleFilter::Nothing;
        }
        (Viewer::Anonymous, PrivacyCriterion::PublicOnly)
        | (Viewer::Anonymous, PrivacyCriterion::PublicAndPrivate) => (Some(true), Some(false)),
        (Viewer::Authenticated { .. }, PrivacyCriterion::PublicOnly) => (Some(true), Some(false)),
        (Viewer::Authenticated { .. }, PrivacyCriterion::PrivateOnly) => (Some(false), Some(true)),
        (Viewer::Authenticated { .. }, PrivacyCriterion::PublicAndPrivate) => (None, None),
    };

    debug!(
        %criterion,
        anonymous = viewer.is_anonymous(),
        ?public_only,
        ?private_only,
        "privacy resolved"
    );
    maker.public_only = public_only;
    maker.private_only = private_only;
    maker.privacy_resolved = true;
    ArticleFilter::Query(maker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{store_with, visibility_articles, ArticleBuilder};

    fn user() -> Viewer {
        Viewer::authenticated("editor")
    }

    fn resolve(viewer: &Viewer, criterion: PrivacyCriterion) -> ArticleFilter {
        apply_privacy_filter(criterion, viewer, ArticleQuerySetMaker::new())
    }

    fn flags(filter: &ArticleFilter) -> (Option<bool>, Option<bool>) {
        let maker = filter.maker().expect("expected a query");
        (maker.public_only, maker.private_only)
    }

    #[test]
    fn anonymous_private_only_shows_nothing() {
        let filter = resolve(&Viewer::Anonymous, PrivacyCriterion::PrivateOnly);
        assert_eq!(filter, ArticleFilter::Nothing);
    }

    #[test]
    fn anonymous_public_only() {
        let filter = resolve(&Viewer::Anonymous, PrivacyCriterion::PublicOnly);
        assert_eq!(flags(&filter), (Some(true), Some(false)));
    }

    #[test]
    fn anonymous_public_and_private_is_public_only() {
        let filter = resolve(&Viewer::Anonymous, PrivacyCriterion::PublicAndPrivate);
        assert_eq!(flags(&filter), (Some(true), Some(false)));
    }

    #[test]
    fn authenticated_public_only() {
        let filter = resolve(&user(), PrivacyCriterion::PublicOnly);
        assert_eq!(flags(&filter), (Some(true), Some(false)));
    }

    #[test]
    fn authenticated_private_only() {
        let filter = resolve(&user(), PrivacyCriterion::PrivateOnly);
        assert_eq!(flags(&filter), (Some(false), Some(true)));
    }

    #[test]
    fn authenticated_public_and_private_clears_flags() {
        let maker = ArticleQuerySetMaker::new()
            .with_public_only(true)
            .with_private_only(false);
        let filter = apply_privacy_filter(PrivacyCriterion::PublicAndPrivate, &user(), maker);
        assert_eq!(flags(&filter), (None, None));
    }

    #[test]
    fn resolution_keeps_other_filters() {
        let maker = ArticleQuerySetMaker::new().with_categories([2]).with_limit(4);
        let filter = apply_privacy_filter(PrivacyCriterion::PublicOnly, &user(), maker);
        let maker = filter.maker().unwrap();
        assert_eq!(maker.limit, Some(4));
        assert!(maker.categories.contains(&2));
    }

    #[test]
    fn never_both_flags_set() {
        for viewer in [Viewer::Anonymous, user()] {
            for criterion in PrivacyCriterion::ALL {
                if let ArticleFilter::Query(maker) = resolve(&viewer, criterion) {
                    assert!(!(maker.public_only == Some(true) && maker.private_only == Some(true)));
                }
            }
        }
    }

    #[test]
    fn anonymous_private_only_is_empty_for_any_articles() {
        let store = store_with(vec![
            ArticleBuilder::new(1, "private").private(true).build(),
            ArticleBuilder::new(2, "public").build(),
        ]);
        let filter = resolve(&Viewer::Anonymous, PrivacyCriterion::PrivateOnly);
        assert!(filter.call(&store, CallOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn resolved_privacy_ignores_call_time_flags() {
        let store = store_with(visibility_articles());
        let maker = ArticleQuerySetMaker::new().with_status(crate::model::Status::Published);
        let filter = apply_privacy_filter(PrivacyCriterion::PublicAndPrivate, &user(), maker);
        assert!(filter.maker().unwrap().privacy_resolved);

        let options = CallOptions {
            private_only: Some(true),
            ..Default::default()
        };
        assert_eq!(filter.call(&store, options).unwrap().ids(), vec![2, 1]);

        let options = CallOptions {
            public_only: Some(true),
            ..Default::default()
        };
        assert_eq!(filter.call(&store, options).unwrap().ids(), vec![2, 1]);
    }

    #[test]
    fn visibility_example() {
        let store = store_with(visibility_articles());
        let maker = ArticleQuerySetMaker::new().with_status(crate::model::Status::Published);

        let seen = apply_privacy_filter(PrivacyCriterion::PublicAndPrivate, &user(), maker.clone())
            .call(&store, CallOptions::default())
            .unwrap();
        assert_eq!(seen.ids(), vec![2, 1]);

        let seen = apply_privacy_filter(PrivacyCriterion::PublicAndPrivate, &Viewer::Anonymous, maker)
            .call(&store, CallOptions::default())
            .unwrap();
        assert_eq!(seen.ids(), vec![1]);
    }
}
