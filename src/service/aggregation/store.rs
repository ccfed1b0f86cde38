use std::collections::HashMap;

use dioxus_logger::tracing;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, TransactionTrait};

use crate::{
    data::{
        articles_courses::ArticlesCoursesRepository,
        timeslice::{
            ArticleCourseTimesliceRepository, CourseUserWikiTimesliceRepository,
            CourseWikiTimesliceRepository,
        },
    },
    error::Error,
    model::{
        activity::Namespace,
        timeslice::{HighWaterMark, Window},
    },
    service::aggregation::{
        delta::{
            derive_deltas, merge_article_course_timeslice, merge_articles_courses,
            merge_course_wiki, merge_user_wiki, WindowDeltas,
        },
        AggregationService, WindowBatch, WindowOutcome,
    },
};

impl<'a> AggregationService<'a> {
    /// Apply one window's activity to every cache scope in a single transaction.
    ///
    /// Only records ahead of the window's stored high-water mark are applied, so applying the
    /// same batch twice leaves the caches unchanged.
    pub async fn apply_window(
        &self,
        course_id: i32,
        wiki_id: i32,
        window: &Window,
        batch: WindowBatch,
    ) -> Result<WindowOutcome, Error> {
        let txn = self.db.begin().await?;

        let timeslice = CourseWikiTimesliceRepository::new(&txn)
            .get_or_create(course_id, wiki_id, window)
            .await?;
        let stored = HighWaterMark::from_timeslice(&timeslice);

        let pending = WindowBatch {
            revisions: batch
                .revisions
                .into_iter()
                .filter(|r| stored.admits_revision(r.revision_id))
                .collect(),
            uploads: batch
                .uploads
                .into_iter()
                .filter(|u| stored.admits_upload(u.timestamp))
                .collect(),
        };

        if pending.revisions.is_empty() && pending.uploads.is_empty() {
            txn.commit().await?;
            return Ok(WindowOutcome {
                mark: stored,
                ..Default::default()
            });
        }

        let article_ids: Vec<i64> = pending
            .revisions
            .iter()
            .filter(|r| r.namespace() == Namespace::Main)
            .filter_map(|r| r.article_id)
            .collect();

        let articles_repo = ArticlesCoursesRepository::new(&txn);
        let mut tracked = HashMap::new();
        for article_id in &article_ids {
            if let Some(existing) = articles_repo.find(course_id, wiki_id, *article_id).await? {
                tracked.insert(*article_id, existing.tracked);
            }
        }

        let deltas = derive_deltas(&pending, &tracked);
        let mark = stored.max(deltas.course_wiki.mark);

        if let Some(active) = merge_course_wiki(timeslice, &deltas.course_wiki) {
            active.update(&txn).await?;
        }
        self.merge_participants(&txn, course_id, wiki_id, window, &deltas)
            .await?;
        self.merge_articles(&txn, course_id, wiki_id, window, &deltas)
            .await?;

        txn.commit().await?;

        tracing::debug!(
            course_id = course_id,
            wiki_id = wiki_id,
            window_start = %window.start,
            revisions = pending.revisions.len(),
            uploads = pending.uploads.len(),
            "Applied window activity"
        );

        Ok(WindowOutcome {
            revisions_applied: pending.revisions.len(),
            uploads_applied: pending.uploads.len(),
            mark,
        })
    }

    async fn merge_participants(
        &self,
        txn: &DatabaseTransaction,
        course_id: i32,
        wiki_id: i32,
        window: &Window,
        deltas: &WindowDeltas,
    ) -> Result<(), Error> {
        let repo = CourseUserWikiTimesliceRepository::new(txn);

        for (user_id, delta) in &deltas.users {
            let timeslice = repo
                .get_or_create(course_id, *user_id, wiki_id, window)
                .await?;
            merge_user_wiki(timeslice, delta).update(txn).await?;
        }

        Ok(())
    }

    async fn merge_articles(
        &self,
        txn: &DatabaseTransaction,
        course_id: i32,
        wiki_id: i32,
        window: &Window,
        deltas: &WindowDeltas,
    ) -> Result<(), Error> {
        let articles_repo = ArticlesCoursesRepository::new(txn);
        let timeslice_repo = ArticleCourseTimesliceRepository::new(txn);

        for (article_id, delta) in &deltas.articles {
            let association = articles_repo
                .get_or_create(course_id, wiki_id, *article_id)
                .await?;
            let timeslice = timeslice_repo.get_or_create(association.id, window).await?;

            merge_articles_courses(association, delta)?
                .update(txn)
                .await?;
            merge_article_course_timeslice(timeslice, delta)?
                .update(txn)
                .await?;
        }

        Ok(())
    }
}
