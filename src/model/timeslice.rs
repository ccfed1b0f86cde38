//! Cache window, high-water mark and delta types shared by the aggregation engine and the
//! timeslice repositories.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::model::{activity::RevisionMarker, db::CourseWikiTimesliceModel};

/// One fixed-length cache window of a course period.
///
/// Windows are half-open `[start, end)` except the final window of a period, which also
/// contains its `end` instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub closed: bool,
}

impl Window {
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start
            && (timestamp < self.end || (self.closed && timestamp == self.end))
    }
}

/// Last activity applied to a course-wiki window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighWaterMark {
    pub revision_id: Option<i64>,
    pub revision_at: Option<NaiveDateTime>,
    pub upload_at: Option<NaiveDateTime>,
}

impl HighWaterMark {
    pub fn from_timeslice(timeslice: &CourseWikiTimesliceModel) -> Self {
        Self {
            revision_id: timeslice.last_mw_rev_id,
            revision_at: timeslice.last_mw_rev_at,
            upload_at: timeslice.last_upload_at,
        }
    }

    /// Whether a revision has not yet been applied to the window.
    pub fn admits_revision(&self, revision_id: i64) -> bool {
        self.revision_id.is_none_or(|mark| revision_id > mark)
    }

    /// Whether an upload has not yet been applied to the window.
    ///
    /// Uploads carry no ID, so the timestamp is the mark. Uploads sharing the mark's timestamp
    /// are applied in the same batch as the one that set it.
    pub fn admits_upload(&self, timestamp: NaiveDateTime) -> bool {
        self.upload_at.is_none_or(|mark| timestamp > mark)
    }

    pub fn advance_revision(&mut self, revision_id: i64, timestamp: NaiveDateTime) {
        self.revision_id = self.revision_id.max(Some(revision_id));
        self.revision_at = self.revision_at.max(Some(timestamp));
    }

    pub fn advance_upload(&mut self, timestamp: NaiveDateTime) {
        self.upload_at = self.upload_at.max(Some(timestamp));
    }

    /// Component-wise maximum of two marks.
    pub fn max(self, other: Self) -> Self {
        Self {
            revision_id: self.revision_id.max(other.revision_id),
            revision_at: self.revision_at.max(other.revision_at),
            upload_at: self.upload_at.max(other.upload_at),
        }
    }

    /// Whether any component of `self` is strictly newer than `stored`.
    pub fn is_ahead_of(&self, stored: &Self) -> bool {
        self.revision_id > stored.revision_id
            || self.revision_at > stored.revision_at
            || self.upload_at > stored.upload_at
    }

    pub fn revision_marker(&self) -> RevisionMarker {
        RevisionMarker {
            revision_id: self.revision_id,
            timestamp: self.revision_at,
        }
    }
}

/// Signed counter changes for one cache scope within one window.
///
/// The same record type feeds the course-wiki, user-wiki, articles-courses and
/// article-window merge functions; each reads only the fields its table stores.
/// `character_sum` is the mainspace component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimesliceDelta {
    pub character_sum: i64,
    pub character_sum_us: i64,
    pub character_sum_draft: i64,
    pub references_count: i64,
    pub revision_count: i64,
    pub upload_count: i64,
    pub uploads_in_use_count: i64,
    pub upload_usages_count: i64,
    pub user_ids: BTreeSet<i64>,
    pub mark: HighWaterMark,
}

impl TimesliceDelta {
    /// True when applying the delta would change no counter, user set or mark.
    pub fn is_empty(&self) -> bool {
        self.character_sum == 0
            && self.character_sum_us == 0
            && self.character_sum_draft == 0
            && self.references_count == 0
            && self.revision_count == 0
            && self.upload_count == 0
            && self.uploads_in_use_count == 0
            && self.upload_usages_count == 0
            && self.user_ids.is_empty()
            && self.mark == HighWaterMark::default()
    }
}
