//! Records returned by the revision and upload adapters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wiki namespace of the page a revision touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Main,
    User,
    UserTalk,
    Draft,
    Other(i32),
}

impl Namespace {
    pub const MAIN_ID: i32 = 0;
    pub const USER_ID: i32 = 2;
    pub const USER_TALK_ID: i32 = 3;
    pub const DRAFT_ID: i32 = 118;

    pub fn from_id(id: i32) -> Self {
        match id {
            Self::MAIN_ID => Self::Main,
            Self::USER_ID => Self::User,
            Self::USER_TALK_ID => Self::UserTalk,
            Self::DRAFT_ID => Self::Draft,
            other => Self::Other(other),
        }
    }
}

/// One revision fetched from the content API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedRevision {
    pub revision_id: i64,
    /// Absent for pages the API could not resolve to an article.
    pub article_id: Option<i64>,
    pub user_id: i64,
    pub timestamp: NaiveDateTime,
    /// Signed character count change.
    pub char_delta: i64,
    /// Signed citation count change.
    pub ref_delta: i64,
    pub deleted: bool,
    #[serde(default)]
    pub namespace: i32,
}

impl FetchedRevision {
    pub fn namespace(&self) -> Namespace {
        Namespace::from_id(self.namespace)
    }
}

/// One upload fetched from the media-upload log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedUpload {
    pub user_id: i64,
    pub timestamp: NaiveDateTime,
    /// Number of pages currently using the file.
    pub usage_count: i64,
}

/// Position in a wiki's revision history after which new revisions are requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevisionMarker {
    pub revision_id: Option<i64>,
    pub timestamp: Option<NaiveDateTime>,
}
