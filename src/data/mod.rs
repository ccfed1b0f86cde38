//! Data access layer repositories.
//!
//! This module contains the database repositories for course statistics. Repositories are
//! generic over [`sea_orm::ConnectionTrait`] so the aggregation engine can run every write for
//! one cache window inside a single transaction.

pub mod articles_courses;
pub mod course;
pub mod timeslice;
pub mod update_log;
pub mod wiki;


use std::collections::BTreeSet;

/// Decode a user id set stored as a JSON array.
pub fn decode_user_ids(value: &str) -> Result<BTreeSet<i64>, serde_json::Error> {
    if value.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    serde_json::from_str(value)
}

/// Encode a user id set as a sorted JSON array.
pub fn encode_user_ids(user_ids: &BTreeSet<i64>) -> Result<String, serde_json::Error> {
    serde_json::to_string(user_ids)
}
