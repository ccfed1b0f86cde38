//! Error types for course statistics updates.
//!
//! This module provides the top-level [`Error`] together with specialized error types for
//! configuration and external adapters. All errors use `thiserror` for `Display` and `Error`
//! implementations, and convert into [`Error`] through `#[from]` so `?` works across layers.

pub mod adapter;
pub mod config;

use thiserror::Error;

use crate::error::{adapter::AdapterError, config::ConfigError};

/// Main error type for course statistics updates.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Adapter errors (revision, upload and status-annotation services)
/// - Course configuration errors (unknown course, dangling wiki association)
/// - Concurrency errors (an update for the same course already running)
/// - External library errors (database, JSON, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// External adapter failure (connectivity or protocol).
    #[error(transparent)]
    AdapterError(#[from] AdapterError),
    /// Course requested for update does not exist.
    #[error("Course with ID {0} not found")]
    CourseNotFound(i32),
    /// Course is associated with a wiki row that no longer exists.
    ///
    /// Aborts processing of that wiki only.
    #[error("Course {course_id} is associated with wiki ID {wiki_id} which does not exist")]
    WikiNotFound { course_id: i32, wiki_id: i32 },
    /// Another update run holds the lock for this course.
    #[error("An update for course {0} is already in progress")]
    UpdateInProgress(i32),
    /// Course period ends before it starts.
    #[error("Course period is invalid: end {end} is before start {start}")]
    InvalidCoursePeriod {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },
    /// Internal error indicating a bug in this crate.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Stored JSON could not be encoded or decoded.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl Error {
    /// Short label for the error type, attached to captured exceptions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "ConfigError",
            Self::AdapterError(AdapterError::Connectivity(_)) => "AdapterConnectivityError",
            Self::AdapterError(AdapterError::Protocol(_)) => "AdapterProtocolError",
            Self::CourseNotFound(_) => "CourseNotFound",
            Self::WikiNotFound { .. } => "WikiNotFound",
            Self::UpdateInProgress(_) => "UpdateInProgress",
            Self::InvalidCoursePeriod { .. } => "InvalidCoursePeriod",
            Self::InternalError(_) => "InternalError",
            Self::DbErr(_) => "DbErr",
            Self::SerdeJson(_) => "SerdeJson",
            Self::SchedulerError(_) => "SchedulerError",
        }
    }
}
