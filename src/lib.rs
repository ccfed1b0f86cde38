//! Incremental, time-windowed editing statistics for courses running on content wikis.
//!
//! A course update fetches the revisions and uploads made since the last successful update on
//! each of the course's wikis, merges them into per-window caches at course, participant and
//! article granularity, recomputes the cached course totals and records the run in an
//! append-only audit log. The entry points are
//! [`CourseUpdateService::update_course`](service::orchestrator::CourseUpdateService::update_course)
//! and [`scheduler::start_scheduler`].

pub mod adapter;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
