//! Service layer for course statistics updates.
//!
//! This module contains the aggregation engine that merges fetched activity into the timeslice
//! caches, the rollup of cached course and participant totals, and the orchestrator driving a
//! complete course update run with per-dependency failure isolation.

pub mod aggregation;
pub mod orchestrator;
pub mod rollup;
