//! Data models and type definitions.
//!
//! This module contains the records exchanged with external adapters, the typed course flags,
//! cache window and delta types used by the aggregation engine, and aliases for the SeaORM
//! models from the `entity` crate.

pub mod activity;
pub mod course;
pub mod db;
pub mod timeslice;
