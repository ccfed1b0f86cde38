//! Utility functions and helpers.
//!
//! This module provides the time calculations used by the update engine: splitting a course
//! period into cache windows and locating the window a timestamp falls into.

pub mod time;
