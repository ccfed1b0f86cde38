//! Test fixture modules for database record creation.
//!
//! - `course` - courses, participants, wiki associations and tracked articles
//! - `factory` - in-memory values (timestamps, fixture descriptions)

pub mod course;
pub mod factory;
