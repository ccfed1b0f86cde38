//! Shared values for test fixtures.

/// Slug used for the default course fixture.
pub static TEST_COURSE_SLUG: &str = "Test_University/Writing_Wikipedia_(Fall_2018)";

/// Language of the default wiki fixture.
pub static TEST_LANGUAGE: &str = "en";

/// Project of the default wiki fixture.
pub static TEST_PROJECT: &str = "wikipedia";
