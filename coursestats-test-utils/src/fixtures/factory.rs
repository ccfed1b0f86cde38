use chrono::NaiveDateTime;

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp used by fixtures.
///
/// # Panics
/// Panics if the string is not a valid timestamp.
pub fn timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|e| panic!("invalid fixture timestamp {value}: {e}"))
}

/// Description of a course fixture inserted by `TestBuilder::with_course`.
#[derive(Clone, Debug)]
pub struct CourseFixture {
    pub slug: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub debug_updates: bool,
    pub longest_update_secs: Option<i64>,
}

impl CourseFixture {
    /// Enable debug progress events for the course.
    pub fn debug_updates(mut self) -> Self {
        self.debug_updates = true;
        self
    }

    /// Record a previously observed update duration.
    pub fn longest_update_secs(mut self, secs: i64) -> Self {
        self.longest_update_secs = Some(secs);
        self
    }
}

/// Create a course fixture spanning `start..end`.
pub fn course(slug: &str, start: &str, end: &str) -> CourseFixture {
    CourseFixture {
        slug: slug.to_string(),
        start: timestamp(start),
        end: timestamp(end),
        debug_updates: false,
        longest_update_secs: None,
    }
}
