pub mod adapter;

use std::sync::Arc;

use coursestats::{config::UpdateConfig, service::orchestrator::UpdateContext};
use coursestats_test_utils::TestContext;

use self::adapter::{
    RecordingAnnotator, RecordingErrorTracker, ScriptedRevisionSource, ScriptedUploadSource,
    StaticFeatures,
};

/// Adapter doubles shared by an update context.
pub struct Doubles {
    pub revisions: Arc<ScriptedRevisionSource>,
    pub uploads: Arc<ScriptedUploadSource>,
    pub annotator: Arc<RecordingAnnotator>,
    pub tracker: Arc<RecordingErrorTracker>,
    pub features: Arc<StaticFeatures>,
}

impl Doubles {
    pub fn new() -> Self {
        Self {
            revisions: Arc::new(ScriptedRevisionSource::default()),
            uploads: Arc::new(ScriptedUploadSource::default()),
            annotator: Arc::new(RecordingAnnotator::default()),
            tracker: Arc::new(RecordingErrorTracker::default()),
            features: Arc::new(StaticFeatures(true)),
        }
    }

    pub fn without_status_annotation(mut self) -> Self {
        self.features = Arc::new(StaticFeatures(false));
        self
    }

    /// Update context over the test database using these doubles.
    pub fn context(&self, test: &TestContext) -> UpdateContext {
        UpdateContext::new(
            test.db.clone(),
            UpdateConfig::default(),
            self.revisions.clone(),
            self.uploads.clone(),
            self.annotator.clone(),
        )
        .with_error_tracker(self.tracker.clone())
        .with_features(self.features.clone())
    }
}
