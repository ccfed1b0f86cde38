//! Scripted and recording doubles for the update adapters.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use coursestats::{
    adapter::{
        ErrorTags, ErrorTracker, Feature, FeatureLookup, RevisionSource, StatusAnnotator,
        UploadSource,
    },
    error::{adapter::AdapterError, Error},
    model::{
        activity::{FetchedRevision, FetchedUpload, RevisionMarker},
        db::{CourseModel, WikiModel},
    },
};

fn wiki_key(wiki: &WikiModel) -> String {
    format!("{}.{}", wiki.language.as_deref().unwrap_or(""), wiki.project)
}

/// Revision source answering from a per-wiki script.
///
/// Returns only revisions newer than the requested marker, like the real history API.
#[derive(Default)]
pub struct ScriptedRevisionSource {
    revisions: Mutex<HashMap<String, Result<Vec<FetchedRevision>, AdapterError>>>,
    pub calls: Mutex<Vec<(String, RevisionMarker)>>,
}

impl ScriptedRevisionSource {
    pub fn set(&self, language: &str, project: &str, revisions: Vec<FetchedRevision>) {
        self.revisions
            .lock()
            .unwrap()
            .insert(format!("{}.{}", language, project), Ok(revisions));
    }

    pub fn fail(&self, language: &str, project: &str, error: AdapterError) {
        self.revisions
            .lock()
            .unwrap()
            .insert(format!("{}.{}", language, project), Err(error));
    }

    pub fn markers(&self) -> Vec<RevisionMarker> {
        self.calls.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }
}

#[async_trait]
impl RevisionSource for ScriptedRevisionSource {
    async fn fetch_revisions(
        &self,
        wiki: &WikiModel,
        since: RevisionMarker,
    ) -> Result<Vec<FetchedRevision>, AdapterError> {
        let key = wiki_key(wiki);
        self.calls.lock().unwrap().push((key.clone(), since));

        match self.revisions.lock().unwrap().get(&key) {
            Some(Ok(revisions)) => Ok(revisions
                .iter()
                .filter(|r| since.revision_id.is_none_or(|id| r.revision_id > id))
                .cloned()
                .collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }
}

/// Upload source answering from a per-wiki script.
#[derive(Default)]
pub struct ScriptedUploadSource {
    uploads: Mutex<HashMap<String, Result<Vec<FetchedUpload>, AdapterError>>>,
    pub calls: Mutex<Vec<(String, Option<NaiveDateTime>)>>,
}

impl ScriptedUploadSource {
    pub fn set(&self, language: &str, project: &str, uploads: Vec<FetchedUpload>) {
        self.uploads
            .lock()
            .unwrap()
            .insert(format!("{}.{}", language, project), Ok(uploads));
    }

    pub fn fail(&self, language: &str, project: &str, error: AdapterError) {
        self.uploads
            .lock()
            .unwrap()
            .insert(format!("{}.{}", language, project), Err(error));
    }
}

#[async_trait]
impl UploadSource for ScriptedUploadSource {
    async fn fetch_uploads(
        &self,
        wiki: &WikiModel,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<FetchedUpload>, AdapterError> {
        let key = wiki_key(wiki);
        self.calls.lock().unwrap().push((key.clone(), since));

        match self.uploads.lock().unwrap().get(&key) {
            Some(Ok(uploads)) => Ok(uploads
                .iter()
                .filter(|u| since.is_none_or(|ts| u.timestamp > ts))
                .cloned()
                .collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }
}

/// Status annotator recording the article IDs of each call.
#[derive(Default)]
pub struct RecordingAnnotator {
    pub calls: Mutex<Vec<Vec<i64>>>,
}

impl RecordingAnnotator {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StatusAnnotator for RecordingAnnotator {
    async fn annotate(&self, article_ids: &[i64]) -> Result<(), AdapterError> {
        self.calls.lock().unwrap().push(article_ids.to_vec());
        Ok(())
    }
}

/// Error tracker recording captured exceptions and messages.
#[derive(Default)]
pub struct RecordingErrorTracker {
    pub exceptions: Mutex<Vec<(String, ErrorTags)>>,
    pub messages: Mutex<Vec<(String, ErrorTags)>>,
}

impl RecordingErrorTracker {
    pub fn exception_kinds(&self) -> Vec<String> {
        self.exceptions
            .lock()
            .unwrap()
            .iter()
            .map(|(kind, _)| kind.clone())
            .collect()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl ErrorTracker for RecordingErrorTracker {
    fn capture_exception(&self, error: &Error, tags: &ErrorTags) {
        self.exceptions
            .lock()
            .unwrap()
            .push((error.kind().to_string(), tags.clone()));
    }

    fn capture_message(&self, message: &str, tags: &ErrorTags) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), tags.clone()));
    }
}

/// Feature lookup with a fixed answer.
pub struct StaticFeatures(pub bool);

impl FeatureLookup for StaticFeatures {
    fn product_supports(&self, _feature: Feature, _course: &CourseModel) -> bool {
        self.0
    }
}
