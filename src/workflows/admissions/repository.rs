use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, ChildProfile, DocumentType, DocumentUpload,
};
use super::lifecycle::TimelineEvent;

/// Repository record: the immutable profile snapshot plus the mutable
/// application state (schools, uploads, status, timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub profile: ChildProfile,
    pub school_ids: Vec<String>,
    pub documents: Vec<DocumentUpload>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn document_of_type(&self, kind: DocumentType) -> Option<&DocumentUpload> {
        self.documents
            .iter()
            .find(|upload| upload.document_type == kind)
    }

    /// Replace-on-reupload: any previous upload of the same type is dropped
    /// before the new one is appended.
    pub(crate) fn put_document(&mut self, upload: DocumentUpload) {
        self.documents
            .retain(|existing| existing.document_type != upload.document_type);
        self.documents.push(upload);
    }

    pub(crate) fn remove_document(&mut self, kind: DocumentType) -> bool {
        let before = self.documents.len();
        self.documents
            .retain(|existing| existing.document_type != kind);
        self.documents.len() != before
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
/// Durability is owned by the surrounding application.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Mutex-guarded map matching the engine's in-memory contract. The service
/// binary and the test suites both lean on it.
#[derive(Default, Clone)]
pub struct MemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Sanitized representation of an application's exposed progress.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub narration: String,
    pub timeline: Vec<TimelineEvent>,
    pub documents: Vec<DocumentSummaryView>,
}

/// Per-upload slice of the status view.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummaryView {
    pub document_type: DocumentType,
    pub label: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch_details: Option<String>,
}

impl DocumentSummaryView {
    pub fn from_upload(upload: &DocumentUpload) -> Self {
        Self {
            document_type: upload.document_type,
            label: upload.document_type.label(),
            status: upload.status.label(),
            mismatch_details: upload.mismatch_details.clone(),
        }
    }
}
