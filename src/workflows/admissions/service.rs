use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::documents::{
    required_documents, validate, DocumentExtractor, DocumentRequirement, ExtractionError,
};
use super::domain::{
    ApplicationId, ApplicationStatus, ChildProfile, DocumentStatus, DocumentType, DocumentUpload,
};
use super::lifecycle::{StatusNarrator, TimelineBlueprint};
use super::matching::{MatchingConfig, MatchingEngine, SchoolMatch};
use super::repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, DocumentSummaryView,
    RepositoryError,
};
use crate::workflows::catalog::SchoolCatalog;

/// Service composing the catalog, matching rubric, document pipeline, and
/// lifecycle renderer behind one facade.
pub struct AdmissionService<R> {
    catalog: Arc<SchoolCatalog>,
    repository: Arc<R>,
    extractor: Arc<dyn DocumentExtractor>,
    engine: MatchingEngine,
    blueprint: TimelineBlueprint,
    narrator: StatusNarrator,
    /// Cooperative pause simulating match computation and save latency.
    pacing: Duration,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("adm-{id:06}"))
}

fn next_document_id() -> String {
    let id = DOCUMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("doc-{id:06}")
}

impl<R> AdmissionService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(
        catalog: Arc<SchoolCatalog>,
        repository: Arc<R>,
        extractor: Arc<dyn DocumentExtractor>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            catalog,
            repository,
            extractor,
            engine: MatchingEngine::new(config),
            blueprint: TimelineBlueprint::standard(),
            narrator: StatusNarrator::standard(),
            pacing: Duration::ZERO,
        }
    }

    /// Add a cooperative pause to match and save calls, standing in for a
    /// real backend round-trip.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn catalog(&self) -> &SchoolCatalog {
        &self.catalog
    }

    /// Rank every catalog school against the profile.
    pub async fn match_schools(&self, profile: &ChildProfile) -> Vec<SchoolMatch> {
        self.pace().await;
        self.engine.match_all(profile, &self.catalog)
    }

    /// Open a draft application for a profile and its selected schools.
    pub async fn open_application(
        &self,
        profile: ChildProfile,
        school_ids: Vec<String>,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        for school_id in &school_ids {
            if self.catalog.by_id(school_id).is_none() {
                return Err(AdmissionServiceError::UnknownSchool(school_id.clone()));
            }
        }

        self.pace().await;

        let now = Utc::now();
        let record = ApplicationRecord {
            id: next_application_id(),
            profile,
            school_ids,
            documents: Vec::new(),
            status: ApplicationStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Extract and validate one upload against the application's profile.
    /// A re-upload of the same document type replaces the earlier one.
    pub async fn upload_document(
        &self,
        application_id: &ApplicationId,
        document_type: DocumentType,
        file_name: String,
    ) -> Result<DocumentUpload, AdmissionServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let extracted = self
            .extractor
            .extract(document_type, &record.profile)
            .await?;
        let report = validate(&extracted, &record.profile);

        let upload = DocumentUpload {
            id: next_document_id(),
            document_type,
            file_name,
            uploaded_at: Utc::now(),
            status: if report.is_valid {
                DocumentStatus::Verified
            } else {
                DocumentStatus::Mismatch
            },
            extracted: Some(extracted),
            mismatch_details: report.mismatch_details,
        };

        record.put_document(upload.clone());
        if record.status == ApplicationStatus::Draft {
            record.status = ApplicationStatus::DocumentsPending;
        }
        record.updated_at = Utc::now();
        self.repository.update(record)?;

        Ok(upload)
    }

    /// Drop an upload so the family can start over with that document.
    pub fn remove_document(
        &self,
        application_id: &ApplicationId,
        document_type: DocumentType,
    ) -> Result<(), AdmissionServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        if !record.remove_document(document_type) {
            return Err(AdmissionServiceError::DocumentMissing(document_type));
        }

        record.updated_at = Utc::now();
        self.repository.update(record)?;
        Ok(())
    }

    /// Record an externally driven status transition as-is.
    pub fn set_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = status;
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, AdmissionServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Render the application's progress: status label, timeline, narration,
    /// and per-document verification summaries.
    pub fn status_view(
        &self,
        application_id: &ApplicationId,
        today: chrono::NaiveDate,
    ) -> Result<ApplicationStatusView, AdmissionServiceError> {
        let record = self.get(application_id)?;

        let school_name = record
            .school_ids
            .first()
            .and_then(|id| self.catalog.by_id(id))
            .map(|school| school.name.as_str());

        Ok(ApplicationStatusView {
            application_id: record.id.clone(),
            status: record.status.label(),
            narration: self.narrator.narrate(record.status, school_name),
            timeline: self.blueprint.timeline_for(record.status, today),
            documents: record
                .documents
                .iter()
                .map(DocumentSummaryView::from_upload)
                .collect(),
        })
    }

    /// The static upload checklist rendered during intake.
    pub fn required_documents(&self) -> Vec<DocumentRequirement> {
        required_documents()
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }
}

/// Error raised by the admission service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error("unknown school id: {0}")]
    UnknownSchool(String),
    #[error("no {} upload on file", .0.label())]
    DocumentMissing(DocumentType),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
