use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::workflows::admissions::domain::{
    AcademicLevel, ChildProfile, DocumentType, ExtractedDocData,
};

/// Failure kinds a real extraction backend can surface. The shipped mock
/// never produces them, matching the original stub contract.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("document could not be read: {0}")]
    Unreadable(String),
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction backend timed out after {0:?}")]
    Timeout(Duration),
}

/// Capability seam for turning an uploaded document into canonical fields.
/// Implementations may call out to a real OCR backend; the engine only sees
/// this contract.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        document_type: DocumentType,
        hints: &ChildProfile,
    ) -> Result<ExtractedDocData, ExtractionError>;
}

/// Simulated extractor: deterministic given (document type, profile hints),
/// with a cooperative sleep standing in for processing latency. Hints fill
/// the canonical fields because there is no real document to read.
pub struct MockExtractor {
    latency: Duration,
}

impl MockExtractor {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    fn simulated_grades(level: AcademicLevel) -> BTreeMap<String, String> {
        let grade = match level {
            AcademicLevel::Excellent => "A+",
            AcademicLevel::AboveAverage => "A",
            AcademicLevel::Average => "B+",
            AcademicLevel::BelowAverage => "B",
        };

        ["English", "Mathematics", "Environmental Studies"]
            .into_iter()
            .map(|subject| (subject.to_string(), grade.to_string()))
            .collect()
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(
        &self,
        document_type: DocumentType,
        hints: &ChildProfile,
    ) -> Result<ExtractedDocData, ExtractionError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut data = ExtractedDocData::default();
        match document_type {
            DocumentType::Photo => {}
            DocumentType::ParentId => {
                data.address = Some(hints.location.clone());
            }
            DocumentType::BirthCertificate => {
                data.child_name = Some(hints.name.clone());
                data.date_of_birth =
                    Some(hints.date_of_birth_or_derived(Utc::now().date_naive()));
                data.address = Some(hints.location.clone());
            }
            DocumentType::TransferCertificate => {
                data.child_name = Some(hints.name.clone());
                data.previous_school = Some("Little Steps Preschool".to_string());
            }
            DocumentType::Marksheet => {
                data.child_name = Some(hints.name.clone());
                data.grades = Some(Self::simulated_grades(hints.academic_level));
            }
            DocumentType::AddressProof => {
                data.address = Some(hints.location.clone());
            }
        }

        Ok(data)
    }
}
