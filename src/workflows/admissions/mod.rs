//! Admission matching, document verification, and application lifecycle
//! tracking for the school discovery marketplace.

pub mod documents;
pub mod domain;
pub mod lifecycle;
pub(crate) mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use documents::{
    required_documents, validate, DocumentExtractor, DocumentRequirement, ExtractionError,
    MockExtractor, ValidationReport,
};
pub use domain::{
    AcademicLevel, ApplicationId, ApplicationStatus, BudgetRange, ChildProfile, DocumentStatus,
    DocumentType, DocumentUpload, ExtractedDocData,
};
pub use lifecycle::{
    MilestoneState, MilestoneTemplate, StatusNarrator, TimelineBlueprint, TimelineEvent,
};
pub use matching::{
    ChanceBucket, FactorVerdict, MatchDimension, MatchFactor, MatchingConfig, MatchingEngine,
    SchoolMatch,
};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, DocumentSummaryView,
    MemoryApplicationRepository, RepositoryError,
};
pub use router::admissions_router;
pub use service::{AdmissionService, AdmissionServiceError};
