use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::workflows::admissions::documents::{DocumentExtractor, ExtractionError, MockExtractor};
use crate::workflows::admissions::domain::{
    AcademicLevel, ApplicationId, BudgetRange, ChildProfile, DocumentType, ExtractedDocData,
};
use crate::workflows::admissions::matching::{MatchingConfig, MatchingEngine};
use crate::workflows::admissions::repository::{
    ApplicationRecord, ApplicationRepository, MemoryApplicationRepository, RepositoryError,
};
use crate::workflows::admissions::router::admissions_router;
use crate::workflows::admissions::service::AdmissionService;
use crate::workflows::catalog::{SchoolCatalog, SchoolRecord};

/// The nursery-intake profile used across the matching scenarios.
pub(super) fn profile() -> ChildProfile {
    ChildProfile {
        name: "Aarav Sharma".to_string(),
        age_years: 4.0,
        date_of_birth: NaiveDate::from_ymd_opt(2022, 6, 10),
        target_class: "Nursery".to_string(),
        preferred_board: "CBSE".to_string(),
        location: "Indiranagar, Bengaluru".to_string(),
        max_distance_km: 10.0,
        budget: BudgetRange {
            min: 0,
            max: 200_000,
        },
        academic_level: AcademicLevel::Average,
    }
}

pub(super) fn school(id: &str) -> SchoolRecord {
    SchoolRecord {
        id: id.to_string(),
        name: format!("School {id}"),
        board: "CBSE".to_string(),
        distance_km: 2.0,
        annual_fee: 180_000,
        is_popular: false,
        rating: 4.5,
        total_seats: 100,
        seats_available: 20,
    }
}

pub(super) fn catalog() -> SchoolCatalog {
    let mut near = school("sch-near");
    near.rating = 4.6;

    let mut far = school("sch-far");
    far.distance_km = 12.0;
    far.rating = 4.0;

    let mut costly = school("sch-costly");
    costly.annual_fee = 500_000;
    costly.rating = 4.1;

    SchoolCatalog::new(vec![near, far, costly])
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::standard()
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(matching_config())
}

pub(super) fn build_service() -> (
    AdmissionService<MemoryApplicationRepository>,
    Arc<MemoryApplicationRepository>,
) {
    let repository = Arc::new(MemoryApplicationRepository::default());
    let service = AdmissionService::new(
        Arc::new(catalog()),
        repository.clone(),
        Arc::new(MockExtractor::instant()),
        matching_config(),
    );
    (service, repository)
}

pub(super) fn build_service_with_extractor(
    extractor: Arc<dyn DocumentExtractor>,
) -> AdmissionService<MemoryApplicationRepository> {
    AdmissionService::new(
        Arc::new(catalog()),
        Arc::new(MemoryApplicationRepository::default()),
        extractor,
        matching_config(),
    )
}

pub(super) fn admissions_router_with_service(
    service: AdmissionService<MemoryApplicationRepository>,
) -> axum::Router {
    admissions_router(Arc::new(service))
}

/// Extractor that reads a different child entirely, for mismatch scenarios.
pub(super) struct SkewedExtractor;

#[async_trait]
impl DocumentExtractor for SkewedExtractor {
    async fn extract(
        &self,
        _document_type: DocumentType,
        _hints: &ChildProfile,
    ) -> Result<ExtractedDocData, ExtractionError> {
        Ok(ExtractedDocData {
            child_name: Some("Ved Kulkarni".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 1, 1),
            address: Some("Baner, Pune".to_string()),
            previous_school: None,
            grades: None,
        })
    }
}

/// Repository stub for outage scenarios.
pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}
