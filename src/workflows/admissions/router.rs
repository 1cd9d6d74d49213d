use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus, ChildProfile, DocumentType};
use super::matching::{MatchFactor, SchoolMatch};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{AdmissionService, AdmissionServiceError};

/// Router builder exposing the admission engine over HTTP.
pub fn admissions_router<R>(service: Arc<AdmissionService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/admissions/matches", post(match_handler::<R>))
        .route(
            "/api/v1/admissions/documents/checklist",
            get(checklist_handler::<R>),
        )
        .route("/api/v1/admissions/applications", post(open_handler::<R>))
        .route(
            "/api/v1/admissions/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/status",
            put(set_status_handler::<R>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/documents",
            post(upload_handler::<R>),
        )
        .route(
            "/api/v1/admissions/applications/:application_id/documents/:document_type",
            delete(remove_document_handler::<R>),
        )
        .with_state(service)
}

/// Ranked match enriched with the school's display name for the UI.
#[derive(Debug, Serialize)]
struct MatchView {
    school_id: String,
    school_name: String,
    score: u8,
    chance: &'static str,
    factors: Vec<MatchFactor>,
}

#[derive(Debug, Deserialize)]
struct OpenApplicationRequest {
    profile: ChildProfile,
    #[serde(default)]
    school_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UploadDocumentRequest {
    document_type: DocumentType,
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: ApplicationStatus,
}

pub(crate) async fn match_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    axum::Json(profile): axum::Json<ChildProfile>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let matches = service.match_schools(&profile).await;
    let views: Vec<MatchView> = matches
        .into_iter()
        .map(|entry| {
            let SchoolMatch {
                school_id,
                score,
                chance,
                factors,
            } = entry;
            let school_name = service
                .catalog()
                .by_id(&school_id)
                .map(|school| school.name.clone())
                .unwrap_or_default();
            MatchView {
                school_id,
                school_name,
                score,
                chance: chance.label(),
                factors,
            }
        })
        .collect();

    (StatusCode::OK, axum::Json(views)).into_response()
}

pub(crate) async fn checklist_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.required_documents())).into_response()
}

pub(crate) async fn open_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    axum::Json(request): axum::Json<OpenApplicationRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service
        .open_application(request.profile, request.school_ids)
        .await
    {
        Ok(record) => {
            let payload = json!({
                "application_id": record.id.0,
                "status": record.status.label(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.status_view(&id, Local::now().date_naive()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_status_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<SetStatusRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.set_status(&id, request.status) {
        Ok(record) => {
            let payload = json!({
                "application_id": record.id.0,
                "status": record.status.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upload_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<UploadDocumentRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service
        .upload_document(&id, request.document_type, request.file_name)
        .await
    {
        Ok(upload) => (StatusCode::OK, axum::Json(upload)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_document_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    Path((application_id, document_type)): Path<(String, String)>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let Some(kind) = DocumentType::from_slug(&document_type) else {
        let payload = json!({
            "error": format!("unknown document type: {document_type}"),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    let id = ApplicationId(application_id);
    match service.remove_document(&id, kind) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AdmissionServiceError) -> Response {
    let status = match &error {
        AdmissionServiceError::UnknownSchool(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdmissionServiceError::DocumentMissing(_) => StatusCode::NOT_FOUND,
        AdmissionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AdmissionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AdmissionServiceError::Repository(RepositoryError::Unavailable(_))
        | AdmissionServiceError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
