use std::sync::Arc;

use async_trait::async_trait;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;

use crate::applications::domain::{
    ApplicationDraft, ApplicationForm, ApplicationId, ApplicationRecord, StatusCounts,
};
use crate::applications::flash::FLASH_COOKIE;
use crate::applications::repository::{ApplicationRepository, RepositoryError};
use crate::applications::{application_router, ApplicationService, InMemoryApplicationRepository};

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        company_name: "Globex".to_string(),
        role: "Platform Engineer".to_string(),
        application_date: "2024-05-01".to_string(),
        status: "Applied".to_string(),
        notes: "Applied through the careers page".to_string(),
    }
}

pub(super) fn form_for(company: &str, date: &str, status: &str) -> ApplicationForm {
    ApplicationForm {
        company_name: company.to_string(),
        application_date: date.to_string(),
        status: status.to_string(),
        ..form()
    }
}

pub(super) fn build_service() -> (
    ApplicationService<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::new());
    (ApplicationService::new(repository.clone()), repository)
}

pub(super) async fn seeded_service() -> (
    ApplicationService<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let (service, repository) = build_service();
    for form in [
        form_for("Acme", "2024-04-10", "Applied"),
        form_for("Hooli", "2024-04-20", "Interview"),
        form_for("Initech", "2024-03-02", "Rejected"),
    ] {
        service.create(form).await.expect("seed record");
    }
    (service, repository)
}

pub(super) fn router_for(service: ApplicationService<InMemoryApplicationRepository>) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) fn form_body(form: &ApplicationForm) -> String {
    [
        ("company_name", &form.company_name),
        ("role", &form.role),
        ("application_date", &form.application_date),
        ("status", &form.status),
        ("notes", &form.notes),
    ]
    .iter()
    .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&")
}

pub(super) fn post_form(uri: &str, body: String) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(
            axum::http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(axum::body::Body::from(body))
        .expect("request builds")
}

pub(super) fn get(uri: &str) -> Request<axum::body::Body> {
    Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

pub(super) fn get_with_cookie(uri: &str, cookie: &str) -> Request<axum::body::Body> {
    Request::get(uri)
        .header(COOKIE, cookie)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

pub(super) fn location(response: &Response) -> &str {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect has a location")
}

/// The `name=value` pair of the flash cookie set by a redirect.
pub(super) fn flash_cookie_pair(response: &Response) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(FLASH_COOKIE))
        .and_then(|value| value.split(';').next())
        .expect("flash cookie set")
        .to_string()
}

pub(super) fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) struct UnavailableRepository;

#[async_trait]
impl ApplicationRepository for UnavailableRepository {
    async fn insert(&self, _draft: ApplicationDraft) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update(
        &self,
        _id: ApplicationId,
        _draft: ApplicationDraft,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch(&self, _id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn delete(&self, _id: ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list_by_date_desc(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn count_by_status(&self) -> Result<StatusCounts, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
