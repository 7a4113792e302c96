use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use super::domain::{ApplicationForm, ApplicationId};
use super::flash::{redirect_with_flash, take_flash, FlashMessage};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationService, ApplicationServiceError};
use super::views::{
    ApplicationFormTemplate, ApplicationsTemplate, ErrorTemplate, HtmlTemplate, IndexTemplate,
    NotFoundTemplate, StatsTemplate,
};

/// Router builder exposing the HTML pages and form endpoints.
pub fn application_router<R>(service: Arc<ApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/add", get(add_form_handler).post(create_handler::<R>))
        .route("/applications", get(list_handler::<R>))
        .route(
            "/edit/:id",
            get(edit_form_handler::<R>).post(update_handler::<R>),
        )
        .route("/delete/:id", post(delete_handler::<R>))
        .route("/stats", get(stats_handler::<R>))
        .with_state(service)
}

impl IntoResponse for ApplicationServiceError {
    fn into_response(self) -> Response {
        match self {
            ApplicationServiceError::Repository(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, HtmlTemplate(NotFoundTemplate::default())).into_response()
            }
            ApplicationServiceError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                HtmlTemplate(ErrorTemplate::new(err.to_string())),
            )
                .into_response(),
            ApplicationServiceError::Repository(err) => {
                error!(error = %err, "application request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HtmlTemplate(ErrorTemplate::new("The application store is unavailable.")),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) async fn index_handler(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    (jar, HtmlTemplate(IndexTemplate { flash })).into_response()
}

pub(crate) async fn add_form_handler(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    (jar, HtmlTemplate(ApplicationFormTemplate::add(flash))).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    jar: CookieJar,
    Form(form): Form<ApplicationForm>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.create(form).await {
        Ok(_) => redirect_with_flash(
            jar,
            "/applications",
            FlashMessage::success("Application added successfully!"),
        ),
        Err(ApplicationServiceError::Validation(err)) => {
            redirect_with_flash(jar, "/add", FlashMessage::danger(err.to_string()))
        }
        Err(other) => other.into_response(),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    jar: CookieJar,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.list().await {
        Ok(listing) => {
            let (jar, flash) = take_flash(jar);
            (jar, HtmlTemplate(ApplicationsTemplate::new(&listing, flash))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn edit_form_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.get(ApplicationId(id)).await {
        Ok(record) => {
            let (jar, flash) = take_flash(jar);
            (jar, HtmlTemplate(ApplicationFormTemplate::edit(&record, flash))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ApplicationForm>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.edit(ApplicationId(id), form).await {
        Ok(_) => redirect_with_flash(
            jar,
            "/applications",
            FlashMessage::success("Application updated successfully!"),
        ),
        Err(ApplicationServiceError::Validation(err)) => redirect_with_flash(
            jar,
            &format!("/edit/{id}"),
            FlashMessage::danger(err.to_string()),
        ),
        Err(other) => other.into_response(),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.delete(ApplicationId(id)).await {
        Ok(()) => redirect_with_flash(
            jar,
            "/applications",
            FlashMessage::info("Application deleted."),
        ),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    jar: CookieJar,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.stats().await {
        Ok(counts) => {
            let (jar, flash) = take_flash(jar);
            (jar, HtmlTemplate(StatsTemplate::new(&counts, flash))).into_response()
        }
        Err(err) => err.into_response(),
    }
}
