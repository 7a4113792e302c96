//! Server-rendered HTML pages backed by askama templates under `templates/`.
//!
//! Templates with an `.html` extension escape every interpolated value.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use super::domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, ApplicationStatus, StatusCounts,
};
use super::flash::FlashMessage;
use super::service::ApplicationListing;

/// Template wrapper that converts askama templates into HTML responses.
pub(crate) struct HtmlTemplate<T>(pub(crate) T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!(error = %err, "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) flash: Option<FlashMessage>,
}

/// One entry of the status dropdown on the add and edit forms.
pub(crate) struct StatusChoice {
    label: &'static str,
    selected: bool,
}

/// Add and edit share one form; an edit posts back to its record.
#[derive(Template)]
#[template(path = "application_form.html")]
pub(crate) struct ApplicationFormTemplate {
    title: &'static str,
    record_id: Option<ApplicationId>,
    submit_label: &'static str,
    form: ApplicationForm,
    status_choices: Vec<StatusChoice>,
    flash: Option<FlashMessage>,
}

impl ApplicationFormTemplate {
    pub(crate) fn add(flash: Option<FlashMessage>) -> Self {
        Self::new(
            "Add Application",
            None,
            "Add Application",
            ApplicationForm::default(),
            flash,
        )
    }

    pub(crate) fn edit(record: &ApplicationRecord, flash: Option<FlashMessage>) -> Self {
        Self::new(
            "Edit Application",
            Some(record.id),
            "Save Changes",
            record.to_form(),
            flash,
        )
    }

    fn new(
        title: &'static str,
        record_id: Option<ApplicationId>,
        submit_label: &'static str,
        form: ApplicationForm,
        flash: Option<FlashMessage>,
    ) -> Self {
        let status_choices = ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusChoice {
                label: status.label(),
                selected: status.label() == form.status,
            })
            .collect();

        Self {
            title,
            record_id,
            submit_label,
            form,
            status_choices,
            flash,
        }
    }
}

#[derive(Template)]
#[template(path = "applications.html")]
pub(crate) struct ApplicationsTemplate<'a> {
    listing: &'a ApplicationListing,
    flash: Option<FlashMessage>,
}

impl<'a> ApplicationsTemplate<'a> {
    pub(crate) fn new(listing: &'a ApplicationListing, flash: Option<FlashMessage>) -> Self {
        Self { listing, flash }
    }
}

pub(crate) struct StatRow {
    label: &'static str,
    key: String,
    count: u64,
}

#[derive(Template)]
#[template(path = "stats.html")]
pub(crate) struct StatsTemplate {
    total: u64,
    rows: Vec<StatRow>,
    flash: Option<FlashMessage>,
}

impl StatsTemplate {
    pub(crate) fn new(counts: &StatusCounts, flash: Option<FlashMessage>) -> Self {
        let rows = ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatRow {
                label: status.label(),
                key: status.label().to_ascii_lowercase(),
                count: counts.get(status),
            })
            .collect();

        Self {
            total: counts.total(),
            rows,
            flash,
        }
    }
}

#[derive(Template, Default)]
#[template(path = "not_found.html")]
pub(crate) struct NotFoundTemplate {
    flash: Option<FlashMessage>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorTemplate {
    message: String,
    flash: Option<FlashMessage>,
}

impl ErrorTemplate {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            flash: None,
        }
    }
}
