//! Job application records: form validation, storage, the record service, and HTTP routes.
//!
//! Handlers never talk to storage directly. Every request goes through
//! [`ApplicationService`], which validates submitted forms before handing a typed
//! [`ApplicationDraft`] to an [`ApplicationRepository`] backend.

pub mod domain;
pub mod flash;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod sqlite;
pub mod validation;
pub(crate) mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    status_filter_options, ApplicationDraft, ApplicationForm, ApplicationId, ApplicationRecord,
    ApplicationStatus, StatusCounts, UnknownStatus, STATUS_FILTER_ALL,
};
pub use flash::{FlashKind, FlashMessage};
pub use memory::InMemoryApplicationRepository;
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{ApplicationListing, ApplicationService, ApplicationServiceError};
pub use sqlite::SqliteApplicationRepository;
pub use validation::ValidationError;
