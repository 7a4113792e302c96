use super::common::*;
use crate::applications::domain::{ApplicationId, ApplicationStatus};
use crate::applications::repository::RepositoryError;
use crate::applications::validation::ValidationError;
use crate::applications::{ApplicationService, ApplicationServiceError};
use std::sync::Arc;

#[tokio::test]
async fn create_with_blank_field_leaves_store_untouched() {
    let (service, repository) = build_service();
    let mut form = form();
    form.role = "  ".to_string();

    match service.create(form).await {
        Err(ApplicationServiceError::Validation(ValidationError::MissingFields(fields))) => {
            assert_eq!(fields, vec!["Role"]);
        }
        other => panic!("expected missing field error, got {other:?}"),
    }
    assert!(repository.is_empty().expect("store readable"));
}

#[tokio::test]
async fn create_assigns_ids_and_lists_newest_date_first() {
    let (service, _) = seeded_service().await;
    let created = service
        .create(form_for("Umbrella", "2024-05-30", "Offer"))
        .await
        .expect("valid form persists");

    let listing = service.list().await.expect("list");
    assert_eq!(listing.applications.len(), 4);
    assert_eq!(listing.applications[0], created);
    assert_eq!(created.id, ApplicationId(4));
    assert_eq!(
        listing.status_options,
        vec!["All", "Applied", "Interview", "Rejected", "Offer"]
    );
}

#[tokio::test]
async fn edit_changes_only_the_target_record() {
    let (service, repository) = seeded_service().await;
    let before = service.list().await.expect("list").applications;

    let mut form = form_for("Acme Corp", "2024-04-11", "Interview");
    form.notes = "Phone screen booked".to_string();
    let updated = service
        .edit(ApplicationId(1), form)
        .await
        .expect("edit succeeds");

    assert_eq!(updated.id, ApplicationId(1));
    assert_eq!(updated.status, ApplicationStatus::Interview);
    assert_eq!(repository.len().expect("store readable"), 3);

    let after = service.list().await.expect("list").applications;
    for record in &after {
        if record.id == ApplicationId(1) {
            assert_eq!(record.company_name, "Acme Corp");
            assert_eq!(record.notes, "Phone screen booked");
        } else {
            assert!(before.contains(record), "{record:?} changed unexpectedly");
        }
    }
}

#[tokio::test]
async fn edit_reports_not_found_before_validation() {
    let (service, repository) = seeded_service().await;

    let err = service
        .edit(ApplicationId(99), form_for("", "not a date", "Ghosted"))
        .await
        .expect_err("unknown id");

    assert!(err.is_not_found());
    assert_eq!(repository.len().expect("store readable"), 3);
}

#[tokio::test]
async fn edit_with_invalid_status_keeps_stored_record() {
    let (service, _) = seeded_service().await;
    let original = service.get(ApplicationId(2)).await.expect("record exists");

    let err = service
        .edit(ApplicationId(2), form_for("Hooli", "2024-04-20", "Hired"))
        .await
        .expect_err("invalid status");

    assert!(matches!(
        err,
        ApplicationServiceError::Validation(ValidationError::InvalidStatus)
    ));
    assert_eq!(service.get(ApplicationId(2)).await.expect("still there"), original);
}

#[tokio::test]
async fn delete_removes_once_then_reports_not_found() {
    let (service, repository) = seeded_service().await;

    service.delete(ApplicationId(3)).await.expect("first delete");
    assert_eq!(repository.len().expect("store readable"), 2);

    let err = service
        .delete(ApplicationId(3))
        .await
        .expect_err("already gone");
    assert!(err.is_not_found());
    assert_eq!(repository.len().expect("store readable"), 2);
}

#[tokio::test]
async fn stats_total_matches_bucket_sum() {
    let (service, _) = seeded_service().await;
    service
        .create(form_for("Wonka", "2024-01-15", "Applied"))
        .await
        .expect("create");

    let counts = service.stats().await.expect("stats");
    assert_eq!(counts.applied, 2);
    assert_eq!(counts.interview, 1);
    assert_eq!(counts.rejected, 1);
    assert_eq!(counts.offer, 0);
    assert_eq!(
        counts.total(),
        counts.applied + counts.interview + counts.rejected + counts.offer
    );
    assert_eq!(counts.total(), 4);
}

#[tokio::test]
async fn repository_failures_propagate() {
    let service = ApplicationService::new(Arc::new(UnavailableRepository));

    match service.create(form()).await {
        Err(ApplicationServiceError::Repository(RepositoryError::Unavailable(detail))) => {
            assert_eq!(detail, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
    assert!(!service.stats().await.expect_err("offline").is_not_found());
}
