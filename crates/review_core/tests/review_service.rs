use review_core::db::open_db_in_memory;
use review_core::{
    RepoError, ReviewRepository, ReviewService, ReviewValidationError, SqliteEmployeeRepository,
    SqliteReviewRepository,
};

#[test]
fn service_wraps_repository_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let employees = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let ada = employees.create_employee("Ada", "Engineer").unwrap();
    let grace = employees.create_employee("Grace", "Admiral").unwrap();

    let repo = SqliteReviewRepository::try_new(&conn, employees).unwrap();
    let mut service = ReviewService::new(repo);
    service.ensure_schema().unwrap();
    service.ensure_schema().unwrap();

    let review = service.record_review(2024, "Solid year", ada.id).unwrap();
    let id = review.id().unwrap();

    let revised = service.revise_summary(id, "Outstanding year").unwrap();
    assert_eq!(revised.summary(), "Outstanding year");
    assert_eq!(
        service.get_review(id).unwrap().unwrap().summary(),
        "Outstanding year"
    );

    let moved = service.reassign(id, grace.id).unwrap();
    assert_eq!(moved.employee_id(), grace.id);
    assert!(service.reviews_for_employee(ada.id).unwrap().is_empty());
    assert_eq!(service.reviews_for_employee(grace.id).unwrap().len(), 1);

    service.retract(id).unwrap();
    assert!(service.get_review(id).unwrap().is_none());
    assert!(service.list_reviews().unwrap().is_empty());
    assert!(!service.repository().identity_index().contains(id));
}

#[test]
fn service_mutations_on_missing_review_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let employees = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let repo = SqliteReviewRepository::try_new(&conn, employees).unwrap();
    let mut service = ReviewService::new(repo);
    service.ensure_schema().unwrap();

    assert!(matches!(
        service.revise_summary(3, "text").unwrap_err(),
        RepoError::NotFound(3)
    ));
    assert!(matches!(
        service.reassign(3, 1).unwrap_err(),
        RepoError::NotFound(3)
    ));
    assert!(matches!(
        service.retract(3).unwrap_err(),
        RepoError::NotFound(3)
    ));
}

#[test]
fn service_rejects_invalid_revisions_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let employees = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let ada = employees.create_employee("Ada", "Engineer").unwrap();
    let repo = SqliteReviewRepository::try_new(&conn, employees).unwrap();
    let mut service = ReviewService::new(repo);
    service.ensure_schema().unwrap();

    let id = service
        .record_review(2023, "Steady", ada.id)
        .unwrap()
        .id()
        .unwrap();

    assert!(matches!(
        service.revise_summary(id, "  ").unwrap_err(),
        RepoError::Validation(ReviewValidationError::EmptySummary)
    ));
    assert!(matches!(
        service.reassign(id, 404).unwrap_err(),
        RepoError::Validation(ReviewValidationError::UnknownEmployee { employee_id: 404 })
    ));

    let stored = service.get_review(id).unwrap().unwrap();
    assert_eq!(stored.summary(), "Steady");
    assert_eq!(stored.employee_id(), ada.id);

    let repo = service.into_repository();
    assert_eq!(repo.identity_index().len(), 1);
}
