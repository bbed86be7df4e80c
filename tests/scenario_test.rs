//! Walkthrough of the main integrity rules against one database.

use taskboard::ApiError;
use taskboard::entities::TaskStatus;
use taskboard::operations::{employees, projects, tasks};

mod common;
use common::{date, employee_form, project_form, setup_test_db, task_form};

#[tokio::test]
async fn test_staffing_walkthrough() {
    let db = setup_test_db().await.expect("Failed to setup test database");

    let ann = employees::create(&db, &employee_form("Ann", "Smith", "ann@x.co"))
        .await
        .unwrap();
    assert_eq!(ann, 1);

    let err = employees::create(&db, &employee_form("bob", "Lee", "ann@x.co"))
        .await
        .unwrap_err();
    let ApiError::Validation { errors } = err else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("firstName"));
    assert!(errors.has_field("email"));
    assert_eq!(employees::list(&db).await.unwrap().len(), 1);

    let err = projects::create(&db, &project_form("Apollo", ann, date(4, 1), date(4, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));

    let project = projects::create(&db, &project_form("Apollo", ann, date(4, 1), date(5, 1)))
        .await
        .unwrap();
    assert!(projects::is_member(&db, project, ann).await.unwrap());

    projects::delete_employee(&db, project, ann).await.unwrap();
    assert!(projects::is_member(&db, project, ann).await.unwrap());

    let err = tasks::create(
        &db,
        &task_form("Launch", project, ann, 99, TaskStatus::ToDo, 1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation { ref errors } if errors.has_field("executorId")));
    assert!(tasks::list(&db, &Default::default()).await.unwrap().tasks.is_empty());
}
