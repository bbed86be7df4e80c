use sea_orm::EntityTrait;
use taskboard::ApiError;
use taskboard::entities::{TaskStatus, project, task};
use taskboard::operations::{projects, tasks};

mod common;
use common::{
    date, project_form, seed_employee, seed_project, seed_task, setup_test_db, task_form,
};

async fn member_ids(db: &sea_orm::DatabaseConnection, project_id: i32) -> Vec<i32> {
    let mut ids: Vec<i32> = projects::member_ids(db, project_id)
        .await
        .unwrap()
        .into_iter()
        .collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn test_create_adds_leader_as_member() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;

    let id = projects::create(&db, &project_form("Apollo", ann, date(1, 1), date(2, 1)))
        .await
        .unwrap();

    let stored = projects::get(&db, id).await.unwrap();
    assert_eq!(stored.leader_id, ann);
    assert_eq!(member_ids(&db, id).await, vec![ann]);
}

#[tokio::test]
async fn test_inverted_or_equal_dates_are_rejected() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;

    for (start, end) in [(date(3, 1), date(3, 1)), (date(3, 2), date(3, 1))] {
        let err = projects::create(&db, &project_form("Apollo", ann, start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref errors } if errors.has_field("endDate")));
    }
    assert!(project::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_leader_is_a_field_error() {
    let db = setup_test_db().await.expect("Failed to setup test database");

    let err = projects::create(&db, &project_form("Apollo", 99, date(1, 1), date(2, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation { ref errors } if errors.has_field("leaderId")));
    assert!(project::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_employees_has_set_semantics() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let bob = seed_employee(&db, "Bob", "Lee", "bob@x.co").await;
    let cid = seed_employee(&db, "Cid", "Moss", "cid@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;

    projects::add_employees(&db, project, Some(&[bob, ann, bob, 404][..]))
        .await
        .unwrap();
    assert_eq!(member_ids(&db, project).await, vec![ann, bob]);

    projects::add_employees(&db, project, Some(&[][..])).await.unwrap();
    assert_eq!(member_ids(&db, project).await, vec![ann, bob]);

    projects::add_employees(&db, project, Some(&[cid][..])).await.unwrap();
    assert_eq!(member_ids(&db, project).await, vec![ann, bob, cid]);
}

#[tokio::test]
async fn test_add_employees_errors() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;

    let err = projects::add_employees(&db, project, None).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest { .. }));

    let err = projects::add_employees(&db, 77, Some(&[ann][..]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_employee_keeps_leader() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let bob = seed_employee(&db, "Bob", "Lee", "bob@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;
    projects::add_employees(&db, project, Some(&[bob][..])).await.unwrap();

    projects::delete_employee(&db, project, ann).await.unwrap();
    assert_eq!(member_ids(&db, project).await, vec![ann, bob]);

    projects::delete_employee(&db, project, bob).await.unwrap();
    assert_eq!(member_ids(&db, project).await, vec![ann]);

    let err = projects::delete_employee(&db, 77, bob).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_edit_swaps_leader_membership() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let bob = seed_employee(&db, "Bob", "Lee", "bob@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;

    let mut form = project_form("Apollo Two", bob, date(1, 1), date(9, 1));
    form.priority = 5;
    projects::update(&db, project, &form).await.unwrap();

    let stored = projects::get(&db, project).await.unwrap();
    assert_eq!(stored.name, "Apollo Two");
    assert_eq!(stored.priority, 5);
    assert_eq!(stored.leader_id, bob);
    assert_eq!(member_ids(&db, project).await, vec![bob]);
}

#[tokio::test]
async fn test_edit_validation_leaves_project_untouched() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;

    let err = projects::update(&db, project, &project_form("", 99, date(5, 1), date(4, 1)))
        .await
        .unwrap_err();
    let ApiError::Validation { errors } = err else {
        panic!("expected validation error");
    };
    assert!(errors.has_field("name"));
    assert!(errors.has_field("endDate"));
    assert!(errors.has_field("leaderId"));

    let stored = projects::get(&db, project).await.unwrap();
    assert_eq!(stored.name, "Apollo");
    assert_eq!(stored.row_version, 0);
    assert_eq!(member_ids(&db, project).await, vec![ann]);

    let err = projects::update(&db, 99, &project_form("X", ann, date(1, 1), date(2, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_details_lists_members_and_candidates() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let bob = seed_employee(&db, "Bob", "Lee", "bob@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;

    let page = projects::details(&db, project).await.unwrap();
    assert_eq!(page.project.id, project);
    assert_eq!(page.members.iter().map(|e| e.id).collect::<Vec<_>>(), vec![ann]);
    assert_eq!(page.available.iter().map(|e| e.id).collect::<Vec<_>>(), vec![bob]);

    assert!(matches!(
        projects::details(&db, 9).await.unwrap_err(),
        ApiError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_delete_removes_tasks_and_is_idempotent() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let ann = seed_employee(&db, "Ann", "Smith", "ann@x.co").await;
    let project = seed_project(&db, "Apollo", ann).await;
    seed_task(&db, &task_form("Docs", project, ann, ann, TaskStatus::ToDo, 1)).await;

    projects::delete(&db, project).await.unwrap();
    projects::delete(&db, project).await.unwrap();

    assert!(project::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(task::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(projects::member_ids(&db, project).await.unwrap().is_empty());
    assert!(tasks::list(&db, &Default::default()).await.unwrap().tasks.is_empty());
}
