//! Repository-level tests for the generic CRUD flow.
//!
//! Runs against the in-memory store so the existence checks, scoping and
//! id handling can be exercised without a database.

use assert_matches::assert_matches;
use buildtrack_core::error::CoreError;
use buildtrack_db::models::employee::Employee;
use buildtrack_db::models::project::{Project, ProjectDto};
use buildtrack_db::models::resource::Resource;
use buildtrack_db::models::resource_usage::ResourceUsage;
use buildtrack_db::models::task::{Task, TaskDto};
use buildtrack_db::repositories::{CrudRepo, RepoError};
use buildtrack_db::store::Store;
use chrono::NaiveDate;
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn new_project(name: &str) -> Project {
    Project {
        id: 0,
        name: name.to_string(),
        budget: Decimal::new(100, 0),
        start_date: date(1),
        end_date: None,
        status: "Planned".to_string(),
    }
}

fn new_task(project_id: i64, name: &str) -> Task {
    Task {
        id: 0,
        project_id,
        name: name.to_string(),
        description: Some("site work".to_string()),
        status: "Open".to_string(),
        start_date: date(2),
        end_date: None,
    }
}

fn new_resource(name: &str) -> Resource {
    Resource {
        id: 0,
        name: name.to_string(),
        description: None,
        quantity: 50,
        unit_cost: Decimal::new(1999, 2),
    }
}

fn new_usage(resource_id: i64) -> ResourceUsage {
    ResourceUsage {
        id: 0,
        task_id: 0,
        resource_id,
        quantity_used: 5,
        usage_date: date(3),
    }
}

// ---------------------------------------------------------------------------
// Flat entities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_find_returns_same_fields() {
    let store = Store::memory();
    let input = new_project("Dam");

    let created = CrudRepo::<Project>::create(&store, None, input.clone())
        .await
        .unwrap();
    assert!(created.id > 0);

    let found = CrudRepo::<Project>::find_by_id(&store, None, created.id)
        .await
        .unwrap();
    assert_eq!(found, Project { id: created.id, ..input });
}

#[tokio::test]
async fn find_missing_is_not_found() {
    let store = Store::memory();
    let err = CrudRepo::<Project>::find_by_id(&store, None, 404)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Project", id: 404 })
    );
}

#[tokio::test]
async fn replace_with_mismatched_id_leaves_row_untouched() {
    let store = Store::memory();
    let created = CrudRepo::<Project>::create(&store, None, new_project("Keep"))
        .await
        .unwrap();

    let mut dto = ProjectDto::from(created.clone());
    dto.id = created.id + 1;
    dto.name = "Changed".to_string();

    let err = CrudRepo::<Project>::replace(&store, None, created.id, dto)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));

    let found = CrudRepo::<Project>::find_by_id(&store, None, created.id)
        .await
        .unwrap();
    assert_eq!(found.name, "Keep");
}

#[tokio::test]
async fn replace_overwrites_all_fields() {
    let store = Store::memory();
    let created = CrudRepo::<Project>::create(&store, None, new_project("Old"))
        .await
        .unwrap();

    let dto = ProjectDto {
        id: created.id,
        name: "New".to_string(),
        budget: Decimal::new(250, 0),
        start_date: date(5),
        end_date: Some(date(20)),
        status: "Active".to_string(),
    };
    CrudRepo::<Project>::replace(&store, None, created.id, dto.clone())
        .await
        .unwrap();

    let found = CrudRepo::<Project>::find_by_id(&store, None, created.id)
        .await
        .unwrap();
    assert_eq!(ProjectDto::from(found), dto);
}

#[tokio::test]
async fn delete_then_find_is_not_found() {
    let store = Store::memory();
    let created = CrudRepo::<Project>::create(&store, None, new_project("Gone"))
        .await
        .unwrap();

    CrudRepo::<Project>::delete(&store, None, created.id)
        .await
        .unwrap();

    let err = CrudRepo::<Project>::find_by_id(&store, None, created.id)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { .. }));

    let err = CrudRepo::<Project>::delete(&store, None, created.id)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { .. }));
}

#[tokio::test]
async fn employee_with_missing_project_is_rejected() {
    let store = Store::memory();
    let employee = Employee {
        id: 0,
        first_name: "Sam".to_string(),
        last_name: "Mason".to_string(),
        role: "Bricklayer".to_string(),
        project_id: 77,
    };

    let err = CrudRepo::<Employee>::create(&store, None, employee)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Project", id: 77 })
    );
    assert!(CrudRepo::<Employee>::list(&store, None).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Nested entities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_under_missing_project_is_not_persisted() {
    let store = Store::memory();

    let err = CrudRepo::<Task>::create(&store, Some(9), new_task(9, "Orphan"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Project", id: 9 })
    );
    assert!(CrudRepo::<Task>::list(&store, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn route_parent_overrides_body_parent() {
    let store = Store::memory();
    let project = CrudRepo::<Project>::create(&store, None, new_project("P"))
        .await
        .unwrap();

    let task = CrudRepo::<Task>::create(&store, Some(project.id), new_task(0, "Survey"))
        .await
        .unwrap();
    assert_eq!(task.project_id, project.id);
}

#[tokio::test]
async fn list_is_scoped_to_parent() {
    let store = Store::memory();
    let a = CrudRepo::<Project>::create(&store, None, new_project("A"))
        .await
        .unwrap();
    let b = CrudRepo::<Project>::create(&store, None, new_project("B"))
        .await
        .unwrap();
    CrudRepo::<Task>::create(&store, Some(a.id), new_task(a.id, "A1"))
        .await
        .unwrap();
    CrudRepo::<Task>::create(&store, Some(b.id), new_task(b.id, "B1"))
        .await
        .unwrap();

    let tasks = CrudRepo::<Task>::list(&store, Some(a.id)).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "A1");

    let err = CrudRepo::<Task>::list(&store, Some(999)).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "Project", .. }));
}

#[tokio::test]
async fn child_under_other_parent_is_not_found() {
    let store = Store::memory();
    let a = CrudRepo::<Project>::create(&store, None, new_project("A"))
        .await
        .unwrap();
    let b = CrudRepo::<Project>::create(&store, None, new_project("B"))
        .await
        .unwrap();
    let task = CrudRepo::<Task>::create(&store, Some(a.id), new_task(a.id, "A1"))
        .await
        .unwrap();

    let err = CrudRepo::<Task>::find_by_id(&store, Some(b.id), task.id)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "Task", .. }));

    let err = CrudRepo::<Task>::delete(&store, Some(b.id), task.id)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "Task", .. }));
    assert!(CrudRepo::<Task>::find_by_id(&store, Some(a.id), task.id).await.is_ok());
}

#[tokio::test]
async fn replace_task_keeps_route_parent() {
    let store = Store::memory();
    let project = CrudRepo::<Project>::create(&store, None, new_project("P"))
        .await
        .unwrap();
    let task = CrudRepo::<Task>::create(&store, Some(project.id), new_task(project.id, "T"))
        .await
        .unwrap();

    let mut dto = TaskDto::from(task.clone());
    dto.project_id = 0;
    dto.status = "Done".to_string();

    let updated = CrudRepo::<Task>::replace(&store, Some(project.id), task.id, dto)
        .await
        .unwrap();
    assert_eq!(updated.project_id, project.id);
    assert_eq!(updated.status, "Done");
}

#[tokio::test]
async fn usage_under_missing_task_is_not_found_even_with_valid_resource() {
    let store = Store::memory();
    let resource = CrudRepo::<Resource>::create(&store, None, new_resource("Steel"))
        .await
        .unwrap();

    let err = CrudRepo::<ResourceUsage>::create(&store, Some(31), new_usage(resource.id))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Task", id: 31 })
    );
}

#[tokio::test]
async fn usage_with_missing_resource_is_not_found() {
    let store = Store::memory();
    let project = CrudRepo::<Project>::create(&store, None, new_project("P"))
        .await
        .unwrap();
    let task = CrudRepo::<Task>::create(&store, Some(project.id), new_task(project.id, "T"))
        .await
        .unwrap();

    let err = CrudRepo::<ResourceUsage>::create(&store, Some(task.id), new_usage(555))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Resource", id: 555 })
    );
}

// ---------------------------------------------------------------------------
// References checked at write time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn write_after_parent_vanished_is_not_found() {
    let store = Store::memory();
    let project = CrudRepo::<Project>::create(&store, None, new_project("Short-lived"))
        .await
        .unwrap();
    let employee = Employee {
        id: 0,
        first_name: "Ada".to_string(),
        last_name: "Byron".to_string(),
        role: "Engineer".to_string(),
        project_id: project.id,
    };
    CrudRepo::<Project>::delete(&store, None, project.id)
        .await
        .unwrap();

    // The write itself rejects the reference, not just the earlier check.
    let err: RepoError = store.insert(&employee).await.unwrap_err().into();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Project", id }) if id == project.id
    );
    assert!(CrudRepo::<Employee>::list(&store, None).await.unwrap().is_empty());
}
