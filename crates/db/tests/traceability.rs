//! Integration tests for the traceability log:
//! - Planning records and the one-per-(project, activity) constraint
//! - Append-only estimation / design / execution records
//! - Cascade behaviour when a project or its creator is removed

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use planner_db::models::catalog::CatalogKind;
use planner_db::models::project::CreateProjectData;
use planner_db::models::traceability::{
    ActivityKind, CreateDesignCp, CreateEstimation, CreateExecution, CreatePlanning,
};
use planner_db::models::user::CreateUserData;
use planner_db::repositories::{
    CatalogRepo, DesignCpRepo, EstimationRepo, ExecutionRepo, PlanningRepo, ProjectRepo, UserRepo,
};
use planner_db::unique_violation_constraint;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a user and a project owned by them, returning (user_id, project_id).
async fn setup_project(pool: &PgPool) -> (uuid::Uuid, uuid::Uuid) {
    let user = UserRepo::create(
        pool,
        &CreateUserData {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            role: "Tester".into(),
            position: "QA Analyst".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$testsalt$testhash".into(),
        },
    )
    .await
    .unwrap();

    let first = |entries: Vec<planner_db::models::catalog::CatalogItem>| entries[0].id;
    let process_id = first(CatalogRepo::list(pool, CatalogKind::Process).await.unwrap());
    let line_id = first(CatalogRepo::list(pool, CatalogKind::Line).await.unwrap());
    let type_id = first(CatalogRepo::list(pool, CatalogKind::Type).await.unwrap());

    let project = ProjectRepo::create(
        pool,
        &CreateProjectData {
            name: "Traceable".into(),
            process_id,
            line_id,
            type_id,
            client_id: None,
            task_link: "https://tracker.example.com/tasks/7".into(),
            developer: "Jane Doe".into(),
            creator_id: user.id,
        },
    )
    .await
    .unwrap();

    (user.id, project.id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_planning_one_record_per_activity(pool: PgPool) {
    let (_, project_id) = setup_project(&pool).await;

    let record = PlanningRepo::create(
        &pool,
        project_id,
        &CreatePlanning {
            activity_kind: ActivityKind::Estimation,
            date: date(2026, 3, 2),
        },
    )
    .await
    .unwrap();
    assert_eq!(record.project_id, project_id);
    assert_eq!(record.activity_kind, ActivityKind::Estimation);

    assert!(PlanningRepo::exists(&pool, project_id, ActivityKind::Estimation)
        .await
        .unwrap());
    assert!(!PlanningRepo::exists(&pool, project_id, ActivityKind::Execution)
        .await
        .unwrap());

    // A second estimation date for the same project is rejected by the store.
    let err = PlanningRepo::create(
        &pool,
        project_id,
        &CreatePlanning {
            activity_kind: ActivityKind::Estimation,
            date: date(2026, 3, 9),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        unique_violation_constraint(&err).as_deref(),
        Some("uq_planning_records_project_activity")
    );

    // A different activity kind is fine.
    PlanningRepo::create(
        &pool,
        project_id,
        &CreatePlanning {
            activity_kind: ActivityKind::Finished,
            date: date(2026, 4, 1),
        },
    )
    .await
    .unwrap();

    let records = PlanningRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_estimation_records_append(pool: PgPool) {
    let (user_id, project_id) = setup_project(&pool).await;

    let record = EstimationRepo::create(
        &pool,
        project_id,
        &CreateEstimation {
            recorded_on: date(2026, 3, 2),
            design_cp_hours: Decimal::new(450, 2),   // 4.50
            execution_hours: Decimal::new(1225, 2),  // 12.25
            story_delivery_date: date(2026, 3, 20),
        },
        user_id,
    )
    .await
    .unwrap();

    assert_eq!(record.design_cp_hours, Decimal::new(450, 2));
    assert_eq!(record.recorded_by, user_id);

    // Append-only: a second record for the same project just accumulates.
    EstimationRepo::create(
        &pool,
        project_id,
        &CreateEstimation {
            recorded_on: date(2026, 3, 9),
            design_cp_hours: Decimal::new(600, 2),
            execution_hours: Decimal::new(800, 2),
            story_delivery_date: date(2026, 3, 27),
        },
        user_id,
    )
    .await
    .unwrap();

    let records = EstimationRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].recorded_on, date(2026, 3, 2)); // oldest first
}

#[sqlx::test(migrations = "./migrations")]
async fn test_design_and_execution_records(pool: PgPool) {
    let (user_id, project_id) = setup_project(&pool).await;

    let design = DesignCpRepo::create(
        &pool,
        project_id,
        &CreateDesignCp {
            recorded_on: date(2026, 3, 5),
            actual_hours: Decimal::new(375, 2),
            start_date: date(2026, 3, 3),
            end_date: date(2026, 3, 5),
        },
        user_id,
    )
    .await
    .unwrap();
    assert_eq!(design.actual_hours, Decimal::new(375, 2));

    let execution = ExecutionRepo::create(
        &pool,
        project_id,
        &CreateExecution {
            recorded_on: date(2026, 3, 12),
            iteration: 1,
            actual_hours: Decimal::new(1600, 2),
            start_date: date(2026, 3, 9),
            end_date: date(2026, 3, 12),
        },
        user_id,
    )
    .await
    .unwrap();
    assert_eq!(execution.iteration, 1);

    assert_eq!(
        DesignCpRepo::list_by_project(&pool, project_id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        ExecutionRepo::list_by_project(&pool, project_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_execution_iteration_out_of_range_rejected_by_schema(pool: PgPool) {
    let (user_id, project_id) = setup_project(&pool).await;

    let result = ExecutionRepo::create(
        &pool,
        project_id,
        &CreateExecution {
            recorded_on: date(2026, 3, 12),
            iteration: 4,
            actual_hours: Decimal::new(100, 2),
            start_date: date(2026, 3, 9),
            end_date: date(2026, 3, 12),
        },
        user_id,
    )
    .await;
    assert!(result.is_err()); // CHECK (iteration BETWEEN 1 AND 3)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_project_cascades_to_records(pool: PgPool) {
    let (user_id, project_id) = setup_project(&pool).await;

    PlanningRepo::create(
        &pool,
        project_id,
        &CreatePlanning {
            activity_kind: ActivityKind::Execution,
            date: date(2026, 3, 9),
        },
    )
    .await
    .unwrap();
    EstimationRepo::create(
        &pool,
        project_id,
        &CreateEstimation {
            recorded_on: date(2026, 3, 2),
            design_cp_hours: Decimal::new(100, 2),
            execution_hours: Decimal::new(200, 2),
            story_delivery_date: date(2026, 3, 20),
        },
        user_id,
    )
    .await
    .unwrap();

    assert!(ProjectRepo::delete(&pool, project_id).await.unwrap());

    assert!(PlanningRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
    assert!(EstimationRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_creator_cascades_to_project(pool: PgPool) {
    let (user_id, project_id) = setup_project(&pool).await;

    PlanningRepo::create(
        &pool,
        project_id,
        &CreatePlanning {
            activity_kind: ActivityKind::Estimation,
            date: date(2026, 3, 2),
        },
    )
    .await
    .unwrap();

    assert!(UserRepo::delete(&pool, user_id).await.unwrap());

    // The project and its records go with the creator.
    assert!(ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .is_none());
    assert!(PlanningRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
}
