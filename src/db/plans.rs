//! # 운동 플랜 데이터베이스 쿼리 모듈
//!
//! 플랜/세션/세션 운동의 생성과 조회를 담당합니다.
//!
//! ## 쓰기 함수는 커넥션을 받습니다
//! `create_*` 함수들은 `&SqlitePool` 대신 `&mut SqliteConnection`을 받습니다.
//! 플랜 생성기는 트랜잭션(`pool.begin()`)을 열고 `&mut *tx`를 넘겨서
//! 12주치 세션과 운동이 한꺼번에 커밋되거나, 하나도 남지 않게 합니다.
//!
//! ```text
//! let mut tx = pool.begin().await?;
//! let plan = create_plan(&mut tx, &new_plan).await?;
//! let session = create_session(&mut tx, &plan.id, &new_session).await?;
//! create_session_exercise(&mut tx, &session.id, &new_exercise).await?;
//! tx.commit().await?;
//! ```

use crate::error::AppError;
use crate::models::*;
use sqlx::types::Json; // Vec/serde_json::Value를 JSON 텍스트 컬럼으로 바인딩
use sqlx::{SqliteConnection, SqlitePool};

const PLAN_COLUMNS: &str = "id, user_id, name, explanation, start_date, end_date, duration_weeks, \
     frequency, split_type, mesocycles, deload_weeks, status, created_at";

const SESSION_COLUMNS: &str = "id, plan_id, week_number, day_of_week, session_number, \
     scheduled_date, name, warm_up, cool_down, is_deload, status";

/// 새 플랜을 `active` 상태로 만듭니다.
///
/// 같은 사용자의 활성 플랜이 이미 있으면 부분 UNIQUE 인덱스 위반이 나고,
/// 이를 `AppError::Conflict`로 바꿔 돌려줍니다. 확인과 생성이 INSERT 하나로 이루어지므로
/// 같은 사용자의 동시 요청이 둘 다 성공하는 일은 없습니다.
pub async fn create_plan(
    conn: &mut SqliteConnection,
    plan: &NewWorkoutPlan,
) -> Result<WorkoutPlan, AppError> {
    // UUIDv7은 타임스탬프 기반이라 생성 순서대로 정렬됩니다
    let id = uuid::Uuid::now_v7().to_string();

    // `RETURNING`으로 INSERT 직후의 행을 바로 돌려받습니다 (기본값 컬럼 포함)
    let sql = format!(
        r#"
        INSERT INTO workout_plans (
            id, user_id, name, explanation, start_date, end_date, duration_weeks,
            frequency, split_type, mesocycles, deload_weeks, status
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'active')
        RETURNING {}
        "#,
        PLAN_COLUMNS
    );

    sqlx::query_as::<_, WorkoutPlan>(&sql)
        .bind(&id)
        .bind(&plan.user_id)
        .bind(&plan.name)
        .bind(&plan.explanation)
        .bind(&plan.start_date)
        .bind(&plan.end_date)
        .bind(i64::from(plan.duration_weeks))
        .bind(i64::from(plan.frequency))
        .bind(plan.split_type.as_str())
        .bind(Json(&plan.mesocycles))
        .bind(Json(&plan.deload_weeks))
        // `&mut *conn`: 가변 참조를 재대여(reborrow)해서 넘깁니다
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "User already has an active workout plan"))
}

/// 플랜에 세션 하나를 `scheduled` 상태로 추가합니다.
pub async fn create_session(
    conn: &mut SqliteConnection,
    plan_id: &str,
    session: &NewWorkoutSession,
) -> Result<WorkoutSession, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let sql = format!(
        r#"
        INSERT INTO workout_sessions (
            id, plan_id, week_number, day_of_week, session_number, scheduled_date,
            name, warm_up, cool_down, is_deload, status
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'scheduled')
        RETURNING {}
        "#,
        SESSION_COLUMNS
    );

    let created = sqlx::query_as::<_, WorkoutSession>(&sql)
        .bind(&id)
        .bind(plan_id)
        .bind(i64::from(session.week_number))
        .bind(i64::from(session.day_of_week))
        .bind(i64::from(session.session_number))
        .bind(&session.scheduled_date)
        .bind(&session.name)
        .bind(Json(&session.warm_up))
        .bind(Json(&session.cool_down))
        .bind(session.is_deload)
        .fetch_one(&mut *conn)
        .await?;

    Ok(created)
}

pub async fn create_session_exercise(
    conn: &mut SqliteConnection,
    session_id: &str,
    exercise: &NewSessionExercise,
) -> Result<WorkoutSessionExercise, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let created = sqlx::query_as::<_, WorkoutSessionExercise>(
        r#"
        INSERT INTO workout_session_exercises (
            id, session_id, exercise_id, order_index, sets, reps, rest_seconds, notes
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, session_id, exercise_id, order_index, sets, reps, rest_seconds, notes
        "#,
    )
    .bind(&id)
    .bind(session_id)
    .bind(&exercise.exercise_id)
    .bind(i64::from(exercise.order_index))
    .bind(i64::from(exercise.sets))
    .bind(&exercise.reps)
    .bind(i64::from(exercise.rest_seconds))
    .bind(&exercise.notes)
    .fetch_one(&mut *conn)
    .await?;

    Ok(created)
}

/// ID로 플랜을 조회합니다. 소유자 확인은 호출하는 쪽에서 합니다.
///
/// `fetch_optional`은 0행이면 `None`을 돌려주므로 404 처리를 호출자가 정할 수 있습니다.
pub async fn get_plan(pool: &SqlitePool, id: &str) -> Result<Option<WorkoutPlan>, AppError> {
    let sql = format!("SELECT {} FROM workout_plans WHERE id = ?", PLAN_COLUMNS);
    let plan = sqlx::query_as::<_, WorkoutPlan>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(plan)
}

/// 사용자의 활성 플랜. 부분 UNIQUE 인덱스로 사용자당 최대 1개입니다.
pub async fn find_active_plan(pool: &SqlitePool, user_id: &str) -> Result<Option<WorkoutPlan>, AppError> {
    let sql = format!(
        "SELECT {} FROM workout_plans WHERE user_id = ? AND status = 'active'",
        PLAN_COLUMNS
    );
    let plan = sqlx::query_as::<_, WorkoutPlan>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(plan)
}

/// 플랜의 세션을 주차, 주 내 순서대로 조회합니다.
pub async fn list_sessions(pool: &SqlitePool, plan_id: &str) -> Result<Vec<WorkoutSession>, AppError> {
    let sql = format!(
        "SELECT {} FROM workout_sessions WHERE plan_id = ? ORDER BY week_number, session_number",
        SESSION_COLUMNS
    );
    let sessions = sqlx::query_as::<_, WorkoutSession>(&sql)
        .bind(plan_id)
        .fetch_all(pool)
        .await?;

    Ok(sessions)
}

/// 플랜에 속한 모든 세션 운동 (세션별로 묶기 쉽도록 session_id, order_index 순)
pub async fn list_plan_exercises(
    pool: &SqlitePool,
    plan_id: &str,
) -> Result<Vec<WorkoutSessionExercise>, AppError> {
    let exercises = sqlx::query_as::<_, WorkoutSessionExercise>(
        r#"
        SELECT e.id, e.session_id, e.exercise_id, e.order_index, e.sets, e.reps,
               e.rest_seconds, e.notes
        FROM workout_session_exercises e
        JOIN workout_sessions s ON s.id = e.session_id
        WHERE s.plan_id = ?
        ORDER BY e.session_id, e.order_index
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}
