//! # 운동 플랜 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/workout-plans/generate` → 새 12주 플랜 생성 (201, 활성 플랜이 있으면 409)
//! - `GET  /api/v1/workout-plans/active`   → 내 활성 플랜 상세 (없으면 404)
//! - `GET  /api/v1/workout-plans/{id}`     → 플랜 상세 (내 플랜이 아니면 404)
//!
//! 플랜 상세는 세션 목록과 세션별 운동 목록을 함께 돌려줍니다.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::{self, RandomPicker},
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 액세스 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 최근 수행 운동으로 볼 기간 (일)
    pub recent_window_days: i64,
}

/// `POST /workout-plans/generate`
pub async fn generate_plan(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<GeneratedPlan>), AppError> {
    // 요청마다 엔트로피로 시드한 난수원을 새로 만듭니다
    let mut picker = RandomPicker::new();
    let generated = services::generate_workout_plan(
        &state.pool,
        &auth.user_id,
        state.recent_window_days,
        &mut picker,
    )
    .await?;

    // (상태 코드, 본문) 튜플도 IntoResponse를 구현합니다
    Ok((StatusCode::CREATED, Json(generated)))
}

/// `GET /workout-plans/active`
pub async fn get_active_plan(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PlanDetail>, AppError> {
    let plan = db::find_active_plan(&state.pool, &auth.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(plan_detail(&state.pool, plan).await?))
}

/// `GET /workout-plans/{id}`
///
/// 다른 사용자의 플랜도 404입니다.
pub async fn get_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlanDetail>, AppError> {
    // 남의 플랜은 존재 여부도 드러내지 않도록 None으로 걸러 404로 만듭니다
    let plan = db::get_plan(&state.pool, &id)
        .await?
        .filter(|plan| plan.user_id == auth.user_id)
        .ok_or(AppError::NotFound)?;
    Ok(Json(plan_detail(&state.pool, plan).await?))
}

async fn plan_detail(pool: &SqlitePool, plan: WorkoutPlan) -> Result<PlanDetail, AppError> {
    let sessions = db::list_sessions(pool, &plan.id).await?;

    // 쿼리 두 번으로 끝내고, 세션별 묶음은 메모리에서 만듭니다
    let mut by_session: HashMap<String, Vec<WorkoutSessionExercise>> = HashMap::new();
    for exercise in db::list_plan_exercises(pool, &plan.id).await? {
        by_session
            .entry(exercise.session_id.clone())
            .or_default()
            .push(exercise);
    }

    let sessions = sessions
        .into_iter()
        .map(|session| SessionDetail {
            exercises: by_session.remove(&session.id).unwrap_or_default(),
            session,
        })
        .collect();

    Ok(PlanDetail {
        workout_plan: plan,
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serial_test::serial;

    async fn state() -> AppState {
        AppState {
            pool: setup_test_db().await,
            jwt_secret: "test-secret".to_string(),
            recent_window_days: 14,
        }
    }

    fn user(id: &str) -> AuthUser {
        AuthUser { user_id: id.to_string() }
    }

    #[tokio::test]
    #[serial]
    async fn test_generate_then_fetch_active() {
        let state = state().await;
        seed_profile(&state.pool, "user-1", &ProfileSeed::default()).await;

        let (status, Json(generated)) = generate_plan(user("user-1"), State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(detail) = get_active_plan(user("user-1"), State(state.clone())).await.unwrap();
        assert_eq!(detail.workout_plan.id, generated.workout_plan.id);
        assert_eq!(detail.sessions.len(), generated.sessions_count);
        let total: usize = detail.sessions.iter().map(|s| s.exercises.len()).sum();
        assert_eq!(total, generated.exercises_count);
        for session in &detail.sessions {
            let order: Vec<i64> = session.exercises.iter().map(|e| e.order_index).collect();
            assert_eq!(order, (1..=session.exercises.len() as i64).collect::<Vec<_>>());
        }

        teardown_test_db(state.pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_plan_of_another_user_is_not_found() {
        let state = state().await;
        seed_profile(&state.pool, "owner", &ProfileSeed::default()).await;

        let (_, Json(generated)) = generate_plan(user("owner"), State(state.clone())).await.unwrap();
        let id = generated.workout_plan.id.clone();

        assert!(get_plan(user("owner"), State(state.clone()), Path(id.clone())).await.is_ok());
        let err = get_plan(user("intruder"), State(state.clone()), Path(id)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        teardown_test_db(state.pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_no_active_plan_is_not_found() {
        let state = state().await;
        let err = get_active_plan(user("user-1"), State(state.clone())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        teardown_test_db(state.pool).await;
    }
}
