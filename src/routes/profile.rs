//! # 프로필 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/profile` → 내 프로필 (없으면 404)
//! - `PUT /api/v1/profile` → 내 프로필 저장 (전체 덮어쓰기)
//!
//! 저장 시에는 값의 형식만 검사합니다. 필수 항목이 비어 있어도 저장은 되고,
//! 플랜 생성 시점에 `ProfileIncomplete`로 알려줍니다.

use axum::{extract::State, Json};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::workout_plans::AppState,
};

pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    // Option → Result: 프로필이 없으면 404
    let record = db::get_profile(&state.pool, &auth.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    // `From<ProfileRecord> for ProfileResponse` 구현으로 `.into()` 변환
    Ok(Json(record.into()))
}

pub async fn upsert_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    // `Json` 추출자는 본문을 소비하므로 항상 마지막 인자여야 합니다
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if let Some(experience) = &req.training_experience {
        experience.parse::<TrainingExperience>().map_err(AppError::BadRequest)?;
    }
    if let Some(activity) = &req.activity_level {
        activity.parse::<ActivityLevel>().map_err(AppError::BadRequest)?;
    }
    if req.days_per_week.is_some_and(|days| !DAYS_PER_WEEK_RANGE.contains(&days)) {
        return Err(AppError::BadRequest("days_per_week must be between 1 and 7".to_string()));
    }
    if req
        .minutes_per_session
        .is_some_and(|minutes| !MINUTES_PER_SESSION_RANGE.contains(&minutes))
    {
        return Err(AppError::BadRequest(
            "minutes_per_session must be between 1 and 240".to_string(),
        ));
    }
    if let Some(scores) = &req.assessment_scores {
        let out_of_range = [
            scores.push_level,
            scores.pull_level,
            scores.squat_level,
            scores.hinge_level,
            scores.core_level,
        ]
        .into_iter()
        .flatten()
        .any(|score| !(1..=10).contains(&score));
        if out_of_range {
            return Err(AppError::BadRequest(
                "assessment scores must be between 1 and 10".to_string(),
            ));
        }
    }

    let record = db::upsert_profile(&state.pool, &auth.user_id, &req).await?;
    tracing::debug!(user_id = %auth.user_id, "Profile saved");
    Ok(Json(record.into()))
}
