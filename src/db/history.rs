//! # 운동 이력 조회
//!
//! 운동 기록(`workout_logs`)과 즐겨찾기(`favorite_exercises`)는 다른 서비스가 씁니다.
//! 여기서는 운동 선택의 다양성 판단에 필요한 ID 목록만 읽습니다.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::error::AppError;

/// 최근 `days`일 동안 완료한 운동의 ID (중복 제거)
pub async fn recent_exercise_ids(
    pool: &SqlitePool,
    user_id: &str,
    days: i64,
) -> Result<HashSet<String>, AppError> {
    // completed_at은 "2026-02-16T12:00:00.000Z" 형식이라 문자열 비교가 시간 비교와 같습니다
    let since = (Utc::now() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();

    // `query_scalar`는 첫 번째 컬럼 하나만 꺼내 `String`으로 변환합니다
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT exercise_id
        FROM workout_logs
        WHERE user_id = ? AND status = 'completed' AND completed_at >= ?
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(ids.into_iter().collect())
}

/// 사용자가 즐겨찾기한 운동 ID
pub async fn favorite_exercise_ids(pool: &SqlitePool, user_id: &str) -> Result<HashSet<String>, AppError> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT exercise_id FROM favorite_exercises WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ids.into_iter().collect())
}
