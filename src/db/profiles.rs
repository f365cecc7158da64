//! # 사용자 프로필 데이터베이스 쿼리 모듈
//!
//! `user_profiles` 테이블은 사용자당 한 행입니다 (`user_id`가 기본 키).
//! 목표, 부상, 평가 점수는 JSON 텍스트 컬럼에 저장합니다.

use crate::error::AppError;
use crate::models::profile::{ProfileRecord, UpsertProfileRequest};
use sqlx::types::Json; // Vec/구조체를 JSON 텍스트로 바인딩하는 래퍼
use sqlx::SqlitePool;

/// 사용자 ID로 프로필을 조회합니다.
///
/// `fetch_optional`은 결과가 0행이면 `None`, 1행이면 `Some(ProfileRecord)`입니다.
/// 프로필이 아직 없는 사용자가 흔하므로 `fetch_one` 대신 이것을 씁니다.
pub async fn get_profile(pool: &SqlitePool, user_id: &str) -> Result<Option<ProfileRecord>, AppError> {
    let profile = sqlx::query_as::<_, ProfileRecord>(
        r#"
        SELECT user_id, training_experience, activity_level, goals, days_per_week,
               minutes_per_session, has_pull_up_bar, has_dip_bars, has_resistance_bands,
               has_rings, has_parallettes, has_weighted_vest, injuries, assessment_scores,
               created_at, updated_at
        FROM user_profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// 프로필을 저장합니다. 이미 있으면 전체를 덮어씁니다.
///
/// `ON CONFLICT(user_id) DO UPDATE`는 SQLite의 upsert 구문입니다.
/// `excluded.컬럼`은 "방금 삽입하려던 값"을 가리킵니다.
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: &str,
    req: &UpsertProfileRequest,
) -> Result<ProfileRecord, AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (
            user_id, training_experience, activity_level, goals, days_per_week,
            minutes_per_session, has_pull_up_bar, has_dip_bars, has_resistance_bands,
            has_rings, has_parallettes, has_weighted_vest, injuries, assessment_scores
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            training_experience = excluded.training_experience,
            activity_level = excluded.activity_level,
            goals = excluded.goals,
            days_per_week = excluded.days_per_week,
            minutes_per_session = excluded.minutes_per_session,
            has_pull_up_bar = excluded.has_pull_up_bar,
            has_dip_bars = excluded.has_dip_bars,
            has_resistance_bands = excluded.has_resistance_bands,
            has_rings = excluded.has_rings,
            has_parallettes = excluded.has_parallettes,
            has_weighted_vest = excluded.has_weighted_vest,
            injuries = excluded.injuries,
            assessment_scores = excluded.assessment_scores,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(user_id)
    .bind(&req.training_experience)
    .bind(&req.activity_level)
    // Option<Json<..>>: None이면 NULL, Some이면 JSON 문자열로 저장
    .bind(req.goals.as_ref().map(Json))
    .bind(req.days_per_week)
    .bind(req.minutes_per_session)
    .bind(req.equipment.pull_up_bar)
    .bind(req.equipment.dip_bars)
    .bind(req.equipment.resistance_bands)
    .bind(req.equipment.rings)
    .bind(req.equipment.parallettes)
    .bind(req.equipment.weighted_vest)
    .bind(Json(&req.injuries))
    .bind(req.assessment_scores.as_ref().map(Json))
    // 결과 행이 필요 없는 쿼리는 `execute`로 실행합니다
    .execute(pool)
    .await?;

    // 저장된 값(기본값, 타임스탬프 포함)을 다시 읽어 돌려줍니다
    get_profile(pool, user_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve saved profile".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{AssessmentInput, EquipmentFlags};
    use crate::test_utils::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_upsert_then_validate() {
        let pool = setup_test_db().await;
        assert!(get_profile(&pool, "user-1").await.unwrap().is_none());

        let mut req = UpsertProfileRequest {
            training_experience: Some("intermediate".to_string()),
            activity_level: Some("very_active".to_string()),
            goals: Some(vec!["muscle".to_string()]),
            days_per_week: Some(4),
            minutes_per_session: Some(50),
            equipment: EquipmentFlags { pull_up_bar: true, ..EquipmentFlags::default() },
            injuries: vec!["Wrist".to_string()],
            assessment_scores: Some(AssessmentInput {
                push_level: Some(6),
                pull_level: Some(4),
                squat_level: Some(5),
                hinge_level: Some(5),
                core_level: Some(7),
            }),
        };
        upsert_profile(&pool, "user-1", &req).await.unwrap();

        let profile = get_profile(&pool, "user-1").await.unwrap().unwrap().validate().unwrap();
        assert_eq!(profile.days_per_week, 4);
        assert!(profile.equipment.contains("pull_up_bar"));
        assert!(profile.injuries.contains("wrist"));
        assert_eq!(profile.scores.core_level, 7);

        // 두 번째 저장은 덮어쓰기
        req.days_per_week = None;
        let record = upsert_profile(&pool, "user-1", &req).await.unwrap();
        assert!(record.days_per_week.is_none());
        assert!(matches!(record.validate(), Err(AppError::ProfileIncomplete(_))));

        teardown_test_db(pool).await;
    }
}
