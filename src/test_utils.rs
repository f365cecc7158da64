//! 테스트 공용 도구
//!
//! - 인메모리 DB 준비 (마이그레이션 + 운동 카탈로그 시드 포함)
//! - 프로필, 운동 기록, 즐겨찾기 시드 함수

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

/// 마이그레이션을 모두 실행한 인메모리 SQLite 풀
///
/// `max_connections(1)`: 커넥션마다 별도의 인메모리 DB가 생기므로 하나만 씁니다.
pub async fn setup_test_db() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

/// 시드할 프로필. `Default`는 모든 필수 항목이 채워진 초보자 프로필입니다.
#[derive(Debug, Clone)]
pub struct ProfileSeed {
    pub experience: Option<&'static str>,
    pub activity_level: Option<&'static str>,
    pub goals: Option<&'static str>,
    pub days_per_week: Option<i64>,
    pub minutes_per_session: Option<i64>,
    pub pull_up_bar: bool,
    pub rings: bool,
    pub weighted_vest: bool,
    pub injuries: &'static str,
    pub assessment_scores: Option<&'static str>,
}

impl Default for ProfileSeed {
    fn default() -> Self {
        Self {
            experience: Some("beginner"),
            activity_level: Some("moderately_active"),
            goals: Some(r#"["strength","skill"]"#),
            days_per_week: Some(3),
            minutes_per_session: Some(45),
            pull_up_bar: false,
            rings: false,
            weighted_vest: false,
            injuries: "[]",
            assessment_scores: Some(
                r#"{"pushLevel":5,"pullLevel":5,"squatLevel":5,"hingeLevel":5,"coreLevel":5}"#,
            ),
        }
    }
}

pub async fn seed_profile(pool: &SqlitePool, user_id: &str, seed: &ProfileSeed) {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (
            user_id, training_experience, activity_level, goals, days_per_week,
            minutes_per_session, has_pull_up_bar, has_rings, has_weighted_vest,
            injuries, assessment_scores
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(seed.experience)
    .bind(seed.activity_level)
    .bind(seed.goals)
    .bind(seed.days_per_week)
    .bind(seed.minutes_per_session)
    .bind(seed.pull_up_bar)
    .bind(seed.rings)
    .bind(seed.weighted_vest)
    .bind(seed.injuries)
    .bind(seed.assessment_scores)
    .execute(pool)
    .await
    .expect("Failed to seed profile");
}

/// `days_ago`일 전에 완료한 운동 기록을 추가합니다.
pub async fn seed_workout_log(pool: &SqlitePool, user_id: &str, exercise_id: &str, days_ago: i64, status: &str) {
    let completed_at = (Utc::now() - Duration::days(days_ago))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();

    sqlx::query(
        "INSERT INTO workout_logs (id, user_id, exercise_id, status, completed_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(uuid::Uuid::now_v7().to_string())
    .bind(user_id)
    .bind(exercise_id)
    .bind(status)
    .bind(completed_at)
    .execute(pool)
    .await
    .expect("Failed to seed workout log");
}

pub async fn seed_favorite(pool: &SqlitePool, user_id: &str, exercise_id: &str) {
    sqlx::query("INSERT INTO favorite_exercises (user_id, exercise_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(exercise_id)
        .execute(pool)
        .await
        .expect("Failed to seed favorite");
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
