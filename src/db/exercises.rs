//! # 운동 카탈로그 조회
//!
//! 카탈로그는 읽기 전용입니다. 플랜 생성기는 생성 시작 시
//! 주요(primary) 패턴 목록과 패턴별 공개 운동을 한 번씩 읽습니다.

use crate::error::AppError;
use crate::models::{Exercise, MovementPattern};
use sqlx::SqlitePool;

/// 주요 움직임 패턴 목록 (정렬 순서대로)
///
/// `sqlx::query_as::<_, MovementPattern>(sql)`은 결과 행을 `MovementPattern`으로
/// 자동 변환합니다. `_`는 DB 드라이버(SQLite)를 컴파일러가 추론하게 합니다.
/// 바인딩할 값이 없으므로 바로 `fetch_all`로 모든 행을 Vec으로 받습니다.
pub async fn list_primary_patterns(pool: &SqlitePool) -> Result<Vec<MovementPattern>, AppError> {
    let patterns = sqlx::query_as::<_, MovementPattern>(
        r#"
        SELECT id, name, display_name, category, sort_order
        FROM movement_patterns
        WHERE category = 'primary'
        ORDER BY sort_order, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(patterns)
}

/// 패턴에 속한 공개 운동 목록
///
/// 난이도 오름차순, 같은 난이도는 이름순으로 정렬합니다.
/// 선택기의 "가장 어려운 운동" 동점 처리가 이 순서를 따릅니다.
pub async fn find_by_pattern(pool: &SqlitePool, pattern_id: &str) -> Result<Vec<Exercise>, AppError> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, movement_pattern_id, difficulty, equipment_required,
               contraindications, primary_muscles, is_published
        FROM exercises
        WHERE movement_pattern_id = ? AND is_published = 1
        ORDER BY difficulty, name
        "#,
    )
    // `?` 자리표시자에 순서대로 값을 채웁니다 (SQL 인젝션 방지)
    .bind(pattern_id)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}
