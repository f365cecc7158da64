//! # 운동 플랜 모델 정의
//!
//! 플랜 생성기가 만들어 내는 세 가지 엔티티와 API 응답 타입을 정의합니다.
//!
//! ## 엔티티 관계
//! ```text
//! WorkoutPlan (12주, 1개)
//!   └── WorkoutSession (주차 × 주당 횟수)
//!         └── WorkoutSessionExercise (세션당 운동 목록)
//! ```
//!
//! 세 엔티티 모두 한 번의 생성 실행에서 하나의 트랜잭션으로 만들어지고,
//! 이후 이 크레이트가 수정하지 않습니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 플랜의 전체 기간 (주)
pub const PLAN_DURATION_WEEKS: u32 = 12;

/// 주간 분할 방식 (훈련일을 신체 부위별로 나누는 방법)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitType {
    #[serde(rename = "full-body")]
    FullBody,
    #[serde(rename = "upper-lower")]
    UpperLower,
    #[serde(rename = "push-pull-legs")]
    PushPullLegs,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullBody => "full-body",
            Self::UpperLower => "upper-lower",
            Self::PushPullLegs => "push-pull-legs",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::FullBody => "Full Body",
            Self::UpperLower => "Upper/Lower",
            Self::PushPullLegs => "Push/Pull/Legs",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 워밍업/쿨다운의 한 동작
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineBlock {
    pub name: String,
    pub duration_seconds: u32,
}

/// `workout_plans` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutPlan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// 이 플랜이 왜 이렇게 구성되었는지 사용자에게 보여줄 설명
    pub explanation: String,
    /// "YYYY-MM-DD"
    pub start_date: String,
    /// 시작일 + 84일
    pub end_date: String,
    pub duration_weeks: i64,
    /// 주당 세션 수 (2~5)
    pub frequency: i64,
    pub split_type: String,
    /// 메조사이클 목록 (JSON)
    #[sqlx(json)]
    pub mesocycles: serde_json::Value,
    #[sqlx(json)]
    pub deload_weeks: Vec<u32>,
    pub status: String,
    pub created_at: String,
}

/// `workout_sessions` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSession {
    pub id: String,
    pub plan_id: String,
    /// 1~12
    pub week_number: i64,
    /// 1=월요일 … 7=일요일
    pub day_of_week: i64,
    /// 그 주의 몇 번째 세션인지 (1부터)
    pub session_number: i64,
    pub scheduled_date: String,
    pub name: String,
    #[sqlx(json)]
    pub warm_up: Vec<RoutineBlock>,
    #[sqlx(json)]
    pub cool_down: Vec<RoutineBlock>,
    pub is_deload: bool,
    pub status: String,
}

/// `workout_session_exercises` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSessionExercise {
    pub id: String,
    pub session_id: String,
    pub exercise_id: String,
    pub order_index: i64,
    pub sets: i64,
    /// "8-12"처럼 범위 문자열
    pub reps: String,
    pub rest_seconds: i64,
    pub notes: String,
}

/// `POST /api/v1/workout-plans/generate` 응답
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub workout_plan: WorkoutPlan,
    pub sessions_count: usize,
    pub exercises_count: usize,
}

/// 세션과 그 세션의 운동 목록
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub exercises: Vec<WorkoutSessionExercise>,
}

/// `GET /api/v1/workout-plans/{id}` 응답
#[derive(Debug, Clone, Serialize)]
pub struct PlanDetail {
    pub workout_plan: WorkoutPlan,
    pub sessions: Vec<SessionDetail>,
}

/// 새 플랜 삽입용 (id, status, created_at 제외)
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkoutPlan {
    pub user_id: String,
    pub name: String,
    pub explanation: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_weeks: u32,
    pub frequency: u32,
    pub split_type: SplitType,
    pub mesocycles: serde_json::Value,
    pub deload_weeks: Vec<u32>,
}

/// 새 세션 삽입용 (id, plan_id, status 제외)
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkoutSession {
    pub week_number: u32,
    pub day_of_week: u32,
    pub session_number: u32,
    pub scheduled_date: String,
    pub name: String,
    pub warm_up: Vec<RoutineBlock>,
    pub cool_down: Vec<RoutineBlock>,
    pub is_deload: bool,
}

/// 세션에 들어갈 운동 한 줄 (id, session_id 제외)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSessionExercise {
    pub exercise_id: String,
    pub order_index: u32,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: u32,
    pub notes: String,
}
