//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `exercise`: 움직임 패턴과 운동 카탈로그 (읽기 전용 참조 데이터)
//! - `plan`: 생성된 플랜, 세션, 세션별 운동
//! - `profile`: 사용자 피트니스 프로필과 검증
//!
//! `pub use X::*;`로 재공개하여 `crate::models::WorkoutPlan`처럼 짧게 접근합니다.

pub mod exercise;
pub mod plan;
pub mod profile;

pub use exercise::*;
pub use plan::*;
pub use profile::*;
