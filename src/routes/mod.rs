//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `profile`: 내 피트니스 프로필 조회/저장
//! - `workout_plans`: 플랜 생성과 조회, 공유 상태 `AppState`

pub mod health;
pub mod profile;
pub mod workout_plans;

// main.rs에서 `routes::generate_plan`처럼 바로 접근할 수 있게 재공개합니다.
pub use health::*;
pub use profile::*;
pub use workout_plans::*;
