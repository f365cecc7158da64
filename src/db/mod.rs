//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 플랜 생성기가 의존하는 저장소 인터페이스가 여기 구현되어 있습니다.
//!
//! 각 하위 모듈:
//! - `exercises`: 움직임 패턴과 운동 카탈로그 조회 (읽기 전용)
//! - `history`: 최근 완료한 운동, 즐겨찾기 운동 ID 조회
//! - `plans`: 플랜/세션/세션 운동 생성과 조회
//! - `profiles`: 사용자 피트니스 프로필 조회/저장

pub mod exercises;
pub mod history;
pub mod plans;
pub mod profiles;

// `crate::db::find_active_plan`처럼 바로 접근할 수 있게 재공개합니다.
pub use exercises::*;
pub use history::*;
pub use plans::*;
pub use profiles::*;
