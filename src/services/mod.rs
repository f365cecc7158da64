//! # 비즈니스 로직 모듈
//!
//! 플랜 생성에 필요한 계산을 모아둔 모듈입니다.
//! `generator`를 제외한 하위 모듈은 DB나 HTTP에 의존하지 않는 순수 함수입니다.
//!
//! 각 하위 모듈:
//! - `periodization`: 경력별 12주 주기화 템플릿과 디로드 조정
//! - `exercise_selector`: 패턴별 운동 선택, 분할 방식 결정
//! - `scheduler`: 요일 배치, 세션 종류, 날짜 계산
//! - `coaching`: 워밍업/쿨다운 루틴과 코칭 노트
//! - `picker`: 무작위 선택 추상화 (테스트에서 결정적 구현으로 교체)
//! - `generator`: 위 모듈을 조합해 플랜을 만들고 저장

pub mod coaching;
pub mod exercise_selector;
pub mod generator;
pub mod periodization;
pub mod picker;
pub mod scheduler;

pub use generator::generate_workout_plan;
pub use picker::RandomPicker;
