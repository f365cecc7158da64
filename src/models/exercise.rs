//! # 운동 카탈로그 모델
//!
//! 움직임 패턴(MovementPattern)과 운동(Exercise)은 불변 참조 데이터입니다.
//! 플랜 생성기는 읽기만 하고, 카탈로그 관리는 이 크레이트의 책임이 아닙니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 생성기가 이름으로 매칭하는 고정 움직임 패턴
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    HorizontalPush,
    HorizontalPull,
    VerticalPush,
    VerticalPull,
    Squat,
    Hinge,
    CoreStability,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::HorizontalPush,
        PatternKind::HorizontalPull,
        PatternKind::VerticalPush,
        PatternKind::VerticalPull,
        PatternKind::Squat,
        PatternKind::Hinge,
        PatternKind::CoreStability,
    ];

    /// `movement_patterns.name` 컬럼 값
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HorizontalPush => "horizontal_push",
            Self::HorizontalPull => "horizontal_pull",
            Self::VerticalPush => "vertical_push",
            Self::VerticalPull => "vertical_pull",
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::CoreStability => "core_stability",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `movement_patterns` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovementPattern {
    pub id: String,
    /// 매칭용 이름 (예: "horizontal_push")
    pub name: String,
    /// 화면 표시용 이름 (예: "Horizontal Push")
    pub display_name: String,
    /// "primary" 또는 "accessory"
    pub category: String,
    pub sort_order: i64,
}

/// `exercises` 테이블 한 행
///
/// 배열 컬럼은 JSON 문자열로 저장되어 있고, `#[sqlx(json)]`이 `Vec<String>`으로 역직렬화합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub movement_pattern_id: String,
    /// 난이도 1~10
    pub difficulty: i64,
    /// 필요한 장비 태그. 비어 있으면 맨몸 운동
    #[sqlx(json)]
    pub equipment_required: Vec<String>,
    /// 이 운동을 피해야 하는 부상 태그
    #[sqlx(json)]
    pub contraindications: Vec<String>,
    /// 주로 쓰는 근육군 (부상 관련 코칭 노트에 사용)
    #[sqlx(json)]
    pub primary_muscles: Vec<String>,
    pub is_published: bool,
}
