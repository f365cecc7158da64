//! # 사용자 피트니스 프로필 모델
//!
//! 프로필은 외부 프로필 서비스(폼)가 채우고, 플랜 생성기는 읽기만 합니다.
//!
//! ## 구조체 역할
//! - `ProfileRecord`: DB의 `user_profiles` 한 행. 대부분의 필드가 비어 있을 수 있음
//! - `TrainingProfile`: 검증을 통과한 프로필. 플랜 생성에 필요한 모든 값이 채워져 있음
//! - `UpsertProfileRequest`: `PUT /api/v1/profile` 요청 본문
//!
//! `ProfileRecord::validate()`가 두 타입 사이의 관문 역할을 합니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::AppError;

/// 운동 경력
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingExperience {
    Never,
    Beginner,
    Intermediate,
    Advanced,
}

impl TrainingExperience {
    /// 경력이 거의 없는 사용자인지 (분할 방식 결정에 사용)
    pub fn is_novice(self) -> bool {
        matches!(self, Self::Never | Self::Beginner)
    }
}

impl fmt::Display for TrainingExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for TrainingExperience {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Unknown training experience: {}", s)),
        }
    }
}

/// 일상 활동 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl FromStr for ActivityLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(Self::Sedentary),
            "lightly_active" => Ok(Self::LightlyActive),
            "moderately_active" => Ok(Self::ModeratelyActive),
            "very_active" => Ok(Self::VeryActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// 움직임 패턴별 자가 평가 점수 (1~10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    pub push_level: u8,
    pub pull_level: u8,
    pub squat_level: u8,
    pub hinge_level: u8,
    pub core_level: u8,
}

/// 저장된 평가 점수. 폼이 일부만 채웠을 수 있으므로 모든 필드가 Option입니다.
///
/// JSON 키는 `pushLevel`, `pullLevel`처럼 camelCase입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub push_level: Option<i64>,
    pub pull_level: Option<i64>,
    pub squat_level: Option<i64>,
    pub hinge_level: Option<i64>,
    pub core_level: Option<i64>,
}

impl AssessmentInput {
    fn validate(&self) -> Result<AssessmentScores, AppError> {
        // (JSON 키, 값) 쌍을 순서대로 검사해 첫 번째 누락 필드를 에러 메시지에 담습니다
        let score = |key: &str, value: Option<i64>| -> Result<u8, AppError> {
            let value = value
                .ok_or_else(|| AppError::ProfileIncomplete(format!("assessment_scores.{}", key)))?;
            if !(1..=10).contains(&value) {
                return Err(AppError::BadRequest(format!(
                    "assessment_scores.{} must be between 1 and 10, got {}",
                    key, value
                )));
            }
            Ok(value as u8)
        };

        Ok(AssessmentScores {
            push_level: score("pushLevel", self.push_level)?,
            pull_level: score("pullLevel", self.pull_level)?,
            squat_level: score("squatLevel", self.squat_level)?,
            hinge_level: score("hingeLevel", self.hinge_level)?,
            core_level: score("coreLevel", self.core_level)?,
        })
    }
}

/// 보유 장비 플래그
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentFlags {
    #[serde(default)]
    pub pull_up_bar: bool,
    #[serde(default)]
    pub dip_bars: bool,
    #[serde(default)]
    pub resistance_bands: bool,
    #[serde(default)]
    pub rings: bool,
    #[serde(default)]
    pub parallettes: bool,
    #[serde(default)]
    pub weighted_vest: bool,
}

impl EquipmentFlags {
    /// 운동 카탈로그의 `equipment_required` 태그와 같은 이름의 목록으로 변환합니다.
    pub fn tags(&self) -> BTreeSet<String> {
        [
            (self.pull_up_bar, "pull_up_bar"),
            (self.dip_bars, "dip_bars"),
            (self.resistance_bands, "resistance_bands"),
            (self.rings, "rings"),
            (self.parallettes, "parallettes"),
            (self.weighted_vest, "weighted_vest"),
        ]
        .into_iter()
        .filter(|(owned, _)| *owned)
        .map(|(_, tag)| tag.to_string())
        .collect()
    }
}

/// `user_profiles` 테이블 한 행
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: String,
    pub training_experience: Option<String>,
    pub activity_level: Option<String>,
    /// JSON 문자열 배열
    pub goals: Option<String>,
    pub days_per_week: Option<i64>,
    pub minutes_per_session: Option<i64>,
    pub has_pull_up_bar: bool,
    pub has_dip_bars: bool,
    pub has_resistance_bands: bool,
    pub has_rings: bool,
    pub has_parallettes: bool,
    pub has_weighted_vest: bool,
    /// JSON 문자열 배열
    pub injuries: String,
    /// JSON 객체 (`AssessmentInput`)
    pub assessment_scores: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 플랜 생성에 필요한 값이 모두 채워진 프로필
#[derive(Debug, Clone)]
pub struct TrainingProfile {
    pub user_id: String,
    pub experience: TrainingExperience,
    pub activity_level: ActivityLevel,
    pub goals: Vec<String>,
    pub days_per_week: u32,
    pub minutes_per_session: u32,
    pub equipment: BTreeSet<String>,
    pub injuries: BTreeSet<String>,
    pub scores: AssessmentScores,
}

/// 주당 훈련 가능 일수 허용 범위
pub const DAYS_PER_WEEK_RANGE: RangeInclusive<i64> = 1..=7;
/// 세션당 시간(분) 허용 범위
pub const MINUTES_PER_SESSION_RANGE: RangeInclusive<i64> = 1..=240;

/// 범위를 벗어난 값은 `BadRequest`. 범위 안이면 `u32`로 변환합니다.
fn bounded(field: &str, value: i64, range: RangeInclusive<i64>) -> Result<u32, AppError> {
    let out_of_range = || {
        AppError::BadRequest(format!(
            "{} must be between {} and {}, got {}",
            field,
            range.start(),
            range.end(),
            value
        ))
    };
    if !range.contains(&value) {
        return Err(out_of_range());
    }
    u32::try_from(value).map_err(|_| out_of_range())
}

fn parse_json_list(field: &str, raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("{} is not a JSON string list: {}", field, e)))
}

impl ProfileRecord {
    pub fn equipment(&self) -> EquipmentFlags {
        EquipmentFlags {
            pull_up_bar: self.has_pull_up_bar,
            dip_bars: self.has_dip_bars,
            resistance_bands: self.has_resistance_bands,
            rings: self.has_rings,
            parallettes: self.has_parallettes,
            weighted_vest: self.has_weighted_vest,
        }
    }

    /// 필수 항목을 검사하여 `TrainingProfile`을 만듭니다.
    ///
    /// 검사 순서: training_experience → activity_level → days_per_week →
    /// minutes_per_session → goals → assessment_scores (및 각 점수)
    ///
    /// # 에러
    /// - `ProfileIncomplete`: 필수 항목이 비어 있음 (필드 이름 포함)
    /// - `BadRequest`: 값은 있지만 알 수 없는 값이거나 형식이 잘못됨
    pub fn validate(&self) -> Result<TrainingProfile, AppError> {
        let missing = |field: &str| AppError::ProfileIncomplete(field.to_string());

        let experience = self
            .training_experience
            .as_deref()
            .ok_or_else(|| missing("training_experience"))?
            .parse::<TrainingExperience>()
            .map_err(AppError::BadRequest)?;
        let activity_level = self
            .activity_level
            .as_deref()
            .ok_or_else(|| missing("activity_level"))?
            .parse::<ActivityLevel>()
            .map_err(AppError::BadRequest)?;
        let days_per_week = self.days_per_week.ok_or_else(|| missing("days_per_week"))?;
        let minutes_per_session = self
            .minutes_per_session
            .ok_or_else(|| missing("minutes_per_session"))?;

        let goals = match self.goals.as_deref() {
            Some(raw) => parse_json_list("goals", raw)?,
            None => Vec::new(),
        };
        if goals.is_empty() {
            return Err(missing("goals"));
        }

        let scores_raw = self
            .assessment_scores
            .as_deref()
            .ok_or_else(|| missing("assessment_scores"))?;
        let scores: AssessmentInput = serde_json::from_str(scores_raw).map_err(|e| {
            AppError::BadRequest(format!("assessment_scores is not valid JSON: {}", e))
        })?;
        let scores = scores.validate()?;

        // 프로필 행은 외부 서비스가 쓰므로 라우트와 같은 범위를 여기서도 검사합니다
        let days_per_week = bounded("days_per_week", days_per_week, DAYS_PER_WEEK_RANGE)?;
        let minutes_per_session =
            bounded("minutes_per_session", minutes_per_session, MINUTES_PER_SESSION_RANGE)?;

        Ok(TrainingProfile {
            user_id: self.user_id.clone(),
            experience,
            activity_level,
            goals,
            days_per_week,
            minutes_per_session,
            equipment: self.equipment().tags(),
            injuries: parse_json_list("injuries", &self.injuries)?
                .into_iter()
                .map(|injury| injury.trim().to_lowercase())
                .collect(),
            scores,
        })
    }
}

/// `PUT /api/v1/profile` 요청 본문
///
/// 모든 항목이 선택입니다. 보내지 않은 항목은 NULL(또는 기본값)로 저장됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertProfileRequest {
    pub training_experience: Option<String>,
    pub activity_level: Option<String>,
    pub goals: Option<Vec<String>>,
    pub days_per_week: Option<i64>,
    pub minutes_per_session: Option<i64>,
    #[serde(default)]
    pub equipment: EquipmentFlags,
    #[serde(default)]
    pub injuries: Vec<String>,
    pub assessment_scores: Option<AssessmentInput>,
}

/// `GET /api/v1/profile` 응답
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub training_experience: Option<String>,
    pub activity_level: Option<String>,
    pub goals: Vec<String>,
    pub days_per_week: Option<i64>,
    pub minutes_per_session: Option<i64>,
    pub equipment: EquipmentFlags,
    pub injuries: Vec<String>,
    pub assessment_scores: Option<AssessmentInput>,
    pub updated_at: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(record: ProfileRecord) -> Self {
        let equipment = record.equipment();
        // 응답용 변환은 관대하게: 깨진 JSON은 빈 값으로 보여줍니다
        Self {
            goals: record
                .goals
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            injuries: serde_json::from_str(&record.injuries).unwrap_or_default(),
            assessment_scores: record
                .assessment_scores
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            user_id: record.user_id,
            training_experience: record.training_experience,
            activity_level: record.activity_level,
            days_per_week: record.days_per_week,
            minutes_per_session: record.minutes_per_session,
            equipment,
            updated_at: record.updated_at,
        }
    }
}
