//! # 주기화(Periodization) 카탈로그
//!
//! 경력 수준별 12주 템플릿을 정적 데이터로 정의하고,
//! 템플릿을 조회하는 순수 함수들을 제공합니다.
//!
//! ## 템플릿 구조
//! ```text
//! PeriodizationTemplate
//!   ├── mesocycles: [Mesocycle { weeks: (1, 3), sets, reps, rest, rpe }, ...]
//!   └── deload_weeks: [4, 8, 12]
//! ```
//!
//! 메조사이클 범위 사이에 빈 주(예: 디로드 주)가 있을 수 있습니다.
//! `mesocycle_for_week()`는 그런 주에 대해 `None`을 돌려주고,
//! 직전 주의 메조사이클로 대체하는 것은 호출하는 쪽(플랜 생성기)의 몫입니다.

use serde::Serialize;

use crate::models::TrainingExperience;

/// 고정값 또는 `{min, max}` 범위로 표현되는 훈련 목표치
///
/// JSON 직렬화 시 고정값은 숫자 하나(`3`), 범위는 `{"min":3,"max":4}`가 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Target {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

/// 한 훈련 단계(메조사이클)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mesocycle {
    pub name: &'static str,
    /// 포함 범위 `[start, end]`
    pub start_week: u32,
    pub end_week: u32,
    pub focus: &'static str,
    pub sets: Target,
    /// "8-12" 형식의 반복 횟수 범위
    pub reps: &'static str,
    pub rest_seconds: Target,
    pub rpe: Target,
}

impl Mesocycle {
    pub fn contains(&self, week: u32) -> bool {
        (self.start_week..=self.end_week).contains(&week)
    }

    /// 세트 수: 범위면 최댓값
    pub fn effective_sets(&self) -> u32 {
        match self.sets {
            Target::Fixed(sets) => sets,
            Target::Range { max, .. } => max,
        }
    }

    /// 휴식 시간(초): 범위면 중간값(내림)
    pub fn effective_rest(&self) -> u32 {
        match self.rest_seconds {
            Target::Fixed(rest) => rest,
            Target::Range { min, max } => (min + max) / 2,
        }
    }

    /// 코칭 노트에 쓰는 RPE 표기 ("7" 또는 "7-8")
    pub fn rpe_label(&self) -> String {
        match self.rpe {
            Target::Fixed(rpe) => rpe.to_string(),
            Target::Range { min, max } => format!("{}-{}", min, max),
        }
    }
}

/// 경력 수준별 12주 템플릿
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodizationTemplate {
    pub name: &'static str,
    pub experience_level: &'static str,
    pub mesocycles: &'static [Mesocycle],
    pub deload_weeks: &'static [u32],
}

pub static BEGINNER: PeriodizationTemplate = PeriodizationTemplate {
    name: "Beginner Foundations",
    experience_level: "beginner",
    mesocycles: &[
        Mesocycle {
            name: "Foundation",
            start_week: 1,
            end_week: 3,
            focus: "Movement quality and consistent training habits",
            sets: Target::Fixed(3),
            reps: "8-12",
            rest_seconds: Target::Fixed(90),
            rpe: Target::Fixed(6),
        },
        Mesocycle {
            name: "Development",
            start_week: 5,
            end_week: 7,
            focus: "Building work capacity with slightly harder variations",
            sets: Target::Range { min: 3, max: 4 },
            reps: "8-10",
            rest_seconds: Target::Range { min: 60, max: 90 },
            rpe: Target::Range { min: 6, max: 7 },
        },
        Mesocycle {
            name: "Strength Base",
            start_week: 9,
            end_week: 11,
            focus: "First exposure to lower-rep strength work",
            sets: Target::Fixed(4),
            reps: "6-8",
            rest_seconds: Target::Fixed(120),
            rpe: Target::Fixed(7),
        },
    ],
    deload_weeks: &[4, 8, 12],
};

pub static INTERMEDIATE: PeriodizationTemplate = PeriodizationTemplate {
    name: "Intermediate Progression",
    experience_level: "intermediate",
    mesocycles: &[
        Mesocycle {
            name: "Accumulation",
            start_week: 1,
            end_week: 4,
            focus: "Volume accumulation across all movement patterns",
            sets: Target::Range { min: 3, max: 4 },
            reps: "8-12",
            rest_seconds: Target::Range { min: 60, max: 90 },
            rpe: Target::Range { min: 7, max: 8 },
        },
        Mesocycle {
            name: "Intensification",
            start_week: 5,
            end_week: 8,
            focus: "Harder progressions at moderate volume",
            sets: Target::Range { min: 4, max: 5 },
            reps: "6-8",
            rest_seconds: Target::Range { min: 90, max: 120 },
            rpe: Target::Fixed(8),
        },
        Mesocycle {
            name: "Realization",
            start_week: 9,
            end_week: 11,
            focus: "Expressing strength on the hardest variations",
            sets: Target::Fixed(5),
            reps: "4-6",
            rest_seconds: Target::Range { min: 120, max: 180 },
            rpe: Target::Range { min: 8, max: 9 },
        },
    ],
    deload_weeks: &[4, 8, 12],
};

pub static ADVANCED: PeriodizationTemplate = PeriodizationTemplate {
    name: "Advanced Performance",
    experience_level: "advanced",
    mesocycles: &[
        Mesocycle {
            name: "Hypertrophy",
            start_week: 1,
            end_week: 3,
            focus: "Muscle building volume to support skill work",
            sets: Target::Range { min: 4, max: 5 },
            reps: "8-12",
            rest_seconds: Target::Range { min: 60, max: 90 },
            rpe: Target::Range { min: 7, max: 8 },
        },
        Mesocycle {
            name: "Strength",
            start_week: 4,
            end_week: 6,
            focus: "Heavy progressions and weighted variations",
            sets: Target::Fixed(5),
            reps: "5-8",
            rest_seconds: Target::Range { min: 120, max: 180 },
            rpe: Target::Range { min: 8, max: 9 },
        },
        Mesocycle {
            name: "Skill & Power",
            start_week: 7,
            end_week: 9,
            focus: "Low-rep, high-tension skill progressions",
            sets: Target::Range { min: 5, max: 6 },
            reps: "3-5",
            rest_seconds: Target::Fixed(180),
            rpe: Target::Range { min: 8, max: 9 },
        },
        Mesocycle {
            name: "Peak",
            start_week: 10,
            end_week: 11,
            focus: "Peaking on the hardest achievable variations",
            sets: Target::Fixed(4),
            reps: "3-5",
            rest_seconds: Target::Range { min: 180, max: 240 },
            rpe: Target::Fixed(9),
        },
    ],
    deload_weeks: &[6, 12],
};

/// 경력에 맞는 템플릿을 고릅니다. `never`는 `beginner`와 같은 템플릿을 씁니다.
pub fn select_template(experience: TrainingExperience) -> &'static PeriodizationTemplate {
    match experience {
        TrainingExperience::Never | TrainingExperience::Beginner => &BEGINNER,
        TrainingExperience::Intermediate => &INTERMEDIATE,
        TrainingExperience::Advanced => &ADVANCED,
    }
}

/// `week`를 포함하는 메조사이클. 범위 밖이면 `None`.
pub fn mesocycle_for_week(template: &PeriodizationTemplate, week: u32) -> Option<&Mesocycle> {
    template.mesocycles.iter().find(|meso| meso.contains(week))
}

pub fn is_deload_week(template: &PeriodizationTemplate, week: u32) -> bool {
    template.deload_weeks.contains(&week)
}

/// 디로드 주의 볼륨 조정
///
/// - 세트: 절반(내림), 최소 1
/// - 반복: `"a-b"`의 각 경계를 30% 줄임(내림), 최소 1
/// - `"a-b"` 형식이 아닌 반복 문자열(예: "AMRAP", "30s")은 그대로 둡니다
pub fn deload_adjust(sets: u32, reps: &str) -> (u32, String) {
    let sets = (sets / 2).max(1);

    let reduce = |bound: u32| (bound * 7 / 10).max(1);
    let reps = match reps.split_once('-') {
        Some((low, high)) => match (low.trim().parse::<u32>(), high.trim().parse::<u32>()) {
            (Ok(low), Ok(high)) => format!("{}-{}", reduce(low), reduce(high)),
            _ => reps.to_string(),
        },
        None => reps.to_string(),
    };

    (sets, reps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> [&'static PeriodizationTemplate; 3] {
        [&BEGINNER, &INTERMEDIATE, &ADVANCED]
    }

    #[test]
    fn test_select_template() {
        assert_eq!(select_template(TrainingExperience::Never).name, BEGINNER.name);
        assert_eq!(select_template(TrainingExperience::Beginner).name, BEGINNER.name);
        assert_eq!(select_template(TrainingExperience::Intermediate).name, INTERMEDIATE.name);
        assert_eq!(select_template(TrainingExperience::Advanced).name, ADVANCED.name);
    }

    #[test]
    fn test_mesocycle_for_week() {
        assert_eq!(mesocycle_for_week(&BEGINNER, 1).unwrap().name, "Foundation");
        assert_eq!(mesocycle_for_week(&BEGINNER, 3).unwrap().name, "Foundation");
        assert_eq!(mesocycle_for_week(&BEGINNER, 5).unwrap().name, "Development");
        // 디로드 주 4는 메조사이클 사이에 있음
        assert!(mesocycle_for_week(&BEGINNER, 4).is_none());
        assert!(mesocycle_for_week(&BEGINNER, 12).is_none());
        assert!(mesocycle_for_week(&BEGINNER, 0).is_none());
        // 중급 템플릿은 디로드 주가 범위 안에 포함됨
        assert_eq!(mesocycle_for_week(&INTERMEDIATE, 4).unwrap().name, "Accumulation");
    }

    #[test]
    fn test_every_gap_week_has_previous_week_fallback() {
        for template in templates() {
            for week in 1..=12 {
                let resolved = mesocycle_for_week(template, week)
                    .or_else(|| mesocycle_for_week(template, week - 1));
                assert!(resolved.is_some(), "{} week {}", template.name, week);
            }
        }
    }

    #[test]
    fn test_mesocycles_are_contiguous_and_ordered() {
        for template in templates() {
            assert_eq!(template.mesocycles[0].start_week, 1);
            for pair in template.mesocycles.windows(2) {
                assert!(pair[0].start_week <= pair[0].end_week);
                // 사이 간격은 최대 한 주 (직전 주 대체로 메울 수 있는 범위)
                assert!(pair[1].start_week - pair[0].end_week <= 2, "{}", template.name);
            }
        }
    }

    #[test]
    fn test_catalog_lookups_are_pure() {
        for week in 1..=12 {
            assert_eq!(mesocycle_for_week(&ADVANCED, week), mesocycle_for_week(&ADVANCED, week));
            assert_eq!(is_deload_week(&ADVANCED, week), is_deload_week(&ADVANCED, week));
        }
        assert!(is_deload_week(&BEGINNER, 4));
        assert!(!is_deload_week(&BEGINNER, 5));
        assert!(is_deload_week(&ADVANCED, 6));
    }

    #[test]
    fn test_deload_adjust() {
        assert_eq!(deload_adjust(3, "8-12"), (1, "5-8".to_string()));
        assert_eq!(deload_adjust(4, "6-8"), (2, "4-5".to_string()));
        assert_eq!(deload_adjust(5, "10-15"), (2, "7-10".to_string()));
        assert_eq!(deload_adjust(1, "1-2"), (1, "1-1".to_string()));
        assert_eq!(deload_adjust(6, "AMRAP"), (3, "AMRAP".to_string()));
        assert_eq!(deload_adjust(2, "30s"), (1, "30s".to_string()));
    }

    #[test]
    fn test_deload_adjust_matches_formula() {
        for sets in 1..=8u32 {
            for low in 1..=15u32 {
                let high = low + 4;
                let (adjusted_sets, adjusted_reps) = deload_adjust(sets, &format!("{}-{}", low, high));
                assert_eq!(adjusted_sets, ((sets as f64 * 0.5).floor() as u32).max(1));
                assert_eq!(
                    adjusted_reps,
                    format!("{}-{}", (low * 7 / 10).max(1), (high * 7 / 10).max(1))
                );
            }
        }
    }

    #[test]
    fn test_effective_values() {
        let meso = INTERMEDIATE.mesocycles[0];
        assert_eq!(meso.effective_sets(), 4);
        assert_eq!(meso.effective_rest(), 75);
        assert_eq!(meso.rpe_label(), "7-8");

        let meso = BEGINNER.mesocycles[0];
        assert_eq!(meso.effective_sets(), 3);
        assert_eq!(meso.effective_rest(), 90);
        assert_eq!(meso.rpe_label(), "6");
    }

    #[test]
    fn test_target_serializes_as_scalar_or_range() {
        assert_eq!(serde_json::to_value(Target::Fixed(3)).unwrap(), serde_json::json!(3));
        assert_eq!(
            serde_json::to_value(Target::Range { min: 3, max: 4 }).unwrap(),
            serde_json::json!({ "min": 3, "max": 4 })
        );
    }
}
