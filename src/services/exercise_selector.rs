//! # 운동 선택기 (Exercise Selector)
//!
//! 움직임 패턴 하나에 대해 사용자 조건을 만족하는 운동 하나를 고릅니다.
//!
//! ## 선택 단계
//! ```text
//! 패턴의 공개 운동
//!   → 1. 난이도 [max(1, level-1), level+2]
//!   → 2. 보유 장비로 가능한 운동
//!   → 3. 부상 금기 제외
//!   → 4. 선호 순서
//!        a. 최근에 하지 않은 즐겨찾기       → 무작위
//!        b. 최근에 하지 않은 운동 상위 3개  → 무작위
//!        c. 전부 최근에 했다면 가장 어려운 운동 (결정적)
//! ```
//!
//! 후보가 하나도 없으면 `None`이고, 세션 단위 선택에서는 그 슬롯을 건너뜁니다.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{AssessmentScores, Exercise, PatternKind, SplitType, TrainingExperience};
use crate::services::picker::Picker;
use crate::services::scheduler::SessionType;

/// 최근 사용하지 않은 후보 중 무작위로 고를 상위 난이도 개수
const TOP_CANDIDATES: usize = 3;

/// 세션에 필요한 패턴 하나와 그 패턴의 사용자 수준, 운동 개수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRequirement {
    pub pattern: PatternKind,
    pub level: u8,
    pub count: u32,
}

/// 패턴별 공개 운동 목록. 생성 실행 시작 시 한 번 로딩합니다.
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    by_pattern: HashMap<PatternKind, Vec<Exercise>>,
}

impl ExerciseCatalog {
    pub fn new(by_pattern: HashMap<PatternKind, Vec<Exercise>>) -> Self {
        Self { by_pattern }
    }

    pub fn exercises(&self, pattern: PatternKind) -> &[Exercise] {
        self.by_pattern
            .get(&pattern)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// 사용자별 선택 조건 (장비, 부상, 즐겨찾기)
#[derive(Debug, Clone, Copy)]
pub struct UserConstraints<'a> {
    pub equipment: &'a BTreeSet<String>,
    pub injuries: &'a BTreeSet<String>,
    pub favorites: &'a HashSet<String>,
}

impl UserConstraints<'_> {
    fn has_equipment_for(&self, exercise: &Exercise) -> bool {
        exercise
            .equipment_required
            .iter()
            .all(|item| self.equipment.contains(item))
    }

    fn is_contraindicated(&self, exercise: &Exercise) -> bool {
        exercise
            .contraindications
            .iter()
            .any(|tag| self.injuries.contains(&tag.to_lowercase()))
    }
}

/// 패턴 하나에 대해 운동 하나를 고릅니다.
///
/// `candidates`는 해당 패턴의 운동 목록입니다 (`ExerciseCatalog::exercises`).
pub fn select_exercise<'c, P: Picker>(
    candidates: impl IntoIterator<Item = &'c Exercise>,
    level: u8,
    constraints: &UserConstraints<'_>,
    recent: &HashSet<String>,
    picker: &mut P,
) -> Option<&'c Exercise> {
    let level = i64::from(level);
    let (min_difficulty, max_difficulty) = ((level - 1).max(1), level + 2);

    let eligible: Vec<&Exercise> = candidates
        .into_iter()
        .filter(|exercise| exercise.is_published)
        .filter(|exercise| (min_difficulty..=max_difficulty).contains(&exercise.difficulty))
        .filter(|exercise| constraints.has_equipment_for(exercise))
        .filter(|exercise| !constraints.is_contraindicated(exercise))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let fresh_favorites: Vec<&Exercise> = eligible
        .iter()
        .copied()
        .filter(|exercise| {
            constraints.favorites.contains(&exercise.id) && !recent.contains(&exercise.id)
        })
        .collect();
    if let Some(choice) = picker.pick(&fresh_favorites) {
        return Some(*choice);
    }

    // sort_by는 안정 정렬이므로 같은 난이도는 카탈로그 순서를 유지합니다
    let mut fresh: Vec<&Exercise> = eligible
        .iter()
        .copied()
        .filter(|exercise| !recent.contains(&exercise.id))
        .collect();
    fresh.sort_by(|a, b| b.difficulty.cmp(&a.difficulty));
    fresh.truncate(TOP_CANDIDATES);
    if let Some(choice) = picker.pick(&fresh) {
        return Some(*choice);
    }

    let mut all = eligible;
    all.sort_by(|a, b| b.difficulty.cmp(&a.difficulty));
    all.first().copied()
}

/// 세션 하나의 운동 목록을 고릅니다.
///
/// 고른 운동의 ID는 바로 `recent`에 추가됩니다.
/// 이번 세션에서 이미 고른 운동은 다른 후보가 있는 한 다시 고르지 않습니다.
/// 후보가 없는 패턴은 조용히 건너뜁니다.
pub fn select_exercises_for_session<'c, P: Picker>(
    catalog: &'c ExerciseCatalog,
    requirements: &[PatternRequirement],
    constraints: &UserConstraints<'_>,
    recent: &mut HashSet<String>,
    picker: &mut P,
) -> Vec<(PatternKind, &'c Exercise)> {
    let mut selected: Vec<(PatternKind, &'c Exercise)> = Vec::new();

    for requirement in requirements {
        for _ in 0..requirement.count {
            let candidates = catalog.exercises(requirement.pattern);
            let unused = candidates
                .iter()
                .filter(|exercise| !selected.iter().any(|(_, chosen)| chosen.id == exercise.id));

            // 이번 세션에서 안 쓴 후보로 먼저 고르고, 없으면 전체 후보로
            let choice = select_exercise(unused, requirement.level, constraints, recent, picker)
                .or_else(|| select_exercise(candidates, requirement.level, constraints, recent, picker));

            match choice {
                Some(exercise) => {
                    recent.insert(exercise.id.clone());
                    selected.push((requirement.pattern, exercise));
                }
                None => {
                    tracing::debug!(
                        pattern = %requirement.pattern,
                        level = requirement.level,
                        "No eligible exercise, skipping slot"
                    );
                }
            }
        }
    }

    selected
}

/// 주당 횟수와 경력으로 분할 방식을 정합니다.
pub fn determine_split_type(frequency: u32, experience: TrainingExperience) -> SplitType {
    match frequency {
        f if f <= 3 && experience.is_novice() => SplitType::FullBody,
        3 => SplitType::FullBody,
        4 => SplitType::UpperLower,
        f if f >= 5 => SplitType::PushPullLegs,
        _ => SplitType::FullBody,
    }
}

/// 패턴에 해당하는 평가 점수
pub fn level_for(pattern: PatternKind, scores: &AssessmentScores) -> u8 {
    match pattern {
        PatternKind::HorizontalPush | PatternKind::VerticalPush => scores.push_level,
        PatternKind::HorizontalPull | PatternKind::VerticalPull => scores.pull_level,
        PatternKind::Squat => scores.squat_level,
        PatternKind::Hinge => scores.hinge_level,
        PatternKind::CoreStability => scores.core_level,
    }
}

/// 세션 종류별로 필요한 패턴 목록을 만듭니다.
pub fn pattern_requirements(
    session_type: SessionType,
    scores: &AssessmentScores,
) -> Vec<PatternRequirement> {
    use PatternKind::*;

    let slots: &[(PatternKind, u32)] = match session_type {
        SessionType::FullBodyA | SessionType::FullBodyB => &[
            (HorizontalPush, 1),
            (HorizontalPull, 1),
            (Squat, 1),
            (Hinge, 1),
            (CoreStability, 1),
        ],
        SessionType::Upper => &[
            (HorizontalPush, 1),
            (HorizontalPull, 1),
            (VerticalPush, 1),
            (VerticalPull, 1),
            (CoreStability, 1),
        ],
        SessionType::Lower => &[(Squat, 1), (Hinge, 1), (CoreStability, 2)],
        SessionType::Push => &[(HorizontalPush, 1), (VerticalPush, 1), (CoreStability, 1)],
        SessionType::Pull => &[(HorizontalPull, 1), (VerticalPull, 1), (CoreStability, 1)],
        SessionType::Legs => &[(Squat, 1), (Hinge, 1), (CoreStability, 1)],
    };

    slots
        .iter()
        .map(|&(pattern, count)| PatternRequirement {
            pattern,
            level: level_for(pattern, scores),
            count,
        })
        .collect()
}
