//! # 코칭 텍스트
//!
//! 세션별 워밍업/쿨다운 블록과 운동별 코칭 노트를 만듭니다.
//! 부상이 있는 사용자에게는 관련 근육군을 쓰는 운동에 주의 문구를 덧붙입니다.

use std::collections::BTreeSet;

use crate::models::{Exercise, RoutineBlock};
use crate::services::periodization::Mesocycle;
use crate::services::scheduler::SessionType;

const SHOULDER_MUSCLES: &[&str] = &["shoulders", "front_delts", "rear_delts", "chest", "rotator_cuff"];
const KNEE_MUSCLES: &[&str] = &["quadriceps", "hamstrings", "calves", "adductors"];

const SHOULDER_CAUTION: &str = "Shoulder caution: keep the range of motion pain-free and stop if you feel pinching.";
const KNEE_CAUTION: &str = "Knee caution: control the descent and keep the knee tracking over the toes.";

fn block(name: &str, duration_seconds: u32) -> RoutineBlock {
    RoutineBlock {
        name: name.to_string(),
        duration_seconds,
    }
}

pub fn warm_up(session_type: SessionType) -> Vec<RoutineBlock> {
    let mut blocks = vec![block("Jumping jacks", 60), block("Arm circles", 45)];
    match session_type {
        SessionType::Upper | SessionType::Push | SessionType::Pull => {
            blocks.push(block("Scapular push-ups", 45));
            blocks.push(block("Band pull-aparts or wall slides", 45));
        }
        SessionType::Lower | SessionType::Legs => {
            blocks.push(block("Leg swings", 60));
            blocks.push(block("Bodyweight good mornings", 45));
        }
        SessionType::FullBodyA | SessionType::FullBodyB => {
            blocks.push(block("Cat-cow", 45));
            blocks.push(block("Bodyweight squats", 45));
        }
    }
    blocks
}

pub fn cool_down(session_type: SessionType) -> Vec<RoutineBlock> {
    let mut blocks = match session_type {
        SessionType::Upper | SessionType::Push | SessionType::Pull => {
            vec![block("Doorway chest stretch", 60), block("Lat stretch", 60)]
        }
        SessionType::Lower | SessionType::Legs => {
            vec![block("Couch stretch", 60), block("Seated hamstring stretch", 60)]
        }
        SessionType::FullBodyA | SessionType::FullBodyB => {
            vec![block("Child's pose", 60), block("Hip flexor stretch", 60)]
        }
    };
    blocks.push(block("Box breathing", 60));
    blocks
}

fn has_injury(injuries: &BTreeSet<String>, area: &str) -> bool {
    injuries.iter().any(|injury| injury.contains(area))
}

fn targets_any(exercise: &Exercise, muscles: &[&str]) -> bool {
    exercise
        .primary_muscles
        .iter()
        .any(|muscle| muscles.contains(&muscle.as_str()))
}

/// 운동 하나의 코칭 노트
pub fn coaching_notes(
    exercise: &Exercise,
    mesocycle: &Mesocycle,
    rest_seconds: u32,
    is_deload: bool,
    injuries: &BTreeSet<String>,
) -> String {
    let mut notes = Vec::new();

    if is_deload {
        notes.push("Deload week: leave several reps in reserve and focus on crisp technique.".to_string());
    } else {
        notes.push(format!("{} phase: {}.", mesocycle.name, mesocycle.focus));
        notes.push(format!("Target RPE {}.", mesocycle.rpe_label()));
    }
    notes.push(format!("Rest {} seconds between sets.", rest_seconds));

    if has_injury(injuries, "shoulder") && targets_any(exercise, SHOULDER_MUSCLES) {
        notes.push(SHOULDER_CAUTION.to_string());
    }
    if has_injury(injuries, "knee") && targets_any(exercise, KNEE_MUSCLES) {
        notes.push(KNEE_CAUTION.to_string());
    }

    notes.join(" ")
}
