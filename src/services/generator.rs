//! # 운동 플랜 생성기
//!
//! 사용자 프로필로부터 12주 훈련 플랜을 만듭니다.
//!
//! ## 처리 흐름
//! ```text
//! generate_workout_plan(user_id)
//!   1. 프로필 로딩 + 검증            → 실패 시 ProfileIncomplete (아무것도 만들지 않음)
//!   2. 카탈로그, 최근 운동, 즐겨찾기 로딩
//!   3. build_plan()                   → 순수 계산. DB 접근 없음
//!        주당 횟수 → 템플릿 → 분할 방식 → 12주 × 요일별 세션 → 세션별 운동
//!   4. persist_draft()                → 트랜잭션 하나로 플랜/세션/운동 저장
//! ```
//!
//! 3은 DB에 접근하지 않습니다. 4가 실패하면 아무 행도 커밋되지 않습니다.

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::*;
use crate::services::coaching;
use crate::services::exercise_selector::{
    determine_split_type, pattern_requirements, select_exercises_for_session, ExerciseCatalog,
    UserConstraints,
};
use crate::services::periodization::{
    deload_adjust, is_deload_week, mesocycle_for_week, select_template, Mesocycle,
    PeriodizationTemplate,
};
use crate::services::picker::Picker;
use crate::services::scheduler::{
    session_date, session_days_for_frequency, session_name, session_type,
};

/// 빈도 조정에 쓰는 나이. 생년월일에서 계산하지 않고 고정값을 씁니다.
pub const ASSUMED_AGE: u32 = 30;

const MIN_FREQUENCY: u32 = 2;
const MAX_FREQUENCY: u32 = 5;
const PLAN_LENGTH_DAYS: u64 = PLAN_DURATION_WEEKS as u64 * 7;

/// 저장 전의 플랜 전체
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub plan: NewWorkoutPlan,
    pub sessions: Vec<SessionDraft>,
}

#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub session: NewWorkoutSession,
    pub exercises: Vec<NewSessionExercise>,
}

impl PlanDraft {
    pub fn exercises_count(&self) -> usize {
        self.sessions.iter().map(|s| s.exercises.len()).sum()
    }
}

/// 주당 훈련 횟수 계산
///
/// 1. `days_per_week`에서 시작
/// 2. 좌식 생활 + 40세 초과면 최대 3회
/// 3. 세션 30분 미만이면 +1 (최대 5), 60분 초과면 -1 (최소 2)
/// 4. 최종적으로 [2, 5]로 제한
pub fn compute_frequency(profile: &TrainingProfile) -> u32 {
    let mut frequency = profile.days_per_week;

    if profile.activity_level == ActivityLevel::Sedentary && ASSUMED_AGE > 40 {
        frequency = frequency.min(3);
    }

    if profile.minutes_per_session < 30 {
        frequency = frequency.saturating_add(1).min(MAX_FREQUENCY);
    } else if profile.minutes_per_session > 60 {
        frequency = frequency.saturating_sub(1).max(MIN_FREQUENCY);
    }

    frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY)
}

/// 주차의 메조사이클. 범위 밖이면 직전 주의 메조사이클을 씁니다.
/// 그래도 없으면 `None`이고, 그 주는 세션 없이 건너뜁니다.
fn resolve_mesocycle(template: &PeriodizationTemplate, week: u32) -> Option<&Mesocycle> {
    mesocycle_for_week(template, week).or_else(|| {
        if week > 1 {
            mesocycle_for_week(template, week - 1)
        } else {
            None
        }
    })
}

fn explanation(
    profile: &TrainingProfile,
    template: &PeriodizationTemplate,
    split: SplitType,
    frequency: u32,
) -> String {
    let mut text = format!(
        "{}-week {} program for {} experience: {} sessions per week on a {} split, built around your goals ({}).",
        PLAN_DURATION_WEEKS,
        template.name,
        template.experience_level,
        frequency,
        split.display_name(),
        profile.goals.join(", "),
    );

    if frequency != profile.days_per_week {
        text.push_str(&format!(
            " Frequency adjusted from {} to {} days for {}-minute sessions and recovery.",
            profile.days_per_week, frequency, profile.minutes_per_session
        ));
    }

    let deloads: Vec<String> = template.deload_weeks.iter().map(u32::to_string).collect();
    text.push_str(&format!(
        " Deload weeks ({}) reduce volume so you can recover.",
        deloads.join(", ")
    ));

    if !profile.injuries.is_empty() {
        text.push_str(" Exercises that conflict with your injuries were excluded.");
    }

    text
}

/// 프로필과 카탈로그로 플랜 초안을 만듭니다. DB에 접근하지 않는 순수 계산입니다.
///
/// `recent`는 최근 완료한 운동 ID로 시작하고, 생성 중에 고른 운동이 계속 추가됩니다.
/// 세션마다 초기화하지 않습니다.
pub fn build_plan<P: Picker>(
    profile: &TrainingProfile,
    catalog: &ExerciseCatalog,
    mut recent: HashSet<String>,
    favorites: &HashSet<String>,
    start: NaiveDate,
    picker: &mut P,
) -> PlanDraft {
    let frequency = compute_frequency(profile);
    let template = select_template(profile.experience);
    let split = determine_split_type(frequency, profile.experience);
    let constraints = UserConstraints {
        equipment: &profile.equipment,
        injuries: &profile.injuries,
        favorites,
    };

    let end = start + Days::new(PLAN_LENGTH_DAYS);
    let plan = NewWorkoutPlan {
        user_id: profile.user_id.clone(),
        name: format!("{} - {}", template.name, split.display_name()),
        explanation: explanation(profile, template, split, frequency),
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        duration_weeks: PLAN_DURATION_WEEKS,
        frequency,
        split_type: split,
        mesocycles: serde_json::json!(template.mesocycles),
        deload_weeks: template.deload_weeks.to_vec(),
    };

    let mut sessions = Vec::new();
    for week in 1..=PLAN_DURATION_WEEKS {
        let Some(mesocycle) = resolve_mesocycle(template, week) else {
            tracing::warn!(week, template = template.name, "No mesocycle for week, skipping");
            continue;
        };
        let is_deload = is_deload_week(template, week);

        let (sets, reps) = if is_deload {
            deload_adjust(mesocycle.effective_sets(), mesocycle.reps)
        } else {
            (mesocycle.effective_sets(), mesocycle.reps.to_string())
        };
        let rest_seconds = mesocycle.effective_rest();

        for (index, &day_of_week) in session_days_for_frequency(frequency).iter().enumerate() {
            let kind = session_type(split, index);
            let requirements = pattern_requirements(kind, &profile.scores);
            let chosen = select_exercises_for_session(
                catalog,
                &requirements,
                &constraints,
                &mut recent,
                picker,
            );

            let exercises = chosen
                .iter()
                .enumerate()
                .map(|(order, (_, exercise))| NewSessionExercise {
                    exercise_id: exercise.id.clone(),
                    order_index: order as u32 + 1,
                    sets,
                    reps: reps.clone(),
                    rest_seconds,
                    notes: coaching::coaching_notes(
                        exercise,
                        mesocycle,
                        rest_seconds,
                        is_deload,
                        &profile.injuries,
                    ),
                })
                .collect();

            sessions.push(SessionDraft {
                session: NewWorkoutSession {
                    week_number: week,
                    day_of_week,
                    session_number: index as u32 + 1,
                    scheduled_date: session_date(start, week, day_of_week)
                        .format("%Y-%m-%d")
                        .to_string(),
                    name: session_name(week, kind),
                    warm_up: coaching::warm_up(kind),
                    cool_down: coaching::cool_down(kind),
                    is_deload,
                },
                exercises,
            });
        }
    }

    PlanDraft { plan, sessions }
}

/// 주요 패턴별 공개 운동을 읽어 카탈로그를 만듭니다.
pub async fn load_catalog(pool: &SqlitePool) -> Result<ExerciseCatalog, AppError> {
    let mut by_pattern = HashMap::new();

    for pattern in db::list_primary_patterns(pool).await? {
        // 모르는 패턴 이름은 선택 대상이 아니므로 건너뜁니다
        let Some(kind) = PatternKind::from_name(&pattern.name) else {
            continue;
        };
        let exercises = db::find_by_pattern(pool, &pattern.id).await?;
        by_pattern.insert(kind, exercises);
    }

    Ok(ExerciseCatalog::new(by_pattern))
}

/// 초안을 트랜잭션 하나로 저장합니다.
///
/// 중간에 에러가 나면 `tx`가 커밋 없이 drop되어 자동으로 롤백됩니다.
pub async fn persist_draft(pool: &SqlitePool, draft: &PlanDraft) -> Result<GeneratedPlan, AppError> {
    // 풀에서 커넥션 하나를 꺼내 BEGIN을 실행합니다
    let mut tx = pool.begin().await?;

    // `&mut tx`는 `&mut SqliteConnection`으로 자동 역참조(deref)됩니다
    let workout_plan = db::create_plan(&mut tx, &draft.plan).await?;

    let mut exercises_count = 0;
    for session_draft in &draft.sessions {
        let session = db::create_session(&mut tx, &workout_plan.id, &session_draft.session).await?;
        for exercise in &session_draft.exercises {
            db::create_session_exercise(&mut tx, &session.id, exercise).await?;
            exercises_count += 1;
        }
    }

    // 여기까지 오면 모든 행이 한꺼번에 반영됩니다
    tx.commit().await?;

    Ok(GeneratedPlan {
        workout_plan,
        sessions_count: draft.sessions.len(),
        exercises_count,
    })
}

/// 사용자의 12주 플랜을 생성하고 저장합니다.
///
/// # 에러
/// - `ProfileIncomplete`: 프로필이 없거나 필수 항목이 비어 있음
/// - `BadRequest`: 프로필 값 형식 오류
/// - `Conflict`: 이미 활성 플랜이 있음
/// - `Database`: 저장소 오류 (이 경우 아무것도 커밋되지 않음)
pub async fn generate_workout_plan<P: Picker + Send>(
    pool: &SqlitePool,
    user_id: &str,
    recent_window_days: i64,
    picker: &mut P,
) -> Result<GeneratedPlan, AppError> {
    // 프로필 행이 아예 없으면 "profile" 항목이 비어 있는 것으로 봅니다
    let record = db::get_profile(pool, user_id)
        .await?
        .ok_or_else(|| AppError::ProfileIncomplete("profile".to_string()))?;
    let profile = record.validate()?;

    let catalog = load_catalog(pool).await?;
    let recent = db::recent_exercise_ids(pool, user_id, recent_window_days).await?;
    let favorites = db::favorite_exercise_ids(pool, user_id).await?;

    // 시작일은 요청 시점의 UTC 날짜
    let start = Utc::now().date_naive();
    let draft = build_plan(&profile, &catalog, recent, &favorites, start, picker);

    let generated = persist_draft(pool, &draft).await?;

    tracing::info!(
        user_id,
        plan_id = %generated.workout_plan.id,
        split = %draft.plan.split_type,
        frequency = draft.plan.frequency,
        sessions = generated.sessions_count,
        exercises = generated.exercises_count,
        "Generated workout plan"
    );

    Ok(generated)
}


#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::services::picker::FirstPicker;
    use crate::test_utils::*;
    use serial_test::serial;

    const USER: &str = "user-1";

    async fn generate(pool: &SqlitePool) -> Result<GeneratedPlan, AppError> {
        generate_workout_plan(pool, USER, 14, &mut FirstPicker).await
    }

    async fn exercise_rows(pool: &SqlitePool, plan_id: &str) -> Vec<Exercise> {
        let mut rows = Vec::new();
        for session_exercise in db::list_plan_exercises(pool, plan_id).await.unwrap() {
            let exercise = sqlx::query_as::<_, Exercise>(
                "SELECT id, name, movement_pattern_id, difficulty, equipment_required, \
                 contraindications, primary_muscles, is_published FROM exercises WHERE id = ?",
            )
            .bind(&session_exercise.exercise_id)
            .fetch_one(pool)
            .await
            .unwrap();
            rows.push(exercise);
        }
        rows
    }

    #[tokio::test]
    #[serial]
    async fn test_beginner_three_days_full_body() {
        let pool = setup_test_db().await;
        seed_profile(&pool, USER, &ProfileSeed::default()).await;

        let generated = generate(&pool).await.unwrap();
        let plan = &generated.workout_plan;

        assert_eq!(plan.split_type, "full-body");
        assert_eq!(plan.frequency, 3);
        assert_eq!(plan.duration_weeks, 12);
        assert_eq!(plan.status, "active");
        assert_eq!(plan.deload_weeks, vec![4, 8, 12]);
        assert_eq!(generated.sessions_count, 36);
        assert_eq!(generated.exercises_count, 180);

        let start = NaiveDate::parse_from_str(&plan.start_date, "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(&plan.end_date, "%Y-%m-%d").unwrap();
        assert_eq!((end - start).num_days(), 84);

        let sessions = db::list_sessions(&pool, &plan.id).await.unwrap();
        assert_eq!(sessions.len(), 36);
        assert_eq!(sessions[0].name, "Week 1 - Full Body A");
        assert!(sessions.iter().filter(|s| s.is_deload).all(|s| [4, 8, 12].contains(&s.week_number)));
        assert!(!sessions[0].warm_up.is_empty());

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_intermediate_four_days_upper_lower() {
        let pool = setup_test_db().await;
        let seed = ProfileSeed {
            experience: Some("intermediate"),
            days_per_week: Some(4),
            pull_up_bar: true,
            ..ProfileSeed::default()
        };
        seed_profile(&pool, USER, &seed).await;

        let generated = generate(&pool).await.unwrap();
        assert_eq!(generated.workout_plan.split_type, "upper-lower");
        assert_eq!(generated.sessions_count, 48);

        let sessions = db::list_sessions(&pool, &generated.workout_plan.id).await.unwrap();
        let week_one: Vec<&str> = sessions.iter().filter(|s| s.week_number == 1).map(|s| s.name.as_str()).collect();
        assert_eq!(week_one, vec!["Week 1 - Upper", "Week 1 - Lower", "Week 1 - Upper", "Week 1 - Lower"]);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_advanced_five_days_push_pull_legs() {
        let pool = setup_test_db().await;
        let seed = ProfileSeed {
            experience: Some("advanced"),
            days_per_week: Some(5),
            pull_up_bar: true,
            rings: true,
            ..ProfileSeed::default()
        };
        seed_profile(&pool, USER, &seed).await;

        let generated = generate(&pool).await.unwrap();
        assert_eq!(generated.workout_plan.split_type, "push-pull-legs");
        assert_eq!(generated.workout_plan.deload_weeks, vec![6, 12]);
        assert_eq!(generated.sessions_count, 60);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_score_creates_nothing() {
        let pool = setup_test_db().await;
        let seed = ProfileSeed {
            assessment_scores: Some(r#"{"pushLevel":5,"pullLevel":5,"squatLevel":5,"coreLevel":5}"#),
            ..ProfileSeed::default()
        };
        seed_profile(&pool, USER, &seed).await;

        let err = generate(&pool).await.unwrap_err();
        assert!(matches!(err, AppError::ProfileIncomplete(ref field) if field.contains("hingeLevel")));
        assert_eq!(count_rows(&pool, "workout_plans").await, 0);
        assert_eq!(count_rows(&pool, "workout_sessions").await, 0);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_profile_is_incomplete() {
        let pool = setup_test_db().await;

        let err = generate(&pool).await.unwrap_err();
        assert!(matches!(err, AppError::ProfileIncomplete(ref field) if field == "profile"));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_second_active_plan_conflicts() {
        let pool = setup_test_db().await;
        seed_profile(&pool, USER, &ProfileSeed::default()).await;

        generate(&pool).await.unwrap();
        let sessions_before = count_rows(&pool, "workout_sessions").await;

        let err = generate(&pool).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(count_rows(&pool, "workout_plans").await, 1);
        assert_eq!(count_rows(&pool, "workout_sessions").await, sessions_before);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_pattern_without_candidates_is_skipped() {
        let pool = setup_test_db().await;
        // 스쿼트 10 → 난이도 [9, 12]: 조끼가 필요한 운동뿐
        let seed = ProfileSeed {
            assessment_scores: Some(
                r#"{"pushLevel":5,"pullLevel":5,"squatLevel":10,"hingeLevel":5,"coreLevel":5}"#,
            ),
            ..ProfileSeed::default()
        };
        seed_profile(&pool, USER, &seed).await;

        let generated = generate(&pool).await.unwrap();
        assert_eq!(generated.sessions_count, 36);
        assert_eq!(generated.exercises_count, 36 * 4);

        let exercises = exercise_rows(&pool, &generated.workout_plan.id).await;
        assert!(exercises.iter().all(|e| e.movement_pattern_id != "mp-squat"));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_equipment_and_injuries_are_respected() {
        let pool = setup_test_db().await;
        let seed = ProfileSeed {
            experience: Some("intermediate"),
            days_per_week: Some(4),
            pull_up_bar: true,
            injuries: r#"["Knee"]"#,
            ..ProfileSeed::default()
        };
        seed_profile(&pool, USER, &seed).await;

        let generated = generate(&pool).await.unwrap();
        let owned = ["pull_up_bar"];
        for exercise in exercise_rows(&pool, &generated.workout_plan.id).await {
            assert!(
                exercise.equipment_required.iter().all(|item| owned.contains(&item.as_str())),
                "{} needs equipment the user does not have",
                exercise.id
            );
            assert!(
                !exercise.contraindications.iter().any(|tag| tag == "knee"),
                "{} is contraindicated",
                exercise.id
            );
        }

        teardown_test_db(pool).await;
    }

    async fn week_one_exercise_ids(pool: &SqlitePool, plan_id: &str) -> HashSet<String> {
        let week_one: HashSet<String> = db::list_sessions(pool, plan_id)
            .await
            .unwrap()
            .into_iter()
            .filter(|s| s.week_number == 1)
            .map(|s| s.id)
            .collect();
        db::list_plan_exercises(pool, plan_id)
            .await
            .unwrap()
            .into_iter()
            .filter(|e| week_one.contains(&e.session_id))
            .map(|e| e.exercise_id)
            .collect()
    }

    #[tokio::test]
    #[serial]
    async fn test_recently_completed_exercise_is_avoided() {
        let pool = setup_test_db().await;
        seed_profile(&pool, USER, &ProfileSeed::default()).await;
        seed_profile(&pool, "user-2", &ProfileSeed::default()).await;
        seed_workout_log(&pool, USER, "ex-assisted-pistol-squat", 1, "completed").await;

        // 기록이 없는 사용자는 첫 주에 이 운동을 받습니다
        let baseline = generate_workout_plan(&pool, "user-2", 14, &mut FirstPicker).await.unwrap();
        let baseline_ids = week_one_exercise_ids(&pool, &baseline.workout_plan.id).await;
        assert!(baseline_ids.contains("ex-assisted-pistol-squat"));

        let generated = generate(&pool).await.unwrap();
        let ids = week_one_exercise_ids(&pool, &generated.workout_plan.id).await;
        assert!(!ids.contains("ex-assisted-pistol-squat"));
        // 스쿼트 슬롯은 다른 신선한 후보로 채워짐
        assert!(ids.contains("ex-shrimp-squat"));
        assert!(ids.contains("ex-cossack-squat"));
        assert!(ids.contains("ex-bulgarian-split-squat"));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_old_or_skipped_logs_do_not_count_as_recent() {
        let pool = setup_test_db().await;
        seed_profile(&pool, USER, &ProfileSeed::default()).await;
        seed_workout_log(&pool, USER, "ex-assisted-pistol-squat", 30, "completed").await;
        seed_workout_log(&pool, USER, "ex-assisted-pistol-squat", 1, "skipped").await;

        let generated = generate(&pool).await.unwrap();
        let ids = week_one_exercise_ids(&pool, &generated.workout_plan.id).await;
        assert!(ids.contains("ex-assisted-pistol-squat"));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_fresh_favorite_is_preferred() {
        let pool = setup_test_db().await;
        seed_profile(&pool, USER, &ProfileSeed::default()).await;
        seed_favorite(&pool, USER, "ex-cossack-squat").await;

        let generated = generate(&pool).await.unwrap();
        let sessions = db::list_sessions(&pool, &generated.workout_plan.id).await.unwrap();
        let first_session = db::list_plan_exercises(&pool, &generated.workout_plan.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.session_id == sessions[0].id)
            .map(|e| e.exercise_id)
            .collect::<Vec<_>>();
        assert!(first_session.contains(&"ex-cossack-squat".to_string()));

        teardown_test_db(pool).await;
    }
}
