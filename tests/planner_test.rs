// ABOUTME: Integration tests for weekly plan generation and tracking
// ABOUTME: Split selection, catalog fallback, week invalidation, day gating, completion events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{Duration as ChronoDuration, Utc};
use repforge::errors::{AppError, AppResult, ErrorCode};
use repforge::generation::{GenerationRequest, WorkoutGenerator};
use repforge::models::{
    ExerciseSpec, ExperienceLevel, FitnessGoal, MuscleGroup, SessionStatus, TrainingLocation,
    UserProfile, WorkoutStyle,
};
use repforge::planner::{PlanEvent, WeeklyPlanner};
use repforge::store::{HistoryStore, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn test_history() -> HistoryStore {
    HistoryStore::new(Arc::new(MemoryStore::new()), "test-user")
}

fn test_profile(frequency: u8, level: ExperienceLevel) -> UserProfile {
    UserProfile {
        age: 30,
        weight_kg: 80.0,
        height_cm: 180.0,
        level,
        goal: FitnessGoal::GainMuscle,
        workout_style: WorkoutStyle::Strength,
        location: TrainingLocation::Gym,
        session_duration_min: 60,
        weekly_frequency: frequency,
        limitations: None,
    }
}

/// Generator stub: counts calls, optionally fails every request
#[derive(Default)]
struct StubGenerator {
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl WorkoutGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<ExerciseSpec>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("stub", "unavailable"));
        }
        Ok(vec![ExerciseSpec {
            name: format!("Stub {}", request.split),
            target_sets: 3,
            target_reps: "8-12".to_owned(),
            rest_seconds: 60,
            equipment: "barbell".to_owned(),
            description: None,
            primary_muscle: MuscleGroup::Chest,
            secondary_muscles: vec![],
        }])
    }
}

fn planner_with(
    history: HistoryStore,
    generator: StubGenerator,
    reminder_delay: Duration,
) -> (WeeklyPlanner, Arc<StubGenerator>) {
    let generator = Arc::new(generator);
    let planner = WeeklyPlanner::new(history, generator.clone(), reminder_delay);
    (planner, generator)
}

#[tokio::test]
async fn test_generated_plan_matches_split_table() -> anyhow::Result<()> {
    let (planner, generator) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    let plan = planner
        .generate_weekly_plan(&test_profile(4, ExperienceLevel::Intermediate))
        .await?;

    assert_eq!(plan.days.len(), 7);
    assert_eq!(plan.training_day_count(), 4);
    for day in &plan.days {
        assert_eq!(day.workout.is_some(), day.split.is_training_day());
        assert!(!day.completed);
        if let Some(workout) = &day.workout {
            // Template names render the level as a human-readable label
            assert!(workout.name.ends_with("- Intermediate"), "{}", workout.name);
        }
    }
    // One generation call per training day
    assert_eq!(generator.calls.load(Ordering::SeqCst), 4);
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_falls_back_to_catalog() -> anyhow::Result<()> {
    let (planner, _) = planner_with(
        test_history(),
        StubGenerator {
            fail: true,
            calls: AtomicUsize::new(0),
        },
        Duration::from_secs(60),
    );
    let plan = planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;

    for day in plan.days.iter().filter(|d| d.split.is_training_day()) {
        let workout = day.workout.as_ref().expect("training day has a workout");
        assert!(
            !workout.exercises.is_empty(),
            "catalog fallback must fill {}",
            day.split
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_plan_from_previous_week_is_discarded() -> anyhow::Result<()> {
    let history = test_history();
    let (planner, _) = planner_with(
        history.clone(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );

    let mut plan = planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;
    plan.created_at = Utc::now() - ChronoDuration::days(8);
    history.save_plan(&plan).await?;

    assert!(planner.load_plan().await?.is_none());
    // The stale record was deleted, not just hidden
    assert!(history.load_plan().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_current_week_plan_survives_load() -> anyhow::Result<()> {
    let (planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    let plan = planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;

    let loaded = planner
        .load_plan()
        .await?
        .ok_or_else(|| anyhow::anyhow!("expected the plan to survive"))?;
    assert_eq!(loaded.id, plan.id);
    Ok(())
}

#[tokio::test]
async fn test_week_completion_emits_event_and_reminder() -> anyhow::Result<()> {
    let (mut planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_millis(20),
    );
    let mut events = planner.subscribe();
    let plan = planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;

    let training_days: Vec<usize> = plan
        .days
        .iter()
        .filter(|d| d.split.is_training_day())
        .map(|d| d.day_index)
        .collect();
    for &day_index in &training_days {
        planner.mark_day_completed(day_index).await?;
    }

    let event = tokio::time::timeout(Duration::from_secs(1), events.recv()).await??;
    assert_eq!(event, PlanEvent::WeekCompleted { plan_id: plan.id });
    let event = tokio::time::timeout(Duration::from_secs(1), events.recv()).await??;
    assert_eq!(event, PlanEvent::NextWeekReminder);
    Ok(())
}

#[tokio::test]
async fn test_day_gating() -> anyhow::Result<()> {
    let (planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;
    let now = Utc::now();

    // 3-day beginner split rests on day 1
    let err = planner
        .start_day_at(1, now, 6)
        .await
        .err()
        .expect("rest day must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidState);

    // Day 4 cannot start while today is day 0
    let err = planner
        .start_day_at(4, now, 0)
        .await
        .err()
        .expect("future day must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidState);

    let err = planner
        .start_day_at(9, now, 6)
        .await
        .err()
        .expect("out-of-range day must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let session = planner.start_day_at(0, now, 3).await?;
    assert_eq!(session.session().plan_day_index, Some(0));
    assert_eq!(session.session().status, SessionStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_operations_without_plan_are_not_found() -> anyhow::Result<()> {
    let (mut planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );

    let err = planner
        .start_day_at(0, Utc::now(), 3)
        .await
        .err()
        .expect("starting without a plan must fail");
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = planner
        .mark_day_completed(0)
        .await
        .err()
        .expect("completing without a plan must fail");
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_completed_day_cannot_restart() -> anyhow::Result<()> {
    let (mut planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;
    planner.mark_day_completed(0).await?;

    let err = planner
        .start_day_at(0, Utc::now(), 6)
        .await
        .err()
        .expect("completed day must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidState);
    Ok(())
}

#[tokio::test]
async fn test_session_completion_marks_plan_day() -> anyhow::Result<()> {
    let (mut planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    planner
        .generate_weekly_plan(&test_profile(3, ExperienceLevel::Beginner))
        .await?;

    let mut engine = planner.start_day_at(0, Utc::now(), 3).await?;
    engine.start().await?;
    engine.complete_set(0, 50.0, 10).await?;
    engine.complete_set(0, 50.0, 10).await?;
    engine.complete_set(0, 50.0, 10).await?;
    let session = engine.complete().await?.clone();

    planner.on_session_completed(&session).await?;
    let plan = planner
        .load_plan()
        .await?
        .ok_or_else(|| anyhow::anyhow!("plan must still exist"))?;
    assert!(plan.days[0].completed);
    assert!(!plan.week_completed());
    Ok(())
}

#[tokio::test]
async fn test_regenerate_replaces_plan() -> anyhow::Result<()> {
    let (planner, _) = planner_with(
        test_history(),
        StubGenerator::default(),
        Duration::from_secs(60),
    );
    let profile = test_profile(3, ExperienceLevel::Beginner);
    let first = planner.generate_weekly_plan(&profile).await?;
    let second = planner.regenerate_plan(&profile).await?;
    assert_ne!(first.id, second.id);

    let loaded = planner
        .load_plan()
        .await?
        .ok_or_else(|| anyhow::anyhow!("expected a plan"))?;
    assert_eq!(loaded.id, second.id);
    Ok(())
}
