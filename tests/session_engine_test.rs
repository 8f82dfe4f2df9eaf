// ABOUTME: Integration tests for the session engine lifecycle
// ABOUTME: State transitions, set logging, substitution, early finish, persistence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use repforge::errors::{AppError, AppResult, ErrorCode};
use repforge::generation::catalog::SubstitutionReason;
use repforge::models::{ExerciseSpec, MuscleGroup, SessionStatus};
use repforge::session::{RestTimerEvent, SessionEngine, SubstitutionOutcome};
use repforge::store::{HistoryStore, KeyValueStore, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn test_history() -> HistoryStore {
    HistoryStore::new(Arc::new(MemoryStore::new()), "test-user")
}

fn bench_press(target_sets: u32, rest_seconds: u32) -> ExerciseSpec {
    ExerciseSpec {
        name: "Bench Press".to_owned(),
        target_sets,
        target_reps: "8-12".to_owned(),
        rest_seconds,
        equipment: "barbell".to_owned(),
        description: None,
        primary_muscle: MuscleGroup::Chest,
        secondary_muscles: vec![MuscleGroup::Triceps],
    }
}

async fn in_progress_engine(history: HistoryStore) -> anyhow::Result<SessionEngine> {
    let mut engine = SessionEngine::create(
        history,
        "Push Day",
        "Push",
        vec![bench_press(2, 0)],
        None,
    )
    .await?;
    engine.start().await?;
    Ok(engine)
}

/// Store whose writes always fail
struct FailingStore;

#[async_trait::async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("disk full"))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose deletes fail a fixed number of times, then recover
struct FlakyDeleteStore {
    inner: MemoryStore,
    failures_left: AtomicUsize,
}

impl FlakyDeleteStore {
    fn failing_once() -> Self {
        Self {
            inner: MemoryStore::new(),
            failures_left: AtomicUsize::new(1),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FlakyDeleteStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(AppError::storage("transient delete failure"));
        }
        self.inner.delete(key).await
    }
}

#[tokio::test]
async fn test_full_session_lifecycle() -> anyhow::Result<()> {
    let history = test_history();
    let mut engine = in_progress_engine(history.clone()).await?;
    assert_eq!(engine.session().status, SessionStatus::InProgress);
    assert!(engine.session().started_at.is_some());

    engine.complete_set(0, 50.0, 10).await?;
    assert!(!engine.session().exercises[0].completed);
    engine.complete_set(0, 50.0, 10).await?;
    assert!(engine.session().exercises[0].completed);

    let session = engine.complete().await?;
    assert_eq!(session.status, SessionStatus::Completed);
    assert!(session.ended_at.is_some());
    assert!((session.total_volume - 1000.0).abs() < f64::EPSILON);

    // Recorded into history, and the current-session slot is cleared
    let recorded = history.load_sessions().await?;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].id, session.id);
    assert!(SessionEngine::resume(history).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_session_starts_pending() -> anyhow::Result<()> {
    let engine = SessionEngine::create(
        test_history(),
        "Push Day",
        "Push",
        vec![bench_press(3, 60)],
        None,
    )
    .await?;
    assert_eq!(engine.session().status, SessionStatus::Pending);
    assert!(engine.session().started_at.is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_empty_exercise_list() {
    let result = SessionEngine::create(test_history(), "Empty", "Push", vec![], None).await;
    let err = result.err().expect("empty exercise list must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_set_logging_requires_in_progress() -> anyhow::Result<()> {
    let mut engine = SessionEngine::create(
        test_history(),
        "Push Day",
        "Push",
        vec![bench_press(3, 60)],
        None,
    )
    .await?;
    let err = engine.complete_set(0, 50.0, 10).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    assert!(engine.session().exercises[0].actual_sets.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_invalid_set_leaves_state_unchanged() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;

    assert_eq!(
        engine.complete_set(0, 0.0, 10).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );
    assert_eq!(
        engine.complete_set(0, 50.0, 0).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );
    assert_eq!(
        engine.complete_set(7, 50.0, 10).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let exercise = &engine.session().exercises[0];
    assert_eq!(exercise.completed_sets, 0);
    assert!(exercise.actual_sets.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_completed_exercise_rejects_more_sets() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;
    engine.complete_set(0, 50.0, 10).await?;
    engine.complete_set(0, 50.0, 10).await?;

    let err = engine.complete_set(0, 50.0, 10).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(engine.session().exercises[0].actual_sets.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_complete_requires_all_exercises_done() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;
    engine.complete_set(0, 50.0, 10).await?;

    let err = engine.complete().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(engine.session().status, SessionStatus::InProgress);
    Ok(())
}

#[tokio::test]
async fn test_finish_early_keeps_partial_progress() -> anyhow::Result<()> {
    let history = test_history();
    let mut engine = in_progress_engine(history.clone()).await?;
    engine.complete_set(0, 40.0, 5).await?;

    let session = engine.finish_early().await?;
    assert_eq!(session.status, SessionStatus::Completed);
    assert!((session.total_volume - 200.0).abs() < f64::EPSILON);
    assert!(!session.exercises[0].completed);

    let recorded = history.load_sessions().await?;
    assert_eq!(recorded.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rest_countdown_fires_between_sets() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;
    let mut events = engine.rest_events();

    engine.complete_set(0, 50.0, 10).await?;
    let event = tokio::time::timeout(Duration::from_secs(1), events.recv()).await??;
    assert_eq!(
        event,
        RestTimerEvent::Finished {
            duration: Duration::from_secs(0)
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_substitution_before_any_set() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;
    let outcome = engine
        .substitute_exercise(0, SubstitutionReason::Preference)
        .await?;

    match outcome {
        SubstitutionOutcome::Substituted(name) => {
            assert_ne!(name, "Bench Press");
            let exercise = &engine.session().exercises[0];
            assert_eq!(exercise.spec.name, name);
            assert_eq!(exercise.spec.primary_muscle, MuscleGroup::Chest);
            // Set/rep/rest targets carry over from the replaced exercise
            assert_eq!(exercise.spec.target_sets, 2);
            assert_eq!(exercise.completed_sets, 0);
        }
        SubstitutionOutcome::NoAlternative => {
            panic!("the catalog has multiple chest exercises")
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_substitution_rejected_after_logged_set() -> anyhow::Result<()> {
    let mut engine = in_progress_engine(test_history()).await?;
    engine.complete_set(0, 50.0, 10).await?;

    let err = engine
        .substitute_exercise(0, SubstitutionReason::Equipment)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(engine.session().exercises[0].spec.name, "Bench Press");
    Ok(())
}

#[tokio::test]
async fn test_resume_restores_in_progress_session() -> anyhow::Result<()> {
    let history = test_history();
    let session_id;
    {
        let mut engine = in_progress_engine(history.clone()).await?;
        engine.complete_set(0, 50.0, 10).await?;
        session_id = engine.session().id;
    }

    let engine = SessionEngine::resume(history)
        .await?
        .ok_or_else(|| anyhow::anyhow!("expected a resumable session"))?;
    assert_eq!(engine.session().id, session_id);
    assert_eq!(engine.session().status, SessionStatus::InProgress);
    assert_eq!(engine.session().exercises[0].completed_sets, 1);
    Ok(())
}

#[tokio::test]
async fn test_new_session_supersedes_pending_one() -> anyhow::Result<()> {
    let history = test_history();
    let _first = SessionEngine::create(
        history.clone(),
        "Push Day",
        "Push",
        vec![bench_press(3, 60)],
        None,
    )
    .await?;
    let second = SessionEngine::create(
        history.clone(),
        "Pull Day",
        "Pull",
        vec![bench_press(3, 60)],
        None,
    )
    .await?;

    let resumed = SessionEngine::resume(history)
        .await?
        .ok_or_else(|| anyhow::anyhow!("expected a resumable session"))?;
    assert_eq!(resumed.session().id, second.session().id);
    Ok(())
}

#[tokio::test]
async fn test_feedback_validation_and_recording() -> anyhow::Result<()> {
    let history = test_history();
    let engine = in_progress_engine(history.clone()).await?;

    let err = engine.record_feedback(0, None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let err = engine.record_feedback(6, None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    engine.record_feedback(4, Some("tough".to_owned())).await?;
    let feedback = history.load_feedback().await?;
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].difficulty, 4);
    assert_eq!(feedback[0].workout_id, engine.session().id);
    Ok(())
}

#[tokio::test]
async fn test_progression_raises_target_after_easy_week() -> anyhow::Result<()> {
    let history = test_history();

    let mut first = in_progress_engine(history.clone()).await?;
    first.complete_set(0, 100.0, 10).await?;
    first.complete_set(0, 100.0, 10).await?;
    first.complete().await?;
    first.record_feedback(2, None).await?;

    // Easy feedback (avg 2 < 3): 100 * 1.075 rounds to 108
    let next = SessionEngine::create(
        history,
        "Push Day",
        "Push",
        vec![bench_press(2, 60)],
        None,
    )
    .await?;
    assert!((next.session().exercises[0].target_weight - 108.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_persist_retry_clears_completed_session_slot() -> anyhow::Result<()> {
    let history = HistoryStore::new(Arc::new(FlakyDeleteStore::failing_once()), "test-user");
    let mut engine = in_progress_engine(history.clone()).await?;
    engine.complete_set(0, 50.0, 10).await?;
    engine.complete_set(0, 50.0, 10).await?;

    // clear_current_session fails after the history record succeeded
    let err = engine
        .complete()
        .await
        .err()
        .expect("first finalize must surface the delete failure");
    assert_eq!(err.code, ErrorCode::StorageError);
    assert_eq!(engine.session().status, SessionStatus::Completed);

    // The documented retry must also clear the current-session slot
    engine.persist().await?;
    assert!(SessionEngine::resume(history.clone()).await?.is_none());
    assert_eq!(history.load_sessions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_storage_error() {
    let history = HistoryStore::new(Arc::new(FailingStore), "test-user");
    let err = SessionEngine::create(
        history,
        "Push Day",
        "Push",
        vec![bench_press(3, 60)],
        None,
    )
    .await
    .err()
    .expect("write through a failing store must error");
    assert_eq!(err.code, ErrorCode::StorageError);
    assert!(err.code.is_retryable());
}
