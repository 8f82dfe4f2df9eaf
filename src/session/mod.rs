// ABOUTME: Session engine state machine driving one workout through its lifecycle
// ABOUTME: Pending -> InProgress -> Completed with set logging, substitution, and rest timing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Session Engine
//!
//! Drives a single workout session through its exercise/set lifecycle.
//! Explicit context only: each engine instance owns one session and a
//! [`HistoryStore`] bound to one user, so multiple engines can run side by
//! side (e.g. in tests). Mutations apply to in-memory state first and are
//! then persisted as a whole-record upsert; a persistence failure leaves the
//! in-memory session authoritative and [`persist`](SessionEngine::persist)
//! retryable.

/// Cancelable rest-countdown scheduled task
pub mod timer;

pub use timer::{RestTimer, RestTimerEvent};

use crate::errors::{AppError, AppResult};
use crate::generation::catalog::{self, SubstitutionReason};
use crate::models::{
    ActualSet, ExerciseProgress, ExerciseSpec, SessionStatus, WorkoutSession, WorkoutTemplate,
};
use crate::progression;
use crate::store::HistoryStore;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

/// Result of a substitution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionOutcome {
    /// The exercise was replaced; carries the substitute's name
    Substituted(String),
    /// No catalog candidate qualified; the session is unchanged
    NoAlternative,
}

/// State machine for one active workout session
pub struct SessionEngine {
    session: WorkoutSession,
    history: HistoryStore,
    rest_timer: RestTimer,
}

impl SessionEngine {
    /// Create a session from an exercise list.
    ///
    /// Weight targets come from the progression calculator over the user's
    /// history and feedback. The new session supersedes any prior
    /// pending/in-progress session: persistence overwrites the single
    /// current-session record.
    ///
    /// # Errors
    ///
    /// Returns an error when the exercise list is empty or history cannot
    /// be read/written.
    pub async fn create(
        history: HistoryStore,
        name: impl Into<String>,
        workout_type: impl Into<String>,
        exercises: Vec<ExerciseSpec>,
        plan_day_index: Option<usize>,
    ) -> AppResult<Self> {
        if exercises.is_empty() {
            return Err(AppError::invalid_input("a session needs at least one exercise"));
        }

        let sessions = history.load_sessions().await?;
        let feedback = history.load_feedback().await?;

        let progress = exercises
            .into_iter()
            .map(|spec| {
                let target = progression::weight_target_for(&sessions, &feedback, &spec.name);
                ExerciseProgress::from_spec(spec, target)
            })
            .collect();

        let session = WorkoutSession {
            id: Uuid::new_v4(),
            name: name.into(),
            workout_type: workout_type.into(),
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
            status: SessionStatus::Pending,
            exercises: progress,
            total_volume: 0.0,
            plan_day_index,
        };

        let engine = Self {
            session,
            history,
            rest_timer: RestTimer::new(),
        };
        engine.persist().await?;
        info!(session_id = %engine.session.id, "session created");
        Ok(engine)
    }

    /// Create a session from a plan-day workout template
    pub async fn from_template(
        history: HistoryStore,
        template: &WorkoutTemplate,
        plan_day_index: Option<usize>,
    ) -> AppResult<Self> {
        Self::create(
            history,
            template.name.clone(),
            template.split.to_string(),
            template.exercises.clone(),
            plan_day_index,
        )
        .await
    }

    /// Resume the persisted current session, if one exists and is not
    /// already completed.
    pub async fn resume(history: HistoryStore) -> AppResult<Option<Self>> {
        let Some(session) = history.load_current_session().await? else {
            return Ok(None);
        };
        if session.status == SessionStatus::Completed {
            return Ok(None);
        }
        Ok(Some(Self {
            session,
            history,
            rest_timer: RestTimer::new(),
        }))
    }

    /// The session under management
    #[must_use]
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    /// Subscribe to rest-countdown events
    #[must_use]
    pub fn rest_events(&self) -> broadcast::Receiver<RestTimerEvent> {
        self.rest_timer.subscribe()
    }

    /// Begin the workout: `Pending` to `InProgress`.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session is `Pending`.
    pub async fn start(&mut self) -> AppResult<()> {
        if self.session.status != SessionStatus::Pending {
            return Err(AppError::invalid_state(format!(
                "cannot start a {} session",
                self.session.status
            )));
        }
        self.session.started_at = Some(Utc::now());
        self.session.status = SessionStatus::InProgress;
        self.persist().await
    }

    /// Log a completed set for an exercise.
    ///
    /// Validation happens before any mutation: the session must be
    /// `InProgress`, the index known, the exercise not yet complete, and
    /// weight/reps positive. When more sets remain for the exercise an
    /// advisory rest countdown starts; it never blocks a following set.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for non-positive weight/reps or an unknown index,
    /// `InvalidState` for a wrong session state or already-complete
    /// exercise; storage errors surface with in-memory state retained.
    pub async fn complete_set(
        &mut self,
        exercise_index: usize,
        weight: f64,
        reps: u32,
    ) -> AppResult<()> {
        if self.session.status != SessionStatus::InProgress {
            return Err(AppError::invalid_state(format!(
                "cannot log sets on a {} session",
                self.session.status
            )));
        }
        if weight <= 0.0 {
            return Err(AppError::invalid_input("weight must be positive"));
        }
        if reps == 0 {
            return Err(AppError::invalid_input("reps must be positive"));
        }
        let exercise = self
            .session
            .exercises
            .get_mut(exercise_index)
            .ok_or_else(|| {
                AppError::invalid_input(format!("unknown exercise index {exercise_index}"))
            })?;
        if exercise.completed {
            return Err(AppError::invalid_state(format!(
                "exercise '{}' is already complete",
                exercise.spec.name
            )));
        }

        exercise
            .actual_sets
            .push(ActualSet::new(weight, reps, Utc::now()));
        exercise.completed_sets += 1;
        if exercise.completed_sets == exercise.spec.target_sets {
            exercise.completed = true;
        }

        let rest = Duration::from_secs(u64::from(exercise.spec.rest_seconds));
        let exercise_done = exercise.completed;
        debug!(
            exercise = %self.session.exercises[exercise_index].spec.name,
            set = self.session.exercises[exercise_index].completed_sets,
            "set logged"
        );

        if exercise_done {
            self.rest_timer.cancel();
        } else {
            self.rest_timer.schedule(rest);
        }

        self.persist().await
    }

    /// Replace an exercise with a catalog alternative.
    ///
    /// Allowed while `Pending` or `InProgress`, and only before any set has
    /// been logged for that exercise. The substitute keeps the current
    /// set/rep/rest targets; its weight target is recomputed from history.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown index, `InvalidState` for a completed
    /// session or an exercise with partial progress.
    pub async fn substitute_exercise(
        &mut self,
        exercise_index: usize,
        reason: SubstitutionReason,
    ) -> AppResult<SubstitutionOutcome> {
        if self.session.status == SessionStatus::Completed {
            return Err(AppError::invalid_state(
                "cannot substitute in a completed session",
            ));
        }
        let exercise = self
            .session
            .exercises
            .get(exercise_index)
            .ok_or_else(|| {
                AppError::invalid_input(format!("unknown exercise index {exercise_index}"))
            })?;
        if exercise.completed_sets > 0 {
            return Err(AppError::invalid_state(
                "cannot substitute an exercise with logged sets",
            ));
        }

        let Some(candidate) = catalog::pick_alternative(&exercise.spec, reason) else {
            info!(exercise = %exercise.spec.name, "no substitution alternative available");
            return Ok(SubstitutionOutcome::NoAlternative);
        };

        let sessions = self.history.load_sessions().await?;
        let feedback = self.history.load_feedback().await?;
        let target_weight = progression::weight_target_for(&sessions, &feedback, candidate.name);

        let current = &self.session.exercises[exercise_index].spec;
        let substitute = ExerciseSpec {
            name: candidate.name.to_owned(),
            target_sets: current.target_sets,
            target_reps: current.target_reps.clone(),
            rest_seconds: current.rest_seconds,
            equipment: candidate.equipment.to_owned(),
            description: None,
            primary_muscle: candidate.primary,
            secondary_muscles: candidate.secondary.to_vec(),
        };
        let name = substitute.name.clone();
        self.session.exercises[exercise_index] =
            ExerciseProgress::from_spec(substitute, target_weight);

        self.persist().await?;
        info!(substitute = %name, "exercise substituted");
        Ok(SubstitutionOutcome::Substituted(name))
    }

    /// Finish the workout: `InProgress` to `Completed`.
    ///
    /// Requires every exercise complete; use
    /// [`finish_early`](Self::finish_early) to terminate with partial
    /// progress. Computes total volume, cancels the rest countdown, records
    /// the session into history, and clears the current-session record.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `InProgress` with all exercises complete.
    pub async fn complete(&mut self) -> AppResult<&WorkoutSession> {
        if self.session.status != SessionStatus::InProgress {
            return Err(AppError::invalid_state(format!(
                "cannot complete a {} session",
                self.session.status
            )));
        }
        if !self.session.all_exercises_completed() {
            return Err(AppError::invalid_state(
                "exercises remain; finish them or terminate early",
            ));
        }
        self.finalize().await
    }

    /// Explicit early termination: `InProgress` to `Completed` with
    /// whatever progress exists.
    pub async fn finish_early(&mut self) -> AppResult<&WorkoutSession> {
        if self.session.status != SessionStatus::InProgress {
            return Err(AppError::invalid_state(format!(
                "cannot terminate a {} session",
                self.session.status
            )));
        }
        self.finalize().await
    }

    async fn finalize(&mut self) -> AppResult<&WorkoutSession> {
        self.session.ended_at = Some(Utc::now());
        self.session.status = SessionStatus::Completed;
        self.session.total_volume = self.session.computed_volume();
        self.rest_timer.cancel();

        self.persist().await?;
        info!(
            session_id = %self.session.id,
            total_volume = self.session.total_volume,
            "session completed"
        );
        Ok(&self.session)
    }

    /// Record the user's post-session difficulty rating.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless difficulty is within 1-5.
    pub async fn record_feedback(
        &self,
        difficulty: u8,
        comments: Option<String>,
    ) -> AppResult<()> {
        if !(1..=5).contains(&difficulty) {
            return Err(AppError::invalid_input("difficulty must be between 1 and 5"));
        }
        self.history
            .record_feedback(crate::models::FeedbackRecord {
                workout_id: self.session.id,
                difficulty,
                comments,
                recorded_at: Utc::now(),
            })
            .await
    }

    /// Advisory elapsed time since the session started. Presentation only;
    /// gates nothing.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.session.started_at.map(|start| Utc::now() - start)
    }

    /// Re-save the session. A failed mutating call leaves in-memory state
    /// committed, so this whole-record upsert is the retry path for
    /// persistence errors.
    ///
    /// For a completed session this both re-records into history and clears
    /// the current-session slot, so a retry after a partial finalize cannot
    /// leave a resumable ghost of an already-recorded session.
    pub async fn persist(&self) -> AppResult<()> {
        if self.session.status == SessionStatus::Completed {
            self.history.record_session(&self.session).await?;
            self.history.clear_current_session().await
        } else {
            self.history.save_current_session(&self.session).await
        }
    }
}
