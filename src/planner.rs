// ABOUTME: Weekly plan generation and completion tracking
// ABOUTME: Split selection by frequency/level, generation-service fill with catalog fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Plan Generator & Tracker
//!
//! Builds a rolling seven-day training plan and tracks day completion. A
//! plan is valid only for the calendar week containing its creation time;
//! loading a plan created before the current week's Monday discards it.
//! Generation-service failures are invisible to callers: each training day
//! falls back to the rule-based catalog.

use crate::constants::{channels, history as history_consts, planner as planner_consts};
use crate::errors::{AppError, AppResult};
use crate::generation::{catalog, GenerationRequest, WorkoutGenerator};
use crate::models::{
    DayPlan, ExperienceLevel, SplitLabel, UserProfile, WeeklyPlan, WorkoutSession,
    WorkoutTemplate,
};
use crate::session::SessionEngine;
use crate::store::HistoryStore;
use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted while tracking a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEvent {
    /// Every non-rest day of the plan is complete
    WeekCompleted { plan_id: Uuid },
    /// Fired a configurable delay after week completion
    NextWeekReminder,
}

/// Weekly plan generator and tracker for one user
pub struct WeeklyPlanner {
    history: HistoryStore,
    generator: Arc<dyn WorkoutGenerator>,
    events: broadcast::Sender<PlanEvent>,
    reminder: Option<JoinHandle<()>>,
    reminder_delay: Duration,
}

impl WeeklyPlanner {
    #[must_use]
    pub fn new(
        history: HistoryStore,
        generator: Arc<dyn WorkoutGenerator>,
        reminder_delay: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(channels::PLAN_EVENT_CHANNEL_SIZE);
        Self {
            history,
            generator,
            events,
            reminder: None,
            reminder_delay,
        }
    }

    /// Subscribe to plan events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlanEvent> {
        self.events.subscribe()
    }

    /// Build and persist a fresh weekly plan for the profile.
    ///
    /// Each training day is filled through the generation service with the
    /// profile and recent feedback as context; any service failure falls
    /// back to the catalog and is never surfaced.
    ///
    /// # Errors
    ///
    /// Only persistence errors propagate.
    pub async fn generate_weekly_plan(&self, profile: &UserProfile) -> AppResult<WeeklyPlan> {
        let splits = split_table(profile.weekly_frequency, profile.level);
        let feedback_context = self.feedback_context().await?;

        let mut days = Vec::with_capacity(planner_consts::DAYS_PER_WEEK);
        for (day_index, &split) in splits.iter().enumerate() {
            let workout = if split.is_training_day() {
                Some(self.day_workout(profile, split, &feedback_context).await)
            } else {
                None
            };
            days.push(DayPlan {
                day_index,
                split,
                workout,
                completed: false,
            });
        }

        let plan = WeeklyPlan {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            profile: profile.clone(),
            frequency: profile.weekly_frequency,
            days,
        };
        self.history.save_plan(&plan).await?;
        info!(plan_id = %plan.id, frequency = plan.frequency, "weekly plan generated");
        Ok(plan)
    }

    /// Fill one training day, falling back to the catalog on any failure
    async fn day_workout(
        &self,
        profile: &UserProfile,
        split: SplitLabel,
        feedback_context: &[String],
    ) -> WorkoutTemplate {
        let request = GenerationRequest {
            profile: profile.clone(),
            split,
            recent_feedback: feedback_context.to_vec(),
        };
        let exercises = match self.generator.generate(&request).await {
            Ok(exercises) => exercises,
            Err(e) => {
                warn!(%split, error = %e, "generation failed, using rule-based catalog");
                catalog::fallback_workout(split, profile.location, profile.level)
            }
        };
        WorkoutTemplate {
            name: format!("{split} - {}", profile.level),
            split,
            exercises,
            estimated_duration_min: profile.session_duration_min,
            difficulty: catalog::template_difficulty(profile.level),
        }
    }

    /// Recent feedback summaries forwarded to the generation service
    async fn feedback_context(&self) -> AppResult<Vec<String>> {
        let feedback = self.history.load_feedback().await?;
        Ok(feedback
            .iter()
            .take(history_consts::GENERATION_CONTEXT_WINDOW)
            .map(|f| match &f.comments {
                Some(comments) => format!("difficulty {}/5 - \"{comments}\"", f.difficulty),
                None => format!("difficulty {}/5", f.difficulty),
            })
            .collect())
    }

    /// Load the stored plan, discarding it when stale.
    ///
    /// A plan created before Monday 00:00 UTC of the current week never
    /// rolls over: it is deleted and `None` returned.
    pub async fn load_plan(&self) -> AppResult<Option<WeeklyPlan>> {
        self.load_plan_at(Utc::now()).await
    }

    /// [`load_plan`](Self::load_plan) against an explicit clock
    pub async fn load_plan_at(&self, now: DateTime<Utc>) -> AppResult<Option<WeeklyPlan>> {
        let Some(plan) = self.history.load_plan().await? else {
            return Ok(None);
        };
        if plan.created_at < week_start(now) {
            info!(plan_id = %plan.id, "discarding plan from a previous week");
            self.history.delete_plan().await?;
            return Ok(None);
        }
        Ok(Some(plan))
    }

    /// Mark a plan day complete.
    ///
    /// When the last non-rest day completes, a [`PlanEvent::WeekCompleted`]
    /// is emitted and a reminder scheduled after the configured delay.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when no current-week plan exists, `InvalidInput`
    /// for an out-of-range day index.
    pub async fn mark_day_completed(&mut self, day_index: usize) -> AppResult<()> {
        let Some(mut plan) = self.load_plan().await? else {
            return Err(AppError::not_found("weekly plan"));
        };
        let day = plan.days.get_mut(day_index).ok_or_else(|| {
            AppError::invalid_input(format!("day index {day_index} out of range"))
        })?;
        day.completed = true;
        self.history.save_plan(&plan).await?;

        if plan.week_completed() {
            info!(plan_id = %plan.id, "training week completed");
            drop(self.events.send(PlanEvent::WeekCompleted { plan_id: plan.id }));
            self.schedule_reminder();
        }
        Ok(())
    }

    /// Schedule the post-week reminder, superseding any pending one
    fn schedule_reminder(&mut self) {
        if let Some(pending) = self.reminder.take() {
            pending.abort();
        }
        let events = self.events.clone();
        let delay = self.reminder_delay;
        self.reminder = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            drop(events.send(PlanEvent::NextWeekReminder));
        }));
    }

    /// Discard the current plan unconditionally and build a new one
    pub async fn regenerate_plan(&self, profile: &UserProfile) -> AppResult<WeeklyPlan> {
        self.history.delete_plan().await?;
        self.generate_weekly_plan(profile).await
    }

    /// Start the session for a plan day.
    ///
    /// Only the current or an earlier not-yet-completed training day of
    /// this week may start; out-of-order starts of future days are
    /// rejected rather than silently mis-tracked.
    pub async fn start_day(&self, day_index: usize) -> AppResult<SessionEngine> {
        let now = Utc::now();
        self.start_day_at(day_index, now, now.weekday().num_days_from_monday() as usize)
            .await
    }

    /// [`start_day`](Self::start_day) against an explicit clock
    pub async fn start_day_at(
        &self,
        day_index: usize,
        now: DateTime<Utc>,
        today_offset: usize,
    ) -> AppResult<SessionEngine> {
        let Some(plan) = self.load_plan_at(now).await? else {
            return Err(AppError::not_found("weekly plan"));
        };
        let day = plan.days.get(day_index).ok_or_else(|| {
            AppError::invalid_input(format!("day index {day_index} out of range"))
        })?;
        if !day.split.is_training_day() {
            return Err(AppError::invalid_state("cannot start a rest day"));
        }
        if day.completed {
            return Err(AppError::invalid_state("day is already completed"));
        }
        if day_index > today_offset {
            return Err(AppError::invalid_state("cannot start a future plan day"));
        }
        let template = day.workout.as_ref().ok_or_else(|| {
            AppError::invalid_state("plan day carries no workout")
        })?;

        SessionEngine::from_template(self.history.clone(), template, Some(day_index)).await
    }

    /// Map a completed session back to its plan day (1:1 linkage).
    ///
    /// Sessions not started from a plan are ignored.
    pub async fn on_session_completed(&mut self, session: &WorkoutSession) -> AppResult<()> {
        if let Some(day_index) = session.plan_day_index {
            self.mark_day_completed(day_index).await?;
        }
        Ok(())
    }
}

impl Drop for WeeklyPlanner {
    fn drop(&mut self) {
        if let Some(pending) = self.reminder.take() {
            pending.abort();
        }
    }
}

/// Monday 00:00 UTC of the week containing `now`
#[must_use]
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let monday = date - ChronoDuration::days(i64::from(date.weekday().num_days_from_monday()));
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Seven-day split assignment for a (frequency, level) pair.
///
/// Frequencies 3-6 have dedicated tables per level; anything else falls
/// back to the 3-day beginner template.
#[must_use]
pub fn split_table(frequency: u8, level: ExperienceLevel) -> [SplitLabel; 7] {
    use ExperienceLevel::{Advanced, Beginner, Intermediate};
    use SplitLabel::{
        Cardio, FullBodyA, FullBodyB, FullBodyC, Legs, Lower, Pull, Push, Rest, Upper,
    };

    match (frequency, level) {
        (3, Beginner) => [FullBodyA, Rest, FullBodyB, Rest, FullBodyC, Rest, Rest],
        (3, Intermediate) => [Push, Rest, Pull, Rest, Legs, Rest, Rest],
        (3, Advanced) => [Push, Pull, Rest, Legs, Rest, Upper, Rest],
        (4, Beginner) => [Upper, Lower, Rest, Upper, Lower, Rest, Rest],
        (4, Intermediate) => [Push, Pull, Rest, Legs, Push, Rest, Rest],
        (4, Advanced) => [Push, Pull, Legs, Rest, Push, Pull, Rest],
        (5, Beginner) => [Push, Pull, Rest, Legs, Upper, Rest, Rest],
        (5, Intermediate) => [Push, Pull, Legs, Rest, Push, Pull, Rest],
        (5, Advanced) => [Push, Pull, Legs, Push, Pull, Rest, Legs],
        (6, Beginner) => [Push, Pull, Legs, Rest, Push, Pull, Rest],
        (6, Intermediate) => [Push, Pull, Legs, Push, Pull, Legs, Rest],
        (6, Advanced) => [Push, Pull, Legs, Push, Pull, Legs, Cardio],
        // Unknown combination: safest default
        _ => [FullBodyA, Rest, FullBodyB, Rest, FullBodyC, Rest, Rest],
    }
}
