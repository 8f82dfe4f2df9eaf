// ABOUTME: Typed per-user accessor for history, feedback, current session, and plan records
// ABOUTME: Enforces retention caps and most-recent-first ordering on insert
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Per-user history accessor.
//!
//! Wraps a [`StoreHandle`] with a user id and the JSON encode/decode step.
//! Retention invariants live here: session history is capped at 100 records
//! and feedback at 10, both most-recent-first with the oldest trimmed on
//! insert.

use super::{user_key, StoreHandle};
use crate::constants::{history, store_keys};
use crate::errors::AppResult;
use crate::models::{FeedbackRecord, WeeklyPlan, WorkoutSession};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Typed reads and writes for one user's records
#[derive(Clone)]
pub struct HistoryStore {
    store: StoreHandle,
    user_id: String,
}

impl HistoryStore {
    #[must_use]
    pub fn new(store: StoreHandle, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    /// The user this accessor is bound to
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn load_json<T: DeserializeOwned>(&self, suffix: &str) -> AppResult<Option<T>> {
        let key = user_key(&self.user_id, suffix);
        match self.store.get(&key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save_json<T: Serialize>(&self, suffix: &str, value: &T) -> AppResult<()> {
        let key = user_key(&self.user_id, suffix);
        let raw = serde_json::to_string(value)?;
        self.store.put(&key, &raw).await
    }

    // ── Session history ─────────────────────────────────────────────────

    /// Load the session history, most recent first. Empty when none stored.
    pub async fn load_sessions(&self) -> AppResult<Vec<WorkoutSession>> {
        Ok(self
            .load_json(store_keys::HISTORY)
            .await?
            .unwrap_or_default())
    }

    /// Upsert a session into history by id, front-inserting new records and
    /// trimming to the retention cap.
    pub async fn record_session(&self, session: &WorkoutSession) -> AppResult<()> {
        let mut sessions = self.load_sessions().await?;
        if let Some(existing) = sessions.iter_mut().find(|s| s.id == session.id) {
            *existing = session.clone();
        } else {
            sessions.insert(0, session.clone());
            sessions.truncate(history::MAX_SESSION_HISTORY);
        }
        debug!(
            user_id = %self.user_id,
            session_id = %session.id,
            total = sessions.len(),
            "recorded session"
        );
        self.save_json(store_keys::HISTORY, &sessions).await
    }

    // ── Feedback ────────────────────────────────────────────────────────

    /// Load feedback records, most recent first
    pub async fn load_feedback(&self) -> AppResult<Vec<FeedbackRecord>> {
        Ok(self
            .load_json(store_keys::FEEDBACK)
            .await?
            .unwrap_or_default())
    }

    /// Append a feedback record, evicting the oldest beyond the cap
    pub async fn record_feedback(&self, record: FeedbackRecord) -> AppResult<()> {
        let mut records = self.load_feedback().await?;
        records.insert(0, record);
        records.truncate(history::MAX_FEEDBACK_RECORDS);
        self.save_json(store_keys::FEEDBACK, &records).await
    }

    // ── Current session ─────────────────────────────────────────────────

    /// Load the single current (pending/in-progress) session, if any
    pub async fn load_current_session(&self) -> AppResult<Option<WorkoutSession>> {
        self.load_json(store_keys::CURRENT_WORKOUT).await
    }

    /// Persist the current session, superseding any prior one
    pub async fn save_current_session(&self, session: &WorkoutSession) -> AppResult<()> {
        self.save_json(store_keys::CURRENT_WORKOUT, session).await
    }

    /// Drop the current-session record
    pub async fn clear_current_session(&self) -> AppResult<()> {
        let key = user_key(&self.user_id, store_keys::CURRENT_WORKOUT);
        self.store.delete(&key).await
    }

    // ── Weekly plan ─────────────────────────────────────────────────────

    /// Load the stored weekly plan without validity checks
    pub async fn load_plan(&self) -> AppResult<Option<WeeklyPlan>> {
        self.load_json(store_keys::WEEKLY_PLAN).await
    }

    /// Persist the weekly plan
    pub async fn save_plan(&self, plan: &WeeklyPlan) -> AppResult<()> {
        self.save_json(store_keys::WEEKLY_PLAN, plan).await
    }

    /// Drop the stored weekly plan
    pub async fn delete_plan(&self) -> AppResult<()> {
        let key = user_key(&self.user_id, store_keys::WEEKLY_PLAN);
        self.store.delete(&key).await
    }
}
