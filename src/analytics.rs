// ABOUTME: Training history analytics: streaks, achievements, next-workout recommendation
// ABOUTME: Pure functions over the session history, injectable clock for determinism
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Streak & Recommendation Analytics
//!
//! Read-only computations over completed sessions. The caller passes the
//! reference date explicitly so day-boundary behavior is testable.

use crate::constants::history as history_consts;
use crate::models::{SessionStatus, UserProfile, WorkoutSession, WorkoutStyle};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;

/// A milestone derived from the session history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// The calendar date a session counts toward
fn session_date(session: &WorkoutSession) -> NaiveDate {
    session
        .ended_at
        .unwrap_or(session.created_at)
        .date_naive()
}

fn completed(sessions: &[WorkoutSession]) -> impl Iterator<Item = &WorkoutSession> {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
}

/// Consecutive training days ending at `today`.
///
/// Multiple sessions on one day count once. Walks the distinct workout
/// dates backwards; the streak grows only while each date sits exactly
/// `streak` days behind `today`, so a missed day (including today itself)
/// resets it to 0.
#[must_use]
pub fn current_streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    // BTreeSet dedupes same-day sessions and iterates ascending
    let days: BTreeSet<NaiveDate> = completed(sessions).map(session_date).collect();

    let mut streak = 0u32;
    for day in days.iter().rev() {
        let days_back = (today - *day).num_days();
        if days_back == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Completed sessions within the trailing `days`-day window
#[must_use]
pub fn workouts_in_last_days(
    sessions: &[WorkoutSession],
    days: i64,
    now: DateTime<Utc>,
) -> usize {
    let cutoff = now - chrono::Duration::days(days);
    completed(sessions)
        .filter(|s| s.ended_at.unwrap_or(s.created_at) >= cutoff)
        .count()
}

/// Candidate workout names for a training style, in preference order
#[must_use]
pub fn style_candidates(style: WorkoutStyle) -> &'static [&'static str] {
    match style {
        WorkoutStyle::Strength => &["Push Day", "Pull Day", "Leg Day", "Upper Body Strength"],
        WorkoutStyle::Cardio => &["Steady-State Cardio", "Interval Run", "Incline Walk"],
        WorkoutStyle::Hiit => &["HIIT Full Body", "HIIT Lower Body", "Tabata Core"],
        WorkoutStyle::Functional => &["Functional Circuit", "Kettlebell Flow", "Core & Mobility"],
        WorkoutStyle::Mixed => &[
            "Push Day",
            "HIIT Full Body",
            "Steady-State Cardio",
            "Functional Circuit",
        ],
    }
}

/// Pick the next workout, avoiding what the user just did.
///
/// Candidates for the profile's style are filtered against the types of
/// the last three sessions by case-insensitive substring match; when every
/// candidate was done recently, the first candidate wins anyway.
#[must_use]
pub fn recommend_workout(profile: &UserProfile, sessions: &[WorkoutSession]) -> &'static str {
    let candidates = style_candidates(profile.workout_style);
    let recent: Vec<String> = sessions
        .iter()
        .take(history_consts::RECENT_SESSION_WINDOW)
        .map(|s| s.workout_type.to_lowercase())
        .collect();

    candidates
        .iter()
        .copied()
        .find(|candidate| {
            let candidate = candidate.to_lowercase();
            !recent
                .iter()
                .any(|done| done.contains(&candidate) || candidate.contains(done.as_str()))
        })
        .unwrap_or(candidates[0])
}

/// Evaluate every milestone against the history
#[must_use]
pub fn achievements(sessions: &[WorkoutSession], today: NaiveDate) -> Vec<Achievement> {
    let now = today
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
        + chrono::Duration::days(1); // end of "today" for window counts
    let total = completed(sessions).count();
    let last_week = workouts_in_last_days(sessions, 7, now);
    let last_month = workouts_in_last_days(sessions, 30, now);
    let streak = current_streak(sessions, today);

    vec![
        Achievement {
            id: "first_workout",
            title: "First Rep",
            description: "Complete your first workout",
            unlocked: total >= 1,
        },
        Achievement {
            id: "week_warrior",
            title: "Week Warrior",
            description: "Complete 3 workouts within 7 days",
            unlocked: last_week >= 3,
        },
        Achievement {
            id: "streak_master",
            title: "Streak Master",
            description: "Train 7 days in a row",
            unlocked: streak >= 7,
        },
        Achievement {
            id: "month_champion",
            title: "Month Champion",
            description: "Complete 12 workouts within 30 days",
            unlocked: last_month >= 12,
        },
    ]
}
