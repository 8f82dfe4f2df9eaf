// ABOUTME: Progressive-overload calculator deriving next-session weight targets
// ABOUTME: Pure functions of prior performance and subjective difficulty feedback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Progression Calculator
//!
//! Deterministic, side-effect-free derivation of the next weight target for
//! an exercise. The signal is the most recent prior first-set weight for
//! that exercise plus the average difficulty across recent feedback:
//! too easy overloads, too hard deloads, otherwise steady progression.

use crate::constants::{history, progression};
use crate::models::{FeedbackRecord, WorkoutSession};

/// Next-session weight target.
///
/// With no prior weight the target is 0 and the generator supplies an
/// initial value. Otherwise the prior weight is scaled by the difficulty
/// band and rounded to the nearest whole unit:
/// - average difficulty below 3: x1.075 (too easy, overload)
/// - average difficulty above 4: x0.975 (too hard, deload)
/// - otherwise: x1.025 (steady progression)
#[must_use]
pub fn recommended_weight(prior_weight: Option<f64>, avg_difficulty: f64) -> f64 {
    let Some(prior) = prior_weight else {
        return 0.0;
    };

    let multiplier = if avg_difficulty < progression::EASY_DIFFICULTY_CEILING {
        progression::OVERLOAD_MULTIPLIER
    } else if avg_difficulty > progression::HARD_DIFFICULTY_FLOOR {
        progression::DELOAD_MULTIPLIER
    } else {
        progression::STEADY_MULTIPLIER
    };

    // The multipliers are not exact in binary (100 * 1.025 evaluates to
    // 102.4999...), so snap the product to the nearest thousandth first.
    let scaled = (prior * multiplier * 1000.0).round() / 1000.0;
    scaled.round()
}

/// First-set weight from the most recent session containing the exercise.
///
/// Sessions are stored most-recent-first, so the first match wins.
#[must_use]
pub fn prior_first_set_weight(sessions: &[WorkoutSession], exercise_name: &str) -> Option<f64> {
    sessions.iter().find_map(|session| {
        session
            .exercises
            .iter()
            .find(|e| e.spec.name == exercise_name && !e.actual_sets.is_empty())
            .map(|e| e.actual_sets[0].weight)
    })
}

/// Mean difficulty across the most recent feedback records.
///
/// Defaults to 3.0 (the steady band) when no feedback exists.
#[must_use]
pub fn average_difficulty(feedback: &[FeedbackRecord]) -> f64 {
    if feedback.is_empty() {
        return progression::DEFAULT_DIFFICULTY;
    }
    let recent = &feedback[..feedback.len().min(history::FEEDBACK_AVERAGE_WINDOW)];
    let total: u32 = recent.iter().map(|f| u32::from(f.difficulty)).sum();
    f64::from(total) / recent.len() as f64
}

/// Convenience: combine history and feedback into a weight target
#[must_use]
pub fn weight_target_for(
    sessions: &[WorkoutSession],
    feedback: &[FeedbackRecord],
    exercise_name: &str,
) -> f64 {
    recommended_weight(
        prior_first_set_weight(sessions, exercise_name),
        average_difficulty(feedback),
    )
}
