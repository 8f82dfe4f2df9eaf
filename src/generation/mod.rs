// ABOUTME: Workout generation service contract and tolerant payload extraction
// ABOUTME: Async trait implemented by the Gemini client, with the rule-based catalog as fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Workout Generation
//!
//! The engine consumes an external generation service as an opaque async
//! function: structured request in, a list of [`ExerciseSpec`] out, or an
//! [`ErrorCode::ExternalServiceError`](crate::errors::ErrorCode) the planner
//! recovers from via [`catalog`] fallback. Service responses are free text
//! that should contain a JSON payload; extraction tolerates markdown fences
//! and surrounding prose.

/// Static exercise catalog and rule-based fallback generation
pub mod catalog;
/// HTTP client for a Gemini-style generation endpoint
pub mod gemini;

pub use gemini::GeminiGenerator;

use crate::constants::generation as gen_defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseSpec, MuscleGroup, SplitLabel, UserProfile};
use serde::Deserialize;

/// Context forwarded to the generation service
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub profile: UserProfile,
    pub split: SplitLabel,
    /// Recent feedback summaries, e.g. `"Push - difficulty 4/5"`
    pub recent_feedback: Vec<String>,
}

/// Asynchronous workout content source.
///
/// Implementations must treat every failure mode (network error, timeout,
/// malformed response) as a soft failure expressed through the error
/// channel; callers always hold a rule-based fallback.
#[async_trait::async_trait]
pub trait WorkoutGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<ExerciseSpec>>;
}

/// Wire shape of a generated workout payload.
///
/// Lenient on purpose: the service frequently omits optional fields, so all
/// of them carry defaults filled during conversion.
#[derive(Debug, Deserialize)]
struct WirePayload {
    exercises: Vec<WireExercise>,
}

#[derive(Debug, Deserialize)]
struct WireExercise {
    name: String,
    #[serde(default)]
    sets: Option<u32>,
    #[serde(default)]
    reps: Option<String>,
    #[serde(default)]
    rest: Option<u32>,
    #[serde(default)]
    equipment: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl WireExercise {
    fn into_spec(self, split: SplitLabel) -> ExerciseSpec {
        ExerciseSpec {
            primary_muscle: default_muscle_for(split),
            name: self.name,
            target_sets: self.sets.unwrap_or(gen_defaults::DEFAULT_TARGET_SETS),
            target_reps: self.reps.unwrap_or_else(|| "8-12".to_owned()),
            rest_seconds: self.rest.unwrap_or(gen_defaults::DEFAULT_REST_SECONDS),
            equipment: self.equipment.unwrap_or_else(|| "none".to_owned()),
            description: self.description,
            secondary_muscles: Vec::new(),
        }
    }
}

/// Representative muscle group for exercises the service did not tag
const fn default_muscle_for(split: SplitLabel) -> MuscleGroup {
    match split {
        SplitLabel::Push => MuscleGroup::Chest,
        SplitLabel::Pull => MuscleGroup::Back,
        SplitLabel::Legs | SplitLabel::Lower => MuscleGroup::Legs,
        SplitLabel::Upper => MuscleGroup::Shoulders,
        _ => MuscleGroup::Core,
    }
}

/// Extract the exercise list from a free-text service response.
///
/// Tolerates enclosing markup: markdown code fences are stripped and the
/// payload is located by its outermost braces, so prose before or after an
/// otherwise well-formed JSON object is ignored.
///
/// # Errors
///
/// Returns an external-service error when no parseable payload is present
/// or the payload contains no exercises; callers fall back to the catalog.
pub fn extract_exercises(raw: &str, split: SplitLabel) -> AppResult<Vec<ExerciseSpec>> {
    let candidate = locate_json_object(raw).ok_or_else(|| {
        AppError::external_service("generation", "response contains no JSON object")
    })?;

    let payload: WirePayload = serde_json::from_str(candidate).map_err(|e| {
        AppError::external_service("generation", format!("malformed payload: {e}"))
    })?;

    if payload.exercises.is_empty() {
        return Err(AppError::external_service(
            "generation",
            "payload contains no exercises",
        ));
    }

    Ok(payload
        .exercises
        .into_iter()
        .map(|e| e.into_spec(split))
        .collect())
}

/// Slice out the outermost `{ ... }` object, ignoring fences and prose
fn locate_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
