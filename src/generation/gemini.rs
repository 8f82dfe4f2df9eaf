// ABOUTME: HTTP client for a Gemini-style content generation endpoint
// ABOUTME: Builds the prompt, enforces a bounded timeout, and parses the candidate text
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Gemini-backed workout generator.
//!
//! Every failure mode (missing key, network error, timeout, unexpected
//! response shape, malformed payload) is reported through the error channel
//! so the planner can fall back to the catalog; nothing here panics or
//! retries.

use super::{extract_exercises, GenerationRequest, WorkoutGenerator};
use crate::config::GenerationConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ExerciseSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SERVICE_NAME: &str = "gemini";

/// Client for a `generateContent`-style endpoint
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl GeminiGenerator {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the HTTP client cannot be constructed.
    pub fn new(config: GenerationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn request_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, api_key
        )
    }

    /// Render the structured request into the service prompt
    fn build_prompt(request: &GenerationRequest) -> String {
        let profile = &request.profile;
        let limitations = profile.limitations.as_deref().unwrap_or("none");
        let feedback = if request.recent_feedback.is_empty() {
            "none".to_owned()
        } else {
            request.recent_feedback.join("; ")
        };

        format!(
            "Create a {split} workout for:\n\
             - Age: {age}, weight: {weight}kg, height: {height}cm\n\
             - Level: {level:?}\n\
             - Goal: {goal:?}\n\
             - Location: {location:?}\n\
             - Session duration: {duration} minutes\n\
             - Limitations: {limitations}\n\
             \n\
             Recent feedback: {feedback}\n\
             \n\
             Return JSON: {{\"exercises\": [{{\"name\": \"Exercise\", \"sets\": 3, \
             \"reps\": \"8-12\", \"rest\": 60, \"equipment\": \"equipment\", \
             \"description\": \"How to perform\"}}]}}",
            split = request.split,
            age = profile.age,
            weight = profile.weight_kg,
            height = profile.height_cm,
            level = profile.level,
            goal = profile.goal,
            location = profile.location,
            duration = profile.session_duration_min,
        )
    }
}

#[async_trait::async_trait]
impl WorkoutGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<ExerciseSpec>> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::external_service(SERVICE_NAME, "no API key configured")
        })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(request),
                }],
            }],
        };

        debug!(split = %request.split, "requesting generated workout");

        let response = self
            .client
            .post(self.request_url(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::external_service(SERVICE_NAME, "request timed out")
                } else {
                    AppError::external_service(SERVICE_NAME, format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("unexpected status {status}"),
            ));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("unreadable response: {e}"))
        })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "response has no candidates"))?;

        extract_exercises(&text, request.split)
    }
}

// Wire types for the generateContent API

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
