// ABOUTME: Adaptive workout progression and scheduling engine
// ABOUTME: Session state machine, overload calculator, weekly planner, history analytics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # repforge
//!
//! An embeddable engine for adaptive strength training. It drives a
//! workout session through its lifecycle (pending, in progress,
//! completed) with automatic rest countdowns, adjusts per-exercise
//! weight targets from the user's own difficulty feedback, lays out a
//! seven-day training plan matched to experience level and weekly
//! frequency, and derives streaks, milestones and a next-workout
//! recommendation from the session history.
//!
//! Workout content comes from an LLM generation service when one is
//! configured and from a built-in exercise catalog otherwise; callers
//! never see the difference. All state lives behind the
//! [`store::KeyValueStore`] trait, with an in-memory implementation
//! provided.
//!
//! ```no_run
//! use repforge::models::{
//!     ExperienceLevel, FitnessGoal, TrainingLocation, UserProfile, WorkoutStyle,
//! };
//! use repforge::planner::WeeklyPlanner;
//! use repforge::store::{HistoryStore, MemoryStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() -> repforge::errors::AppResult<()> {
//! let history = HistoryStore::new(Arc::new(MemoryStore::new()), "user-1");
//! let config = repforge::config::EngineConfig::from_env()?;
//! let generator = Arc::new(repforge::generation::GeminiGenerator::new(
//!     config.generation.clone(),
//! )?);
//! let planner = WeeklyPlanner::new(history, generator, config.reminder_delay);
//!
//! let profile = UserProfile {
//!     age: 28,
//!     weight_kg: 75.0,
//!     height_cm: 178.0,
//!     level: ExperienceLevel::Intermediate,
//!     goal: FitnessGoal::GainMuscle,
//!     workout_style: WorkoutStyle::Strength,
//!     location: TrainingLocation::Gym,
//!     session_duration_min: 60,
//!     weekly_frequency: 4,
//!     limitations: None,
//! };
//! let plan = planner.generate_weekly_plan(&profile).await?;
//! let mut session = planner.start_day(0).await?;
//! session.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod config;
pub mod constants;
pub mod errors;
pub mod generation;
pub mod logging;
pub mod models;
pub mod planner;
pub mod progression;
pub mod session;
pub mod store;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{SessionStatus, UserProfile, WeeklyPlan, WorkoutSession};
pub use planner::{PlanEvent, WeeklyPlanner};
pub use session::SessionEngine;
