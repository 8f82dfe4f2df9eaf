// ABOUTME: Typed domain records for profiles, sessions, feedback, and weekly plans
// ABOUTME: All persisted shapes with serde round-trip guarantees and status enums
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Domain Models
//!
//! Every record the engine persists or exchanges with collaborators.
//! Status fields are exhaustive enums so invalid states are unrepresentable;
//! all shapes derive `Serialize`/`Deserialize` and survive a JSON round-trip
//! unchanged, including nested set ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User experience level driving split selection and set/rep bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        write!(f, "{label}")
    }
}

/// Training goal captured on the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    GetStronger,
    Endurance,
}

/// Preferred workout style, used by the recommendation analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStyle {
    Strength,
    Cardio,
    Hiit,
    Functional,
    Mixed,
}

/// Where the user trains, selecting gym or bodyweight exercise variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLocation {
    Gym,
    Home,
}

/// User profile snapshot consumed by planning and generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u8,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub level: ExperienceLevel,
    pub goal: FitnessGoal,
    pub workout_style: WorkoutStyle,
    pub location: TrainingLocation,
    /// Target session length in minutes
    pub session_duration_min: u32,
    /// Training days per week the user committed to
    pub weekly_frequency: u8,
    /// Free-text injury or equipment limitations
    #[serde(default)]
    pub limitations: Option<String>,
}

/// Subjective post-session rating. Append-only, capped to the 10 most recent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub workout_id: Uuid,
    /// Perceived difficulty, 1 (trivial) to 5 (maximal)
    pub difficulty: u8,
    #[serde(default)]
    pub comments: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Primary muscle groups from the exercise catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Core,
}

/// Static exercise description, immutable once attached to a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub name: String,
    pub target_sets: u32,
    /// Rep target expressed as a range, e.g. `"8-12"`
    pub target_reps: String,
    pub rest_seconds: u32,
    pub equipment: String,
    #[serde(default)]
    pub description: Option<String>,
    pub primary_muscle: MuscleGroup,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
}

/// One logged set: load, reps, and the derived volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualSet {
    pub weight: f64,
    pub reps: u32,
    pub completed_at: DateTime<Utc>,
    /// `weight * reps`, the workload proxy summed into session volume
    pub volume: f64,
}

impl ActualSet {
    /// Build a set record, deriving volume from weight and reps
    #[must_use]
    pub fn new(weight: f64, reps: u32, completed_at: DateTime<Utc>) -> Self {
        Self {
            weight,
            reps,
            completed_at,
            volume: weight * f64::from(reps),
        }
    }
}

/// Session-scoped exercise state: the spec plus live progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseProgress {
    #[serde(flatten)]
    pub spec: ExerciseSpec,
    /// Weight target from the progression calculator; 0 means "choose your own"
    pub target_weight: f64,
    pub completed_sets: u32,
    pub actual_sets: Vec<ActualSet>,
    pub completed: bool,
}

impl ExerciseProgress {
    /// Wrap a spec with zeroed progress and the given weight target
    #[must_use]
    pub fn from_spec(spec: ExerciseSpec, target_weight: f64) -> Self {
        Self {
            spec,
            target_weight,
            completed_sets: 0,
            actual_sets: Vec::new(),
            completed: false,
        }
    }

    /// Volume logged so far for this exercise
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.actual_sets.iter().map(|s| s.volume).sum()
    }
}

/// Session lifecycle. `Completed` is terminal and cannot be re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// One workout attempt with its own exercise and set progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub name: String,
    /// Human-readable type label (e.g. "Push", "HIIT Full Body")
    pub workout_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub exercises: Vec<ExerciseProgress>,
    pub total_volume: f64,
    /// Weekly-plan day this session was started from, if any
    #[serde(default)]
    pub plan_day_index: Option<usize>,
}

impl WorkoutSession {
    /// Total volume across every logged set of every exercise
    #[must_use]
    pub fn computed_volume(&self) -> f64 {
        self.exercises.iter().map(ExerciseProgress::volume).sum()
    }

    /// Whether every exercise reached its set target
    #[must_use]
    pub fn all_exercises_completed(&self) -> bool {
        self.exercises.iter().all(|e| e.completed)
    }
}

/// Training-day category shaping the weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitLabel {
    FullBodyA,
    FullBodyB,
    FullBodyC,
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Cardio,
    Rest,
}

impl SplitLabel {
    /// Whether this day carries a workout
    #[must_use]
    pub const fn is_training_day(self) -> bool {
        !matches!(self, Self::Rest)
    }
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FullBodyA => "Full Body A",
            Self::FullBodyB => "Full Body B",
            Self::FullBodyC => "Full Body C",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Upper => "Upper",
            Self::Lower => "Lower",
            Self::Cardio => "Cardio",
            Self::Rest => "Rest",
        };
        write!(f, "{label}")
    }
}

/// Reusable workout content attached to a plan day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub name: String,
    pub split: SplitLabel,
    pub exercises: Vec<ExerciseSpec>,
    pub estimated_duration_min: u32,
    /// Expected difficulty 1-5 derived from experience level
    pub difficulty: u8,
}

/// One day of a weekly plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 0 = Monday .. 6 = Sunday
    pub day_index: usize,
    pub split: SplitLabel,
    #[serde(default)]
    pub workout: Option<WorkoutTemplate>,
    pub completed: bool,
}

/// A rolling seven-day training plan, valid only for the week it was created in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: UserProfile,
    pub frequency: u8,
    /// Always exactly seven entries, Monday through Sunday
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// Whether every non-rest day has been completed
    #[must_use]
    pub fn week_completed(&self) -> bool {
        self.days
            .iter()
            .filter(|d| d.split.is_training_day())
            .all(|d| d.completed)
    }

    /// Count of training (non-rest) days in the plan
    #[must_use]
    pub fn training_day_count(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.split.is_training_day())
            .count()
    }
}
