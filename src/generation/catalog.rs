// ABOUTME: Static exercise catalog and rule-based workout generation
// ABOUTME: Substitution alternatives by muscle group plus split-keyed fallback workouts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Rule-based workout content.
//!
//! Two consumers: the session engine queries [`alternatives`] when the user
//! substitutes an exercise, and the planner calls [`fallback_workout`]
//! whenever the generation service fails. Both draw from fixed tables; no
//! network, no state.

use crate::models::{ExerciseSpec, ExperienceLevel, MuscleGroup, SplitLabel, TrainingLocation};
use rand::seq::SliceRandom;
use rand::Rng;

/// Why an exercise is being swapped out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionReason {
    /// Required equipment unavailable; alternatives must use different equipment
    Equipment,
    /// User preference; any same-muscle alternative qualifies
    Preference,
}

/// One catalog entry. `secondary` lists assisting muscle groups.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub primary: MuscleGroup,
    pub secondary: &'static [MuscleGroup],
    pub equipment: &'static str,
}

/// Full substitution catalog, grouped loosely by primary muscle
const DATABASE: &[CatalogEntry] = &[
    // Chest
    CatalogEntry { name: "Bench Press", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps, MuscleGroup::Shoulders], equipment: "barbell" },
    CatalogEntry { name: "Incline Bench Press", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps, MuscleGroup::Shoulders], equipment: "barbell" },
    CatalogEntry { name: "Push-up", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps, MuscleGroup::Shoulders], equipment: "bodyweight" },
    CatalogEntry { name: "Dumbbell Fly", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Shoulders], equipment: "dumbbell" },
    // Back
    CatalogEntry { name: "Lat Pulldown", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "machine" },
    CatalogEntry { name: "Bent-over Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "barbell" },
    CatalogEntry { name: "Seated Cable Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "machine" },
    CatalogEntry { name: "Deadlift", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Legs, MuscleGroup::Core], equipment: "barbell" },
    CatalogEntry { name: "Pull-up", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "bodyweight" },
    // Legs
    CatalogEntry { name: "Back Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "barbell" },
    CatalogEntry { name: "Leg Press", primary: MuscleGroup::Legs, secondary: &[], equipment: "machine" },
    CatalogEntry { name: "Leg Extension", primary: MuscleGroup::Legs, secondary: &[], equipment: "machine" },
    CatalogEntry { name: "Leg Curl", primary: MuscleGroup::Legs, secondary: &[], equipment: "machine" },
    CatalogEntry { name: "Bodyweight Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "bodyweight" },
    // Shoulders
    CatalogEntry { name: "Overhead Press", primary: MuscleGroup::Shoulders, secondary: &[MuscleGroup::Triceps], equipment: "barbell" },
    CatalogEntry { name: "Lateral Raise", primary: MuscleGroup::Shoulders, secondary: &[], equipment: "dumbbell" },
    CatalogEntry { name: "Front Raise", primary: MuscleGroup::Shoulders, secondary: &[], equipment: "dumbbell" },
    CatalogEntry { name: "Pike Push-up", primary: MuscleGroup::Shoulders, secondary: &[MuscleGroup::Triceps], equipment: "bodyweight" },
    // Arms
    CatalogEntry { name: "Barbell Curl", primary: MuscleGroup::Biceps, secondary: &[], equipment: "barbell" },
    CatalogEntry { name: "Hammer Curl", primary: MuscleGroup::Biceps, secondary: &[], equipment: "dumbbell" },
    CatalogEntry { name: "Skull Crusher", primary: MuscleGroup::Triceps, secondary: &[], equipment: "barbell" },
    CatalogEntry { name: "Triceps Pushdown", primary: MuscleGroup::Triceps, secondary: &[], equipment: "machine" },
    // Core
    CatalogEntry { name: "Plank", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
    CatalogEntry { name: "Hanging Leg Raise", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
];

/// Candidates that can replace `current`: same primary muscle, different
/// name, and (for equipment substitutions) different equipment.
#[must_use]
pub fn alternatives(current: &ExerciseSpec, reason: SubstitutionReason) -> Vec<&'static CatalogEntry> {
    DATABASE
        .iter()
        .filter(|alt| {
            alt.name != current.name
                && alt.primary == current.primary_muscle
                && (reason != SubstitutionReason::Equipment || alt.equipment != current.equipment)
        })
        .collect()
}

/// Pick one substitution candidate at random, `None` when no alternative exists
#[must_use]
pub fn pick_alternative(
    current: &ExerciseSpec,
    reason: SubstitutionReason,
) -> Option<&'static CatalogEntry> {
    alternatives(current, reason)
        .choose(&mut rand::thread_rng())
        .copied()
}

/// Set/rep/rest band for an experience level
#[derive(Debug, Clone, Copy)]
pub struct DifficultyBand {
    pub sets: (u32, u32),
    pub reps: (u32, u32),
    pub rest_seconds: u32,
}

/// Bands match the original progressive-workout tuning per level
#[must_use]
pub const fn difficulty_band(level: ExperienceLevel) -> DifficultyBand {
    match level {
        ExperienceLevel::Beginner => DifficultyBand { sets: (2, 3), reps: (8, 12), rest_seconds: 90 },
        ExperienceLevel::Intermediate => DifficultyBand { sets: (3, 4), reps: (8, 15), rest_seconds: 75 },
        ExperienceLevel::Advanced => DifficultyBand { sets: (4, 5), reps: (6, 12), rest_seconds: 60 },
    }
}

/// Expected 1-5 difficulty for a template at this level
#[must_use]
pub const fn template_difficulty(level: ExperienceLevel) -> u8 {
    match level {
        ExperienceLevel::Beginner => 2,
        ExperienceLevel::Intermediate => 3,
        ExperienceLevel::Advanced => 4,
    }
}

/// Base exercise selection per split and location, before the band applies
fn split_entries(split: SplitLabel, location: TrainingLocation) -> &'static [CatalogEntry] {
    const GYM_PUSH: &[CatalogEntry] = &[
        CatalogEntry { name: "Bench Press", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "barbell" },
        CatalogEntry { name: "Overhead Press", primary: MuscleGroup::Shoulders, secondary: &[MuscleGroup::Triceps], equipment: "barbell" },
        CatalogEntry { name: "Triceps Pushdown", primary: MuscleGroup::Triceps, secondary: &[], equipment: "machine" },
    ];
    const HOME_PUSH: &[CatalogEntry] = &[
        CatalogEntry { name: "Push-up", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "bodyweight" },
        CatalogEntry { name: "Pike Push-up", primary: MuscleGroup::Shoulders, secondary: &[MuscleGroup::Triceps], equipment: "bodyweight" },
        CatalogEntry { name: "Bench Dip", primary: MuscleGroup::Triceps, secondary: &[], equipment: "bodyweight" },
    ];
    const GYM_PULL: &[CatalogEntry] = &[
        CatalogEntry { name: "Lat Pulldown", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "machine" },
        CatalogEntry { name: "Bent-over Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "barbell" },
        CatalogEntry { name: "Barbell Curl", primary: MuscleGroup::Biceps, secondary: &[], equipment: "barbell" },
    ];
    const HOME_PULL: &[CatalogEntry] = &[
        CatalogEntry { name: "Pull-up", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "bodyweight" },
        CatalogEntry { name: "Inverted Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "bodyweight" },
        CatalogEntry { name: "Superman Hold", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Core], equipment: "bodyweight" },
    ];
    const GYM_LEGS: &[CatalogEntry] = &[
        CatalogEntry { name: "Back Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "barbell" },
        CatalogEntry { name: "Leg Press", primary: MuscleGroup::Legs, secondary: &[], equipment: "machine" },
        CatalogEntry { name: "Standing Calf Raise", primary: MuscleGroup::Legs, secondary: &[], equipment: "machine" },
    ];
    const HOME_LEGS: &[CatalogEntry] = &[
        CatalogEntry { name: "Bodyweight Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "bodyweight" },
        CatalogEntry { name: "Walking Lunge", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "bodyweight" },
        CatalogEntry { name: "Single-leg Calf Raise", primary: MuscleGroup::Legs, secondary: &[], equipment: "bodyweight" },
    ];
    const GYM_UPPER: &[CatalogEntry] = &[
        CatalogEntry { name: "Bench Press", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "barbell" },
        CatalogEntry { name: "Seated Cable Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "machine" },
        CatalogEntry { name: "Lateral Raise", primary: MuscleGroup::Shoulders, secondary: &[], equipment: "dumbbell" },
    ];
    const HOME_UPPER: &[CatalogEntry] = &[
        CatalogEntry { name: "Push-up", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "bodyweight" },
        CatalogEntry { name: "Inverted Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "bodyweight" },
        CatalogEntry { name: "Pike Push-up", primary: MuscleGroup::Shoulders, secondary: &[], equipment: "bodyweight" },
    ];
    const CORE_CARDIO: &[CatalogEntry] = &[
        CatalogEntry { name: "Burpee", primary: MuscleGroup::Core, secondary: &[MuscleGroup::Legs], equipment: "bodyweight" },
        CatalogEntry { name: "Mountain Climber", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
        CatalogEntry { name: "Plank", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
    ];
    const GYM_FULL: &[CatalogEntry] = &[
        CatalogEntry { name: "Back Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "barbell" },
        CatalogEntry { name: "Bench Press", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "barbell" },
        CatalogEntry { name: "Bent-over Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "barbell" },
        CatalogEntry { name: "Plank", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
    ];
    const HOME_FULL: &[CatalogEntry] = &[
        CatalogEntry { name: "Bodyweight Squat", primary: MuscleGroup::Legs, secondary: &[MuscleGroup::Core], equipment: "bodyweight" },
        CatalogEntry { name: "Push-up", primary: MuscleGroup::Chest, secondary: &[MuscleGroup::Triceps], equipment: "bodyweight" },
        CatalogEntry { name: "Inverted Row", primary: MuscleGroup::Back, secondary: &[MuscleGroup::Biceps], equipment: "bodyweight" },
        CatalogEntry { name: "Plank", primary: MuscleGroup::Core, secondary: &[], equipment: "bodyweight" },
    ];

    let gym = matches!(location, TrainingLocation::Gym);
    match split {
        SplitLabel::Push => if gym { GYM_PUSH } else { HOME_PUSH },
        SplitLabel::Pull => if gym { GYM_PULL } else { HOME_PULL },
        SplitLabel::Legs | SplitLabel::Lower => if gym { GYM_LEGS } else { HOME_LEGS },
        SplitLabel::Upper => if gym { GYM_UPPER } else { HOME_UPPER },
        SplitLabel::Cardio => CORE_CARDIO,
        SplitLabel::FullBodyA | SplitLabel::FullBodyB | SplitLabel::FullBodyC | SplitLabel::Rest => {
            if gym { GYM_FULL } else { HOME_FULL }
        }
    }
}

/// Build a rule-based workout for a split.
///
/// Set counts draw randomly within the level's band, matching the original
/// engine's jitter; rep targets and rest intervals come straight from the
/// band.
#[must_use]
pub fn fallback_workout(
    split: SplitLabel,
    location: TrainingLocation,
    level: ExperienceLevel,
) -> Vec<ExerciseSpec> {
    let band = difficulty_band(level);
    let mut rng = rand::thread_rng();

    split_entries(split, location)
        .iter()
        .map(|entry| ExerciseSpec {
            name: entry.name.to_owned(),
            target_sets: rng.gen_range(band.sets.0..=band.sets.1),
            target_reps: format!("{}-{}", band.reps.0, band.reps.1),
            rest_seconds: band.rest_seconds,
            equipment: entry.equipment.to_owned(),
            description: None,
            primary_muscle: entry.primary,
            secondary_muscles: entry.secondary.to_vec(),
        })
        .collect()
}
