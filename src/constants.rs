// ABOUTME: Engine-wide constants grouped by concern
// ABOUTME: History caps, progression multipliers, planner timing, channel sizes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Centralized constants for the workout engine

/// History retention and windowing
pub mod history {
    /// Maximum persisted workout sessions per user, oldest trimmed on insert
    pub const MAX_SESSION_HISTORY: usize = 100;
    /// Maximum persisted feedback records per user, oldest evicted on insert
    pub const MAX_FEEDBACK_RECORDS: usize = 10;
    /// Feedback records averaged for the difficulty signal
    pub const FEEDBACK_AVERAGE_WINDOW: usize = 5;
    /// Recent sessions inspected for repetition avoidance
    pub const RECENT_SESSION_WINDOW: usize = 3;
    /// Feedback summaries forwarded to the generation service
    pub const GENERATION_CONTEXT_WINDOW: usize = 3;
}

/// Progressive-overload multipliers and thresholds
pub mod progression {
    /// Applied when recent sessions rated too easy (avg difficulty < 3)
    pub const OVERLOAD_MULTIPLIER: f64 = 1.075;
    /// Applied when recent sessions rated too hard (avg difficulty > 4)
    pub const DELOAD_MULTIPLIER: f64 = 0.975;
    /// Applied in the steady band
    pub const STEADY_MULTIPLIER: f64 = 1.025;
    /// Below this average difficulty the prior load was too easy
    pub const EASY_DIFFICULTY_CEILING: f64 = 3.0;
    /// Above this average difficulty the prior load was too hard
    pub const HARD_DIFFICULTY_FLOOR: f64 = 4.0;
    /// Assumed difficulty when no feedback exists yet
    pub const DEFAULT_DIFFICULTY: f64 = 3.0;
}

/// Weekly planning
pub mod planner {
    /// A plan always spans exactly one calendar week, Monday through Sunday
    pub const DAYS_PER_WEEK: usize = 7;
    /// Delay before the post-week reminder event fires
    pub const NEXT_WEEK_REMINDER_SECS: u64 = 24 * 60 * 60;
}

/// Event channel sizing
pub mod channels {
    /// Capacity of the rest-timer event broadcast channel
    pub const REST_TIMER_CHANNEL_SIZE: usize = 16;
    /// Capacity of the plan event broadcast channel
    pub const PLAN_EVENT_CHANNEL_SIZE: usize = 16;
}

/// Generation service defaults
pub mod generation {
    /// Default request timeout for the generation service
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
    /// Default model identifier for the Gemini-style endpoint
    pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
    /// Default endpoint base for the Gemini-style API
    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default rest interval when the service omits one
    pub const DEFAULT_REST_SECONDS: u32 = 60;
    /// Default set target when the service omits one
    pub const DEFAULT_TARGET_SETS: u32 = 3;
}

/// Key-value store key layout
pub mod store_keys {
    /// Namespace prefix for every key owned by this engine
    pub const NAMESPACE: &str = "repforge";
    /// Suffix for the per-user session history list
    pub const HISTORY: &str = "history";
    /// Suffix for the per-user feedback list
    pub const FEEDBACK: &str = "feedback";
    /// Suffix for the single current (pending/in-progress) session
    pub const CURRENT_WORKOUT: &str = "current_workout";
    /// Suffix for the stored weekly plan
    pub const WEEKLY_PLAN: &str = "weekly_plan";
}
