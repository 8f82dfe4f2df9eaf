// ABOUTME: Structured logging setup for the workout engine
// ABOUTME: Configures tracing-subscriber with env-filter and selectable output format
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Structured logging configuration
//!
//! The engine emits `tracing` events; embedding applications call
//! [`init_logging`] once at startup (or install their own subscriber).

use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty multi-line format for development
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl LogFormat {
    /// Parse from the `REPFORGE_LOG_FORMAT` value with fallback
    fn from_env() -> Self {
        match env::var("REPFORGE_LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            Ok("pretty") => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to `repforge=info`.
/// Safe to call once per process; subsequent calls are ignored so tests can
/// initialize logging unconditionally.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repforge=info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match LogFormat::from_env() {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    // A subscriber may already be installed by the host application.
    drop(result);
}
