// ABOUTME: Key-value persistence abstraction with pluggable backends
// ABOUTME: Async get/put/delete trait plus namespaced per-user key construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Key-Value Persistence
//!
//! The engine treats persistence as an opaque string-valued key-value store
//! and serializes records itself. Keys follow the layout
//! `"{namespace}:{user_id}:{suffix}"`.

/// Typed per-user accessor over the raw store
pub mod history;
/// In-memory store implementation
pub mod memory;

pub use history::HistoryStore;
pub use memory::MemoryStore;

use crate::constants::store_keys;
use crate::errors::AppResult;
use std::sync::Arc;

/// Pluggable key-value backend.
///
/// All operations are asynchronous and may fail; failures surface to the
/// caller as [`crate::errors::ErrorCode::StorageError`] since they cannot be
/// recovered locally. No optimistic-concurrency check is provided; the
/// domain assumes one active client per user and last writer wins.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value for a key, `None` when absent
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value under a key, replacing any prior value
    async fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Shared store handle passed into engine components
pub type StoreHandle = Arc<dyn KeyValueStore>;

/// Build a namespaced per-user key
#[must_use]
pub fn user_key(user_id: &str, suffix: &str) -> String {
    format!("{}:{user_id}:{suffix}", store_keys::NAMESPACE)
}
