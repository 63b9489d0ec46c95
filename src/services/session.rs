// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session state: the authorization result plus a memo of provider reads.
//!
//! A session is keyed by the marker the browser presents on every request
//! (the authorization code that created it). Nothing here outlives the
//! process.

use crate::error::AppError;
use crate::models::AuthSession;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Identity of a memoized provider read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Athlete,
    AthleteZones,
    ActivitiesPage(u32),
    ActivitiesInRange(NaiveDate, NaiveDate),
    Activity(u64),
    ActivityZones(u64),
}

/// Session-lifetime memo of provider reads. Entries are never invalidated;
/// the session's token never changes so results stay valid.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: DashMap<CacheKey, serde_json::Value>,
}

impl SessionCache {
    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Failed fetches are not cached.
    pub async fn memoize<T, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        // Clone out of the map so no shard lock is held across the fetch.
        let cached = self.entries.get(&key).map(|entry| entry.value().clone());
        if let Some(value) = cached {
            match serde_json::from_value(value) {
                Ok(hit) => return Ok(hit),
                Err(e) => {
                    tracing::warn!(key = ?key, error = %e, "Discarding unreadable cache entry");
                    self.entries.remove(&key);
                }
            }
        }

        let fresh = fetch().await?;
        match serde_json::to_value(&fresh) {
            Ok(value) => {
                self.entries.insert(key, value);
            }
            Err(e) => tracing::warn!(key = ?key, error = %e, "Result not cacheable"),
        }
        Ok(fresh)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One interactive session.
#[derive(Debug)]
pub struct Session {
    /// Marker the client sends back to resume this session.
    pub marker: String,
    pub auth: AuthSession,
    pub cache: SessionCache,
}

impl Session {
    pub fn new(marker: String, auth: AuthSession) -> Self {
        Self {
            marker,
            auth,
            cache: SessionCache::default(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.auth.access_token
    }
}

/// All live sessions, keyed by marker.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, marker: &str) -> Option<Arc<Session>> {
        self.sessions.get(marker).map(|s| s.value().clone())
    }

    /// Store a freshly authenticated session, replacing any previous one
    /// under the same marker.
    pub fn insert(&self, marker: &str, auth: AuthSession) -> Arc<Session> {
        let session = Arc::new(Session::new(marker.to_string(), auth));
        self.sessions.insert(marker.to_string(), session.clone());
        session
    }

    /// Drop a session. Returns whether one existed.
    pub fn remove(&self, marker: &str) -> bool {
        self.sessions.remove(marker).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
