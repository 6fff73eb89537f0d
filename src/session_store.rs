// src/session_store.rs

//! In-memory quiz sessions keyed by the id carried in the session cookie.
//! Entries expire after a fixed period of inactivity.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::models::session::Session;

/// Session entry with last access time for expiration
struct SessionEntry {
    session: Session,
    last_access: DateTime<Utc>,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Generate a new session ID
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Returns a live session and refreshes its access time.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.get_at(id, Utc::now())
    }

    pub fn insert(&self, id: &str, session: Session) {
        self.insert_at(id, session, Utc::now());
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.lock().remove(id).map(|entry| entry.session)
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`SessionStore::get`], with an explicit clock.
    pub fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<Session> {
        let mut sessions = self.lock();

        let entry = sessions.get_mut(id)?;
        if now - entry.last_access > self.ttl {
            tracing::debug!("Session {} expired", id);
            sessions.remove(id);
            return None;
        }

        entry.last_access = now;
        Some(entry.session.clone())
    }

    pub fn insert_at(&self, id: &str, session: Session, now: DateTime<Utc>) {
        self.lock().insert(
            id.to_string(),
            SessionEntry {
                session,
                last_access: now,
            },
        );
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_access <= self.ttl);
        before - sessions.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        // Entries stay consistent even if a holder panicked, so recover the guard.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
