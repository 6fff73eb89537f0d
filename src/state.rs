// src/state.rs

use std::sync::Arc;

use chrono::Duration;

use crate::{
    bank::QuestionBank,
    config::{Config, DEFAULT_SESSION_TTL_MINUTES},
    session_store::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(bank: QuestionBank, config: Config) -> Self {
        let sessions = SessionStore::new(session_ttl(config.session_ttl_minutes));
        Self {
            bank: Arc::new(bank),
            sessions: Arc::new(sessions),
            config,
        }
    }
}

/// Positive, representable timeouts only; anything else gets the default.
fn session_ttl(minutes: i64) -> Duration {
    match Duration::try_minutes(minutes) {
        Some(ttl) if ttl > Duration::zero() => ttl,
        _ => {
            tracing::warn!(
                "Session timeout of {} minutes is unusable, using {}",
                minutes,
                DEFAULT_SESSION_TTL_MINUTES
            );
            Duration::minutes(DEFAULT_SESSION_TTL_MINUTES)
        }
    }
}
