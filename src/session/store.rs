//! In-memory session store with idle expiry and a capacity bound

use chrono::Utc;
use dashmap::DashMap;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::models::{ChecklistSession, SessionError, SessionView};
use crate::config::SessionSettings;

/// Live checklist sessions keyed by id
pub struct SessionStore {
    sessions: DashMap<Uuid, ChecklistSession>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::from_settings(&SessionSettings::default())
    }
}

impl SessionStore {
    /// Create a store that drops sessions idle for `idle_ttl` and keeps at most `max_sessions`
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.idle_ttl(), settings.max_sessions)
    }

    fn is_expired(&self, session: &ChecklistSession) -> bool {
        let idle = (Utc::now() - session.updated_at).to_std().unwrap_or_default();
        idle >= self.idle_ttl
    }

    pub fn insert(&self, session: ChecklistSession) -> SessionView {
        self.clear_expired();
        while self.sessions.len() >= self.max_sessions {
            if !self.evict_oldest() {
                break;
            }
        }

        let view = session.view();
        debug!("Created checklist session {}", session.id);
        self.sessions.insert(session.id, session);
        view
    }

    pub fn get(&self, id: Uuid) -> Result<SessionView, SessionError> {
        if let Some(entry) = self.sessions.get(&id) {
            if !self.is_expired(entry.value()) {
                return Ok(entry.view());
            }
        }
        self.drop_expired(id);
        Err(SessionError::NotFound(id))
    }

    /// Run `f` against a session under its shard lock.
    ///
    /// When `f` fails the session is left exactly as `f` left it, so callers
    /// must do fallible work before mutating.
    pub fn update<T, E>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ChecklistSession) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<SessionError>,
    {
        if let Some(mut entry) = self.sessions.get_mut(&id) {
            if !self.is_expired(entry.value()) {
                return f(entry.value_mut());
            }
        }
        self.drop_expired(id);
        Err(SessionError::NotFound(id).into())
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| debug!("Removed checklist session {}", id))
            .ok_or(SessionError::NotFound(id))
    }

    /// Drop every idle session; returns how many were dropped
    pub fn clear_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !self.is_expired(session));
        let dropped = before.saturating_sub(self.sessions.len());
        if dropped > 0 {
            debug!("Expired {} idle checklist sessions", dropped);
        }
        dropped
    }

    /// Evict the least recently updated session
    fn evict_oldest(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().updated_at)
            .map(|entry| *entry.key());

        match oldest {
            Some(id) => {
                debug!("Evicted checklist session {} at capacity", id);
                self.sessions.remove(&id).is_some()
            }
            None => false,
        }
    }

    fn drop_expired(&self, id: Uuid) {
        if self
            .sessions
            .remove_if(&id, |_, session| self.is_expired(session))
            .is_some()
        {
            debug!("Expired checklist session {}", id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
