//! Per-session predicates and conversation history.
//!
//! The evaluator only talks to the [`Session`] trait. [`InMemorySession`] is
//! a process-local implementation backed by a concurrent map.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryKind {
    /// What the user said.
    Input,
    /// What the bot answered.
    That,
}

/// One history entry: `index` 1 is the most recent turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistorySlot {
    pub kind: HistoryKind,
    pub index: usize,
}

impl HistorySlot {
    pub fn input(index: usize) -> Self {
        Self {
            kind: HistoryKind::Input,
            index,
        }
    }

    pub fn that(index: usize) -> Self {
        Self {
            kind: HistoryKind::That,
            index,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Session {0} is unavailable")]
    Unavailable(String),
    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Predicate and history storage for conversations.
///
/// Calls for different sessions may arrive concurrently; calls for one
/// session never do.
#[mockall::automock]
pub trait Session: Send + Sync {
    /// `None` when the predicate was never set.
    fn get_predicate(&self, name: &str, session_id: &SessionId) -> SessionResult<Option<String>>;

    fn set_predicate(&self, name: &str, session_id: &SessionId, value: &str) -> SessionResult<()>;

    /// `None` when `slot` is out of range.
    fn get_history(&self, slot: HistorySlot, session_id: &SessionId)
        -> SessionResult<Option<String>>;

    /// Makes `entry` the most recent item (index 1) of the `kind` history.
    fn push_history(&self, kind: HistoryKind, session_id: &SessionId, entry: &str)
        -> SessionResult<()>;
}

#[derive(Debug, Default)]
struct SessionState {
    predicates: HashMap<String, String>,
    inputs: VecDeque<String>,
    responses: VecDeque<String>,
}

impl SessionState {
    fn history(&self, kind: HistoryKind) -> &VecDeque<String> {
        match kind {
            HistoryKind::Input => &self.inputs,
            HistoryKind::That => &self.responses,
        }
    }

    fn history_mut(&mut self, kind: HistoryKind) -> &mut VecDeque<String> {
        match kind {
            HistoryKind::Input => &mut self.inputs,
            HistoryKind::That => &mut self.responses,
        }
    }
}

#[derive(Debug)]
pub struct InMemorySession {
    sessions: DashMap<SessionId, SessionState>,
    max_history: usize,
}

impl InMemorySession {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_history,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn clear(&self, session_id: &SessionId) {
        self.sessions.remove(session_id);
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new(32)
    }
}

fn push_bounded(history: &mut VecDeque<String>, entry: &str, max: usize) {
    history.push_back(entry.to_string());
    while history.len() > max {
        history.pop_front();
    }
}

impl Session for InMemorySession {
    fn get_predicate(&self, name: &str, session_id: &SessionId) -> SessionResult<Option<String>> {
        Ok(self
            .sessions
            .get(session_id)
            .and_then(|state| state.predicates.get(name).cloned()))
    }

    fn set_predicate(&self, name: &str, session_id: &SessionId, value: &str) -> SessionResult<()> {
        self.sessions
            .entry(session_id.clone())
            .or_default()
            .predicates
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get_history(
        &self,
        slot: HistorySlot,
        session_id: &SessionId,
    ) -> SessionResult<Option<String>> {
        if slot.index == 0 {
            return Ok(None);
        }
        Ok(self.sessions.get(session_id).and_then(|state| {
            state
                .history(slot.kind)
                .iter()
                .rev()
                .nth(slot.index - 1)
                .cloned()
        }))
    }

    fn push_history(
        &self,
        kind: HistoryKind,
        session_id: &SessionId,
        entry: &str,
    ) -> SessionResult<()> {
        let mut state = self.sessions.entry(session_id.clone()).or_default();
        push_bounded(state.history_mut(kind), entry, self.max_history);
        Ok(())
    }
}
