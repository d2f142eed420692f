//! Registration conversation state
//!
//! Each user in the middle of `/register` has one session:
//! `AwaitingName -> AwaitingFlow -> (removed)`. Absence of a session means idle.
//! Sessions live in memory only and expire after an idle timeout.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use teloxide::types::{MessageId, UserId};

use crate::core::validation::{validate_flow, validate_full_name};

/// Current registration step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    AwaitingName,
    AwaitingFlow { full_name: String },
}

#[derive(Debug)]
struct Session {
    step: Step,
    /// Messages of this conversation to delete once it concludes
    pending: Vec<MessageId>,
    touched_at: Instant,
}

impl Session {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched_at.elapsed() > ttl
    }
}

/// Data collected by a finished conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub full_name: String,
    pub flow: String,
    /// Every message id retained during the conversation, including the last input
    pub pending: Vec<MessageId>,
}

/// Result of feeding one user message into the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// No registration in progress for this user
    Idle,
    NameRejected,
    NameAccepted,
    FlowRejected,
    Completed(Completed),
}

/// Keyed table of in-progress registrations
pub struct Conversations {
    sessions: DashMap<UserId, Session>,
    ttl: Duration,
}

impl Conversations {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Starts (or restarts) the conversation at the name step.
    ///
    /// Message ids retained by an unfinished previous session are carried
    /// over so they are still cleaned up.
    pub fn begin(&self, user: UserId, trigger: MessageId) {
        self.purge_expired();

        let mut pending = self
            .sessions
            .remove(&user)
            .map(|(_, session)| session.pending)
            .unwrap_or_default();
        pending.push(trigger);

        self.sessions.insert(
            user,
            Session {
                step: Step::AwaitingName,
                pending,
                touched_at: Instant::now(),
            },
        );
    }

    /// Retains a message id for cleanup. No-op when the user is idle.
    pub fn remember(&self, user: UserId, message_id: MessageId) {
        if let Some(mut session) = self.sessions.get_mut(&user) {
            session.pending.push(message_id);
        }
    }

    /// Current step, `None` when idle or expired
    pub fn step(&self, user: UserId) -> Option<Step> {
        let session = self.sessions.get(&user)?;
        if session.is_expired(self.ttl) {
            return None;
        }
        Some(session.step.clone())
    }

    /// Applies one user message to the active step.
    ///
    /// `text` is `None` for non-text messages, which are invalid input at
    /// every step. The session is removed on completion.
    pub fn advance(&self, user: UserId, text: Option<&str>, message_id: MessageId, flows: &[String]) -> Advance {
        let mut session = match self.sessions.get_mut(&user) {
            Some(session) => session,
            None => return Advance::Idle,
        };

        if session.is_expired(self.ttl) {
            drop(session);
            self.sessions.remove(&user);
            log::info!("Registration session of user {} expired", user.0);
            return Advance::Idle;
        }

        session.pending.push(message_id);
        session.touched_at = Instant::now();
        let text = text.unwrap_or_default();

        match session.step.clone() {
            Step::AwaitingName => match validate_full_name(text) {
                Ok(full_name) => {
                    session.step = Step::AwaitingFlow { full_name };
                    Advance::NameAccepted
                }
                Err(e) => {
                    log::debug!("User {} sent invalid name: {}", user.0, e);
                    Advance::NameRejected
                }
            },
            Step::AwaitingFlow { full_name } => match validate_flow(text, flows) {
                Ok(flow) => {
                    let completed = Completed {
                        full_name,
                        flow: flow.to_string(),
                        pending: std::mem::take(&mut session.pending),
                    };
                    drop(session);
                    self.sessions.remove(&user);
                    Advance::Completed(completed)
                }
                Err(e) => {
                    log::debug!("User {} sent invalid flow: {}", user.0, e);
                    Advance::FlowRejected
                }
            },
        }
    }

    /// Drops every expired session and returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(self.ttl));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            log::info!("Dropped {} expired registration session(s)", purged);
        }
        purged
    }

    /// Number of stored sessions, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
