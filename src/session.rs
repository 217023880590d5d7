//! Session identity for conversational state and point accrual.
//!
//! A `SessionKey` scopes both the engine's conversation thread and the
//! point ledger entry. Keys are produced by a `SessionResolver` strategy
//! and threaded explicitly through every call, so swapping in real
//! per-user identity later only means providing another resolver.

use std::fmt;
use std::sync::Arc;

/// Logical identifier scoping conversational state and point accrual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strategy for resolving the session a request belongs to.
///
/// The chat and symptom-check flows must resolve to disjoint keys so a
/// symptom consultation never pollutes the chat conversation thread.
pub trait SessionResolver: Send + Sync {
    fn chat_session(&self) -> SessionKey;
    fn symptom_session(&self) -> SessionKey;
}

/// Single-deployment resolver: one fixed key per flow.
pub struct FixedSessionResolver;

impl FixedSessionResolver {
    pub const CHAT_SESSION: &'static str = "default_user";
    pub const SYMPTOM_SESSION: &'static str = "symptom_check";

    pub fn shared() -> Arc<dyn SessionResolver> {
        Arc::new(Self)
    }
}

impl SessionResolver for FixedSessionResolver {
    fn chat_session(&self) -> SessionKey {
        SessionKey::new(Self::CHAT_SESSION)
    }

    fn symptom_session(&self) -> SessionKey {
        SessionKey::new(Self::SYMPTOM_SESSION)
    }
}
