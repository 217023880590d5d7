//! Answering-engine seam.
//!
//! The gateway consumes the generative engine through the narrow
//! `AnswerEngine` contract: one call to answer a prompt within a
//! session, one idempotent session reset, one startup probe. The
//! production implementation lives in [`http`]; tests swap in
//! [`MockEngine`].

pub mod http;

pub use http::HttpAnswerEngine;

use std::sync::Mutex;

use thiserror::Error;

use crate::session::SessionKey;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot reach answering engine at {0}")]
    Connection(String),

    #[error("Engine request timed out after {0}s")]
    Timeout(u64),

    #[error("Engine returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse engine response: {0}")]
    ResponseParsing(String),

    #[error("Configured model {0} is not available on the engine")]
    ModelUnavailable(String),
}

/// Contract with the external answering engine.
pub trait AnswerEngine: Send + Sync {
    /// Answer a prompt within the given session's conversation thread.
    ///
    /// `skip_symptom_check` tells the engine not to run its own
    /// symptom-detection heuristics; the triage service sets it to avoid
    /// double-triage when it has already built a symptom query.
    fn get_response(
        &self,
        prompt: &str,
        session: &SessionKey,
        skip_symptom_check: bool,
    ) -> Result<String, EngineError>;

    /// Drop the session's conversation thread. Idempotent.
    fn clear_session(&self, session: &SessionKey);

    /// Probe the engine once at process start.
    fn initialize(&self) -> Result<(), EngineError>;
}

/// One `get_response` call observed by [`MockEngine`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub session: SessionKey,
    pub skip_symptom_check: bool,
}

/// Mock engine for tests — returns a configurable response or failure
/// and records the calls it was asked.
pub struct MockEngine {
    response: Result<String, String>,
    calls: Mutex<Vec<RecordedCall>>,
    cleared: Mutex<Vec<SessionKey>>,
}

impl MockEngine {
    pub fn replying(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Mutex::new(Vec::new()),
            cleared: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            calls: Mutex::new(Vec::new()),
            cleared: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, in order.
    pub fn seen_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock lock").clone()
    }

    /// Prompts received so far, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.seen_calls().into_iter().map(|c| c.prompt).collect()
    }

    /// Sessions cleared so far.
    pub fn cleared_sessions(&self) -> Vec<SessionKey> {
        self.cleared.lock().expect("mock lock").clone()
    }
}

impl AnswerEngine for MockEngine {
    fn get_response(
        &self,
        prompt: &str,
        session: &SessionKey,
        skip_symptom_check: bool,
    ) -> Result<String, EngineError> {
        self.calls.lock().expect("mock lock").push(RecordedCall {
            prompt: prompt.to_string(),
            session: session.clone(),
            skip_symptom_check,
        });
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(EngineError::Connection(reason.clone())),
        }
    }

    fn clear_session(&self, session: &SessionKey) {
        self.cleared.lock().expect("mock lock").push(session.clone());
    }

    fn initialize(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_engine_returns_configured_response() {
        let engine = MockEngine::replying("ok");
        let session = SessionKey::new("s");
        assert_eq!(engine.get_response("hello", &session, false).unwrap(), "ok");
        assert_eq!(engine.seen_prompts(), vec!["hello"]);
    }

    #[test]
    fn mock_engine_failure_is_an_error() {
        let engine = MockEngine::failing("down");
        let session = SessionKey::new("s");
        assert!(engine.get_response("hello", &session, false).is_err());
    }
}
