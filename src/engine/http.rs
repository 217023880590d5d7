//! HTTP answering-engine client.
//!
//! Talks to an Ollama-style inference server (`/api/generate`,
//! `/api/tags`) and keeps the conversational state the engine contract
//! requires: at most one conversation thread per session key, created
//! lazily, reset by `clear_session`, with a bounded history window
//! folded into each prompt.
//!
//! Concurrency: each session key owns its own lock, held across the
//! whole read-history → call → append span, so overlapping requests on
//! the same session are serialized instead of interleaving their
//! conversation context.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{AnswerEngine, EngineError};
use crate::session::SessionKey;

/// Number of past exchanges folded into the prompt.
const HISTORY_WINDOW: usize = 6;

const SYSTEM_PROMPT: &str = "You are Vaidya Dhara, a public health assistant. Answer health \
questions clearly and factually from your medical knowledge, and always remind users that \
serious or persistent problems need a qualified healthcare professional.";

const SYMPTOM_CHECK_PROMPT: &str = " If the user describes symptoms, note any that may need \
urgent medical attention before answering.";

/// One past exchange in a session's conversation thread.
#[derive(Debug, Clone)]
struct Exchange {
    question: String,
    answer: String,
}

type Thread = Arc<Mutex<Vec<Exchange>>>;

pub struct HttpAnswerEngine {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    sessions: Mutex<HashMap<SessionKey, Thread>>,
}

impl HttpAnswerEngine {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs: timeout.as_secs(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Get or lazily create the conversation thread for a session.
    fn thread(&self, session: &SessionKey) -> Thread {
        let mut sessions = self.sessions.lock().expect("session map lock");
        sessions.entry(session.clone()).or_default().clone()
    }

    /// Fold the history window and the new question into one prompt.
    fn build_prompt(history: &[Exchange], question: &str) -> String {
        if history.is_empty() {
            return question.to_string();
        }
        let mut prompt = String::from("Earlier in this conversation:\n");
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for exchange in &history[start..] {
            prompt.push_str(&format!(
                "User: {}\nAssistant: {}\n",
                exchange.question, exchange.answer
            ));
        }
        prompt.push_str(&format!("\nUser's new question: {question}"));
        prompt
    }

    fn map_send_error(&self, e: reqwest::Error) -> EngineError {
        if e.is_connect() {
            EngineError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            EngineError::Timeout(self.timeout_secs)
        } else {
            EngineError::Connection(e.to_string())
        }
    }

    fn generate(&self, prompt: &str, system: &str) -> Result<String, EngineError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EngineError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| EngineError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn list_models(&self) -> Result<Vec<String>, EngineError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EngineError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| EngineError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

impl AnswerEngine for HttpAnswerEngine {
    fn get_response(
        &self,
        prompt: &str,
        session: &SessionKey,
        skip_symptom_check: bool,
    ) -> Result<String, EngineError> {
        let thread = self.thread(session);
        // Held across the engine call: serializes this session's thread.
        let mut history = thread.lock().expect("session thread lock");

        let full_prompt = Self::build_prompt(&history, prompt);
        let system = if skip_symptom_check {
            SYSTEM_PROMPT.to_string()
        } else {
            format!("{SYSTEM_PROMPT}{SYMPTOM_CHECK_PROMPT}")
        };

        let answer = self.generate(&full_prompt, &system)?;

        history.push(Exchange {
            question: prompt.to_string(),
            answer: answer.clone(),
        });

        Ok(answer)
    }

    fn clear_session(&self, session: &SessionKey) {
        let mut sessions = self.sessions.lock().expect("session map lock");
        if sessions.remove(session).is_some() {
            tracing::info!(session = %session, "Cleared engine session");
        }
    }

    fn initialize(&self) -> Result<(), EngineError> {
        let models = self.list_models()?;
        if !models.iter().any(|m| m.starts_with(&self.model)) {
            return Err(EngineError::ModelUnavailable(self.model.clone()));
        }
        tracing::info!(model = %self.model, "Answering engine ready");
        Ok(())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}
