//! Chat orchestration with two-tier fault containment.
//!
//! Inner tier: an engine failure becomes a fixed retry message and the
//! interaction is still logged and credited. Outer tier: any other
//! failure (in practice, the store) degrades to a fixed
//! technical-difficulty answer with zero points. Callers of the chat
//! path never receive an error, only a tagged outcome.

use std::sync::Arc;

use serde::Deserialize;

use crate::engine::AnswerEngine;
use crate::language;
use crate::recorder::InteractionRecorder;
use crate::session::SessionKey;

/// Substituted when the engine call itself fails; the interaction is
/// still recorded and credited.
pub const ENGINE_FALLBACK_ANSWER: &str = "I'm having trouble understanding your request. \
     Please try rephrasing it or try again later.";

/// Substituted when the interaction as a whole cannot be completed.
pub const TOTAL_FAILURE_ANSWER: &str = "I apologize, but I'm experiencing technical \
     difficulties. Please try again later.";

/// An inbound chat interaction. Immutable once received.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRequest {
    pub question: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_language() -> String {
    language::DEFAULT_LANGUAGE.to_string()
}

fn default_location() -> String {
    "Mysuru".to_string()
}

/// Outcome of a chat interaction. Both variants carry a well-formed
/// answer; only a completed interaction carries earned points.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Interaction completed (possibly with the engine fallback answer)
    /// and was recorded; `points` is the post-credit cumulative total.
    Completed { answer: String, points: i64 },
    /// Interaction could not be completed; fixed answer, zero points.
    Degraded,
}

impl ChatOutcome {
    pub fn answer(&self) -> &str {
        match self {
            ChatOutcome::Completed { answer, .. } => answer,
            ChatOutcome::Degraded => TOTAL_FAILURE_ANSWER,
        }
    }

    pub fn points(&self) -> i64 {
        match self {
            ChatOutcome::Completed { points, .. } => *points,
            ChatOutcome::Degraded => 0,
        }
    }
}

pub struct AnswerOrchestrator {
    engine: Arc<dyn AnswerEngine>,
    recorder: InteractionRecorder,
}

impl AnswerOrchestrator {
    pub fn new(engine: Arc<dyn AnswerEngine>, recorder: InteractionRecorder) -> Self {
        Self { engine, recorder }
    }

    /// Inner containment tier: ask the engine, never fail.
    ///
    /// An engine failure is logged and replaced with the fixed retry
    /// message, so downstream flow continues normally.
    pub fn answer(&self, prompt: &str, session: &SessionKey, skip_symptom_check: bool) -> String {
        match self.engine.get_response(prompt, session, skip_symptom_check) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(session = %session, error = %e, "Engine call failed, using fallback answer");
                ENGINE_FALLBACK_ANSWER.to_string()
            }
        }
    }

    /// Outer containment tier: the full chat interaction.
    ///
    /// Augments the question for the requested language, obtains an
    /// answer (or the engine fallback), then logs and credits the
    /// interaction. A recording failure degrades the whole interaction
    /// to [`ChatOutcome::Degraded`] rather than surfacing an error.
    pub fn chat(&self, request: &InteractionRequest, session: &SessionKey) -> ChatOutcome {
        let prompt = language::augment(&request.question, &request.language);
        let answer = self.answer(&prompt, session, false);

        match self.recorder.record(
            &request.question,
            &answer,
            &request.language,
            &request.location,
            session,
        ) {
            Ok(points) => ChatOutcome::Completed { answer, points },
            Err(e) => {
                tracing::error!(session = %session, error = %e, "Chat interaction could not be recorded");
                ChatOutcome::Degraded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::engine::MockEngine;
    use crate::recorder::POINTS_PER_INTERACTION;

    fn orchestrator(engine: Arc<MockEngine>) -> (AnswerOrchestrator, Database) {
        let db = Database::open_in_memory().unwrap();
        let recorder = InteractionRecorder::new(db.clone());
        (AnswerOrchestrator::new(engine, recorder), db)
    }

    fn request(question: &str, lang: &str) -> InteractionRequest {
        InteractionRequest {
            question: question.into(),
            language: lang.into(),
            location: "Mysuru".into(),
        }
    }

    #[test]
    fn request_defaults_from_json() {
        let req: InteractionRequest =
            serde_json::from_str(r#"{"question":"I have a fever"}"#).unwrap();
        assert_eq!(req.language, "en");
        assert_eq!(req.location, "Mysuru");
    }

    #[test]
    fn completed_chat_returns_engine_answer_and_credit() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (orchestrator, _db) = orchestrator(engine.clone());
        let session = SessionKey::new("default_user");

        let outcome = orchestrator.chat(&request("I have a fever", "en"), &session);
        assert_eq!(
            outcome,
            ChatOutcome::Completed {
                answer: "ok".into(),
                points: POINTS_PER_INTERACTION,
            }
        );
        // English requests reach the engine unaugmented.
        assert_eq!(engine.seen_prompts(), vec!["I have a fever"]);
    }

    #[test]
    fn non_english_chat_sends_augmented_prompt() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (orchestrator, _db) = orchestrator(engine.clone());
        let session = SessionKey::new("default_user");

        orchestrator.chat(&request("I have a fever", "hi"), &session);

        let prompts = engine.seen_prompts();
        assert!(prompts[0].contains("Hindi"));
        assert!(prompts[0].contains("I have a fever"));
    }

    #[test]
    fn engine_failure_falls_back_but_still_credits() {
        let engine = Arc::new(MockEngine::failing("connection refused"));
        let (orchestrator, db) = orchestrator(engine);
        let session = SessionKey::new("default_user");

        let outcome = orchestrator.chat(&request("hello", "en"), &session);

        assert_eq!(outcome.answer(), ENGINE_FALLBACK_ANSWER);
        assert_eq!(outcome.points(), POINTS_PER_INTERACTION);
        // The fallback answer is still logged.
        assert_eq!(db.count_interactions().unwrap(), 1);
    }

    #[test]
    fn inner_tier_never_fails() {
        let engine = Arc::new(MockEngine::failing("down"));
        let (orchestrator, _db) = orchestrator(engine);
        let session = SessionKey::new("default_user");

        let answer = orchestrator.answer("anything", &session, true);
        assert_eq!(answer, ENGINE_FALLBACK_ANSWER);
    }

    #[test]
    fn store_failure_degrades_with_zero_points() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (orchestrator, db) = orchestrator(engine);
        db.execute_raw("DROP TABLE user_points;").unwrap();
        let session = SessionKey::new("default_user");

        let outcome = orchestrator.chat(&request("hello", "en"), &session);

        assert_eq!(outcome, ChatOutcome::Degraded);
        assert_eq!(outcome.answer(), TOTAL_FAILURE_ANSWER);
        assert_eq!(outcome.points(), 0);
    }

    #[test]
    fn degraded_outcome_has_fixed_answer_and_zero_points() {
        assert_eq!(ChatOutcome::Degraded.answer(), TOTAL_FAILURE_ANSWER);
        assert_eq!(ChatOutcome::Degraded.points(), 0);
    }

    #[test]
    fn each_chat_adds_exactly_one_log_and_one_credit() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (orchestrator, db) = orchestrator(engine);
        let session = SessionKey::new("default_user");

        orchestrator.chat(&request("q1", "en"), &session);
        let outcome = orchestrator.chat(&request("q2", "en"), &session);

        assert_eq!(db.count_interactions().unwrap(), 2);
        assert_eq!(outcome.points(), 2 * POINTS_PER_INTERACTION);
    }
}
