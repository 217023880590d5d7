//! Structured symptom checking.
//!
//! Builds a detailed consultation query from structured symptom input,
//! asks the engine through the orchestrator's never-failing inner tier,
//! then derives the triage level from the *reported* symptoms — not the
//! engine's prose — so urgency stays deterministic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::language;
use crate::orchestrator::AnswerOrchestrator;
use crate::session::SessionResolver;
use crate::triage::{self, Urgency};

pub const DISCLAIMER: &str = "This analysis is for informational purposes only and does not \
     replace professional medical advice. Always consult with qualified healthcare \
     professionals for medical concerns.";

pub const FALLBACK_SUGGESTION: &str =
    "Please consult a healthcare professional for proper evaluation of your symptoms.";

const KNOWLEDGE_BASE_INSTRUCTION: &str = ". What health conditions could cause these symptoms? \
     Please provide information from your knowledge base about possible conditions, their \
     characteristics, when to seek medical care, and any preventive measures. If these \
     symptoms match any specific diseases in your knowledge base, please provide detailed \
     information about them.";

/// An inbound symptom report.
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomRequest {
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    language::DEFAULT_LANGUAGE.to_string()
}

/// Structured triage result for a symptom report.
#[derive(Debug, Clone, Serialize)]
pub struct TriageResult {
    pub suggestions: Vec<String>,
    pub urgency: Urgency,
    pub disclaimer: &'static str,
}

pub struct SymptomTriageService {
    orchestrator: Arc<AnswerOrchestrator>,
    sessions: Arc<dyn SessionResolver>,
}

impl SymptomTriageService {
    pub fn new(orchestrator: Arc<AnswerOrchestrator>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self {
            orchestrator,
            sessions,
        }
    }

    /// Run a symptom check. Infallible: an engine failure surfaces as
    /// the fixed retry message in `suggestions`, never as an error.
    ///
    /// Symptom checks are not point-earning events, so this path does
    /// not touch the interaction recorder.
    pub fn check(&self, request: &SymptomRequest) -> TriageResult {
        let query = build_query(request);
        let session = self.sessions.symptom_session();

        // skip_symptom_check: we already built a symptom query, the
        // engine must not run its own triage heuristics on top.
        let answer = self.orchestrator.answer(&query, &session, true);

        let suggestions = split_suggestions(&answer);
        let urgency = triage::classify(&request.symptoms);

        TriageResult {
            suggestions,
            urgency,
            disclaimer: DISCLAIMER,
        }
    }
}

/// Build the detailed consultation query sent to the engine.
fn build_query(request: &SymptomRequest) -> String {
    let mut query = format!("Based on these symptoms: {}", request.symptoms.join(", "));

    if let Some(duration) = &request.duration {
        query.push_str(&format!(" (duration: {duration})"));
    }
    if let Some(intensity) = &request.intensity {
        query.push_str(&format!(" (intensity: {intensity})"));
    }
    query.push_str(KNOWLEDGE_BASE_INSTRUCTION);

    if request.language != language::DEFAULT_LANGUAGE {
        let name = language::display_name(&request.language);
        query = format!("Please answer in {name}: {query}");
    }

    query
}

/// Split the engine's answer into trimmed, non-empty suggestion lines.
fn split_suggestions(answer: &str) -> Vec<String> {
    let suggestions: Vec<String> = answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if suggestions.is_empty() {
        vec![FALLBACK_SUGGESTION.to_string()]
    } else {
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::engine::MockEngine;
    use crate::orchestrator::ENGINE_FALLBACK_ANSWER;
    use crate::recorder::InteractionRecorder;
    use crate::session::FixedSessionResolver;
    use crate::session::SessionResolver as _;

    fn service(engine: Arc<MockEngine>) -> (SymptomTriageService, Database) {
        let db = Database::open_in_memory().unwrap();
        let recorder = InteractionRecorder::new(db.clone());
        let orchestrator = Arc::new(AnswerOrchestrator::new(engine, recorder));
        (
            SymptomTriageService::new(orchestrator, FixedSessionResolver::shared()),
            db,
        )
    }

    fn request(symptoms: &[&str]) -> SymptomRequest {
        SymptomRequest {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            duration: None,
            intensity: None,
            location: None,
            language: "en".into(),
        }
    }

    #[test]
    fn query_joins_symptoms_and_appends_instruction() {
        let query = build_query(&request(&["cough", "fever"]));
        assert!(query.starts_with("Based on these symptoms: cough, fever"));
        assert!(query.contains("knowledge base"));
        assert!(!query.contains("duration"));
        assert!(!query.contains("intensity"));
    }

    #[test]
    fn query_includes_optional_clauses_when_present() {
        let mut req = request(&["cough"]);
        req.duration = Some("3 days".into());
        req.intensity = Some("moderate".into());
        let query = build_query(&req);
        assert!(query.contains("(duration: 3 days)"));
        assert!(query.contains("(intensity: moderate)"));
    }

    #[test]
    fn non_english_query_gets_language_prefix() {
        let mut req = request(&["cough"]);
        req.language = "ta".into();
        let query = build_query(&req);
        assert!(query.starts_with("Please answer in Tamil:"));
    }

    #[test]
    fn check_splits_answer_into_trimmed_lines() {
        let engine = Arc::new(MockEngine::replying(
            "Possible cold.\n\n  Rest well.  \nSee a doctor if it persists.\n",
        ));
        let (service, _db) = service(engine);

        let result = service.check(&request(&["cough"]));
        assert_eq!(
            result.suggestions,
            vec![
                "Possible cold.",
                "Rest well.",
                "See a doctor if it persists."
            ]
        );
        assert_eq!(result.disclaimer, DISCLAIMER);
    }

    #[test]
    fn empty_engine_answer_yields_fallback_suggestion() {
        let engine = Arc::new(MockEngine::replying(""));
        let (service, _db) = service(engine);

        let result = service.check(&request(&["cough"]));
        assert_eq!(result.suggestions, vec![FALLBACK_SUGGESTION]);
    }

    #[test]
    fn urgency_comes_from_reported_symptoms_not_engine_output() {
        let engine = Arc::new(MockEngine::replying("Nothing to worry about."));
        let (service, _db) = service(engine);

        let result = service.check(&request(&["chest pain", "cough"]));
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn engine_failure_surfaces_retry_message_not_error() {
        let engine = Arc::new(MockEngine::failing("down"));
        let (service, _db) = service(engine);

        let result = service.check(&request(&["mild headache"]));
        assert_eq!(result.suggestions, vec![ENGINE_FALLBACK_ANSWER]);
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn symptom_checks_do_not_earn_points_or_log() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (service, db) = service(engine);

        service.check(&request(&["cough"]));
        assert_eq!(db.count_interactions().unwrap(), 0);
        assert_eq!(
            db.get_points(FixedSessionResolver::SYMPTOM_SESSION).unwrap(),
            0
        );
    }

    #[test]
    fn check_uses_symptom_session_and_skips_engine_triage() {
        let engine = Arc::new(MockEngine::replying("ok"));
        let (service, _db) = service(engine.clone());

        service.check(&request(&["cough"]));

        let calls = engine.seen_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].session, FixedSessionResolver.symptom_session());
        assert!(calls[0].skip_symptom_check);
    }
}
