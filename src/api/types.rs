//! Shared state for the API layer.

use std::sync::Arc;

use crate::db::Database;
use crate::engine::AnswerEngine;
use crate::orchestrator::AnswerOrchestrator;
use crate::recorder::InteractionRecorder;
use crate::session::{FixedSessionResolver, SessionResolver};
use crate::symptoms::SymptomTriageService;

/// Shared context for all API routes: the store, the engine seam, and
/// the orchestration services wired on top of them.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Database,
    pub engine: Arc<dyn AnswerEngine>,
    pub sessions: Arc<dyn SessionResolver>,
    pub orchestrator: Arc<AnswerOrchestrator>,
    pub triage: Arc<SymptomTriageService>,
}

impl ApiContext {
    /// Wire the full service graph over an engine and a database.
    pub fn new(engine: Arc<dyn AnswerEngine>, db: Database) -> Self {
        let sessions = FixedSessionResolver::shared();
        let recorder = InteractionRecorder::new(db.clone());
        let orchestrator = Arc::new(AnswerOrchestrator::new(engine.clone(), recorder));
        let triage = Arc::new(SymptomTriageService::new(
            orchestrator.clone(),
            sessions.clone(),
        ));

        Self {
            db,
            engine,
            sessions,
            orchestrator,
            triage,
        }
    }
}
