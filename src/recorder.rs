//! Interaction recording: one log entry, one point credit.
//!
//! The two side effects are independent store operations executed in a
//! fixed order. There is no cross-operation transaction: a log failure
//! is reported and does not block the credit, while a credit failure
//! propagates to the orchestrator's outer containment tier.

use crate::db::{Database, DatabaseError};
use crate::session::SessionKey;

/// Fixed credit for every completed chat interaction. This is the only
/// point-earning path; health-tip point values are display metadata.
pub const POINTS_PER_INTERACTION: i64 = 10;

pub struct InteractionRecorder {
    db: Database,
}

impl InteractionRecorder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a completed interaction and return the session's new
    /// cumulative point total.
    ///
    /// Ordering is fixed: log first, credit second. The returned total
    /// is always the post-credit value.
    pub fn record(
        &self,
        question: &str,
        answer: &str,
        language: &str,
        location: &str,
        session: &SessionKey,
    ) -> Result<i64, DatabaseError> {
        if let Err(e) = self
            .db
            .log_interaction(question, answer, language, location)
        {
            // Best-effort: a lost log entry must not cost the user
            // their credit.
            tracing::error!(session = %session, error = %e, "Failed to log interaction");
        }

        let total = self
            .db
            .add_points(session.as_str(), POINTS_PER_INTERACTION)?;

        tracing::debug!(session = %session, points = total, "Interaction recorded");
        Ok(total)
    }
}
