use thiserror::Error;

use crate::session::MatchSession;

/// Engine-level failures. Only `MissingJobProfile` is visible at the
/// batch boundary; everything else is caught, logged, and resolved to a
/// neutral default or a per-candidate skip inside the orchestrator.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The job profile carried no structured data at all, so no scoring
    /// attempt is possible. The terminal failed session is attached for
    /// the caller to persist.
    #[error("job profile has no structured data")]
    MissingJobProfile { session: Box<MatchSession> },

    /// Embedding generation exceeded its budget. Internal: mapped to the
    /// neutral semantic score, never propagated past the orchestrator.
    #[error("embedding timed out after {timeout_secs}s")]
    EmbeddingTimeout { timeout_secs: u64 },

    /// One candidate's scoring task failed. Internal: logged and the
    /// candidate is skipped without aborting the batch.
    #[error("candidate {candidate_id} could not be scored: {reason}")]
    CandidateSkipped {
        candidate_id: String,
        reason: String,
    },
}
