//! Batch session orchestration: runs the scoring engine over a candidate
//! set against one job, with concurrent fan-out, per-candidate fault
//! isolation, and a monotone progress counter.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use ulid::Ulid;

use crate::embedding::{Embedder, Embedding};
use crate::error::EngineError;
use crate::matching::scoring::{score_candidate, MatchResult};
use crate::matching::weights::MatchConfig;
use crate::{BiasRisk, CandidateProfile, JobProfile};

/// Embedding input is truncated to this many characters, mirroring the
/// upstream model's context limit.
const EMBED_TEXT_LIMIT: usize = 512;

const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Processing => "processing",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }

    /// Completed and failed sessions are immutable.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Failed)
    }
}

/// One batch-scoring run of many candidates against one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSession {
    pub id: String,
    pub job_title: String,
    pub status: SessionStatus,
    pub total_candidates: usize,
    pub processed_candidates: usize,
    pub config: MatchConfig,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MatchSession {
    fn new(job_title: &str, total_candidates: usize, config: MatchConfig) -> Self {
        Self {
            id: Ulid::new().to_string(),
            job_title: job_title.to_string(),
            status: SessionStatus::Pending,
            total_candidates,
            processed_candidates: 0,
            config,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn progress_percent(&self) -> f64 {
        if self.total_candidates == 0 {
            return 0.0;
        }
        self.processed_candidates as f64 / self.total_candidates as f64 * 100.0
    }
}

/// A candidate queued for scoring, with optional precomputed embedding
/// and the externally computed bias-risk signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionCandidate {
    pub profile: CandidateProfile,
    #[serde(default)]
    pub embedding: Option<Embedding>,
    #[serde(default)]
    pub bias_risk: Option<BiasRisk>,
}

impl SessionCandidate {
    pub fn new(profile: CandidateProfile) -> Self {
        Self {
            profile,
            embedding: None,
            bias_risk: None,
        }
    }
}

/// Observer for batch progress; the orchestrator calls it once per
/// attempted candidate, success or skip.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, processed: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, processed: usize, total: usize) {
        self(processed, total)
    }
}

#[derive(Clone, Default)]
pub struct SessionOptions {
    /// Pluggable embedding model; used only for profiles that arrive
    /// without a precomputed embedding.
    pub embedder: Option<Arc<dyn Embedder>>,
    /// Precomputed job embedding, if the caller already has one.
    pub job_embedding: Option<Embedding>,
    /// Budget per embedding call; expiry falls back to the neutral
    /// semantic score. Zero means the default.
    pub embed_timeout_secs: u64,
    /// Maximum concurrent scoring tasks. Zero means auto.
    pub concurrency: usize,
    pub progress: Option<Arc<dyn ProgressSink>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub session: MatchSession,
    /// Ranked results, best first. May be shorter than
    /// `total_candidates` when individual candidates were skipped.
    pub results: Vec<MatchResult>,
}

/// Embed `text` on a blocking thread with a deadline. Best-effort: any
/// failure resolves to `None` and the semantic dimension goes neutral.
async fn embed_with_timeout(
    embedder: Arc<dyn Embedder>,
    text: String,
    timeout_secs: u64,
) -> Option<Embedding> {
    let truncated: String = text.chars().take(EMBED_TEXT_LIMIT).collect();
    let work = tokio::task::spawn_blocking(move || embedder.embed(&truncated));

    match tokio::time::timeout(std::time::Duration::from_secs(timeout_secs), work).await {
        Ok(Ok(embedding)) => Some(embedding),
        Ok(Err(join_err)) => {
            warn!(error = %join_err, "embedding task failed; semantic score falls back to neutral");
            None
        }
        Err(_) => {
            warn!(
                error = %EngineError::EmbeddingTimeout { timeout_secs },
                "semantic score falls back to neutral"
            );
            None
        }
    }
}

/// Run one matching session: score every candidate against the job,
/// rank the successful results, and return the terminal session.
///
/// Candidates are scored concurrently; ranking depends only on
/// `overall_score` with ties kept in input order, never on completion
/// order. A single candidate's failure is logged and skipped. The only
/// fatal condition is a job profile with no structured data, which
/// returns `EngineError::MissingJobProfile` carrying the failed session.
pub async fn run_session(
    job: JobProfile,
    candidates: Vec<SessionCandidate>,
    config: MatchConfig,
    options: SessionOptions,
) -> Result<SessionOutcome, EngineError> {
    let mut session = MatchSession::new(&job.title, candidates.len(), config.clone());

    if job.is_empty() {
        session.status = SessionStatus::Failed;
        session.completed_at = Some(Utc::now());
        error!(session_id = %session.id, "job profile empty; session failed");
        return Err(EngineError::MissingJobProfile {
            session: Box::new(session),
        });
    }

    session.status = SessionStatus::Processing;
    session.started_at = Some(Utc::now());
    info!(
        session_id = %session.id,
        total = session.total_candidates,
        "matching session started"
    );

    let job_embedding = match (&options.job_embedding, &options.embedder) {
        (Some(embedding), _) => Some(embedding.clone()),
        (None, Some(embedder)) => {
            embed_with_timeout(
                Arc::clone(embedder),
                job.embedding_text(),
                effective_timeout(&options),
            )
            .await
        }
        (None, None) => None,
    };

    let total = candidates.len();
    let job = Arc::new(job);
    let config = Arc::new(config);
    let job_embedding = Arc::new(job_embedding);
    let semaphore = Arc::new(Semaphore::new(effective_concurrency(&options, total)));
    let processed = Arc::new(AtomicUsize::new(0));

    let mut tasks: JoinSet<(usize, MatchResult)> = JoinSet::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        let job = Arc::clone(&job);
        let config = Arc::clone(&config);
        let job_embedding = Arc::clone(&job_embedding);
        let semaphore = Arc::clone(&semaphore);
        let embedder = options.embedder.clone();
        let timeout_secs = effective_timeout(&options);

        tasks.spawn(async move {
            // The semaphore is never closed; a failed acquire only means
            // the bound is gone, so scoring proceeds unthrottled.
            let _permit = semaphore.acquire_owned().await.ok();

            let candidate_embedding = match (candidate.embedding, embedder) {
                (Some(embedding), _) => Some(embedding),
                (None, Some(embedder)) => {
                    embed_with_timeout(embedder, candidate.profile.embedding_text(), timeout_secs)
                        .await
                }
                (None, None) => None,
            };

            let result = score_candidate(
                &candidate.profile,
                &job,
                candidate_embedding.as_ref(),
                job_embedding.as_ref().as_ref(),
                candidate.bias_risk,
                &config,
            );
            (index, result)
        });
    }

    // Fan-in. Progress counts attempts (success or skip), so it is
    // consistent with total even when candidates fail.
    let mut indexed: Vec<(usize, MatchResult)> = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => indexed.push((index, result)),
            Err(join_err) => {
                let skip = EngineError::CandidateSkipped {
                    candidate_id: "unknown".into(),
                    reason: join_err.to_string(),
                };
                error!(session_id = %session.id, error = %skip, "candidate skipped");
            }
        }

        let done = processed.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        if let Some(sink) = &options.progress {
            sink.on_progress(done, total);
        }
    }

    session.processed_candidates = processed.load(AtomicOrdering::SeqCst);

    // Restore input order first, then rank by score. sort_by is stable,
    // so equal scores keep their original iteration order.
    indexed.sort_by_key(|(index, _)| *index);
    let mut results: Vec<MatchResult> = indexed.into_iter().map(|(_, result)| result).collect();
    results.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(Ordering::Equal)
    });
    for (position, result) in results.iter_mut().enumerate() {
        result.rank = Some(position as u32 + 1);
    }

    session.status = SessionStatus::Completed;
    session.completed_at = Some(Utc::now());
    info!(
        session_id = %session.id,
        ranked = results.len(),
        skipped = session.processed_candidates.saturating_sub(results.len()),
        "matching session completed"
    );

    Ok(SessionOutcome { session, results })
}

fn effective_timeout(options: &SessionOptions) -> u64 {
    if options.embed_timeout_secs == 0 {
        DEFAULT_EMBED_TIMEOUT_SECS
    } else {
        options.embed_timeout_secs
    }
}

fn effective_concurrency(options: &SessionOptions, total: usize) -> usize {
    if options.concurrency > 0 {
        return options.concurrency;
    }
    total.clamp(1, DEFAULT_MAX_CONCURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;
    use crate::WorkEntry;

    fn job() -> JobProfile {
        JobProfile {
            title: "Backend Engineer".into(),
            required_skills: vec!["Rust".into(), "SQL".into()],
            experience_range: "3-6 years".into(),
            education_requirement: "Bachelor's degree".into(),
            ..JobProfile::default()
        }
    }

    fn candidate(id: &str, skills: &[&str], years: f64) -> SessionCandidate {
        SessionCandidate::new(CandidateProfile {
            id: id.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            total_experience_years: years,
            work_history: vec![WorkEntry {
                title: "Backend Engineer".into(),
                duration_text: "2019 - present".into(),
                ..WorkEntry::default()
            }],
            ..CandidateProfile::default()
        })
    }

    #[tokio::test]
    async fn ranks_candidates_by_overall_score() {
        let candidates = vec![
            candidate("weak", &["Excel"], 1.0),
            candidate("strong", &["Rust", "SQL"], 4.0),
            candidate("middle", &["Rust"], 4.0),
        ];

        let outcome = run_session(
            job(),
            candidates,
            MatchConfig::default(),
            SessionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.session.status, SessionStatus::Completed);
        assert_eq!(outcome.session.processed_candidates, 3);
        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.results[0].candidate_id, "strong");
        assert_eq!(outcome.results[0].rank, Some(1));
        assert_eq!(
            outcome.results.iter().filter_map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(outcome.results[0].overall_score >= outcome.results[1].overall_score);
    }

    #[tokio::test]
    async fn rank_one_is_invariant_to_input_order() {
        let forward = vec![
            candidate("weak", &["Excel"], 1.0),
            candidate("strong", &["Rust", "SQL"], 4.0),
        ];
        let reversed = vec![
            candidate("strong", &["Rust", "SQL"], 4.0),
            candidate("weak", &["Excel"], 1.0),
        ];

        let a = run_session(job(), forward, MatchConfig::default(), SessionOptions::default())
            .await
            .unwrap();
        let b = run_session(job(), reversed, MatchConfig::default(), SessionOptions::default())
            .await
            .unwrap();

        assert_eq!(a.results[0].candidate_id, "strong");
        assert_eq!(b.results[0].candidate_id, "strong");
    }

    #[tokio::test]
    async fn equal_scores_keep_input_order() {
        let twins = vec![
            candidate("first", &["Rust", "SQL"], 4.0),
            candidate("second", &["Rust", "SQL"], 4.0),
        ];

        let outcome = run_session(
            job(),
            twins,
            MatchConfig::default(),
            SessionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.results[0].overall_score, outcome.results[1].overall_score);
        assert_eq!(outcome.results[0].candidate_id, "first");
        assert_eq!(outcome.results[1].candidate_id, "second");
    }

    #[tokio::test]
    async fn empty_batch_completes_instead_of_failing() {
        let outcome = run_session(
            job(),
            Vec::new(),
            MatchConfig::default(),
            SessionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.session.status, SessionStatus::Completed);
        assert_eq!(outcome.session.total_candidates, 0);
        assert!(outcome.results.is_empty());
        assert!(outcome.session.completed_at.is_some());
    }

    #[tokio::test]
    async fn empty_job_profile_fails_the_session() {
        let err = run_session(
            JobProfile::default(),
            vec![candidate("cand", &["Rust"], 3.0)],
            MatchConfig::default(),
            SessionOptions::default(),
        )
        .await
        .unwrap_err();

        match err {
            EngineError::MissingJobProfile { session } => {
                assert_eq!(session.status, SessionStatus::Failed);
                assert!(session.status.is_terminal());
                assert_eq!(session.processed_candidates, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn progress_sink_observes_every_attempt() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_sink = Arc::clone(&seen);
        let sink: Arc<dyn ProgressSink> = Arc::new(move |processed: usize, total: usize| {
            assert!(processed <= total);
            seen_in_sink.store(processed, AtomicOrdering::SeqCst);
        });

        let candidates = vec![
            candidate("a", &["Rust"], 2.0),
            candidate("b", &["SQL"], 3.0),
            candidate("c", &["Go"], 4.0),
        ];

        let outcome = run_session(
            job(),
            candidates,
            MatchConfig::default(),
            SessionOptions {
                progress: Some(sink),
                ..SessionOptions::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(seen.load(AtomicOrdering::SeqCst), 3);
        assert_eq!(outcome.session.processed_candidates, 3);
    }

    #[tokio::test]
    async fn embedder_supplies_semantic_scores() {
        let embedder: Arc<dyn Embedder> = Arc::new(HashEmbedder::default());
        let mut strong = candidate("strong", &["Rust", "SQL"], 4.0);
        strong.profile.summary = Some("rust backend services and sql databases".into());

        let outcome = run_session(
            job(),
            vec![strong],
            MatchConfig::default(),
            SessionOptions {
                embedder: Some(embedder),
                ..SessionOptions::default()
            },
        )
        .await
        .unwrap();

        let breakdown = &outcome.results[0].breakdown.semantic;
        assert!(breakdown.available);
    }

    #[tokio::test]
    async fn precomputed_embeddings_bypass_the_embedder() {
        let embedder = HashEmbedder::default();
        let vector = embedder.embed("rust sql backend");

        let mut cand = candidate("cand", &["Rust", "SQL"], 4.0);
        cand.embedding = Some(vector.clone());

        let outcome = run_session(
            job(),
            vec![cand],
            MatchConfig::default(),
            SessionOptions {
                job_embedding: Some(vector),
                ..SessionOptions::default()
            },
        )
        .await
        .unwrap();

        // Identical vectors on both sides: similarity is maximal.
        assert!(outcome.results[0].semantic_score > 0.99);
    }

    #[tokio::test]
    async fn session_ids_are_unique_ulids() {
        let a = run_session(job(), Vec::new(), MatchConfig::default(), SessionOptions::default())
            .await
            .unwrap();
        let b = run_session(job(), Vec::new(), MatchConfig::default(), SessionOptions::default())
            .await
            .unwrap();

        assert_ne!(a.session.id, b.session.id);
        assert_eq!(a.session.id.len(), 26);
    }
}
