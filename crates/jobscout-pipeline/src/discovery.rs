//! Discovery cycle: evaluate new postings and persist the scored ones

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use jobscout_domain::traits::{CompanyTierLookup, JobStore, PostingAnalyzer};
use jobscout_domain::{
    Category, Classification, ClassificationRequest, EvaluatedPosting, JobRecord, RawPosting, Scorer,
    SponsorshipEvaluator, StoreStats, TextualSignal, TierTable,
};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, error, info, warn};

/// What one discovery cycle did with its input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Postings handed to the cycle
    pub received: usize,
    /// Postings beyond `max_postings_per_cycle`, not looked at
    pub over_cap: usize,
    /// Postings whose hash was already stored or repeated in the input
    pub already_known: usize,
    /// Postings whose evaluation finished
    pub evaluated: usize,
    /// Discarded because the category was `Other` or classification failed
    pub discarded_other: usize,
    /// Discarded by the entry-level filter
    pub discarded_not_entry_level: usize,
    /// Stored with LOW confidence by a hard exclusion
    pub excluded: usize,
    /// Evaluations cut off by the cycle budget or lost to a failed task
    pub abandoned: usize,
    /// New records written
    pub inserted: usize,
    /// Store counts after the cycle
    pub stats: StoreStats,
}

/// Analyzer outcome for one posting
enum Verdict {
    Keep {
        classification: Classification,
        textual: Option<TextualSignal>,
    },
    Other,
    NotEntryLevel,
}

/// One pass over a batch of raw postings
///
/// Analyzer calls run on the blocking pool, at most
/// `max_concurrent_analyses` at a time, each under `analysis_timeout_secs`.
/// A call that times out or is abandoned keeps its slot until it actually
/// returns, across runs of the same cycle.
/// Scoring and persistence happen afterwards on the calling task, in input
/// order.
pub struct DiscoveryCycle<A, T = TierTable> {
    analyzer: Arc<A>,
    permits: Arc<Semaphore>,
    evaluator: SponsorshipEvaluator<T>,
    scorer: Scorer,
    config: PipelineConfig,
}

impl<A, T> DiscoveryCycle<A, T>
where
    A: PostingAnalyzer + Send + Sync + 'static,
    A::Error: Display,
    T: CompanyTierLookup,
    T::Error: Display,
{
    /// Create a new cycle
    pub fn new(
        analyzer: A,
        evaluator: SponsorshipEvaluator<T>,
        scorer: Scorer,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        scorer.config().validate().map_err(PipelineError::Config)?;
        Ok(Self {
            analyzer: Arc::new(analyzer),
            permits: Arc::new(Semaphore::new(config.max_concurrent_analyses)),
            evaluator,
            scorer,
            config,
        })
    }

    /// The analyzer in use
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Run the cycle; `now` becomes every new record's `discovered_at`
    pub async fn run<S>(
        &self,
        store: &mut S,
        postings: Vec<RawPosting>,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryReport, PipelineError>
    where
        S: JobStore,
        S::Error: Display,
    {
        let deadline = Instant::now() + self.config.cycle_budget();
        let mut report = DiscoveryReport {
            received: postings.len(),
            ..Default::default()
        };

        let mut postings = postings;
        if postings.len() > self.config.max_postings_per_cycle {
            report.over_cap = postings.len() - self.config.max_postings_per_cycle;
            postings.truncate(self.config.max_postings_per_cycle);
        }

        let mut seen = HashSet::new();
        let mut pending = Vec::with_capacity(postings.len());
        for posting in postings {
            let hash = posting.hash();
            if !seen.insert(hash.clone()) || store.contains_hash(&hash).map_err(store_error)? {
                debug!("Skipping known posting '{}' at '{}'", posting.title, posting.company);
                report.already_known += 1;
                continue;
            }
            pending.push(posting);
        }

        info!(
            "Evaluating {} postings ({} received, {} over cap, {} known)",
            pending.len(),
            report.received,
            report.over_cap,
            report.already_known
        );

        let mut verdicts = self.evaluate_all(&pending, deadline).await;

        for (index, posting) in pending.into_iter().enumerate() {
            let Some(verdict) = verdicts.get_mut(index).and_then(Option::take) else {
                report.abandoned += 1;
                continue;
            };
            report.evaluated += 1;

            let (classification, textual) = match verdict {
                Verdict::Other => {
                    debug!("Discarding '{}': no tracked category", posting.title);
                    report.discarded_other += 1;
                    continue;
                }
                Verdict::NotEntryLevel => {
                    debug!("Discarding '{}': not entry-level", posting.title);
                    report.discarded_not_entry_level += 1;
                    continue;
                }
                Verdict::Keep {
                    classification,
                    textual,
                } => (classification, textual),
            };

            let sponsor = self.evaluator.evaluate(&posting, textual);
            if sponsor.excluded {
                report.excluded += 1;
            }

            let record = JobRecord::new(
                EvaluatedPosting {
                    posting,
                    category: classification.category,
                    sponsor,
                    entry_level_reasoning: classification.reasoning,
                },
                &self.scorer,
                now,
            );

            if store.insert_if_absent(&record).map_err(store_error)? {
                info!(
                    "Stored '{}' at '{}' ({}, {}, score {:.1})",
                    record.title, record.company, record.category, record.sponsor_confidence, record.score()
                );
                report.inserted += 1;
            } else {
                report.already_known += 1;
            }
        }

        report.stats = store.stats().map_err(store_error)?;

        info!(
            "Discovery complete: {} inserted, {} discarded, {} abandoned",
            report.inserted,
            report.discarded_other + report.discarded_not_entry_level,
            report.abandoned
        );

        Ok(report)
    }

    /// Evaluate every posting concurrently until done or `deadline`
    ///
    /// Slot `i` holds the verdict for `postings[i]`, or `None` if it never
    /// arrived.
    async fn evaluate_all(&self, postings: &[RawPosting], deadline: Instant) -> Vec<Option<Verdict>> {
        let mut tasks = JoinSet::new();

        for (index, posting) in postings.iter().enumerate() {
            let request = ClassificationRequest::from_posting(posting);
            // Excluded postings end LOW whatever the text says
            let needs_textual = self.evaluator.exclusion(posting).is_none();
            let analyzer = Arc::clone(&self.analyzer);
            let permits = Arc::clone(&self.permits);
            let call_timeout = self.config.analysis_timeout();
            let max_years = self.config.max_entry_level_years;

            tasks.spawn(async move {
                let verdict = evaluate(analyzer, permits, request, needs_textual, call_timeout, max_years).await;
                (index, verdict)
            });
        }

        let mut verdicts: Vec<Option<Verdict>> = postings.iter().map(|_| None).collect();
        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, verdict)))) => {
                    if let Some(slot) = verdicts.get_mut(index) {
                        *slot = Some(verdict);
                    }
                }
                Ok(Some(Err(e))) => warn!("Evaluation task failed: {}", e),
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Cycle budget of {}s exhausted; abandoning {} evaluations",
                        self.config.cycle_budget_secs,
                        tasks.len()
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        verdicts
    }
}

async fn evaluate<A>(
    analyzer: Arc<A>,
    permits: Arc<Semaphore>,
    request: ClassificationRequest,
    needs_textual: bool,
    call_timeout: Duration,
    max_years: u32,
) -> Verdict
where
    A: PostingAnalyzer + Send + Sync + 'static,
    A::Error: Display,
{
    let request = Arc::new(request);

    let classification = match call_analyzer(&analyzer, &permits, &request, call_timeout, |a: &A, r| a.classify(r)).await {
        Ok(classification) => classification,
        Err(reason) => {
            warn!("Classification of '{}' failed: {}", request.title, reason);
            Classification::unavailable()
        }
    };

    if classification.category == Category::Other {
        return Verdict::Other;
    }
    if !classification.entry_level.is_entry_level(max_years) {
        return Verdict::NotEntryLevel;
    }

    let textual = if needs_textual {
        match call_analyzer(&analyzer, &permits, &request, call_timeout, |a: &A, r| a.sponsorship_signal(r)).await {
            Ok(signal) => Some(signal),
            Err(reason) => {
                warn!("Sponsorship analysis of '{}' failed: {}", request.title, reason);
                None
            }
        }
    } else {
        None
    };

    Verdict::Keep {
        classification,
        textual,
    }
}

/// Run one analyzer call on the blocking pool under `limit`
///
/// The permit moves into the blocking closure, so it is released when the
/// call returns rather than when `limit` expires.
async fn call_analyzer<A, R, F>(
    analyzer: &Arc<A>,
    permits: &Arc<Semaphore>,
    request: &Arc<ClassificationRequest>,
    limit: Duration,
    call: F,
) -> Result<R, String>
where
    A: PostingAnalyzer + Send + Sync + 'static,
    A::Error: Display,
    R: Send + 'static,
    F: FnOnce(&A, &ClassificationRequest) -> Result<R, A::Error> + Send + 'static,
{
    let analyzer = Arc::clone(analyzer);
    let request = Arc::clone(request);
    let permit = Arc::clone(permits)
        .acquire_owned()
        .await
        .map_err(|e| format!("analysis slots closed: {}", e))?;
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        call(&analyzer, &request).map_err(|e| e.to_string())
    });

    match timeout(limit, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(format!("analysis task failed: {}", e)),
        Err(_) => Err(format!("timed out after {}s", limit.as_secs())),
    }
}

fn store_error<E: Display>(e: E) -> PipelineError {
    error!("Store failure, aborting cycle: {}", e);
    PipelineError::Store(e.to_string())
}
