//! Digest cycle: select unsent records, deliver them, mark them sent

use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use jobscout_domain::traits::{JobStore, Notifier};
use jobscout_domain::{DigestMessage, DigestPolicy, DigestSelector};
use serde::Serialize;
use std::fmt::Display;
use tracing::{error, info};

/// What one digest cycle did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestReport {
    /// Unsent records considered
    pub candidates: usize,
    /// Records marked sent after delivery
    pub marked_sent: usize,
    /// The message that was delivered
    pub message: DigestMessage,
}

/// Digest cycle over a notifier
pub struct DigestCycle<N> {
    selector: DigestSelector,
    notifier: N,
}

impl<N> DigestCycle<N>
where
    N: Notifier,
    N::Error: Display,
{
    /// Create a new cycle
    pub fn new(policy: DigestPolicy, notifier: N) -> Result<Self, PipelineError> {
        policy.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            selector: DigestSelector::new(policy),
            notifier,
        })
    }

    /// The notifier in use
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run the cycle
    ///
    /// Records are marked sent with `now` only after the notifier confirms
    /// delivery. A failed delivery leaves the store untouched.
    pub fn run<S>(&self, store: &mut S, now: DateTime<Utc>) -> Result<DigestReport, PipelineError>
    where
        S: JobStore,
        S::Error: Display,
    {
        let candidates = store
            .get_unsent(None)
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        let message = self.selector.select(&candidates, now);

        if let Err(e) = self.notifier.deliver(&message) {
            error!("Digest delivery failed: {}", e);
            return Err(PipelineError::Notification(e.to_string()));
        }

        let marked_sent = match &message {
            DigestMessage::Digest(batch) => store
                .mark_sent(batch.record_ids(), now)
                .map_err(|e| PipelineError::Store(e.to_string()))?,
            DigestMessage::NoQualifyingJobs { .. } => 0,
        };

        info!(
            "Digest delivered: {} of {} unsent records, {} marked sent",
            message.record_ids().len(),
            candidates.len(),
            marked_sent
        );

        Ok(DigestReport {
            candidates: candidates.len(),
            marked_sent,
            message,
        })
    }
}
