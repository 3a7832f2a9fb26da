//! Summary service orchestrating counts and classification.
//!
//! One run: validate the request, derive the three window boundaries,
//! acquire a single mailbox session, obtain the three counts, stream the
//! day window through the classifier, release the session, and assemble
//! the report. Any collaborator failure aborts the whole run, and no
//! partially-tallied report is ever returned. The session, once
//! acquired, is released on every exit path.

use chrono::NaiveDate;
use futures::StreamExt;
use thiserror::Error;

use crate::classify::Classifier;
use crate::domain::{
    ActivityReport, CategoryCounts, SummaryRequest, WindowBounds, WindowCounts,
};
use crate::providers::{MailboxConnector, MailboxSession, SearchError};

/// Errors that can occur during a summary run.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Missing or malformed reference date or credentials, detected
    /// before any collaborator call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Collaborator failure, surfaced verbatim (kind + message).
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Result type for summary operations.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// The windowed counting and classification engine.
///
/// Generic over the mailbox connector so it can run against the real
/// IMAP adapter or a deterministic fake in tests. Holds no per-request
/// state; every run recomputes from scratch.
pub struct SummaryService<C: MailboxConnector> {
    connector: C,
    classifier: Classifier,
}

impl<C: MailboxConnector> SummaryService<C> {
    /// Creates a summary service with the default classifier.
    pub fn new(connector: C) -> Self {
        Self::with_classifier(connector, Classifier::default())
    }

    /// Creates a summary service with a custom classifier.
    pub fn with_classifier(connector: C, classifier: Classifier) -> Self {
        Self {
            connector,
            classifier,
        }
    }

    /// Runs one summary request end to end.
    ///
    /// # Errors
    ///
    /// [`SummaryError::InvalidRequest`] before any mailbox contact,
    /// [`SummaryError::Search`] for any collaborator failure. Either way
    /// no counts/categories payload accompanies the error.
    pub async fn run(&self, request: &SummaryRequest) -> SummaryResult<ActivityReport> {
        let reference = Self::validate(request)?;
        let bounds = WindowBounds::for_date(reference);

        let mut session = self.connector.connect(&request.credentials).await?;
        tracing::debug!(reference = %reference, "mailbox session acquired");

        let outcome = self.collect(&mut session, &bounds, request).await;

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "failed to release mailbox session");
        }

        let (counts, categories) = outcome?;
        tracing::info!(
            today = counts.today,
            month = counts.month,
            year = counts.year,
            important = categories.important,
            newsletter = categories.newsletter,
            other = categories.other,
            "summary computed"
        );

        Ok(ActivityReport::build(counts, categories))
    }

    /// Gathers the three window counts and the day-window tallies.
    ///
    /// Separated from [`run`](Self::run) so the session release happens
    /// in one place regardless of where this fails.
    async fn collect(
        &self,
        session: &mut C::Session,
        bounds: &WindowBounds,
        request: &SummaryRequest,
    ) -> SummaryResult<(WindowCounts, CategoryCounts)> {
        // Independent queries; no ordering requirement between them.
        let counts = WindowCounts {
            today: session.count_since(bounds.day).await?,
            month: session.count_since(bounds.month).await?,
            year: session.count_since(bounds.year).await?,
        };

        // Classify and discard each day-window message as it arrives.
        // An empty stream is valid and leaves the tallies at zero.
        let mut categories = CategoryCounts::default();
        let mut stream = session.fetch_metadata_since(bounds.day).await?;
        while let Some(message) = stream.next().await {
            let message = message?;
            let category = self
                .classifier
                .classify(&message, &request.whitelist, &request.blacklist);
            categories.record(category);
        }

        Ok((counts, categories))
    }

    /// Validates the request before any collaborator call.
    fn validate(request: &SummaryRequest) -> SummaryResult<NaiveDate> {
        if request.reference_date.is_empty() {
            return Err(SummaryError::InvalidRequest(
                "missing reference date".to_string(),
            ));
        }

        let reference = NaiveDate::parse_from_str(&request.reference_date, "%Y-%m-%d")
            .map_err(|e| {
                SummaryError::InvalidRequest(format!(
                    "malformed reference date {:?}: {}",
                    request.reference_date, e
                ))
            })?;

        if !request.credentials.is_complete() {
            return Err(SummaryError::InvalidRequest(
                "incomplete mailbox credentials".to_string(),
            ));
        }

        Ok(reference)
    }
}
