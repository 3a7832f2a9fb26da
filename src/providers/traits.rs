//! Mailbox search capability traits.
//!
//! These traits define everything the summary engine requires of a mail
//! store: acquiring one authenticated session per request, counting
//! messages received on or after a boundary date, and streaming message
//! metadata for the day window. Implementations handle the actual
//! protocol; the engine only sees these seams.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;

use crate::domain::{MailboxCredentials, MessageMetadata};

/// Result type alias for mailbox search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while talking to the mail store.
///
/// All three kinds are fatal for the whole request: the engine performs
/// no retries and never returns a partial report.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Host unreachable, timeout, or broken connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// The mail store rejected the credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Malformed or unexpected response during search or fetch.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// A finite, single-pass stream of message metadata.
///
/// Each element is classified and discarded; the full set is never
/// materialized by the engine.
pub type MetadataStream<'a> = BoxStream<'a, SearchResult<MessageMetadata>>;

/// Acquires mailbox sessions.
///
/// One session is acquired per summary request and released before the
/// result or error is surfaced.
#[async_trait]
pub trait MailboxConnector: Send + Sync {
    /// The session type produced by this connector.
    type Session: MailboxSession;

    /// Connects and authenticates against the mail store.
    ///
    /// # Errors
    ///
    /// [`SearchError::Connection`] if the host is unreachable,
    /// [`SearchError::Authentication`] if the credentials are rejected.
    async fn connect(&self, credentials: &MailboxCredentials) -> SearchResult<Self::Session>;
}

/// An authenticated mailbox session.
#[async_trait]
pub trait MailboxSession: Send {
    /// Counts messages with a received date on or after `since`.
    async fn count_since(&mut self, since: NaiveDate) -> SearchResult<u32>;

    /// Streams metadata for messages with a received date on or after
    /// `since`. Only ever invoked with the day boundary.
    async fn fetch_metadata_since<'a>(
        &'a mut self,
        since: NaiveDate,
    ) -> SearchResult<MetadataStream<'a>>;

    /// Releases the session.
    ///
    /// Called on every exit path, success or failure.
    async fn close(&mut self) -> SearchResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_display() {
        let conn = SearchError::Connection("host unreachable".to_string());
        assert_eq!(conn.to_string(), "connection error: host unreachable");

        let auth = SearchError::Authentication("bad password".to_string());
        assert!(auth.to_string().contains("authentication failed"));

        let proto = SearchError::Protocol("unexpected untagged response".to_string());
        assert!(proto.to_string().contains("protocol error"));
    }
}
