//! IMAP implementation of the mailbox search capability.
//!
//! Connects over TLS, authenticates with LOGIN, and opens the configured
//! mailbox read-only. Counting uses `UID SEARCH SINCE`; the day-window
//! metadata fetch pulls envelopes plus headers with `BODY.PEEK[HEADER]`
//! so the `List-Unsubscribe` indicator can be read without marking
//! messages seen.
//!
//! The fetch batch is collected eagerly before being exposed as a stream:
//! the day window is bounded to one day of mail, so materializing it
//! keeps the session handling simple while the trait stays stream-shaped.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use mail_parser::MessageParser;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

use super::traits::{
    MailboxConnector, MailboxSession, MetadataStream, SearchError, SearchResult,
};
use crate::domain::{MailboxCredentials, MessageMetadata};

/// Type alias for the IMAP session over TLS (via the tokio-util compat layer).
type TlsImapSession = async_imap::Session<Compat<TlsStream<TcpStream>>>;

/// Connector acquiring IMAP sessions for summary requests.
///
/// Stateless apart from the target mailbox name; credentials arrive with
/// each request and are never retained.
#[derive(Debug, Clone)]
pub struct ImapSearchClient {
    mailbox: String,
}

impl Default for ImapSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ImapSearchClient {
    /// Creates a connector targeting the INBOX.
    pub fn new() -> Self {
        Self::with_mailbox("INBOX")
    }

    /// Creates a connector targeting a specific mailbox.
    pub fn with_mailbox(mailbox: impl Into<String>) -> Self {
        Self {
            mailbox: mailbox.into(),
        }
    }

    /// Establishes the TLS connection to the IMAP server.
    async fn connect_tls(
        credentials: &MailboxCredentials,
    ) -> SearchResult<Compat<TlsStream<TcpStream>>> {
        let tcp_stream =
            TcpStream::connect((credentials.host.as_str(), credentials.port))
                .await
                .map_err(|e| SearchError::Connection(format!("TCP connect failed: {}", e)))?;

        let config = ClientConfig::builder()
            .with_root_certificates(RootCertStore::from_iter(
                webpki_roots::TLS_SERVER_ROOTS.iter().cloned(),
            ))
            .with_no_client_auth();

        let connector = TlsConnector::from(Arc::new(config));
        let server_name = ServerName::try_from(credentials.host.clone())
            .map_err(|e| SearchError::Connection(format!("invalid server name: {}", e)))?;

        let tls_stream = connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| SearchError::Connection(format!("TLS handshake failed: {}", e)))?;

        // Wrap with the compat layer for the futures read/write traits.
        Ok(tls_stream.compat())
    }
}

#[async_trait]
impl MailboxConnector for ImapSearchClient {
    type Session = ImapMailboxSession;

    async fn connect(&self, credentials: &MailboxCredentials) -> SearchResult<Self::Session> {
        let tls_stream = Self::connect_tls(credentials).await?;

        let client = async_imap::Client::new(tls_stream);

        let mut session = client
            .login(&credentials.username, &credentials.password)
            .await
            .map_err(|e| {
                SearchError::Authentication(format!("IMAP login failed: {:?}", e.0))
            })?;

        // Counting and metadata fetches never mutate the mailbox. If the
        // mailbox can't be opened, release the authenticated session
        // before surfacing the error.
        if let Err(e) = session.examine(&self.mailbox).await {
            if let Err(logout_err) = session.logout().await {
                tracing::warn!(error = %logout_err, "IMAP logout failed");
            }
            return Err(map_command_error("EXAMINE failed", e));
        }

        tracing::debug!(host = %credentials.host, mailbox = %self.mailbox, "IMAP session opened");
        Ok(ImapMailboxSession { session })
    }
}

/// One authenticated, read-only IMAP session.
pub struct ImapMailboxSession {
    session: TlsImapSession,
}

impl ImapMailboxSession {
    /// Runs `UID SEARCH SINCE <date>` and returns the matching UIDs.
    async fn search_since(&mut self, since: NaiveDate) -> SearchResult<Vec<u32>> {
        let query = format!("SINCE {}", imap_date(since));
        let uids = self
            .session
            .uid_search(&query)
            .await
            .map_err(|e| map_command_error("SEARCH failed", e))?;
        Ok(uids.into_iter().collect())
    }
}

#[async_trait]
impl MailboxSession for ImapMailboxSession {
    async fn count_since(&mut self, since: NaiveDate) -> SearchResult<u32> {
        let uids = self.search_since(since).await?;
        Ok(uids.len() as u32)
    }

    async fn fetch_metadata_since<'a>(
        &'a mut self,
        since: NaiveDate,
    ) -> SearchResult<MetadataStream<'a>> {
        let uids = self.search_since(since).await?;
        if uids.is_empty() {
            return Ok(futures::stream::empty().boxed());
        }

        let uid_seq = uids
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut messages = Vec::with_capacity(uids.len());
        {
            let mut fetches = self
                .session
                .uid_fetch(&uid_seq, "(UID ENVELOPE BODY.PEEK[HEADER])")
                .await
                .map_err(|e| map_command_error("FETCH failed", e))?;

            while let Some(fetch_result) = fetches.next().await {
                let fetch =
                    fetch_result.map_err(|e| map_command_error("FETCH stream failed", e))?;
                messages.push(fetch_to_metadata(&fetch));
            }
        }

        Ok(futures::stream::iter(messages.into_iter().map(Ok)).boxed())
    }

    async fn close(&mut self) -> SearchResult<()> {
        // A failed LOGOUT doesn't invalidate an already-computed result.
        if let Err(e) = self.session.logout().await {
            tracing::warn!(error = %e, "IMAP logout failed");
        }
        Ok(())
    }
}

/// Formats a date the way IMAP `SINCE` expects, e.g. `15-Mar-2024`.
fn imap_date(date: NaiveDate) -> String {
    date.format("%-d-%b-%Y").to_string()
}

/// Maps mid-command failures onto the search error taxonomy.
fn map_command_error(context: &str, err: async_imap::error::Error) -> SearchError {
    match err {
        async_imap::error::Error::Io(e) => SearchError::Connection(format!("{}: {}", context, e)),
        async_imap::error::Error::ConnectionLost => {
            SearchError::Connection(format!("{}: connection lost", context))
        }
        other => SearchError::Protocol(format!("{}: {}", context, other)),
    }
}

/// Builds the classification snapshot for one fetched message.
///
/// Tolerant of gaps the way the surrounding dashboard was: a missing
/// envelope or unparseable header yields empty fields, which classify as
/// `Other` rather than failing the request.
fn fetch_to_metadata(fetch: &async_imap::types::Fetch) -> MessageMetadata {
    let parsed = fetch
        .header()
        .and_then(|bytes| MessageParser::default().parse(bytes));

    let has_unsubscribe = parsed
        .as_ref()
        .map(|m| m.header("List-Unsubscribe").is_some())
        .unwrap_or(false);

    // Prefer the decoded subject from the parsed header; fall back to the
    // raw envelope bytes.
    let subject = parsed
        .as_ref()
        .and_then(|m| m.subject())
        .map(|s| s.to_string())
        .or_else(|| {
            fetch
                .envelope()
                .and_then(|e| e.subject.as_ref())
                .map(|b| String::from_utf8_lossy(b).to_string())
        })
        .unwrap_or_default();

    let from = fetch
        .envelope()
        .and_then(|e| e.from.as_ref())
        .and_then(|addrs| addrs.first())
        .map(|addr| build_email_from_parts(addr.mailbox.as_ref(), addr.host.as_ref()))
        .unwrap_or_default();

    MessageMetadata::new(from, subject, has_unsubscribe)
}

/// Builds an email address string from IMAP mailbox and host parts.
fn build_email_from_parts(
    mailbox: Option<&std::borrow::Cow<'_, [u8]>>,
    host: Option<&std::borrow::Cow<'_, [u8]>>,
) -> String {
    match (mailbox, host) {
        (Some(m), Some(h)) => format!(
            "{}@{}",
            String::from_utf8_lossy(m),
            String::from_utf8_lossy(h)
        ),
        (Some(m), None) => String::from_utf8_lossy(m).to_string(),
        _ => String::new(),
    }
}
