//! Request envelope accepted by the summary engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mailbox access parameters.
///
/// Held only for the duration of one request and handed to the connector;
/// the engine never logs or persists them. The `Debug` impl redacts the
/// secret so credentials can't leak through error or trace output.
#[derive(Clone, Serialize, Deserialize)]
pub struct MailboxCredentials {
    /// IMAP server hostname.
    pub host: String,
    /// IMAP server port (typically 993 for TLS).
    pub port: u16,
    /// Account name, usually the email address.
    pub username: String,
    /// Account password or app-specific password.
    pub password: String,
}

impl MailboxCredentials {
    /// Creates credentials for a mailbox account.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns whether all required fields are present.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty()
            && self.port != 0
            && !self.username.is_empty()
            && !self.password.is_empty()
    }
}

impl fmt::Debug for MailboxCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailboxCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One summary request: a reference date, mailbox credentials, and the
/// caller's sender lists.
///
/// The whitelist and blacklist are treated as an immutable snapshot for
/// the duration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Calendar date anchoring all windows, `YYYY-MM-DD`.
    pub reference_date: String,
    /// Mailbox access parameters.
    pub credentials: MailboxCredentials,
    /// Sender fragments that mark a message as important.
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Sender fragments that force a message to `Other`.
    #[serde(default)]
    pub blacklist: Vec<String>,
}
