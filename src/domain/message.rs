//! Message metadata and classification categories.

use serde::{Deserialize, Serialize};

/// The per-message facts the classifier needs.
///
/// A read-only snapshot built once per message when it is pulled off the
/// mailbox stream; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Sender address, lower-cased for matching.
    pub from: String,
    /// Subject line, as received.
    pub subject: String,
    /// Whether the message carries a bulk-mail indicator
    /// (a `List-Unsubscribe` header).
    pub has_unsubscribe: bool,
}

impl MessageMetadata {
    /// Creates a metadata snapshot, lower-casing the sender address.
    pub fn new(from: impl Into<String>, subject: impl Into<String>, has_unsubscribe: bool) -> Self {
        Self {
            from: from.into().to_lowercase(),
            subject: subject.into(),
            has_unsubscribe,
        }
    }
}

/// Classification assigned to a message received today.
///
/// Every message gets exactly one category, decided by rule precedence in
/// [`crate::classify::Classifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Whitelisted sender, important domain, or deadline/invoice keyword.
    Important,
    /// Bulk mail carrying an unsubscribe indicator.
    Newsletter,
    /// Everything else, including blacklisted senders.
    Other,
}
