//! Mailbox collaborator interface and implementations.
//!
//! The engine depends on the mailbox through the capability traits in
//! [`traits`] (count messages since a boundary date, stream metadata for
//! one window) rather than on a concrete protocol client, so it can be
//! tested against deterministic fakes. [`imap`] provides the real
//! IMAP-over-TLS implementation.

pub mod imap;
pub mod traits;

pub use imap::ImapSearchClient;
pub use traits::{
    MailboxConnector, MailboxSession, MetadataStream, SearchError, SearchResult,
};
