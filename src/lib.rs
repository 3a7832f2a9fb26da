//! mailgauge - a mailbox activity summary and classification engine
//!
//! This crate computes counts of messages received in three nested time
//! windows (day, month, year) anchored to a reference date, and
//! classifies the day's messages into important / newsletter / other
//! using ordered heuristic rules. The mailbox is reached through a
//! capability interface with an IMAP implementation.

pub mod classify;
pub mod config;
pub mod domain;
pub mod providers;
pub mod services;

pub use services::{SummaryError, SummaryService};
