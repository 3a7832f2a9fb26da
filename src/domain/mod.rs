//! Domain layer types for the mailgauge engine.
//!
//! This module contains the core domain types used throughout the crate:
//! time windows, message metadata, request/credential envelopes, and the
//! report payload returned to callers.

mod message;
mod report;
mod request;
mod window;

pub use message::{Category, MessageMetadata};
pub use report::{ActivityReport, CategoryCounts, WindowCounts};
pub use request::{MailboxCredentials, SummaryRequest};
pub use window::{TimeWindow, WindowBounds};
