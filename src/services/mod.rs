//! Business services layer.
//!
//! Services orchestrate the domain logic over the provider seams: the
//! summary service drives one mailbox session through the window counts
//! and the day-window classification pass, and shapes the final report.

mod summary_service;

pub use summary_service::{SummaryError, SummaryResult, SummaryService};
