//! Configuration and settings management.
//!
//! This module provides the settings types and persistence for the
//! pieces of a summary run that aren't part of the request itself: the
//! classifier's important-domain and important-keyword sets and default
//! sender lists. Settings are stored in the user's config directory as
//! JSON and passed explicitly into each run; the engine keeps no
//! process-wide mutable state.

mod settings;

pub use settings::{ClassifierSettings, ListSettings, Settings};
