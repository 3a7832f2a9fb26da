//! Ordered heuristic message classification.
//!
//! Each message received today is assigned exactly one [`Category`] by
//! evaluating rules in a fixed order, first match wins:
//!
//! 1. blacklisted sender → `Other`
//! 2. unsubscribe indicator → `Newsletter`
//! 3. whitelisted sender, important domain suffix, or important subject
//!    keyword → `Important`
//! 4. default → `Other`
//!
//! The blacklist is a hard user override and suppresses both the
//! newsletter and importance signals. The newsletter signal is structural
//! (a header, not content) and is resolved before the heuristic
//! importance checks. Within step 3 the three checks are a plain OR with
//! no sub-ordering.

use crate::domain::{Category, MessageMetadata};

/// Domain suffixes that mark a sender as important by default.
pub const DEFAULT_IMPORTANT_DOMAINS: &[&str] = &[".gov", ".de"];

/// Subject keywords that mark a message as important by default.
///
/// German terms for deadline, official notice, invoice, and payment
/// reminder, matching the dashboard this engine was built for.
pub const DEFAULT_IMPORTANT_KEYWORDS: &[&str] = &["frist", "bescheid", "rechnung", "mahnung"];

/// Rule-based message classifier.
///
/// Deterministic and side-effect-free: identical inputs always yield the
/// same category, and every input yields one. The important-domain and
/// important-keyword sets are configurable; the defaults above apply when
/// constructed via [`Classifier::default`].
#[derive(Debug, Clone)]
pub struct Classifier {
    important_domains: Vec<String>,
    important_keywords: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_IMPORTANT_DOMAINS.iter().map(|s| s.to_string()),
            DEFAULT_IMPORTANT_KEYWORDS.iter().map(|s| s.to_string()),
        )
    }
}

impl Classifier {
    /// Creates a classifier with custom domain and keyword sets.
    ///
    /// Entries are lower-cased once here so matching stays
    /// case-insensitive without re-folding per message.
    pub fn new(
        important_domains: impl IntoIterator<Item = String>,
        important_keywords: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            important_domains: important_domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
            important_keywords: important_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Assigns exactly one category to a message.
    pub fn classify(
        &self,
        message: &MessageMetadata,
        whitelist: &[String],
        blacklist: &[String],
    ) -> Category {
        if Self::matches_list(&message.from, blacklist) {
            return Category::Other;
        }

        if message.has_unsubscribe {
            return Category::Newsletter;
        }

        if Self::matches_list(&message.from, whitelist)
            || self.has_important_domain(&message.from)
            || self.has_important_keyword(&message.subject)
        {
            return Category::Important;
        }

        Category::Other
    }

    /// Case-insensitive substring containment against the sender address.
    ///
    /// Plain containment, so an empty entry matches every sender.
    fn matches_list(from: &str, entries: &[String]) -> bool {
        entries
            .iter()
            .any(|entry| from.contains(&entry.to_lowercase()))
    }

    fn has_important_domain(&self, from: &str) -> bool {
        self.important_domains
            .iter()
            .any(|domain| from.ends_with(domain.as_str()))
    }

    fn has_important_keyword(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.important_keywords
            .iter()
            .any(|keyword| subject.contains(keyword.as_str()))
    }
}
