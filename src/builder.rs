use std::path::PathBuf;

use crate::classifier::PlatformClassifier;
use crate::error::FoldexError;
use crate::search::{NameMatcher, SearchConfig, SearchEngine};
use crate::traits::{Classifier, Matcher};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Fluent entry point for configuring and running a name search.
///
/// Created via [`foldex::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) or
/// [`build()`](SearchBuilder::build).
///
/// # Example
///
/// ```rust,ignore
/// let found = foldex::search("/srv/share", "invoice")
///     .case_sensitive(false)
///     .run(true)?;
/// ```
pub struct SearchBuilder {
    config:     SearchConfig,
    matcher:    Option<Box<dyn Matcher>>,
    classifier: Option<Box<dyn Classifier>>,
}

impl SearchBuilder {
    pub(crate) fn new(root: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            config:     SearchConfig::new(root, key),
            matcher:    None,
            classifier: None,
        }
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Match whole base names only. Off by default (substring matching).
    pub fn exact_match(mut self, yes: bool) -> Self {
        self.config = self.config.exact_match(yes);
        self
    }

    /// Compare names case-sensitively. On by default.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.config = self.config.case_sensitive(yes);
        self
    }

    /// Use a custom matcher instead of the key and flags.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Visit siblings in file-name order. Off by default.
    pub fn sort_by_name(mut self, yes: bool) -> Self {
        self.config = self.config.sort_by_name(yes);
        self
    }

    /// Override the hidden/kind classifier. Defaults to [`PlatformClassifier`].
    pub fn classifier(mut self, c: impl Classifier + 'static) -> Self {
        self.classifier = Some(Box::new(c));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    pub fn build(self) -> SearchEngine {
        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(NameMatcher::from(&self.config)),
        };
        let classifier: Box<dyn Classifier> = match self.classifier {
            Some(c) => c,
            None    => Box::new(PlatformClassifier),
        };
        SearchEngine::from_parts(self.config, matcher, classifier)
    }

    /// Build and run in one go.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the root is missing or unreadable.
    pub fn run(self, show_hidden: bool) -> Result<bool, FoldexError> {
        self.build().search(show_hidden)
    }
}
