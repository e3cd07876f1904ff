use std::path::{Path, PathBuf};

use tracing::debug;

use crate::classifier::PlatformClassifier;
use crate::engine::{walk_tree, WalkConfig};
use crate::error::FoldexError;
use crate::traits::{Classifier, Matcher};

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// What to search for and where.
///
/// Defaults: substring matching (`exact_match = false`), case-sensitive
/// (`case_sensitive = true`), platform enumeration order.
///
/// ```rust
/// let config = foldex::SearchConfig::new("/srv/share", "invoice")
///     .case_sensitive(false);
///
/// assert!(!config.exact_match);
/// assert!(!config.case_sensitive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub root:           PathBuf,
    pub key:            String,
    pub exact_match:    bool,
    pub case_sensitive: bool,
    pub sort_by_name:   bool,
}

impl SearchConfig {
    pub fn new(root: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            root:           root.into(),
            key:            key.into(),
            exact_match:    false,
            case_sensitive: true,
            sort_by_name:   false,
        }
    }

    /// Require the whole base name to equal the key.
    pub fn exact_match(mut self, yes: bool) -> Self {
        self.exact_match = yes;
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Visit siblings in file-name order, making the first match reproducible.
    pub fn sort_by_name(mut self, yes: bool) -> Self {
        self.sort_by_name = yes;
        self
    }
}

// ---------------------------------------------------------------------------
// NameMatcher
// ---------------------------------------------------------------------------

/// Exact or substring base-name matching, optionally ignoring case.
///
/// The key is lowercased once here; candidates are lowercased per call.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    key:            String,
    exact:          bool,
    case_sensitive: bool,
}

impl NameMatcher {
    pub fn new(key: &str, exact: bool, case_sensitive: bool) -> Self {
        let key = if case_sensitive {
            key.to_owned()
        } else {
            key.to_lowercase()
        };
        Self {
            key,
            exact,
            case_sensitive,
        }
    }
}

impl Matcher for NameMatcher {
    fn is_match(&self, name: &str) -> bool {
        if self.case_sensitive {
            return compare(name, &self.key, self.exact);
        }
        compare(&name.to_lowercase(), &self.key, self.exact)
    }
}

fn compare(name: &str, key: &str, exact: bool) -> bool {
    if exact {
        name == key
    } else {
        name.contains(key)
    }
}

impl From<&SearchConfig> for NameMatcher {
    fn from(config: &SearchConfig) -> Self {
        Self::new(&config.key, config.exact_match, config.case_sensitive)
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Walks a root and reports whether any descendant's base name matches.
///
/// The root itself is never a candidate. Nodes the walk could not visit are
/// never candidates either, and never stop the search.
pub struct SearchEngine {
    config:     SearchConfig,
    matcher:    Box<dyn Matcher>,
    classifier: Box<dyn Classifier>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        let matcher = NameMatcher::from(&config);
        Self {
            config,
            matcher:    Box::new(matcher),
            classifier: Box::new(PlatformClassifier),
        }
    }

    pub(crate) fn from_parts(
        config:     SearchConfig,
        matcher:    Box<dyn Matcher>,
        classifier: Box<dyn Classifier>,
    ) -> Self {
        Self {
            config,
            matcher,
            classifier,
        }
    }

    /// Replace the name matcher built from the config's key and flags.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Box::new(m);
        self
    }

    pub fn with_classifier(mut self, c: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(c);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `true` if some descendant of the root matches.
    ///
    /// # Errors
    ///
    /// [`FoldexError::RootNotFound`] if the root is missing or unreadable.
    /// A `false` result always means the walk ran and nothing matched.
    pub fn search(&self, show_hidden: bool) -> Result<bool, FoldexError> {
        Ok(self.find_first(show_hidden)?.is_some())
    }

    /// The first matching descendant in walk order.
    pub fn find_first(&self, show_hidden: bool) -> Result<Option<PathBuf>, FoldexError> {
        let config = WalkConfig {
            show_hidden,
            sort_by_name: self.config.sort_by_name,
        };
        let result = walk_tree(&self.config.root, &config, self.classifier.as_ref())?.without_root();

        let found = result
            .visited
            .into_iter()
            .find(|path| base_name(path).is_some_and(|name| self.matcher.is_match(&name)));

        debug!(
            root = %self.config.root.display(),
            key = %self.config.key,
            found = found.is_some(),
            "search complete"
        );
        Ok(found)
    }
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}
