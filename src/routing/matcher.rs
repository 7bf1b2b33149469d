//! Route key matching.
//!
//! # Responsibilities
//! - Reduce a request path to its routable form (everything before the first `.`)
//! - Test the routable path against a route key by suffix
//!
//! # Design Decisions
//! - Suffix matching lets sections mount under any path base
//! - Case-insensitive comparison
//! - Plain string operations, no regex

/// Portion of `path` before the first literal `.`.
///
/// `/jobgroup.xml` and `/jobgroup` both route as `/jobgroup`.
pub fn routable_path(path: &str) -> &str {
    path.split_once('.').map_or(path, |(head, _)| head)
}

/// Matches paths ending with a route key, ignoring case.
#[derive(Debug, Clone)]
pub struct SuffixMatcher {
    key: String,
    folded: String,
}

impl SuffixMatcher {
    /// The key is case-folded once here so matching only folds the path.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let folded = key.to_lowercase();
        Self { key, folded }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the routable form of `path` ends with the key.
    pub fn matches(&self, path: &str) -> bool {
        routable_path(path).to_lowercase().ends_with(&self.folded)
    }
}
