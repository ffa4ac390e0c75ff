//! Anchor-relative text insertion for the route aggregator
//!
//! The aggregator is never parsed. Content is inserted immediately before a
//! literal anchor and every other byte is preserved. Splicing is not
//! idempotent: running it again on its own output inserts the snippets a
//! second time.

use crate::error::{Result, ScaffoldError};
use std::path::Path;

/// Insert `content` immediately before the first occurrence of `anchor`
///
/// Returns `None` when the anchor does not occur in `text`. An empty anchor
/// never matches.
///
/// # Examples
///
/// ```
/// # use layergen::scaffold::splice::insert_before;
/// let out = insert_before("a\nEND\n", "END", "b\n").unwrap();
/// assert_eq!(out, "a\nb\nEND\n");
/// assert!(insert_before("a\n", "END", "b\n").is_none());
/// assert!(insert_before("a\n", "", "b\n").is_none());
/// ```
#[must_use]
pub fn insert_before(text: &str, anchor: &str, content: &str) -> Option<String> {
    if anchor.is_empty() {
        return None;
    }
    let at = text.find(anchor)?;
    let (before, after) = text.split_at(at);

    let mut spliced = String::with_capacity(text.len() + content.len());
    spliced.push_str(before);
    spliced.push_str(content);
    spliced.push_str(after);
    Some(spliced)
}

/// The two insertions made into the aggregator for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorSplice {
    /// Anchor that route imports go in front of
    pub import_anchor: String,
    /// Anchor that route registrations go in front of
    pub registration_anchor: String,
    /// Import snippet, inserted verbatim
    pub import: String,
    /// Registration snippet, inserted verbatim
    pub registration: String,
}

impl AggregatorSplice {
    /// Apply both insertions, import first
    ///
    /// The registration anchor is searched for in the text produced by the
    /// import insertion. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingAnchor`] if either anchor is absent
    /// or empty.
    pub fn apply(&self, text: &str, path: &Path) -> Result<String> {
        if self.already_imported(text) {
            tracing::warn!(
                path = %path.display(),
                import = self.import.trim(),
                "aggregator already imports this route; it will be imported twice"
            );
        }

        let with_import = insert_before(text, &self.import_anchor, &self.import)
            .ok_or_else(|| Self::missing(&self.import_anchor, path))?;
        tracing::debug!(anchor = %self.import_anchor, "inserted route import");

        let with_registration =
            insert_before(&with_import, &self.registration_anchor, &self.registration)
                .ok_or_else(|| Self::missing(&self.registration_anchor, path))?;
        tracing::debug!(anchor = %self.registration_anchor, "inserted route registration");

        Ok(with_registration)
    }

    /// Whether `text` already contains this import snippet
    #[must_use]
    pub fn already_imported(&self, text: &str) -> bool {
        let import = self.import.trim();
        !import.is_empty() && text.contains(import)
    }

    fn missing(anchor: &str, path: &Path) -> ScaffoldError {
        tracing::error!(anchor, path = %path.display(), "anchor not found in aggregator");
        ScaffoldError::MissingAnchor {
            anchor: anchor.to_string(),
            path: path.to_path_buf(),
        }
    }
}
