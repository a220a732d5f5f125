//! Selection capture and splice-point lookup.
//!
//! A selection remembers the byte range it was taken from and the document
//! revision at that moment. When a rewrite comes back, the splice point is
//! found as follows:
//!
//! 1. the captured offsets, if the document revision has not moved;
//! 2. otherwise the first exact occurrence of the trimmed selection;
//! 3. otherwise there is no splice point and the patch is dropped.

use crate::shared::error::EnhanceError;
use std::ops::Range;

/// How the splice point for a rewrite was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceMatch {
    /// The captured offsets were still valid
    Offsets,
    /// The document changed; the first occurrence of the text was used
    FirstOccurrence,
}

/// A user-highlighted span of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    text: String,
    range: Range<usize>,
    revision: u64,
}

impl Selection {
    /// Capture `range` of `document`
    ///
    /// The range is in bytes and must sit on character boundaries. The
    /// selected text must contain at least one non-whitespace character.
    pub fn capture(document: &str, range: Range<usize>, revision: u64) -> Result<Self, EnhanceError> {
        let Range { start, end } = range;
        if start > end
            || end > document.len()
            || !document.is_char_boundary(start)
            || !document.is_char_boundary(end)
        {
            return Err(EnhanceError::invalid_range(start, end, document.len()));
        }

        let text = &document[start..end];
        if text.trim().is_empty() {
            return Err(EnhanceError::EmptySelection);
        }

        Ok(Self {
            text: text.to_string(),
            range: start..end,
            revision,
        })
    }

    /// The selected text exactly as highlighted
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The selected text without surrounding whitespace
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Byte range as captured
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Document revision the selection was captured from
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Byte range of the trimmed text, as captured
    pub fn trimmed_range(&self) -> Range<usize> {
        let leading = self.text.len() - self.text.trim_start().len();
        let start = self.range.start + leading;
        start..start + self.trimmed().len()
    }

    /// Whether the captured offsets still address this text in `document`
    pub fn offsets_valid(&self, document: &str, revision: u64) -> bool {
        revision == self.revision && document.get(self.range()) == Some(self.text.as_str())
    }

    /// Where the trimmed selection should be replaced in `document`
    pub fn locate(&self, document: &str, revision: u64) -> Option<(Range<usize>, SpliceMatch)> {
        if self.offsets_valid(document, revision) {
            return Some((self.trimmed_range(), SpliceMatch::Offsets));
        }
        find_span(document, self.trimmed()).map(|range| (range, SpliceMatch::FirstOccurrence))
    }
}

/// Byte range of the first occurrence of `needle` in `document`
pub fn find_span(document: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    document
        .find(needle)
        .map(|start| start..start + needle.len())
}

/// Copy of `document` with `range` replaced by `replacement`
pub fn splice(document: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(document.len() - range.len() + replacement.len());
    out.push_str(&document[..range.start]);
    out.push_str(replacement);
    out.push_str(&document[range.end..]);
    out
}
