//! # Diff Aligner
//!
//! Computes an edit script between two token sequences. Every token of the
//! original ends up exactly once as `Unchanged` or `Removed`, and every token
//! of the updated text exactly once as `Unchanged` or `Added`, in order. The
//! two round-trip laws follow from that:
//!
//! - unchanged + removed tokens concatenate to the original text
//! - unchanged + added tokens concatenate to the updated text
//!
//! ## Strategies
//!
//! - **`GreedyLookahead`** (default): linear scan with forward lookahead on a
//!   mismatch. Not minimal, but cheap for post-sized documents. When a
//!   mismatch can be explained either way, it prefers "new content was
//!   inserted" over "old content was removed".
//! - **`LongestCommonSubsequence`**: dynamic-programming LCS, minimal in the
//!   number of changed tokens, quadratic memory.
//!
//! ## Usage
//!
//! ```rust
//! use postcraft::editor::diff::diff_text;
//!
//! let script = diff_text("I love AI", "I adore AI");
//! assert_eq!(script.original_text(), "I love AI");
//! assert_eq!(script.updated_text(), "I adore AI");
//! ```

use crate::editor::tokenizer::{tokenize, Token};
use serde::{Deserialize, Serialize};

/// Kind of an edit script entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// Present in both texts
    Unchanged,
    /// Only in the original text
    Removed,
    /// Only in the updated text
    Added,
}

/// A single edit script entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: EditKind,
    pub token: Token,
}

impl Edit {
    pub fn unchanged(token: Token) -> Self {
        Self { kind: EditKind::Unchanged, token }
    }

    pub fn removed(token: Token) -> Self {
        Self { kind: EditKind::Removed, token }
    }

    pub fn added(token: Token) -> Self {
        Self { kind: EditKind::Added, token }
    }

    /// Whether this entry contributes to the original text
    pub fn in_original(&self) -> bool {
        self.kind != EditKind::Added
    }

    /// Whether this entry contributes to the updated text
    pub fn in_updated(&self) -> bool {
        self.kind != EditKind::Removed
    }
}

/// Ordered list of edits between two texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    edits: Vec<Edit>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edit> {
        self.edits.iter()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Text reconstructed from the unchanged and removed entries
    pub fn original_text(&self) -> String {
        self.collect_text(Edit::in_original)
    }

    /// Text reconstructed from the unchanged and added entries
    pub fn updated_text(&self) -> String {
        self.collect_text(Edit::in_updated)
    }

    /// True when nothing was added or removed
    pub fn is_identity(&self) -> bool {
        self.edits.iter().all(|e| e.kind == EditKind::Unchanged)
    }

    /// Entries that change the text
    pub fn changes(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter().filter(|e| e.kind != EditKind::Unchanged)
    }

    /// Counts of unchanged, removed and added tokens and words
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();

        for edit in &self.edits {
            let is_word = !edit.token.is_whitespace();
            match edit.kind {
                EditKind::Unchanged => {
                    stats.unchanged_tokens += 1;
                    stats.unchanged_words += usize::from(is_word);
                }
                EditKind::Removed => {
                    stats.removed_tokens += 1;
                    stats.removed_words += usize::from(is_word);
                }
                EditKind::Added => {
                    stats.added_tokens += 1;
                    stats.added_words += usize::from(is_word);
                }
            }
        }

        stats
    }

    fn collect_text(&self, keep: fn(&Edit) -> bool) -> String {
        self.edits
            .iter()
            .filter(|edit| keep(edit))
            .map(|edit| edit.token.text.as_str())
            .collect()
    }
}

impl FromIterator<Edit> for EditScript {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

/// Summary counts for an edit script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged_tokens: usize,
    pub removed_tokens: usize,
    pub added_tokens: usize,
    pub unchanged_words: usize,
    pub removed_words: usize,
    pub added_words: usize,
}

impl DiffStats {
    /// Share of words touched by the change, from 0.0 (identical) to 1.0
    pub fn change_ratio(&self) -> f64 {
        let changed = self.removed_words + self.added_words;
        let total = changed + 2 * self.unchanged_words;
        if total == 0 {
            0.0
        } else {
            changed as f64 / total as f64
        }
    }

    pub fn has_changes(&self) -> bool {
        self.removed_tokens + self.added_tokens > 0
    }
}

/// Algorithm used to align two token sequences
pub trait DiffStrategy {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Align `original` against `updated`
    fn align(&self, original: &[Token], updated: &[Token]) -> EditScript;
}

/// Greedy two-cursor alignment with forward lookahead
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyLookahead;

impl DiffStrategy for GreedyLookahead {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn align(&self, original: &[Token], updated: &[Token]) -> EditScript {
        let mut script = EditScript::new();
        let (mut i, mut j) = (0, 0);

        while i < original.len() || j < updated.len() {
            if i >= original.len() {
                script.edits.extend(updated[j..].iter().cloned().map(Edit::added));
                break;
            }
            if j >= updated.len() {
                script.edits.extend(original[i..].iter().cloned().map(Edit::removed));
                break;
            }

            let (old, new) = (&original[i], &updated[j]);
            if old.same_text(new) {
                script.push(Edit::unchanged(old.clone()));
                i += 1;
                j += 1;
                continue;
            }

            // Insertions are tried first: if the original token shows up later in
            // the updated text, everything before it was inserted.
            if let Some(offset) = find_from(updated, j + 1, old) {
                script
                    .edits
                    .extend(updated[j..offset].iter().cloned().map(Edit::added));
                script.push(Edit::unchanged(old.clone()));
                i += 1;
                j = offset + 1;
            } else if let Some(offset) = find_from(original, i + 1, new) {
                script
                    .edits
                    .extend(original[i..offset].iter().cloned().map(Edit::removed));
                i = offset;
            } else {
                script.push(Edit::removed(old.clone()));
                script.push(Edit::added(new.clone()));
                i += 1;
                j += 1;
            }
        }

        script
    }
}

/// Index of the first token in `tokens[from..]` with the same text as `needle`
fn find_from(tokens: &[Token], from: usize, needle: &Token) -> Option<usize> {
    tokens
        .get(from..)?
        .iter()
        .position(|t| t.same_text(needle))
        .map(|pos| from + pos)
}

/// Minimal alignment via longest common subsequence
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubsequence;

impl DiffStrategy for LongestCommonSubsequence {
    fn name(&self) -> &'static str {
        "lcs"
    }

    fn align(&self, original: &[Token], updated: &[Token]) -> EditScript {
        let (n, m) = (original.len(), updated.len());
        let width = m + 1;

        // suffix[i * width + j] = LCS length of original[i..] and updated[j..]
        let mut suffix = vec![0u32; (n + 1) * width];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                suffix[i * width + j] = if original[i].same_text(&updated[j]) {
                    suffix[(i + 1) * width + j + 1] + 1
                } else {
                    suffix[(i + 1) * width + j].max(suffix[i * width + j + 1])
                };
            }
        }

        let mut script = EditScript::new();
        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            if original[i].same_text(&updated[j]) {
                script.push(Edit::unchanged(original[i].clone()));
                i += 1;
                j += 1;
            } else if suffix[(i + 1) * width + j] >= suffix[i * width + j + 1] {
                script.push(Edit::removed(original[i].clone()));
                i += 1;
            } else {
                script.push(Edit::added(updated[j].clone()));
                j += 1;
            }
        }
        script.edits.extend(original[i..].iter().cloned().map(Edit::removed));
        script.edits.extend(updated[j..].iter().cloned().map(Edit::added));

        script
    }
}

/// Align two token sequences with the default greedy strategy
pub fn diff(original: &[Token], updated: &[Token]) -> EditScript {
    GreedyLookahead.align(original, updated)
}

/// Tokenize and align two texts with the default greedy strategy
pub fn diff_text(original: &str, updated: &str) -> EditScript {
    diff(&tokenize(original), &tokenize(updated))
}

/// Tokenize and align two texts with the given strategy
pub fn diff_text_with(strategy: &dyn DiffStrategy, original: &str, updated: &str) -> EditScript {
    let script = strategy.align(&tokenize(original), &tokenize(updated));
    tracing::trace!(
        strategy = strategy.name(),
        edits = script.len(),
        "aligned texts"
    );
    script
}
