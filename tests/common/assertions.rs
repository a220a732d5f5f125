//! Custom assertions for edit scripts

use postcraft::editor::diff::{EditKind, EditScript};
use postcraft::editor::render::DiffSegment;

/// The script must rebuild both texts exactly
pub fn assert_reconstructs(script: &EditScript, original: &str, updated: &str) {
    pretty_assertions::assert_eq!(script.original_text(), original);
    pretty_assertions::assert_eq!(script.updated_text(), updated);
}

/// Coalesced segments never have two neighbours of the same kind
pub fn assert_no_same_kind_neighbours(segments: &[DiffSegment]) {
    for pair in segments.windows(2) {
        assert_ne!(
            pair[0].kind, pair[1].kind,
            "adjacent segments {:?} and {:?} should have been merged",
            pair[0], pair[1]
        );
    }
}

/// Text of all segments of the given kind, in order
pub fn segment_text(segments: &[DiffSegment], kind: EditKind) -> String {
    segments
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.text.as_str())
        .collect()
}
