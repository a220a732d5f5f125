//! Patch Renderer
//!
//! Turns an edit script into display segments. Segments keep the order of
//! the script; two neighbours of different kinds are never merged, so a
//! removed/added pair stays visible at the exact substitution point.

use crate::editor::diff::{EditKind, EditScript};
use serde::{Deserialize, Serialize};

/// A run of text with a single display style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: EditKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: EditKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One segment per edit script entry
pub fn render(script: &EditScript) -> Vec<DiffSegment> {
    script
        .iter()
        .map(|edit| DiffSegment::new(edit.kind, edit.token.text.clone()))
        .collect()
}

/// Like `render`, with neighbouring segments of the same kind joined
pub fn render_coalesced(script: &EditScript) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::new();

    for edit in script {
        match segments.last_mut() {
            Some(last) if last.kind == edit.kind => last.text.push_str(&edit.token.text),
            _ => segments.push(DiffSegment::new(edit.kind, edit.token.text.clone())),
        }
    }

    segments
}

/// Word-diff markup: `[-removed-]` and `{+added+}`
pub fn to_markup(script: &EditScript) -> String {
    render_coalesced(script)
        .into_iter()
        .map(|segment| match segment.kind {
            EditKind::Unchanged => segment.text,
            EditKind::Removed => format!("[-{}-]", segment.text),
            EditKind::Added => format!("{{+{}+}}", segment.text),
        })
        .collect()
}
