//! # Pending Patches
//!
//! A proposed, not yet committed change to the document. A patch is built
//! once, when the rewrite answer (or the fallback) arrives, and is consumed by
//! accept or reject.
//!
//! ## Features
//!
//! - **Token-indexed application**: accepting replays the edit script computed
//!   at proposal time; the selected text is never searched for again
//! - **Provenance**: every patch records whether the text came from the
//!   rewrite service or from the local fallback
//! - **Display**: segments for inline diff rendering

use crate::editor::diff::{DiffStats, DiffStrategy, EditScript};
use crate::editor::render::{self, DiffSegment};
use crate::editor::tokenizer::tokenize;
use crate::shared::enhance::EnhanceDirective;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the enhanced text of a patch came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchOrigin {
    /// The rewrite service answered
    Service,
    /// The service failed; the text is the local fallback
    Fallback {
        /// Why the service call was abandoned
        reason: String,
    },
}

impl PatchOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// An uncommitted proposed change awaiting accept or reject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPatch {
    /// Unique patch ID
    pub id: Uuid,
    /// Trimmed selected text that was replaced
    pub original_span: String,
    /// Trimmed replacement text
    pub enhanced_span: String,
    /// Document before the change
    pub full_document_before: String,
    /// Document after the change
    pub full_document_after: String,
    /// Token-level diff between the two documents
    pub edit_script: EditScript,
    /// Directive the user picked
    pub directive: EnhanceDirective,
    /// Service answer or fallback
    pub origin: PatchOrigin,
    /// Document revision the patch applies to
    pub base_revision: u64,
    /// When the patch was proposed
    pub created_at: DateTime<Utc>,
}

impl PendingPatch {
    /// Build a patch by diffing the two full documents
    #[allow(clippy::too_many_arguments)]
    pub fn propose(
        strategy: &dyn DiffStrategy,
        original_span: impl Into<String>,
        enhanced_span: impl Into<String>,
        full_document_before: impl Into<String>,
        full_document_after: impl Into<String>,
        directive: EnhanceDirective,
        origin: PatchOrigin,
        base_revision: u64,
    ) -> Self {
        let full_document_before = full_document_before.into();
        let full_document_after = full_document_after.into();
        let edit_script = strategy.align(
            &tokenize(&full_document_before),
            &tokenize(&full_document_after),
        );

        Self {
            id: Uuid::new_v4(),
            original_span: original_span.into(),
            enhanced_span: enhanced_span.into(),
            full_document_before,
            full_document_after,
            edit_script,
            directive,
            origin,
            base_revision,
            created_at: Utc::now(),
        }
    }

    /// Apply the patch to `document` by replaying the edit script
    ///
    /// Returns `None` when `document` is not the text the patch was computed
    /// against.
    pub fn apply(&self, document: &str) -> Option<String> {
        if self.edit_script.original_text() != document {
            return None;
        }
        Some(self.edit_script.updated_text())
    }

    /// Display segments for the inline diff
    pub fn segments(&self) -> Vec<DiffSegment> {
        render::render_coalesced(&self.edit_script)
    }

    /// Word-diff markup of the change
    pub fn markup(&self) -> String {
        render::to_markup(&self.edit_script)
    }

    pub fn stats(&self) -> DiffStats {
        self.edit_script.stats()
    }

    /// Whether the patch would leave the document unchanged
    pub fn is_noop(&self) -> bool {
        self.edit_script.is_identity()
    }
}
