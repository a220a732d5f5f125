//! # Selection/Patch Controller
//!
//! Owns the document and drives selective enhancement through an explicit
//! state machine:
//!
//! ```text
//! Idle -> Selecting -> AwaitingRewrite -> PatchPending -> (Accepted | Rejected) -> Idle
//! ```
//!
//! The controller never performs I/O. `request_enhancement` hands out a
//! ticketed request; whoever sends it reports the answer back through
//! `complete_rewrite`. Answers carrying any ticket other than the one
//! currently awaited are ignored.
//!
//! ## Invariants
//!
//! - At most one pending patch. Selecting again while a patch is pending
//!   rejects it first.
//! - At most one awaited request. Selecting again while a request is in
//!   flight drops interest in its answer.
//! - The document only changes through `accept`, `edit_document` and `undo`.
//! - A failed rewrite still produces a reviewable patch (the fallback).
//!
//! ## Usage
//!
//! ```rust
//! use postcraft::editor::controller::EnhanceController;
//! use postcraft::shared::enhance::{EnhanceDirective, EnhanceResponse};
//!
//! let mut controller = EnhanceController::new("I love AI");
//! controller.select(2..6).unwrap();
//! let pending = controller.request_enhancement(EnhanceDirective::Engaging).unwrap();
//!
//! let answer = Ok(EnhanceResponse::success("love", "absolutely adore"));
//! controller.complete_rewrite(pending.ticket, answer);
//! controller.accept();
//!
//! assert_eq!(controller.document(), "I absolutely adore AI");
//! ```

use crate::editor::diff::{DiffStrategy, GreedyLookahead};
use crate::editor::patch::{PatchOrigin, PendingPatch};
use crate::editor::selection::{splice, Selection, SpliceMatch};
use crate::shared::config::{AppConfig, DEFAULT_FALLBACK_MARKER, DEFAULT_HISTORY_LIMIT};
use crate::shared::enhance::{EnhanceDirective, EnhanceRequest, EnhanceResponse};
use crate::shared::error::{EnhanceError, RewriteError};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;
use uuid::Uuid;

/// Identifies one rewrite request; newer requests get larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RewriteTicket(u64);

impl RewriteTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RewriteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rewrite request ready to be sent to the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: RewriteTicket,
    pub request: EnhanceRequest,
}

/// Controller state
#[derive(Debug, Clone)]
pub enum EnhanceState {
    /// Nothing selected
    Idle,
    /// A non-empty span is highlighted
    Selecting { selection: Selection },
    /// A rewrite request is in flight
    AwaitingRewrite {
        ticket: RewriteTicket,
        selection: Selection,
        directive: EnhanceDirective,
    },
    /// A proposed change is waiting for accept or reject
    PatchPending { patch: PendingPatch },
}

impl EnhanceState {
    pub fn phase(&self) -> EnhancePhase {
        match self {
            Self::Idle => EnhancePhase::Idle,
            Self::Selecting { .. } => EnhancePhase::Selecting,
            Self::AwaitingRewrite { .. } => EnhancePhase::AwaitingRewrite,
            Self::PatchPending { .. } => EnhancePhase::PatchPending,
        }
    }

    pub fn name(&self) -> &'static str {
        self.phase().name()
    }
}

/// State without its payload, for UI code and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnhancePhase {
    Idle,
    Selecting,
    AwaitingRewrite,
    PatchPending,
}

impl EnhancePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selecting => "selecting",
            Self::AwaitingRewrite => "awaiting rewrite",
            Self::PatchPending => "patch pending",
        }
    }
}

/// What happened to a rewrite answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// A patch is now pending
    Proposed { patch_id: Uuid, fallback: bool },
    /// The answer belonged to a superseded request and was dropped
    Stale { ticket: RewriteTicket },
    /// The selected text no longer appears in the document; back to idle
    SubstitutionNotFound,
}

/// Commands accepted by `EnhanceController::dispatch`
#[derive(Debug)]
pub enum Command {
    Select(Range<usize>),
    ClearSelection,
    RequestEnhancement(EnhanceDirective),
    CompleteRewrite {
        ticket: RewriteTicket,
        result: Result<EnhanceResponse, RewriteError>,
    },
    Accept,
    Reject,
    EditDocument(String),
    Undo,
}

/// Result of a dispatched command
#[derive(Debug, Clone)]
pub enum Event {
    Selected,
    SelectionCleared,
    RewriteRequested(PendingRequest),
    RewriteCompleted(RewriteOutcome),
    /// The accepted patch, or `None` if nothing was pending
    Accepted(Option<PendingPatch>),
    /// The rejected patch, or `None` if nothing was pending
    Rejected(Option<PendingPatch>),
    DocumentEdited,
    Undone(bool),
}

/// Tunables for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Appended to the selection when the rewrite service fails
    pub fallback_marker: String,
    /// Maximum number of undo entries kept
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fallback_marker: DEFAULT_FALLBACK_MARKER.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl From<&AppConfig> for ControllerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            fallback_marker: config.fallback_marker.clone(),
            history_limit: config.history_limit,
        }
    }
}

/// Single owner of the document and of the enhancement state machine
pub struct EnhanceController {
    document: String,
    revision: u64,
    state: EnhanceState,
    next_ticket: u64,
    history: VecDeque<String>,
    config: ControllerConfig,
    strategy: Box<dyn DiffStrategy + Send>,
}

impl fmt::Debug for EnhanceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhanceController")
            .field("revision", &self.revision)
            .field("state", &self.state.name())
            .field("strategy", &self.strategy.name())
            .field("history", &self.history.len())
            .finish()
    }
}

impl EnhanceController {
    /// Create a controller with default settings
    pub fn new(document: impl Into<String>) -> Self {
        Self::with_config(document, ControllerConfig::default())
    }

    pub fn with_config(document: impl Into<String>, config: ControllerConfig) -> Self {
        Self {
            document: document.into(),
            revision: 0,
            state: EnhanceState::Idle,
            next_ticket: 0,
            history: VecDeque::new(),
            config,
            strategy: Box::new(GreedyLookahead),
        }
    }

    /// Replace the diff strategy
    pub fn with_strategy(mut self, strategy: impl DiffStrategy + Send + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Incremented on every document change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> &EnhanceState {
        &self.state
    }

    pub fn phase(&self) -> EnhancePhase {
        self.state.phase()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            EnhanceState::Selecting { selection }
            | EnhanceState::AwaitingRewrite { selection, .. } => Some(selection),
            _ => None,
        }
    }

    pub fn pending_patch(&self) -> Option<&PendingPatch> {
        match &self.state {
            EnhanceState::PatchPending { patch } => Some(patch),
            _ => None,
        }
    }

    /// Ticket of the request currently awaited, if any
    pub fn awaited_ticket(&self) -> Option<RewriteTicket> {
        match &self.state {
            EnhanceState::AwaitingRewrite { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Route a command to the matching operation
    pub fn dispatch(&mut self, command: Command) -> Result<Event, EnhanceError> {
        match command {
            Command::Select(range) => self.select(range).map(|_| Event::Selected),
            Command::ClearSelection => self.clear_selection().map(|_| Event::SelectionCleared),
            Command::RequestEnhancement(directive) => self
                .request_enhancement(directive)
                .map(Event::RewriteRequested),
            Command::CompleteRewrite { ticket, result } => Ok(Event::RewriteCompleted(
                self.complete_rewrite(ticket, result),
            )),
            Command::Accept => Ok(Event::Accepted(self.accept())),
            Command::Reject => Ok(Event::Rejected(self.reject())),
            Command::EditDocument(text) => {
                self.edit_document(text);
                Ok(Event::DocumentEdited)
            }
            Command::Undo => Ok(Event::Undone(self.undo())),
        }
    }

    /// Highlight `range` (byte offsets) of the document
    ///
    /// Validation happens before any state change: an invalid or blank range
    /// leaves the controller exactly as it was.
    pub fn select(&mut self, range: Range<usize>) -> Result<(), EnhanceError> {
        let selection = Selection::capture(&self.document, range, self.revision)?;

        match &self.state {
            EnhanceState::PatchPending { .. } => {
                self.reject();
            }
            EnhanceState::AwaitingRewrite { ticket, .. } => {
                tracing::debug!("[ENHANCE] New selection supersedes request {}", ticket);
            }
            _ => {}
        }

        tracing::debug!(
            "[ENHANCE] Selected {:?} ({} bytes)",
            selection.range(),
            selection.text().len()
        );
        self.state = EnhanceState::Selecting { selection };
        Ok(())
    }

    /// Drop the current selection
    pub fn clear_selection(&mut self) -> Result<(), EnhanceError> {
        match self.state {
            EnhanceState::Selecting { .. } => {
                self.state = EnhanceState::Idle;
                Ok(())
            }
            EnhanceState::Idle => Ok(()),
            ref other => Err(EnhanceError::invalid_transition(other.name(), "clear selection")),
        }
    }

    /// Move from `Selecting` to `AwaitingRewrite` and hand out the request
    pub fn request_enhancement(
        &mut self,
        directive: EnhanceDirective,
    ) -> Result<PendingRequest, EnhanceError> {
        directive.validate()?;

        let selection = match &self.state {
            EnhanceState::Selecting { selection } => selection.clone(),
            other => {
                return Err(EnhanceError::invalid_transition(
                    other.name(),
                    "request enhancement",
                ))
            }
        };

        self.next_ticket += 1;
        let ticket = RewriteTicket(self.next_ticket);
        let request = EnhanceRequest::new(selection.trimmed(), self.document.as_str(), &directive);

        tracing::debug!("[ENHANCE] Requesting '{}' rewrite {}", directive, ticket);
        self.state = EnhanceState::AwaitingRewrite {
            ticket,
            selection,
            directive,
        };

        Ok(PendingRequest { ticket, request })
    }

    /// Feed the rewrite service's answer for `ticket` into the state machine
    pub fn complete_rewrite(
        &mut self,
        ticket: RewriteTicket,
        result: Result<EnhanceResponse, RewriteError>,
    ) -> RewriteOutcome {
        let (selection, directive) = match &self.state {
            EnhanceState::AwaitingRewrite {
                ticket: awaited,
                selection,
                directive,
            } if *awaited == ticket => (selection.clone(), directive.clone()),
            _ => {
                tracing::debug!("[ENHANCE] Ignoring stale rewrite answer {}", ticket);
                return RewriteOutcome::Stale { ticket };
            }
        };

        let answer = result.and_then(|response| {
            response
                .enhanced_text()
                .map(|text| text.trim().to_string())
                .ok_or(RewriteError::MissingEnhancedText)
        });

        let (enhanced_span, origin) = match answer {
            Ok(text) => (text, PatchOrigin::Service),
            Err(err) => {
                tracing::warn!("[ENHANCE] Rewrite {} failed, using fallback: {}", ticket, err);
                (
                    format!("{}{}", selection.trimmed(), self.config.fallback_marker),
                    PatchOrigin::Fallback {
                        reason: err.to_string(),
                    },
                )
            }
        };

        let Some((range, found_by)) = selection.locate(&self.document, self.revision) else {
            tracing::warn!(
                "[ENHANCE] Selected text no longer in document, dropping rewrite {}",
                ticket
            );
            self.state = EnhanceState::Idle;
            return RewriteOutcome::SubstitutionNotFound;
        };
        if found_by == SpliceMatch::FirstOccurrence {
            tracing::debug!("[ENHANCE] Document changed, splicing at first occurrence {:?}", range);
        }

        let updated = splice(&self.document, range, &enhanced_span);
        let patch = PendingPatch::propose(
            self.strategy.as_ref(),
            selection.trimmed(),
            enhanced_span,
            self.document.as_str(),
            updated,
            directive,
            origin,
            self.revision,
        );

        let outcome = RewriteOutcome::Proposed {
            patch_id: patch.id,
            fallback: patch.origin.is_fallback(),
        };
        tracing::debug!(
            "[ENHANCE] Patch {} pending: {}",
            patch.id,
            patch.markup()
        );
        self.state = EnhanceState::PatchPending { patch };
        outcome
    }

    /// Commit the pending patch; no-op without one
    pub fn accept(&mut self) -> Option<PendingPatch> {
        let patch = match std::mem::replace(&mut self.state, EnhanceState::Idle) {
            EnhanceState::PatchPending { patch } => patch,
            other => {
                self.state = other;
                return None;
            }
        };

        let Some(updated) = patch.apply(&self.document) else {
            // edit_document discards pending patches, so this means the
            // patch was built against another text
            tracing::warn!("[ENHANCE] Patch {} does not match the document, dropped", patch.id);
            return None;
        };

        self.push_history();
        self.document = updated;
        self.revision += 1;
        tracing::info!(
            "[ENHANCE] Accepted patch {} ({} words changed)",
            patch.id,
            patch.stats().removed_words + patch.stats().added_words
        );
        Some(patch)
    }

    /// Discard the pending patch; no-op without one
    pub fn reject(&mut self) -> Option<PendingPatch> {
        match std::mem::replace(&mut self.state, EnhanceState::Idle) {
            EnhanceState::PatchPending { patch } => {
                tracing::info!("[ENHANCE] Rejected patch {}", patch.id);
                Some(patch)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Replace the document with user-edited text
    ///
    /// A selection is dropped (its offsets no longer hold) and a pending patch
    /// is rejected. An in-flight request stays awaited; its answer is spliced
    /// at the first occurrence of the selected text.
    pub fn edit_document(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.document {
            return;
        }

        match self.phase() {
            EnhancePhase::Selecting => self.state = EnhanceState::Idle,
            EnhancePhase::PatchPending => {
                self.reject();
            }
            EnhancePhase::Idle | EnhancePhase::AwaitingRewrite => {}
        }

        self.document = text;
        self.revision += 1;
    }

    /// Restore the document from before the last accepted patch
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };

        if self.state.phase() != EnhancePhase::Idle {
            tracing::debug!("[ENHANCE] Undo discards state '{}'", self.state.name());
        }
        self.state = EnhanceState::Idle;
        self.document = previous;
        self.revision += 1;
        true
    }

    fn push_history(&mut self) {
        if self.config.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(self.document.clone());
    }
}
