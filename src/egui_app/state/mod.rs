use tokio::runtime::Handle;

use crate::client::{Config, EnhanceSession, RewriteClient, RewriteError};
use crate::editor::controller::{EnhancePhase, RewriteOutcome};
use crate::editor::selection::find_span;
use crate::shared::enhance::EnhanceDirective;
use crate::shared::error::EnhanceError;

/// Severity of the status line under the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// Central application state shared across egui views.
pub struct ReviewState {
    pub session: EnhanceSession<RewriteClient>,
    /// Buffer bound to the editor widget; pushed into the session on change
    pub editor_text: String,
    pub find_input: String,
    /// Directive picked in the menu; `Custom` uses `custom_instruction`
    pub directive: EnhanceDirective,
    pub custom_instruction: String,
    pub status: Option<(StatusKind, String)>,
}

impl ReviewState {
    pub fn new(config: Config, runtime: Handle, document: String) -> Result<Self, RewriteError> {
        let session = EnhanceSession::connect(config, document.clone(), runtime)?;
        Ok(Self {
            session,
            editor_text: document,
            find_input: String::new(),
            directive: EnhanceDirective::Professional,
            custom_instruction: String::new(),
            status: None,
        })
    }

    pub fn phase(&self) -> EnhancePhase {
        self.session.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == EnhancePhase::AwaitingRewrite
    }

    /// Push user edits from the editor widget into the session
    pub fn sync_editor(&mut self) {
        if self.editor_text != self.session.document() {
            self.session.edit_document(self.editor_text.clone());
        }
    }

    /// Select the first occurrence of the find input
    pub fn select_find(&mut self) {
        let needle = self.find_input.trim();
        match find_span(self.session.document(), needle) {
            Some(range) => {
                let result = self.session.select(range);
                self.report(result.map(|_| "Selection captured".to_string()));
            }
            None => self.set_status(StatusKind::Error, "Text not found in document"),
        }
    }

    pub fn clear_selection(&mut self) {
        let result = self.session.clear_selection();
        self.report(result.map(|_| "Selection cleared".to_string()));
    }

    /// Directive to send, with the custom instruction filled in
    pub fn current_directive(&self) -> Result<EnhanceDirective, EnhanceError> {
        match self.directive {
            EnhanceDirective::Custom(_) => EnhanceDirective::custom(self.custom_instruction.clone()),
            ref preset => Ok(preset.clone()),
        }
    }

    pub fn enhance(&mut self) {
        let result = self
            .current_directive()
            .and_then(|directive| self.session.request_enhancement(directive));
        self.report(result.map(|ticket| format!("Rewrite {} requested", ticket)));
    }

    /// Pick up rewrite answers; called every frame
    pub fn check_rewrite_results(&mut self) {
        for outcome in self.session.poll() {
            match outcome {
                RewriteOutcome::Proposed { fallback: false, .. } => {
                    self.set_status(StatusKind::Info, "Review the suggested change");
                }
                RewriteOutcome::Proposed { fallback: true, .. } => {
                    self.set_status(
                        StatusKind::Warning,
                        "Rewrite service unavailable, showing fallback",
                    );
                }
                RewriteOutcome::SubstitutionNotFound => {
                    self.set_status(
                        StatusKind::Error,
                        "Selected text no longer in document, suggestion dropped",
                    );
                }
                RewriteOutcome::Stale { .. } => {}
            }
        }
    }

    pub fn accept(&mut self) {
        if self.session.accept().is_some() {
            self.editor_text = self.session.document().to_string();
            self.set_status(StatusKind::Info, "Change applied");
        }
    }

    pub fn reject(&mut self) {
        if self.session.reject().is_some() {
            self.set_status(StatusKind::Info, "Change discarded");
        }
    }

    pub fn undo(&mut self) {
        if self.session.undo() {
            self.editor_text = self.session.document().to_string();
            self.set_status(StatusKind::Info, "Undone");
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some((kind, message.into()));
    }

    fn report(&mut self, result: Result<String, EnhanceError>) {
        match result {
            Ok(message) => self.set_status(StatusKind::Info, message),
            Err(e) if e.is_input_error() => self.set_status(StatusKind::Warning, e.to_string()),
            Err(e) => self.set_status(StatusKind::Error, e.to_string()),
        }
    }
}
