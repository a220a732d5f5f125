//! # Enhancement Session
//!
//! Connects an `EnhanceController` to a `RewriteService`.
//!
//! ## Features
//!
//! - **One request at a time**: each enhancement spawns a single task; the
//!   controller ignores answers to superseded tickets
//! - **Timeouts**: every call is bounded; a timeout takes the fallback path
//! - **Panics**: a rewrite that panics is reported as a network failure, so
//!   the selection still gets its fallback patch
//! - **Frame polling**: `poll()` never blocks, so UI loops can call it every
//!   frame; async callers use `next_outcome()` instead
//!
//! Superseded requests are not aborted. They run to completion and their
//! answer is dropped on arrival.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use postcraft::client::{Config, EnhanceSession};
//! use postcraft::shared::enhance::EnhanceDirective;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let mut session = EnhanceSession::connect(config, "I love AI", tokio::runtime::Handle::current())?;
//!
//! session.enhance(2..6, EnhanceDirective::Engaging).await?;
//! session.accept();
//! println!("{}", session.document());
//! # Ok(())
//! # }
//! ```

use crate::client::config::Config;
use crate::client::rewrite_client::{RewriteClient, RewriteError, RewriteService};
use crate::editor::controller::{
    ControllerConfig, EnhanceController, EnhancePhase, RewriteOutcome, RewriteTicket,
};
use crate::editor::patch::PendingPatch;
use crate::shared::enhance::{EnhanceDirective, EnhanceResponse};
use crate::shared::error::EnhanceError;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Answer of one rewrite task
#[derive(Debug)]
struct RewriteReply {
    ticket: RewriteTicket,
    result: Result<EnhanceResponse, RewriteError>,
}

/// Controller plus the plumbing to talk to a rewrite service
pub struct EnhanceSession<S: RewriteService> {
    controller: EnhanceController,
    service: Arc<S>,
    runtime: Handle,
    timeout: Duration,
    replies_tx: UnboundedSender<RewriteReply>,
    replies_rx: UnboundedReceiver<RewriteReply>,
    in_flight: usize,
}

impl EnhanceSession<RewriteClient> {
    /// Session backed by the HTTP rewrite client
    pub fn connect(
        config: Config,
        document: impl Into<String>,
        runtime: Handle,
    ) -> Result<Self, RewriteError> {
        let controller =
            EnhanceController::with_config(document, ControllerConfig::from(config.app()));
        let timeout = config.timeout();
        let client = RewriteClient::new(config)?;
        Ok(Self::new(controller, client, runtime, timeout))
    }
}

impl<S: RewriteService> EnhanceSession<S> {
    pub fn new(controller: EnhanceController, service: S, runtime: Handle, timeout: Duration) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            service: Arc::new(service),
            runtime,
            timeout,
            replies_tx,
            replies_rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &EnhanceController {
        &self.controller
    }

    pub fn document(&self) -> &str {
        self.controller.document()
    }

    pub fn phase(&self) -> EnhancePhase {
        self.controller.phase()
    }

    pub fn pending_patch(&self) -> Option<&PendingPatch> {
        self.controller.pending_patch()
    }

    /// Number of spawned requests whose answer has not been received yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn select(&mut self, range: Range<usize>) -> Result<(), EnhanceError> {
        self.controller.select(range)
    }

    pub fn clear_selection(&mut self) -> Result<(), EnhanceError> {
        self.controller.clear_selection()
    }

    /// Send the current selection to the rewrite service
    pub fn request_enhancement(
        &mut self,
        directive: EnhanceDirective,
    ) -> Result<RewriteTicket, EnhanceError> {
        let pending = self.controller.request_enhancement(directive)?;
        let ticket = pending.ticket;

        let service = Arc::clone(&self.service);
        let tx = self.replies_tx.clone();
        let timeout = self.timeout;
        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let call = runtime.spawn(async move { service.rewrite(pending.request).await });
            let result = match tokio::time::timeout(timeout, call).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    tracing::error!("[ENHANCE] Rewrite {} task failed: {}", ticket, e);
                    Err(RewriteError::Network(format!("Rewrite task failed: {}", e)))
                }
                Err(_) => Err(RewriteError::Timeout(timeout)),
            };
            if tx.send(RewriteReply { ticket, result }).is_err() {
                tracing::debug!("[ENHANCE] Session closed before rewrite {} finished", ticket);
            }
        });

        self.in_flight += 1;
        Ok(ticket)
    }

    /// Apply every answer that has already arrived, without blocking
    pub fn poll(&mut self) -> Vec<RewriteOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(reply) = self.replies_rx.try_recv() {
            outcomes.push(self.apply_reply(reply));
        }
        outcomes
    }

    /// Wait for the next answer; `None` when nothing is in flight
    pub async fn next_outcome(&mut self) -> Option<RewriteOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let reply = self.replies_rx.recv().await?;
        Some(self.apply_reply(reply))
    }

    /// Select `range`, request a rewrite and wait until its answer is applied
    pub async fn enhance(
        &mut self,
        range: Range<usize>,
        directive: EnhanceDirective,
    ) -> Result<RewriteOutcome, EnhanceError> {
        self.select(range)?;
        let ticket = self.request_enhancement(directive)?;

        while let Some(outcome) = self.next_outcome().await {
            match outcome {
                RewriteOutcome::Stale { ticket: stale } if stale != ticket => continue,
                other => return Ok(other),
            }
        }
        // in_flight counted our own request, so the loop only ends by returning
        Ok(RewriteOutcome::Stale { ticket })
    }

    pub fn accept(&mut self) -> Option<PendingPatch> {
        self.controller.accept()
    }

    pub fn reject(&mut self) -> Option<PendingPatch> {
        self.controller.reject()
    }

    pub fn edit_document(&mut self, text: impl Into<String>) {
        self.controller.edit_document(text);
    }

    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    fn apply_reply(&mut self, reply: RewriteReply) -> RewriteOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.controller.complete_rewrite(reply.ticket, reply.result)
    }
}
