//! Property-based tests for the selection/patch controller
//!
//! Random command sequences must never panic and must keep the controller's
//! invariants: a single pending patch that matches the document, answers
//! only for the awaited ticket, and document changes only through accept,
//! edits and undo.

use assert_matches::assert_matches;
use postcraft::editor::diff::diff_text;
use postcraft::editor::controller::{EnhanceController, EnhancePhase, RewriteOutcome, RewriteTicket};
use postcraft::shared::enhance::{EnhanceDirective, EnhanceResponse};
use postcraft::shared::error::RewriteError;
use proptest::prelude::*;

const DRAFT: &str = "the quick brown fox jumps over the lazy dog";

#[derive(Debug, Clone)]
enum Op {
    Select(usize, usize),
    Request(usize),
    Answer { stale: bool, text: Option<String> },
    Accept,
    Reject,
    Edit(String),
    Undo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..48, 0usize..48).prop_map(|(a, b)| Op::Select(a.min(b), a.max(b))),
        3 => (0usize..5).prop_map(Op::Request),
        3 => (any::<bool>(), prop::option::of("[a-z]{1,6}( [a-z]{1,6}){0,2}"))
            .prop_map(|(stale, text)| Op::Answer { stale, text }),
        2 => Just(Op::Accept),
        1 => Just(Op::Reject),
        1 => "[a-z ]{0,40}".prop_map(Op::Edit),
        1 => Just(Op::Undo),
    ]
}

fn directive(index: usize) -> EnhanceDirective {
    EnhanceDirective::PRESETS
        .get(index)
        .cloned()
        .unwrap_or_else(|| EnhanceDirective::Custom("make it shorter".to_string()))
}

fn answer(text: Option<String>) -> Result<EnhanceResponse, RewriteError> {
    match text {
        Some(text) => Ok(EnhanceResponse::success("", text)),
        None => Err(RewriteError::Network("service down".to_string())),
    }
}

fn check_invariants(controller: &EnhanceController) -> Result<(), TestCaseError> {
    match controller.phase() {
        EnhancePhase::PatchPending => {
            let patch = controller.pending_patch().unwrap();
            prop_assert_eq!(patch.full_document_before.as_str(), controller.document());
            prop_assert_eq!(
                patch.apply(controller.document()),
                Some(patch.full_document_after.clone())
            );
        }
        EnhancePhase::AwaitingRewrite => prop_assert!(controller.awaited_ticket().is_some()),
        EnhancePhase::Selecting => prop_assert!(controller.selection().is_some()),
        EnhancePhase::Idle => {
            prop_assert!(controller.selection().is_none());
            prop_assert!(controller.pending_patch().is_none());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_random_sessions_keep_invariants(ops in prop::collection::vec(op(), 1..40)) {
        let mut controller = EnhanceController::new(DRAFT);
        let mut issued: Vec<RewriteTicket> = Vec::new();

        for op in ops {
            let before = controller.document().to_string();
            let phase = controller.phase();

            match op {
                Op::Select(start, end) => {
                    if controller.select(start..end).is_err() {
                        prop_assert_eq!(controller.phase(), phase);
                    }
                    prop_assert_eq!(controller.document(), before.as_str());
                }
                Op::Request(index) => {
                    if let Ok(pending) = controller.request_enhancement(directive(index)) {
                        prop_assert_eq!(controller.awaited_ticket(), Some(pending.ticket));
                        prop_assert!(issued.iter().all(|t| *t < pending.ticket));
                        issued.push(pending.ticket);
                    } else {
                        prop_assert_eq!(controller.phase(), phase);
                    }
                    prop_assert_eq!(controller.document(), before.as_str());
                }
                Op::Answer { stale, text } => {
                    let awaited = controller.awaited_ticket();
                    let ticket = if stale || awaited.is_none() {
                        issued.iter().copied().find(|t| Some(*t) != awaited)
                    } else {
                        awaited
                    };
                    let Some(ticket) = ticket else { continue };

                    let outcome = controller.complete_rewrite(ticket, answer(text.clone()));
                    if Some(ticket) == awaited {
                        match outcome {
                            RewriteOutcome::Proposed { fallback, .. } => {
                                prop_assert_eq!(controller.phase(), EnhancePhase::PatchPending);
                                prop_assert_eq!(fallback, text.is_none());
                            }
                            RewriteOutcome::SubstitutionNotFound => {
                                prop_assert_eq!(controller.phase(), EnhancePhase::Idle);
                            }
                            RewriteOutcome::Stale { .. } => prop_assert!(false, "awaited answer reported stale"),
                        }
                    } else {
                        prop_assert_eq!(outcome, RewriteOutcome::Stale { ticket });
                        prop_assert_eq!(controller.phase(), phase);
                    }
                    prop_assert_eq!(controller.document(), before.as_str());
                }
                Op::Accept => {
                    let expected = controller.pending_patch().map(|p| p.full_document_after.clone());
                    let accepted = controller.accept();
                    prop_assert_eq!(accepted.is_some(), expected.is_some());
                    if let Some(expected) = expected {
                        prop_assert_eq!(controller.document(), expected.as_str());
                        prop_assert!(controller.can_undo());
                        let doc = controller.document();
                        prop_assert!(diff_text(doc, doc).is_identity());
                    } else {
                        prop_assert_eq!(controller.phase(), phase);
                    }
                }
                Op::Reject => {
                    controller.reject();
                    prop_assert_eq!(controller.document(), before.as_str());
                }
                Op::Edit(text) => {
                    controller.edit_document(text.clone());
                    prop_assert_eq!(controller.document(), text.as_str());
                    if text != before {
                        prop_assert_ne!(controller.phase(), EnhancePhase::PatchPending);
                    }
                }
                Op::Undo => {
                    controller.undo();
                }
            }

            check_invariants(&controller)?;
        }
    }

    #[test]
    fn test_failed_rewrite_always_yields_fallback(start in 0usize..20, len in 1usize..20) {
        let mut controller = EnhanceController::new(DRAFT);
        let end = (start + len).min(DRAFT.len());
        prop_assume!(controller.select(start..end).is_ok());

        let selected = controller.selection().unwrap().trimmed().to_string();
        let pending = controller.request_enhancement(EnhanceDirective::Engaging).unwrap();
        let outcome = controller.complete_rewrite(
            pending.ticket,
            Err(RewriteError::Timeout(std::time::Duration::from_secs(45))),
        );

        assert_matches!(outcome, RewriteOutcome::Proposed { fallback: true, .. });
        let patch = controller.pending_patch().unwrap();
        prop_assert_eq!(&patch.enhanced_span, &format!("{} (enhanced)", selected));

        controller.accept();
        let expected = format!("{} (enhanced)", selected);
        prop_assert!(controller.document().contains(&expected));
    }
}
