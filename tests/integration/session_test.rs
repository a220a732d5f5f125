//! Enhancement session integration tests
//!
//! Drives `EnhanceSession` end to end: selection, rewrite over HTTP (or a
//! scripted in-process service), review, accept/reject and undo.

use crate::common::*;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use postcraft::client::{EnhanceSession, RewriteError};
use postcraft::editor::controller::{EnhanceController, EnhancePhase, RewriteOutcome};
use postcraft::editor::patch::PatchOrigin;
use postcraft::shared::enhance::EnhanceDirective;
use std::time::Duration;
use tokio::runtime::Handle;
use wiremock::{MockServer, ResponseTemplate};

fn scripted_session(document: &str, service: ScriptedService) -> EnhanceSession<ScriptedService> {
    EnhanceSession::new(
        EnhanceController::new(document),
        service,
        Handle::current(),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_full_enhancement_flow() {
    let server = rewrite_server_returning("adore").await;
    let mut session = EnhanceSession::connect(config_for(&server), SHORT_DRAFT, Handle::current()).unwrap();

    let outcome = session.enhance(2..6, EnhanceDirective::Engaging).await.unwrap();
    assert_matches!(outcome, RewriteOutcome::Proposed { fallback: false, .. });

    let patch = session.pending_patch().unwrap();
    assert_eq!(patch.markup(), "I [-love-]{+adore+} AI");
    assert_eq!(patch.original_span, "love");
    assert_eq!(patch.enhanced_span, "adore");
    // nothing changes before accept
    assert_eq!(session.document(), SHORT_DRAFT);

    assert!(session.accept().is_some());
    assert_eq!(session.document(), "I adore AI");
    assert_eq!(session.phase(), EnhancePhase::Idle);

    assert!(session.undo());
    assert_eq!(session.document(), SHORT_DRAFT);
}

#[tokio::test]
async fn test_service_failure_offers_fallback() {
    let server = MockServer::start().await;
    mount_enhance(&server, ResponseTemplate::new(500).set_body_string("boom")).await;
    let mut session = EnhanceSession::connect(config_for(&server), SHORT_DRAFT, Handle::current()).unwrap();

    let outcome = session.enhance(2..6, EnhanceDirective::Professional).await.unwrap();
    assert_matches!(outcome, RewriteOutcome::Proposed { fallback: true, .. });

    let patch = session.pending_patch().unwrap();
    assert_eq!(patch.full_document_after, "I love (enhanced) AI");
    assert_matches!(&patch.origin, PatchOrigin::Fallback { reason } if reason.contains("500"));

    session.accept();
    assert_eq!(session.document(), "I love (enhanced) AI");
}

#[tokio::test]
async fn test_reject_keeps_document() {
    let server = rewrite_server_returning("Thrilled").await;
    let mut session =
        EnhanceSession::connect(config_for(&server), LINKEDIN_DRAFT, Handle::current()).unwrap();

    session.enhance(0..7, EnhanceDirective::Engaging).await.unwrap();
    assert_eq!(session.phase(), EnhancePhase::PatchPending);

    assert!(session.reject().is_some());
    assert_eq!(session.document(), LINKEDIN_DRAFT);
    assert_eq!(session.phase(), EnhancePhase::Idle);
    assert!(!session.controller().can_undo());
}

#[tokio::test]
async fn test_edit_while_awaiting_relocates_selection() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(success_body("love", "adore"))
            .set_delay(Duration::from_millis(200)),
    )
    .await;
    let mut session = EnhanceSession::connect(config_for(&server), SHORT_DRAFT, Handle::current()).unwrap();

    session.select(2..6).unwrap();
    session.request_enhancement(EnhanceDirective::Engaging).unwrap();
    session.edit_document("Honestly, I love AI");
    assert_eq!(session.phase(), EnhancePhase::AwaitingRewrite);

    let outcome = session.next_outcome().await;
    assert_matches!(outcome, Some(RewriteOutcome::Proposed { .. }));

    session.accept();
    assert_eq!(session.document(), "Honestly, I adore AI");
}

#[tokio::test]
async fn test_edit_removing_selection_drops_rewrite() {
    let service = ScriptedService::new()
        .with_delay(Duration::from_millis(50))
        .answer("adore");
    let mut session = scripted_session(SHORT_DRAFT, service);

    session.select(2..6).unwrap();
    session.request_enhancement(EnhanceDirective::Engaging).unwrap();
    session.edit_document("I like AI");

    let outcome = session.next_outcome().await;
    assert_eq!(outcome, Some(RewriteOutcome::SubstitutionNotFound));
    assert_eq!(session.phase(), EnhancePhase::Idle);
    assert_eq!(session.document(), "I like AI");
    assert!(session.pending_patch().is_none());
}

#[tokio::test]
async fn test_reselect_supersedes_request() {
    let server = MockServer::start().await;
    mount_enhance(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(success_body("", "adore"))
            .set_delay(Duration::from_millis(50)),
    )
    .await;
    let mut session = EnhanceSession::connect(config_for(&server), SHORT_DRAFT, Handle::current()).unwrap();

    session.select(2..6).unwrap();
    let first = session.request_enhancement(EnhanceDirective::Engaging).unwrap();
    session.select(7..9).unwrap();
    let second = session.request_enhancement(EnhanceDirective::Engaging).unwrap();
    assert!(second > first);

    let mut outcomes = Vec::new();
    while let Some(outcome) = session.next_outcome().await {
        outcomes.push(outcome);
    }
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.contains(&RewriteOutcome::Stale { ticket: first }));
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, RewriteOutcome::Proposed { fallback: false, .. })));

    session.accept();
    assert_eq!(session.document(), "I love adore");
}

#[tokio::test]
async fn test_service_receives_trimmed_selection() {
    let service = ScriptedService::new().answer("adore");
    let mut session = scripted_session(SHORT_DRAFT, service);

    // " love " including the surrounding spaces
    session.enhance(1..7, EnhanceDirective::Sarcastic).await.unwrap();

    let requests = session.service().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].selected_text, "love");
    assert_eq!(requests[0].full_text, SHORT_DRAFT);

    session.accept();
    assert_eq!(session.document(), "I adore AI");
}

#[tokio::test]
async fn test_repeated_text_uses_selected_occurrence() {
    let service = ScriptedService::new().answer("great");
    let mut session = scripted_session(REPEATED_DRAFT, service);

    session.enhance(16..20, EnhanceDirective::Creative).await.unwrap();
    session.accept();

    assert_eq!(session.document(), "good ideas beat great intentions");
}

#[tokio::test]
async fn test_poll_picks_up_answer() {
    let service = ScriptedService::new().fail(RewriteError::Network("connection reset".into()));
    let mut session = scripted_session(SHORT_DRAFT, service);

    session.select(7..9).unwrap();
    session.request_enhancement(EnhanceDirective::Engaging).unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..100 {
        outcomes = session.poll();
        if !outcomes.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_matches!(outcomes.as_slice(), [RewriteOutcome::Proposed { fallback: true, .. }]);
    assert_eq!(session.in_flight(), 0);
    session.accept();
    assert_eq!(session.document(), "I love AI (enhanced)");
}

#[tokio::test]
async fn test_undo_walks_back_accepted_patches() {
    let service = ScriptedService::new().answer("adore").answer("humans");
    let mut session = scripted_session(SHORT_DRAFT, service);

    session.enhance(2..6, EnhanceDirective::Engaging).await.unwrap();
    session.accept();
    session.enhance(8..10, EnhanceDirective::Engaging).await.unwrap();
    session.accept();
    assert_eq!(session.document(), "I adore humans");

    assert!(session.undo());
    assert_eq!(session.document(), "I adore AI");
    assert!(session.undo());
    assert_eq!(session.document(), SHORT_DRAFT);
    assert!(!session.undo());
}
