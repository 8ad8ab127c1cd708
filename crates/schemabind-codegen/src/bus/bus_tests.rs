#![allow(non_snake_case)]

use super::*;
use schemabind_core::{GenerationRequest, RequestKind};
use std::path::PathBuf;

fn event(kind: RequestKind) -> GenerationEvent {
    GenerationEvent::failed(&GenerationRequest::new(kind), PathBuf::from("/tmp/out"), "boom")
}

#[test]
fn CompletionBus___publish___without_subscribers_is_counted() {
    let bus = CompletionBus::new();

    bus.publish(event(RequestKind::SqlView));

    assert_eq!(bus.published(), 1);
}

#[tokio::test]
async fn CompletionBus___subscribe___receives_published_event() {
    let bus = CompletionBus::new();
    let mut receiver = bus.subscribe();
    let sent = event(RequestKind::SqlIndex);

    bus.publish(sent.clone());

    let received = receiver.recv().await.unwrap();
    assert_eq!(received, sent);
}

#[tokio::test]
async fn CompletionBus___clone___shares_channel() {
    let bus = CompletionBus::new();
    let clone = bus.clone();
    let mut receiver = bus.subscribe();

    clone.publish(event(RequestKind::DocumentArtifact));

    assert_eq!(receiver.recv().await.unwrap().kind, RequestKind::DocumentArtifact);
    assert_eq!(bus.published(), 1);
}

#[test]
fn CompletionBus___with_capacity___clamps_zero() {
    let bus = CompletionBus::with_capacity(0);
    let mut receiver = bus.subscribe();

    bus.publish(event(RequestKind::StubBinding));

    assert!(receiver.try_recv().is_ok());
}
