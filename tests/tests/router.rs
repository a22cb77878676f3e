use renraku_client::{CacheTag, Session};
use renraku_mock_server::MockPlatform;
use tests::{chan, message, notification, settle, trace_init, uid, wait_for};

#[tokio::test]
async fn self_events_produce_no_router_output() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    mock.server
        .insert_message(message(uid(1), chan(7), "my own message"))
        .unwrap();
    settle().await;

    assert!(mock.invalidations.recorded().is_empty());
    assert!(mock.push.sent().is_empty());
    assert_eq!(mock.title.history(), vec![String::from("renraku")]);
}

#[tokio::test]
async fn soft_deleted_events_are_dropped() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    let mut msg = message(uid(2), chan(7), "was deleted");
    msg.is_deleted = true;
    mock.server.insert_message(msg).unwrap();
    settle().await;

    assert!(mock.invalidations.recorded().is_empty());
    assert!(mock.push.sent().is_empty());
}

#[tokio::test]
async fn focus_suppresses_signaling_but_not_invalidation() {
    trace_init();
    let mock = MockPlatform::new();
    let _session = Session::start(uid(1), mock.platform()).await;
    // Session starts focused

    mock.server
        .insert_message(message(uid(2), chan(7), "hello"))
        .unwrap();
    wait_for("cache invalidated", || {
        mock.invalidations.recorded() == vec![CacheTag::ChatChannelList(chan(7))]
    })
    .await;
    settle().await;

    assert!(mock.push.sent().is_empty());
    assert_eq!(mock.title.history(), vec![String::from("renraku")]);
    assert_eq!(mock.audio.plays(), 0);
}

#[tokio::test]
async fn unfocused_message_signals_with_truncated_preview() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    let long = "x".repeat(200);
    mock.server
        .insert_message(message(uid(2), chan(7), &long))
        .unwrap();

    wait_for("push sent", || !mock.push.sent().is_empty()).await;
    let (tag, body) = mock.push.sent().remove(0);
    assert!(tag.starts_with("chat-"), "unexpected tag {tag}");
    assert_eq!(body.chars().count(), 81); // 80 chars + ellipsis
    assert!(body.ends_with('…'));

    wait_for("title flashing", || mock.title.history().len() > 1).await;
    // Sound is still locked: no user gesture yet
    assert_eq!(mock.audio.plays(), 0);
}

#[tokio::test]
async fn notifications_use_their_own_cache_and_tag_space() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    mock.server
        .insert_notification(notification(uid(2), uid(1), "you were mentioned"))
        .unwrap();

    wait_for("notification cache invalidated", || {
        mock.invalidations.recorded() == vec![CacheTag::Notifications(uid(1))]
    })
    .await;
    wait_for("push sent", || !mock.push.sent().is_empty()).await;
    let (tag, body) = mock.push.sent().remove(0);
    assert!(tag.starts_with("notification-"), "unexpected tag {tag}");
    assert_eq!(body, "you were mentioned");
}

#[tokio::test]
async fn regaining_focus_restores_the_title() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    mock.server
        .insert_message(message(uid(2), chan(7), "flash for this"))
        .unwrap();
    wait_for("title flashing", || {
        mock.title.history().last().map(|t| t as &str) != Some("renraku")
    })
    .await;

    session.set_focus(true);
    wait_for("title restored on focus", || {
        mock.title.history().last().map(|t| t as &str) == Some("renraku")
    })
    .await;
}

#[tokio::test]
async fn first_interaction_unlocks_the_sound() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;
    session.set_focus(false);

    session.first_interaction();
    wait_for("unlock play-then-pause", || {
        mock.audio.plays() == 1 && mock.audio.pauses() == 1
    })
    .await;

    mock.server
        .insert_message(message(uid(2), chan(7), "ding"))
        .unwrap();
    wait_for("signal replays the sound", || mock.audio.plays() == 2).await;
    assert_eq!(mock.audio.pauses(), 1);
}

#[tokio::test]
async fn teardown_stops_routing() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;

    mock.server
        .insert_message(message(uid(2), chan(7), "before logout"))
        .unwrap();
    wait_for("event routed while alive", || {
        mock.invalidations.recorded().len() == 1
    })
    .await;

    drop(session);
    settle().await;
    mock.server
        .insert_message(message(uid(2), chan(7), "after logout"))
        .unwrap();
    settle().await;
    assert_eq!(mock.invalidations.recorded().len(), 1);
}
