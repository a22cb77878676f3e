use std::{collections::HashSet, sync::Arc};

use renraku_client::{PresenceTracker, Session};
use renraku_mock_server::MockPlatform;
use tests::{trace_init, uid, wait_for};

#[tokio::test]
async fn join_announces_and_tracks_the_roster() {
    trace_init();
    let mock = MockPlatform::new();

    let alice = Session::start(uid(1), mock.platform()).await;
    let _bob = Session::start(uid(2), mock.platform()).await;

    assert_eq!(mock.server.test_present_users(), HashSet::from([uid(1), uid(2)]));
    wait_for("both users in the roster", || {
        alice.presence.online_users() == HashSet::from([uid(1), uid(2)])
    })
    .await;
    assert!(alice.presence.is_online(uid(2)));
}

#[tokio::test]
async fn snapshots_replace_instead_of_merging() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;

    mock.server.sync_presence([uid(2), uid(3)]);
    wait_for("first snapshot applied", || {
        session.presence.online_users() == HashSet::from([uid(2), uid(3)])
    })
    .await;

    // The next snapshot wins wholesale; nothing from the previous one sticks
    mock.server.sync_presence([uid(4)]);
    wait_for("second snapshot replaced the first", || {
        session.presence.online_users() == HashSet::from([uid(4)])
    })
    .await;
}

#[tokio::test]
async fn losing_the_connection_clears_the_set() {
    trace_init();
    let mock = MockPlatform::new();
    let session = Session::start(uid(1), mock.platform()).await;

    wait_for("roster populated", || !session.presence.online_users().is_empty()).await;

    mock.server.disconnect_presence();
    wait_for("roster cleared on disconnect", || {
        session.presence.online_users().is_empty()
    })
    .await;
}

#[tokio::test]
async fn dropping_a_session_leaves_the_group() {
    trace_init();
    let mock = MockPlatform::new();
    let watcher = Session::start(uid(1), mock.platform()).await;

    let peer = Session::start(uid(2), mock.platform()).await;
    wait_for("peer visible after join", || watcher.presence.is_online(uid(2))).await;

    // Logout without an explicit leave call; the goodbye still goes out
    drop(peer);
    wait_for("peer untracked after session drop", || {
        mock.server.test_present_users() == HashSet::from([uid(1)])
    })
    .await;
    wait_for("peer gone from the roster", || !watcher.presence.is_online(uid(2))).await;
}

#[tokio::test]
async fn leaving_updates_the_other_peers() {
    trace_init();
    let mock = MockPlatform::new();
    let watcher = Session::start(uid(1), mock.platform()).await;

    let tracker = PresenceTracker::join(Arc::new(mock.server.clone()), uid(2)).await;
    wait_for("peer visible after join", || watcher.presence.is_online(uid(2))).await;

    tracker.leave().await;
    assert_eq!(mock.server.test_present_users(), HashSet::from([uid(1)]));
    wait_for("peer gone after leave", || !watcher.presence.is_online(uid(2))).await;
}
