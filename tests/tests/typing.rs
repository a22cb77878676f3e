use renraku_client::{Session, TypingUser};
use renraku_mock_server::MockPlatform;
use tests::{chan, settle, trace_init, uid, wait_for};

#[tokio::test]
async fn typing_is_visible_to_peers_but_not_the_typist() {
    trace_init();
    let mock = MockPlatform::new();
    let alice = Session::start(uid(1), mock.platform()).await;
    let bob = Session::start(uid(2), mock.platform()).await;

    alice.typing.send_typing(chan(7), "alice").await;
    wait_for("peer sees the typist", || {
        bob.typing.typing_users(chan(7))
            == vec![TypingUser {
                user_id: uid(1),
                user_name: String::from("alice"),
            }]
    })
    .await;

    // The local user is never in their own list
    assert!(alice.typing.typing_users(chan(7)).is_empty());
}

#[tokio::test]
async fn rapid_signals_from_one_user_stay_deduplicated() {
    trace_init();
    let mock = MockPlatform::new();
    let alice = Session::start(uid(1), mock.platform()).await;
    let bob = Session::start(uid(2), mock.platform()).await;

    for _ in 0..5 {
        alice.typing.send_typing(chan(7), "alice").await;
    }
    wait_for("typist visible", || !bob.typing.typing_users(chan(7)).is_empty()).await;
    settle().await;
    assert_eq!(bob.typing.typing_users(chan(7)).len(), 1);
}

#[tokio::test]
async fn typing_is_scoped_to_its_channel() {
    trace_init();
    let mock = MockPlatform::new();
    let alice = Session::start(uid(1), mock.platform()).await;
    let bob = Session::start(uid(2), mock.platform()).await;

    alice.typing.send_typing(chan(7), "alice").await;
    wait_for("typist visible in its channel", || {
        !bob.typing.typing_users(chan(7)).is_empty()
    })
    .await;
    assert!(bob.typing.typing_users(chan(8)).is_empty());
}
