//! Long-polling ingress against a local fake Bot API.

use unishark_core::BotError;
use unishark_telegram::{run_polling, update_queue};

mod common;
use common::fake_api::{text_update, wait_for_polls, EventLog, FakeApi};

#[tokio::test]
async fn test_polling_forwards_updates_in_order_and_stops_on_shutdown() {
    let api = FakeApi::start(vec![
        text_update(10, 1, "first"),
        text_update(11, 1, "second"),
    ])
    .await;
    let (tx, mut rx) = update_queue();
    let log = api.log.clone();

    // The second getUpdates call is only made once the first batch has been enqueued.
    run_polling(api.bot(), tx, async move { wait_for_polls(&log, 2).await })
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap().id.0, 10);
    assert_eq!(rx.recv().await.unwrap().id.0, 11);
    assert!(rx.recv().await.is_none());
    assert_eq!(api.log.position("deletewebhook"), Some(0));
}

#[tokio::test]
async fn test_polling_fails_when_webhook_cannot_be_cleared() {
    let api = FakeApi::start_with(vec![text_update(1, 1, "hi")], false, EventLog::default()).await;
    let (tx, _rx) = update_queue();

    let err = run_polling(api.bot(), tx, std::future::pending::<()>())
        .await
        .unwrap_err();

    assert!(matches!(err, BotError::Transport(_)));
    assert_eq!(api.log.count("getupdates"), 0);
}

#[tokio::test]
async fn test_polling_stops_when_queue_closes() {
    let api = FakeApi::start(vec![text_update(1, 1, "hi")]).await;
    let (tx, rx) = update_queue();
    drop(rx);

    run_polling(api.bot(), tx, std::future::pending::<()>())
        .await
        .unwrap();

    assert_eq!(api.log.count("getupdates"), 1);
}
