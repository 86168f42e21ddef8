//! Telegram transport against a mock Bot API

use crate::{mount_bot_api, sent_messages, test_config, API_TOKEN, CHANNEL_ID, USER_ID};
use ticket_watch::config::NotificationTarget;
use ticket_watch::model::{MatchRecord, TicketCategory};
use ticket_watch::notify::{Notifier, NotifyError, TelegramNotifier};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record() -> MatchRecord {
    MatchRecord {
        match_number: 5,
        host_team: "France".to_string(),
        opposing_team: "Australia".to_string(),
        match_date: "Tuesday, 22 November 2022".to_string(),
        match_time: "22:00".to_string(),
        stadium: "Al Janoub Stadium".to_string(),
        available_categories: vec![TicketCategory::new(1, 600), TicketCategory::new(3, 220)],
    }
}

fn notifier(server: &MockServer, target: NotificationTarget) -> TelegramNotifier {
    let mut config = test_config("https://tickets.example.com", &server.uri(), "unused.db", 64);
    config.notifier.target = target;
    TelegramNotifier::new(&config.notifier, config.fetcher.slots()).unwrap()
}

#[tokio::test]
async fn test_change_notification_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", API_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"result":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server, NotificationTarget::Direct)
        .notify_change(&record())
        .await
        .unwrap();

    let messages = sent_messages(&server).await;
    assert_eq!(messages.len(), 1);

    let message = &messages[0];
    assert_eq!(message["chat_id"], USER_ID);
    assert_eq!(message["text"], "`Update for match №5`");
    assert_eq!(message["parse_mode"], "MarkdownV2");

    let keyboard = &message["reply_markup"]["inline_keyboard"];
    assert_eq!(keyboard[0][0]["text"], "France 🇫🇷");
    assert_eq!(keyboard[0][1]["text"], "🇦🇺 Australia");
    assert_eq!(keyboard[1][0]["text"], "📅 22-11-2022 22:00");
    assert_eq!(keyboard[3][0]["text"], "🎫 Cat 1, Cat 3");
    assert_eq!(
        keyboard[3][0]["url"],
        "https://tickets.example.com/performance/1004/lang/en"
    );
}

#[tokio::test]
async fn test_broadcast_target_routes_changes_only() {
    let server = MockServer::start().await;
    mount_bot_api(&server).await;

    let notifier = notifier(&server, NotificationTarget::Broadcast);
    notifier.notify_change(&record()).await.unwrap();
    notifier.notify_error("something broke").await.unwrap();

    let messages = sent_messages(&server).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["chat_id"], CHANNEL_ID);
    assert_eq!(messages[1]["chat_id"], USER_ID);
}

#[tokio::test]
async fn test_error_notification_payload() {
    let server = MockServer::start().await;
    mount_bot_api(&server).await;

    notifier(&server, NotificationTarget::Direct)
        .notify_error("bad `markup`")
        .await
        .unwrap();

    let messages = sent_messages(&server).await;
    assert_eq!(
        messages[0]["text"],
        "```\nTicketWatch got error:\nbad \\`markup\\````"
    );
    assert!(messages[0].get("reply_markup").is_none());
}

#[tokio::test]
async fn test_rejected_message_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"ok":false,"description":"Bad Request: can't parse entities"}"#,
        ))
        .mount(&server)
        .await;

    let err = notifier(&server, NotificationTarget::Direct)
        .notify_change(&record())
        .await
        .unwrap_err();

    match err {
        NotifyError::Api {
            status,
            description,
        } => {
            assert_eq!(status, 200);
            assert!(description.contains("can't parse entities"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let err = notifier(&server, NotificationTarget::Direct)
        .notify_error("boom")
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Api { status: 500, .. }));
}
