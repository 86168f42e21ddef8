//! Integration tests for Ticket-Watch
//!
//! These tests use wiremock to stand in for the ticketing site and the
//! Telegram Bot API, and tempfile for the snapshot database.

mod run_tests;
mod telegram_tests;

use ticket_watch::config::{
    Config, FetcherConfig, NotificationTarget, NotifierConfig, RunConfig, StoreConfig,
};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FIRST_PERFORMANCE_ID: u64 = 1000;
pub const API_TOKEN: &str = "123:abc";
pub const USER_ID: &str = "42";
pub const CHANNEL_ID: &str = "-100777";

/// Builds a configuration pointing at the given mock servers
pub fn test_config(site_url: &str, api_url: &str, db_path: &str, slot_count: u32) -> Config {
    Config {
        fetcher: FetcherConfig {
            url_template: format!("{}/performance/{{performance_id}}/lang/en", site_url),
            first_performance_id: FIRST_PERFORMANCE_ID,
            slot_count,
            user_agent: "TestBot/1.0".to_string(),
            max_attempts: 5,
            backoff_factor_ms: 1,
            timeout_secs: 5,
            max_concurrent_requests: 4,
        },
        store: StoreConfig {
            database_path: db_path.to_string(),
            busy_timeout_ms: 3000,
        },
        notifier: NotifierConfig {
            api_base_url: api_url.to_string(),
            api_token: API_TOKEN.to_string(),
            user_id: USER_ID.to_string(),
            channel_id: CHANNEL_ID.to_string(),
            target: NotificationTarget::Direct,
            timeout_secs: 5,
        },
        run: RunConfig::default(),
    }
}

/// Path of the 1-based match on the mock ticketing site
pub fn match_path(match_number: u32) -> String {
    format!(
        "/performance/{}/lang/en",
        FIRST_PERFORMANCE_ID + u64::from(match_number) - 1
    )
}

/// Markup of a match page listing the given `(quality, price)` categories,
/// followed by one sold-out category
pub fn match_page(match_number: u32, categories: &[(u32, u64)]) -> String {
    let rows: String = categories
        .iter()
        .map(|(quality, price)| {
            format!(
                r#"<div class="seat_category_end">
                    <div class="category">Category {quality}</div>
                    <div class="tariff">Ticket Price</div>
                    <span class="int_part">{price}</span>
                </div>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
            <div class="round">Match {match_number}</div>
            <div class="team host">Portugal</div>
            <div class="team opposing">Ghana</div>
            <div class="day">Thursday, 24 November 2022</div>
            <div class="time">19:00</div>
            <div class="location"><span class="site">Stadium 974</span></div>
            {rows}
            <div class="seat_category_end">
                <div class="category">Category 4<div class="category_unavailable_overlay"></div></div>
                <div class="tariff">Ticket Price</div>
                <span class="int_part">70</span>
            </div>
        </body></html>"#
    )
}

/// Serves a page for every match in `1..=slot_count`
///
/// `offers` lists `(match_number, quality, price)` triples for the
/// categories on sale; every other match is sold out.
pub async fn mount_site(server: &MockServer, slot_count: u32, offers: &[(u32, u32, u64)]) {
    for match_number in 1..=slot_count {
        let categories: Vec<(u32, u64)> = offers
            .iter()
            .filter(|(n, _, _)| *n == match_number)
            .map(|(_, quality, price)| (*quality, *price))
            .collect();

        Mock::given(method("GET"))
            .and(path(match_path(match_number)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(match_page(match_number, &categories)),
            )
            .mount(server)
            .await;
    }
}

/// Accepts every sendMessage call
pub async fn mount_bot_api(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/bot.+/sendMessage$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"result":{"message_id":1}}"#),
        )
        .mount(server)
        .await;
}

/// JSON bodies of every request the server received
pub async fn sent_messages(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}
