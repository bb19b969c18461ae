mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_returns_mapping() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .post("/api/urls/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": "https://go.dev" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    let code = short_url.strip_prefix("http://sho.rt/").unwrap();

    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["originalUrl"], "https://go.dev");
    assert_eq!(json["clickCount"], 0);
    assert_eq!(json["username"], "alice");
    assert!(json["createdDate"].is_string());
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_codes() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let first = common::shorten(&server, &token, "https://go.dev").await;
    let second = common::shorten(&server, &token, "https://go.dev").await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_shorten_rejects_blank_url() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .post("/api/urls/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_requires_token() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .post("/api/urls/shorten")
        .json(&json!({ "originalUrl": "https://go.dev" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/api/urls/myurls")
        .add_header("Authorization", common::bearer("not-a-session"))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_my_urls_lists_only_own_mappings_in_order() {
    let server = common::test_server(common::create_test_state());
    let alice = common::register(&server, "alice").await;
    let bob = common::register(&server, "bob").await;

    let first = common::shorten(&server, &alice, "https://go.dev").await;
    common::shorten(&server, &bob, "https://bob.example").await;
    let second = common::shorten(&server, &alice, "https://rust-lang.org").await;

    let response = server
        .get("/api/urls/myurls")
        .add_header("Authorization", common::bearer(&alice))
        .await;

    response.assert_status_ok();

    let items = response.json::<Vec<Value>>();
    let urls: Vec<&str> = items
        .iter()
        .map(|item| item["shortUrl"].as_str().unwrap())
        .collect();

    assert_eq!(
        urls,
        vec![
            format!("http://sho.rt/{first}"),
            format!("http://sho.rt/{second}")
        ]
    );
    assert!(items.iter().all(|item| item["username"] == "alice"));
}

#[tokio::test]
async fn test_my_urls_empty() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .get("/api/urls/myurls")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}
