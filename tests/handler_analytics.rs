mod common;

use chrono::{Duration, Utc};
use serde_json::Value;

#[tokio::test]
async fn test_mapping_analytics_without_clicks_is_empty() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;
    let code = common::shorten(&server, &token, "https://go.dev").await;

    let response = server
        .get(&format!("/api/urls/analytics/{code}"))
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "2024-01-01T00:00:00")
        .add_query_param("endDate", "2024-01-31T23:59:59")
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_mapping_analytics_inverted_range() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;
    let code = common::shorten(&server, &token, "https://go.dev").await;

    let response = server
        .get(&format!("/api/urls/analytics/{code}"))
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "2024-02-01T00:00:00")
        .add_query_param("endDate", "2024-01-01T00:00:00")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_range");
}

#[tokio::test]
async fn test_mapping_analytics_malformed_date() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;
    let code = common::shorten(&server, &token, "https://go.dev").await;

    let response = server
        .get(&format!("/api/urls/analytics/{code}"))
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "last week")
        .add_query_param("endDate", "2024-01-01T00:00:00")
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["field"], "startDate");
}

#[tokio::test]
async fn test_mapping_analytics_unknown_code() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .get("/api/urls/analytics/NoSuch00")
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "2024-01-01T00:00:00")
        .add_query_param("endDate", "2024-01-31T23:59:59")
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_mapping_analytics_requires_token() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/api/urls/analytics/NoSuch00")
        .add_query_param("startDate", "2024-01-01T00:00:00")
        .add_query_param("endDate", "2024-01-31T23:59:59")
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_total_clicks_across_own_mappings() {
    let server = common::test_server(common::create_test_state());
    let alice = common::register(&server, "alice").await;
    let bob = common::register(&server, "bob").await;

    let go = common::shorten(&server, &alice, "https://go.dev").await;
    let rust = common::shorten(&server, &alice, "https://rust-lang.org").await;
    let other = common::shorten(&server, &bob, "https://bob.example").await;

    let first_day = Utc::now().date_naive();
    for code in [&go, &go, &rust, &other] {
        server.get(&format!("/{code}")).await;
    }
    let last_day = Utc::now().date_naive();

    let response = server
        .get("/api/urls/totalClicks")
        .add_header("Authorization", common::bearer(&alice))
        .add_query_param("startDate", (first_day - Duration::days(7)).to_string())
        .add_query_param("endDate", last_day.to_string())
        .await;

    response.assert_status_ok();

    let totals = response.json::<Value>();
    let totals = totals.as_object().unwrap();
    let sum: i64 = totals.values().map(|v| v.as_i64().unwrap()).sum();
    assert_eq!(sum, 3);
    if first_day == last_day {
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&first_day.to_string()], 3);
    }
}

#[tokio::test]
async fn test_total_clicks_range_before_any_click() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;
    let code = common::shorten(&server, &token, "https://go.dev").await;
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    server.get(&format!("/{code}")).await;

    let response = server
        .get("/api/urls/totalClicks")
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", (yesterday - Duration::days(3)).to_string())
        .add_query_param("endDate", yesterday.to_string())
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>().as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_total_clicks_rejects_date_time() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .get("/api/urls/totalClicks")
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "2024-01-01T00:00:00")
        .add_query_param("endDate", "2024-01-31")
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_total_clicks_inverted_range() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    let response = server
        .get("/api/urls/totalClicks")
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", "2024-02-01")
        .add_query_param("endDate", "2024-01-01")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_range");
}

#[tokio::test]
async fn test_total_clicks_range_after_all_clicks() {
    let server = common::test_server(common::create_test_state());
    let token = common::register(&server, "alice").await;
    let code = common::shorten(&server, &token, "https://go.dev").await;
    server.get(&format!("/{code}")).await;

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let response = server
        .get("/api/urls/totalClicks")
        .add_header("Authorization", common::bearer(&token))
        .add_query_param("startDate", tomorrow.to_string())
        .add_query_param("endDate", (tomorrow + Duration::days(3)).to_string())
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>().as_object().unwrap().is_empty());
}
