//! Listing API tests: page rendering and table controls.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{fixtures, TestFixture};

fn ids(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_sanitized_config() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(4)).await;

    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "status", json!("ok"));
    assert_json_path!(response.body, "orders_loaded", json!(4));
    assert_json_path!(response.body, "is_submitting", json!(false));

    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["backend"]["api_key_configured"], true);
    assert!(response.body["backend"].get("api_key").is_none());
    assert_eq!(response.body["table"]["rows_per_page"], 50);
}

#[tokio::test]
async fn test_get_orders_first_page() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(120)).await;

    let response = fixture.get("/api/v1/orders").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "total_count", json!(120));
    assert_json_path!(response.body, "total_pages", json!(3));
    assert_json_path!(response.body, "current_page", json!(1));
    assert_json_path!(response.body, "rows_per_page_options", json!([10, 25, 50, 100]));
    assert_json_path!(response.body, "is_submitting", json!(false));
    assert_eq!(ids(&response.body).len(), 50);
}

#[tokio::test]
async fn test_page_and_rows_per_page() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(120)).await;

    let response = fixture.put("/api/v1/orders/page", json!({ "page": 2 })).await;
    assert_status!(response, StatusCode::OK);
    let page_ids = ids(&response.body);
    assert_eq!(page_ids.first().map(String::as_str), Some("51"));
    assert_eq!(page_ids.last().map(String::as_str), Some("100"));

    let response = fixture
        .put("/api/v1/orders/rows-per-page", json!({ "rows_per_page": 25 }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "current_page", json!(1));
    assert_json_path!(response.body, "total_pages", json!(5));

    let response = fixture.put("/api/v1/orders/page", json!({ "page": 99 })).await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "current_page", json!(5));
}

#[tokio::test]
async fn test_invalid_table_values_are_rejected() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(5)).await;

    let response = fixture.put("/api/v1/orders/page", json!({ "page": 0 })).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("page"));

    let response = fixture
        .put("/api/v1/orders/rows-per-page", json!({ "rows_per_page": 0 }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_filters_and_resets_page() {
    let mut rows = fixtures::numbered_orders(60);
    rows.push(fixtures::order("ZZ-1", "Pending"));
    let fixture = TestFixture::with_rows(rows).await;

    fixture.put("/api/v1/orders/page", json!({ "page": 2 })).await;
    let response = fixture
        .put("/api/v1/orders/query", json!({ "query": "zz-1.ZIP" }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "current_page", json!(1));
    assert_json_path!(response.body, "query", json!("zz-1.ZIP"));
    assert_eq!(ids(&response.body), vec!["ZZ-1"]);
}

#[tokio::test]
async fn test_sort_cycle() {
    let fixture = TestFixture::with_rows(vec![
        fixtures::order("B", "Pending"),
        fixtures::order("C", "New"),
        fixtures::order("A", "Redesign"),
    ])
    .await;

    let response = fixture.post_empty("/api/v1/orders/sort/orderid").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "sort", json!({ "key": "orderid", "direction": "asc" }));
    assert_eq!(ids(&response.body), vec!["A", "B", "C"]);

    let response = fixture.post_empty("/api/v1/orders/sort/orderid").await;
    assert_eq!(ids(&response.body), vec!["C", "B", "A"]);

    let response = fixture.post_empty("/api/v1/orders/sort/orderid").await;
    assert_eq!(response.body["sort"]["key"], Value::Null);
    assert_eq!(ids(&response.body), vec!["B", "C", "A"]);
}

#[tokio::test]
async fn test_sort_over_mixed_order_ids_keeps_listing_usable() {
    let order_ids = [
        "9", "10", "1a", "100", "2b", "55", "x", "7", "3c", "20", "1e", "0x1", "-5", "a9",
    ];
    let fixture = TestFixture::with_rows(
        order_ids
            .iter()
            .map(|id| fixtures::order(id, "New"))
            .collect(),
    )
    .await;

    let response = fixture.post_empty("/api/v1/orders/sort/orderid").await;
    assert_status!(response, StatusCode::OK);
    let ascending = vec![
        "-5", "7", "9", "10", "20", "55", "100", "0x1", "1a", "1e", "2b", "3c", "a9", "x",
    ];
    assert_eq!(ids(&response.body), ascending);

    let response = fixture.get("/api/v1/orders").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body), ascending);

    let response = fixture.post_empty("/api/v1/orders/sort/orderid").await;
    assert_status!(response, StatusCode::OK);
    let descending: Vec<&str> = ascending.iter().rev().copied().collect();
    assert_eq!(ids(&response.body), descending);

    let response = fixture.get("/api/v1/orders").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "total_count", json!(14));
}

#[tokio::test]
async fn test_sort_unknown_column() {
    let fixture = TestFixture::new().await;
    let response = fixture.post_empty("/api/v1/orders/sort/nonsense").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reload_picks_up_new_rows() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(2)).await;
    fixture.orders.set_rows(fixtures::numbered_orders(7)).await;

    let response = fixture.post_empty("/api/v1/orders/reload").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "total_count", json!(7));
}

#[tokio::test]
async fn test_reload_failure_is_bad_gateway() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(2)).await;
    fixture
        .orders
        .set_next_error(orderdesk_core::BackendError::Request("refused".into()))
        .await;

    let response = fixture.post_empty("/api/v1/orders/reload").await;
    assert_status!(response, StatusCode::BAD_GATEWAY);

    // Existing rows survive a failed reload
    let response = fixture.get("/api/v1/orders").await;
    assert_json_path!(response.body, "total_count", json!(2));
}

#[tokio::test]
async fn test_reset_clears_controls_and_selection() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(60)).await;
    fixture.put("/api/v1/orders/query", json!({ "query": "file1" })).await;
    fixture.post_empty("/api/v1/orders/sort/fname").await;
    fixture.post_empty("/api/v1/selection/1/toggle").await;

    let response = fixture.post_empty("/api/v1/orders/reset").await;
    assert_status!(response, StatusCode::OK);
    assert_json_path!(response.body, "query", json!(""));
    assert_json_path!(response.body, "selected_count", json!(0));
    assert_json_path!(response.body, "total_count", json!(60));
    assert_eq!(response.body["sort"]["key"], Value::Null);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::with_rows(fixtures::numbered_orders(3)).await;
    fixture.get("/api/v1/health").await;

    let (status, body) = fixture.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("orderdesk_http_requests_total"));
    assert!(body.contains("orderdesk_orders_loaded"));
}
