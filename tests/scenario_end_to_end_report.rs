//! Full pipeline against a mocked order API: pagination, line item fan-out,
//! aggregation, ranking and the CSV file.

use httpmock::prelude::*;
use sell_through_report::config::AppConfig;
use sell_through_report::models::WindowSpec;
use sell_through_report::service::SilentProgress;
use sell_through_report::{ReportError, ReportRequest, SellThroughService, UpstreamError};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn config(server: &MockServer, output: &Path, page_size: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.upstream.api_base = server.base_url();
    config.upstream.store_hash = "store1".to_string();
    config.upstream.api_token = "token-123".to_string();
    config.upstream.page_size = page_size;
    config.upstream.timeout_secs = 5;
    config.report.output_path = output.display().to_string();
    config
}

fn order(server: &MockServer, id: u64) -> Value {
    json!({
        "id": id,
        "status_id": 2,
        "products": {
            "url": server.url(format!("/stores/store1/v2/orders/{id}/products")),
            "resource": format!("/orders/{id}/products")
        }
    })
}

fn request(brand: Option<&str>) -> ReportRequest {
    ReportRequest {
        brand: brand.map(str::to_string),
        window: WindowSpec::parse("custom", Some("01/01/2024"), Some("31/01/2024")).unwrap(),
    }
}

#[tokio::test]
async fn paginated_orders_produce_ranked_csv() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("SellThroughReport.csv");

    let page1 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/stores/store1/v2/orders")
                .query_param("page", "1")
                .query_param("limit", "2")
                .query_param("status_id", "2")
                .query_param("min_date_created", "2024-01-01T00:00:00.000Z")
                .query_param("max_date_created", "2024-01-31T00:00:00.000Z")
                .header("x-auth-token", "token-123");
            then.status(200).json_body(json!([order(&server, 1), order(&server, 2)]));
        })
        .await;
    let page2 = server
        .mock_async(|when, then| {
            when.method(GET).path("/stores/store1/v2/orders").query_param("page", "2");
            then.status(200).json_body(json!([order(&server, 3)]));
        })
        .await;
    let page3 = server
        .mock_async(|when, then| {
            when.method(GET).path("/stores/store1/v2/orders").query_param("page", "3");
            then.status(204);
        })
        .await;

    for (id, items) in [
        (1u64, json!([{ "sku": "X", "brand": "Acme", "name": "Widget", "quantity": 2 }])),
        (
            2,
            json!([
                { "sku": "X", "brand": "Acme", "name": "Widget", "quantity": 3 },
                { "sku": "Y", "brand": "Acme", "name": "Gadget", "quantity": 1 },
                { "sku": "Z", "brand": "Other", "name": "Doohickey", "quantity": 9 }
            ]),
        ),
        (3, json!([{ "sku": "W", "brand": "Acme", "name": "Sprocket", "quantity": 1 }])),
    ] {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/stores/store1/v2/orders/{id}/products"))
                    .header("x-auth-token", "token-123");
                then.status(200).json_body(items);
            })
            .await;
    }

    let service = SellThroughService::new(&config(&server, &output, 2))
        .unwrap()
        .with_progress(Arc::new(SilentProgress));
    let stats = service
        .generate(&request(Some("Acme")), chrono::Utc::now())
        .await
        .unwrap();

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_hits_async(0).await;

    assert_eq!(stats.orders, 3);
    assert_eq!(stats.skus, 3);
    assert_eq!(stats.total_quantity, 7);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Brand,SKU,Title,Quantity\nAcme,X,Widget,5\nAcme,W,Sprocket,1\nAcme,Y,Gadget,1\n"
    );
}

#[tokio::test]
async fn failing_line_items_abort_without_touching_existing_report() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("SellThroughReport.csv");
    std::fs::write(&output, "previous report").unwrap();

    server
        .mock_async(|when, then| {
            when.method(GET).path("/stores/store1/v2/orders").query_param("page", "1");
            then.status(200)
                .json_body(json!([order(&server, 1), order(&server, 2), order(&server, 3)]));
        })
        .await;
    for id in [1u64, 3] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/stores/store1/v2/orders/{id}/products"));
                then.status(200)
                    .json_body(json!([{ "sku": "X", "brand": "Acme", "name": "Widget", "quantity": 1 }]));
            })
            .await;
    }
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stores/store1/v2/orders/2/products");
            then.status(500).body("internal error");
        })
        .await;

    let service = SellThroughService::new(&config(&server, &output, 200))
        .unwrap()
        .with_progress(Arc::new(SilentProgress));
    let err = service
        .generate(&request(None), chrono::Utc::now())
        .await
        .unwrap_err();

    match err {
        ReportError::Upstream(UpstreamError::LineItems { order_id, source }) => {
            assert_eq!(order_id, 2);
            assert!(matches!(*source, UpstreamError::Status { status: 500, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous report");
}

#[tokio::test]
async fn empty_window_writes_header_only() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("SellThroughReport.csv");

    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/stores/store1/v2/orders");
            then.status(204);
        })
        .await;

    let service = SellThroughService::new(&config(&server, &output, 200))
        .unwrap()
        .with_progress(Arc::new(SilentProgress));
    let stats = service
        .generate(&request(None), chrono::Utc::now())
        .await
        .unwrap();

    listing.assert_hits_async(1).await;
    assert_eq!(stats.orders, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Brand,SKU,Title,Quantity\n");
}
