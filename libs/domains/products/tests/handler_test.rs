//! Handler tests for the Products domain
//!
//! Drive the products router over HTTP with the in-memory repository and an
//! in-memory publisher:
//! - Status codes and the `Location` header
//! - JSON shapes and validation error details
//! - Name change events

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use messaging::InMemoryPublisher;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct TestApp {
    router: Router,
    repo: InMemoryProductRepository,
    publisher: InMemoryPublisher,
}

fn test_app() -> TestApp {
    let repo = InMemoryProductRepository::new();
    let publisher = InMemoryPublisher::new();
    let notifier = ProductEventNotifier::new(Arc::new(publisher.clone()));
    let service = ProductService::new(repo.clone(), Arc::new(notifier));

    TestApp {
        router: Router::new().nest("/api/products", router(service)),
        repo,
        publisher,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn seed(app: &TestApp, name: &str, category: ProductCategory) -> Product {
    app.repo
        .insert(Product {
            product_id: Uuid::now_v7(),
            product_name: Some(name.to_string()),
            category,
            unit_price: Decimal::new(1000, 2),
            quantity_in_stock: 5,
        })
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_add_product_returns_201_with_location() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({
                "productName": "Hex Nut M6",
                "category": "NutsAndBolts",
                "unitPrice": 0.15,
                "quantityInStock": 1000
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(
        location,
        format!("/api/products/search/product-id/{}", product.product_id)
    );
    assert_eq!(product.product_name.as_deref(), Some("Hex Nut M6"));
    assert_eq!(product.category, ProductCategory::NutsAndBolts);
    assert_eq!(product.unit_price, Decimal::new(15, 2));
    assert_eq!(product.quantity_in_stock, 1000);

    // The Location URL resolves to the new product
    let response = app.router.oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_product_reports_field_errors() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({ "category": "Groceries", "unitPrice": 0, "quantityInStock": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["ProductName"], json!(["Product Name is required"]));
    assert_eq!(body["details"]["Category"], json!(["Category is required"]));
    assert_eq!(body["details"]["UnitPrice"], json!(["Unit Price is required"]));
    assert!(body["details"].get("QuantityInStock").is_none());

    assert!(app.repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_product_rejects_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products() {
    let app = test_app();
    seed(&app, "Sofa", ProductCategory::Furniture).await;
    seed(&app, "Kettle", ProductCategory::HomeAppliances).await;

    let response = app.router.oneshot(get("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = products
        .iter()
        .filter_map(|p| p.product_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Sofa", "Kettle"]);
}

#[tokio::test]
async fn test_get_product_by_id() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;

    let response = app
        .router
        .clone()
        .oneshot(get(&format!(
            "/api/products/search/product-id/{}",
            sofa.product_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["productID"], json!(sofa.product_id));
    assert_eq!(body["productName"], "Sofa");
    assert_eq!(body["category"], "Furniture");
    assert_eq!(body["quantityInStock"], 5);

    let response = app
        .router
        .clone()
        .oneshot(get(&format!(
            "/api/products/search/product-id/{}",
            Uuid::now_v7()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .oneshot(get("/api/products/search/product-id/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_matches_name_or_category() {
    let app = test_app();
    seed(&app, "Electric Kettle", ProductCategory::HomeAppliances).await;
    seed(&app, "Laptop", ProductCategory::Electronics).await;
    seed(&app, "Oak Table", ProductCategory::Furniture).await;

    let response = app
        .router
        .oneshot(get("/api/products/search/ELECTR"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = products
        .iter()
        .filter_map(|p| p.product_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Electric Kettle", "Laptop"]);
}

#[tokio::test]
async fn test_search_lists_product_matching_name_and_category_once() {
    let app = test_app();
    let bolt = seed(&app, "Hex Bolt", ProductCategory::NutsAndBolts).await;
    let nut = seed(&app, "Wing Nut", ProductCategory::NutsAndBolts).await;
    seed(&app, "Bookshelf", ProductCategory::Furniture).await;

    let response = app
        .router
        .oneshot(get("/api/products/search/Bolt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    let ids: Vec<_> = products.iter().map(|p| p.product_id).collect();
    assert_eq!(ids, vec![bolt.product_id, nut.product_id]);
}

#[tokio::test]
async fn test_update_product_with_new_name_publishes_event() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/products",
            json!({
                "productID": sofa.product_id,
                "productName": "Corner Sofa",
                "category": "Furniture",
                "unitPrice": 799.99,
                "quantityInStock": 2
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.product_name.as_deref(), Some("Corner Sofa"));
    assert_eq!(product.unit_price, Decimal::new(79999, 2));

    let events = app
        .publisher
        .wait_for_messages(PRODUCT_NAME_UPDATED_ROUTING_KEY, 1, Duration::from_secs(2))
        .await;
    assert_eq!(events.len(), 1);
    let payload: Value = events[0].json().unwrap();
    assert_eq!(
        payload,
        json!({ "productID": sofa.product_id, "newName": "Corner Sofa" })
    );
}

#[tokio::test]
async fn test_update_product_with_same_name_publishes_nothing() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/products",
            json!({
                "productID": sofa.product_id,
                "productName": "Sofa",
                "category": "Others",
                "unitPrice": 10,
                "quantityInStock": 9
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.publisher.messages().await.is_empty());
}

#[tokio::test]
async fn test_update_succeeds_when_publisher_fails() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;
    app.publisher.set_failing(true);

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/products",
            json!({
                "productID": sofa.product_id,
                "productName": "Loveseat",
                "category": "Furniture",
                "unitPrice": 10,
                "quantityInStock": 5
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = app.repo.list().await.unwrap();
    assert_eq!(stored[0].product_name.as_deref(), Some("Loveseat"));
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/products",
            json!({
                "productID": Uuid::now_v7(),
                "productName": "Nothing",
                "category": "Others",
                "unitPrice": 1,
                "quantityInStock": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product does not exist");
    assert!(app.publisher.messages().await.is_empty());
}

#[tokio::test]
async fn test_update_invalid_fields_returns_400() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/api/products",
            json!({
                "productID": sofa.product_id,
                "productName": "Sofa",
                "category": "Furniture",
                "unitPrice": -5,
                "quantityInStock": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["details"]["UnitPrice"],
        json!(["Unit Price can't be negative"])
    );
}

#[tokio::test]
async fn test_delete_product() {
    let app = test_app();
    let sofa = seed(&app, "Sofa", ProductCategory::Furniture).await;
    let uri = format!("/api/products/{}", sofa.product_id);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: bool = json_body(response.into_body()).await;
    assert!(deleted);
    assert!(app.repo.list().await.unwrap().is_empty());

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
