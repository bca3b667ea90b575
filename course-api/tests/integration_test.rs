use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use course_api::{app, AppState};
use course_catalog::{NewProduct, Product, ProductError};
use course_core::{ProductRepository, RepoError, RepoResult};
use course_store::app_config::Config;
use course_store::{seed_catalog, InMemoryCatalog};
use serde_json::Value;
use tower::ServiceExt;

async fn seeded_app() -> Router {
    let catalog = Arc::new(InMemoryCatalog::new());
    seed_catalog(catalog.as_ref(), catalog.as_ref()).await.unwrap();
    app(AppState::new(catalog.clone(), catalog))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Fails every call with the error produced by `make_error`
struct FailingProducts {
    make_error: fn() -> RepoError,
}

#[async_trait]
impl ProductRepository for FailingProducts {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        Err((self.make_error)())
    }

    async fn find_by_id(&self, _id: i64) -> RepoResult<Option<Product>> {
        Err((self.make_error)())
    }

    async fn insert(&self, _product: &NewProduct) -> RepoResult<Product> {
        Err((self.make_error)())
    }

    async fn update(&self, _product: &Product) -> RepoResult<bool> {
        Err((self.make_error)())
    }

    async fn delete_by_id(&self, _id: i64) -> RepoResult<bool> {
        Err((self.make_error)())
    }

    async fn count(&self) -> RepoResult<u64> {
        Err((self.make_error)())
    }
}

fn app_with_failing_products(make_error: fn() -> RepoError) -> Router {
    let categories = Arc::new(InMemoryCatalog::new());
    app(AppState::new(Arc::new(FailingProducts { make_error }), categories))
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(seeded_app().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_products_returns_all_stored() {
    let (status, body) = get(seeded_app().await, "/products").await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["name"], "The Lord of the Rings");
    assert_eq!(products[0]["categories"][0]["name"], "Books");
}

#[tokio::test]
async fn test_get_product_by_id() {
    let (status, body) = get(seeded_app().await, "/products/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Macbook Pro");
    assert_eq!(body["price"], 1250.0);
}

#[tokio::test]
async fn test_get_missing_product_is_not_found() {
    let (status, body) = get(seeded_app().await, "/products/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found. Id 999");
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let (status, _) = get(seeded_app().await, "/products/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reads_are_repeatable() {
    let app = seeded_app().await;

    let (_, first) = get(app.clone(), "/products").await;
    let (_, second) = get(app.clone(), "/products").await;
    assert_eq!(first, second);

    let (_, a) = get(app.clone(), "/products/2").await;
    let (_, b) = get(app, "/products/2").await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_empty_catalog() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let app = app(AppState::new(catalog.clone(), catalog));

    let (status, body) = get(app.clone(), "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(vec![]));

    let (status, _) = get(app, "/products/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories() {
    let app = seeded_app().await;

    let (status, body) = get(app.clone(), "/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = get(app.clone(), "/categories/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Computers");

    let (status, _) = get(app, "/categories/10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_from_memory_config() {
    let config = Config::from_toml(
        r#"
        [server]
        port = 8080

        [database]
        backend = "memory"
        seed = true
        "#,
    )
    .unwrap();

    let state = AppState::from_config(&config.database).await.unwrap();
    assert_eq!(state.products.find_all().await.unwrap().len(), 5);

    let (status, body) = get(app(state), "/products/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rails for Dummies");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = app_with_failing_products(|| "connection refused".into());

    let (status, body) = get(app.clone(), "/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Internal Server Error" }));

    let (status, body) = get(app, "/products/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_invalid_product_is_bad_request() {
    let app = app_with_failing_products(|| Box::new(ProductError::EmptyName) as RepoError);

    let (status, body) = get(app, "/products").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product name must not be empty");
}
