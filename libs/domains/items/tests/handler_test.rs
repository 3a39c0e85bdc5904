//! Handler tests for the Items domain
//!
//! Exercise only the items router over an in-memory repository, not the full
//! application.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use database::mongodb::Store;
use domain_items::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// In-memory ItemRepository for handler tests
#[derive(Default)]
struct InMemoryItemRepository {
    items: Mutex<HashMap<Uuid, Item>>,
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::new(input);
        self.items.lock().unwrap().insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;

        if let Some(name) = input.name {
            item.name = name;
        }
        if let Some(value) = input.value {
            item.value = value;
        }
        item.updated_at = chrono::Utc::now();

        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        self.items
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(ItemError::NotFound(id))
    }
}

fn test_app() -> Router {
    let repo = Arc::new(InMemoryItemRepository::default());
    let service = ItemService::new(repo);
    handlers::router(service)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create_item(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(request("POST", "/", Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_item_returns_201_with_external_id() {
    let app = test_app();

    let created = create_item(
        &app,
        json!({ "name": "sensor-1", "value": { "unit": "celsius" } }),
    )
    .await;

    assert!(created["id"].is_string());
    assert!(created.get("_id").is_none());
    assert_eq!(created["name"], "sensor-1");
    assert_eq!(created["value"]["unit"], "celsius");
}

#[tokio::test]
async fn test_create_item_without_value() {
    let app = test_app();

    let created = create_item(&app, json!({ "name": "bare" })).await;

    assert!(created["value"].is_null());
}

#[tokio::test]
async fn test_create_item_missing_name_returns_400() {
    let app = test_app();

    let response = app
        .oneshot(request("POST", "/", Some(json!({ "value": 1 }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_unknown_item_returns_404() {
    let app = test_app();

    let response = app
        .oneshot(request("GET", &format!("/{}", Uuid::now_v7()), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_malformed_id_returns_400() {
    let app = test_app();

    let response = app
        .oneshot(request("GET", "/definitely-not-a-uuid", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_items_field_selection() {
    let app = test_app();
    create_item(&app, json!({ "name": "a", "value": 1 })).await;

    let response = app
        .oneshot(request("GET", "/?fields=name,unknown", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    let item = &body.as_array().unwrap()[0];
    let keys: Vec<&str> = item.as_object().unwrap().keys().map(|k| k.as_str()).collect();

    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"id"));
    assert!(keys.contains(&"name"));
}

#[tokio::test]
async fn test_put_and_patch_both_update_partially() {
    let app = test_app();
    let created = create_item(&app, json!({ "name": "sensor-1", "value": 1 })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/{id}"),
            Some(json!({ "name": "renamed" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "renamed");
    assert_eq!(body["value"], 1);

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/{id}"),
            Some(json!({ "value": { "v": 2 } })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "renamed");
    assert_eq!(body["value"]["v"], 2);
}

#[tokio::test]
async fn test_update_clears_value_with_explicit_null() {
    let app = test_app();
    let created = create_item(&app, json!({ "name": "sensor-1", "value": 1 })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/{id}"),
            Some(json!({ "value": null })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert!(body["value"].is_null());
    assert_eq!(body["name"], "sensor-1");
}

#[tokio::test]
async fn test_update_empty_body_returns_400() {
    let app = test_app();
    let created = create_item(&app, json!({ "name": "sensor-1" })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(request("PUT", &format!("/{id}"), Some(json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_item_returns_204_with_empty_body() {
    let app = test_app();
    let created = create_item(&app, json!({ "name": "sensor-1" })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/{id}"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app
        .oneshot(request("DELETE", &format!("/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_before_store_ready_return_503() {
    let repo = Arc::new(MongoItemRepository::new(Store::new()));
    let service = ItemService::new(repo);
    let app = handlers::router(service);

    let response = app.oneshot(request("GET", "/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Database not ready");
}
