use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  routing::get,
  Json, Router,
};
use email_search_client::{ApiClient, ApiConfig, ApiError, EmailService, EmailServiceImpl, Hit};
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Store = Arc<Mutex<HashMap<String, Value>>>;

fn envelope(docs: Vec<(String, Value)>) -> Value {
  let hits: Vec<Value> = docs
    .into_iter()
    .map(|(id, source)| json!({"_id": id, "_score": 1.0, "_source": source}))
    .collect();
  json!({"hits": {"total": {"value": hits.len()}, "hits": hits}})
}

async fn list_emails(State(store): State<Store>) -> Json<Value> {
  let docs = store.lock().unwrap().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
  Json(envelope(docs))
}

async fn search_emails(State(store): State<Store>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
  let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
  let docs = store
    .lock()
    .unwrap()
    .iter()
    .filter(|(_, v)| v.to_string().to_lowercase().contains(&q))
    .map(|(k, v)| (k.clone(), v.clone()))
    .collect();
  Json(envelope(docs))
}

async fn create_email(State(store): State<Store>, Json(body): Json<Value>) -> Json<Value> {
  let mut store = store.lock().unwrap();
  let id = format!("doc-{}", store.len() + 1);
  store.insert(id.clone(), body);
  Json(json!({"id": id, "message": "ok"}))
}

async fn get_email(State(store): State<Store>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
  store
    .lock()
    .unwrap()
    .get(&id)
    .map(|source| Json(json!({"_id": id, "_source": source})))
    .ok_or(StatusCode::NOT_FOUND)
}

async fn update_email(
  State(store): State<Store>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
  let mut store = store.lock().unwrap();
  match store.get_mut(&id) {
    Some(existing) => {
      *existing = body;
      Ok(Json(json!({"id": id, "message": "updated"})))
    }
    None => Err(StatusCode::NOT_FOUND),
  }
}

async fn delete_email(State(store): State<Store>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
  store
    .lock()
    .unwrap()
    .remove(&id)
    .map(|_| Json(json!({"id": id, "message": "deleted"})))
    .ok_or(StatusCode::NOT_FOUND)
}

async fn spawn_search_api() -> String {
  let store: Store = Arc::new(Mutex::new(HashMap::new()));
  let app = Router::new()
    .route("/api/emails", get(list_emails).post(create_email))
    .route("/api/emails/{id}", get(get_email).put(update_email).delete(delete_email))
    .route("/api/search", get(search_emails))
    .with_state(store);

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  format!("http://{}/api", addr)
}

fn service_for(base_url: String) -> EmailServiceImpl<ApiClient> {
  let client = ApiClient::new(ApiConfig {
    base_url,
    ..ApiConfig::default()
  })
  .unwrap();
  EmailServiceImpl::new(client)
}

#[tokio::test]
async fn test_crud_and_search_round() {
  let service = service_for(spawn_search_api().await);

  assert!(service.get_all().await.unwrap().is_empty());

  let created = service
    .create(&json!({"subject": "Gas forecast", "sender": "phillip.allen@enron.com", "content": "Numbers attached"}))
    .await
    .unwrap();
  let id = created["id"].as_str().unwrap().to_string();
  assert_eq!(created["message"], "ok");

  service
    .create(&json!({"subject": "Lunch", "sender": "tim.belden@enron.com", "content": "Noon?"}))
    .await
    .unwrap();

  let all = service.get_all().await.unwrap();
  assert_eq!(all.len(), 2);

  let found = service.search("gas forecast").await.unwrap();
  assert_eq!(found.len(), 1);
  let hit = Hit::from_value(&found[0]).unwrap();
  assert_eq!(hit.id, id);
  assert_eq!(hit.source.sender, "phillip.allen@enron.com");

  let fetched = service.get_by_id(&id).await.unwrap();
  assert_eq!(fetched["_source"]["subject"], "Gas forecast");

  let updated = service
    .update(&id, &json!({"subject": "Gas forecast v2", "content": "Revised"}))
    .await
    .unwrap();
  assert_eq!(updated["message"], "updated");
  assert_eq!(service.get_by_id(&id).await.unwrap()["_source"]["subject"], "Gas forecast v2");

  let deleted = service.delete(&id).await.unwrap();
  assert_eq!(deleted["message"], "deleted");
  assert_eq!(service.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_with_special_characters_reaches_server_decoded() {
  let service = service_for(spawn_search_api().await);
  service
    .create(&json!({"subject": "R&D budget 100%", "content": "draft"}))
    .await
    .unwrap();

  let found = service.search("r&d budget 100%").await.unwrap();
  assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_missing_email_propagates_status() {
  let service = service_for(spawn_search_api().await);

  let err = service.get_by_id("nope").await.unwrap_err();
  assert!(matches!(err, ApiError::Status { status: 404, .. }));

  let err = service.delete("nope").await.unwrap_err();
  assert_eq!(err.status(), Some(404));
}
