use std::sync::{Arc, Mutex};

use axum::{
  body::Bytes,
  extract::State,
  http::{Method, StatusCode, Uri},
  Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::api::{ApiClient, ApiConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
  pub method: String,
  pub uri: String,
  pub body: Option<Value>,
}

#[derive(Clone)]
struct StubState {
  status: StatusCode,
  reply: Value,
  requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the search API. Every request is recorded and
/// answered with the same status and JSON body.
pub struct StubServer {
  pub base_url: String,
  requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
  pub async fn start(status: StatusCode, reply: Value) -> Self {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
      status,
      reply,
      requests: requests.clone(),
    };

    let app = Router::new().fallback(record_and_reply).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    tokio::spawn(async move {
      axum::serve(listener, app).await.expect("run stub server");
    });

    Self {
      base_url: format!("http://{}", addr),
      requests,
    }
  }

  /// Base URL of a port nothing is listening on.
  pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind unused-port listener");
    let addr = listener.local_addr().expect("unused-port address");
    drop(listener);
    format!("http://{}", addr)
  }

  pub fn client(&self) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url: self.base_url.clone(),
      ..ApiConfig::default()
    })
    .expect("build api client")
  }

  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.requests.lock().expect("lock recorded requests").clone()
  }
}

async fn record_and_reply(
  State(state): State<StubState>,
  method: Method,
  uri: Uri,
  body: Bytes,
) -> (StatusCode, Json<Value>) {
  let body = serde_json::from_slice(&body).ok();
  state
    .requests
    .lock()
    .expect("lock recorded requests")
    .push(RecordedRequest {
      method: method.to_string(),
      uri: uri.to_string(),
      body,
    });

  (state.status, Json(state.reply.clone()))
}
