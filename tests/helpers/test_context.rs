//! Test context for unified test setup

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use eventhub::config::DeletePolicy;
use eventhub::database::{JsonFileStore, MemoryStore};
use eventhub::models::{Event, Participant};
use eventhub::{build_router, DatabaseService, ServiceFactory};

/// Services plus the handles a test needs to inspect or sabotage storage
pub struct TestContext {
    pub services: Arc<ServiceFactory>,
    pub events_store: Option<Arc<MemoryStore<Event>>>,
    pub participants_store: Option<Arc<MemoryStore<Participant>>>,
    pub temp_dir: Option<TempDir>,
}

impl TestContext {
    /// In-memory collections with the default reject policy
    pub fn new() -> Self {
        Self::with_policy(DeletePolicy::Reject)
    }

    pub fn with_policy(policy: DeletePolicy) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let events = Arc::new(MemoryStore::<Event>::new("events"));
        let participants = Arc::new(MemoryStore::<Participant>::new("participants"));
        let database = DatabaseService::new(events.clone(), participants.clone());

        Self {
            services: Arc::new(ServiceFactory::with_database(database, policy)),
            events_store: Some(events),
            participants_store: Some(participants),
            temp_dir: None,
        }
    }

    /// JSON files in a fresh temporary directory
    pub fn with_json_files() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let backoff = Duration::from_millis(5);
        let events = JsonFileStore::<Event>::new(temp_dir.path().join("events.json"), 3, backoff);
        let participants =
            JsonFileStore::<Participant>::new(temp_dir.path().join("participants.json"), 3, backoff);
        let database = DatabaseService::new(Arc::new(events), Arc::new(participants));

        Self {
            services: Arc::new(ServiceFactory::with_database(database, DeletePolicy::Reject)),
            events_store: None,
            participants_store: None,
            temp_dir: Some(temp_dir),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.services.clone())
    }

    /// Send one request through a fresh router and decode the JSON envelope
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn send_raw(&self, method: Method, uri: &str, raw: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .expect("Failed to build request");

        let response = self.router().oneshot(request).await.expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Current seat count straight from storage
    pub async fn seats_taken(&self, event_id: &str) -> u32 {
        self.services
            .event_service
            .find_one(event_id)
            .await
            .expect("Event should exist")
            .current_participants
    }
}
