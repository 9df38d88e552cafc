//! Router harness over a fresh in-memory store.

#![allow(dead_code, clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use event_manager::api::rest::{AppState, create_router};
use event_manager::infrastructure::persistence::in_memory::InMemoryStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let state = Arc::new(AppState::new(store.repositories()));
        Self {
            router: create_router(state),
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, body).await
    }

    pub async fn venue(&self, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/venues",
                json!({"venueName": name, "location": "Corvallis", "capacity": 200}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["venueID"].as_i64().unwrap()
    }

    pub async fn event(&self, venue_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/events",
                json!({
                    "eventName": name,
                    "eventDate": "2025-06-01",
                    "venueID": venue_id,
                    "eventDescription": "Opening night",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["eventID"].as_i64().unwrap()
    }

    pub async fn attendee(&self, first: &str, last: &str) -> i64 {
        let email = format!("{}@example.com", last.to_lowercase());
        let (status, body) = self
            .post(
                "/api/attendees",
                json!({"fName": first, "lName": last, "email": email}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["attendeeID"].as_i64().unwrap()
    }
}
