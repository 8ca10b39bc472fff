// Shared fixtures for vidtube-core integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use url::Url;
use vidtube_api::{ApiClient, TransportConfig};
use vidtube_core::{Context, Navigator, Route};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every navigation request.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub async fn setup() -> (MockServer, Context, Arc<RecordingNavigator>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    let api = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    let navigator = Arc::new(RecordingNavigator::default());
    let ctx = Context::with_api(api, navigator.clone());
    (server, ctx, navigator)
}

pub fn envelope(data: Value) -> Value {
    json!({ "statusCode": 200, "data": data, "message": "ok", "success": true })
}

pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "statusCode": status,
        "message": message,
        "success": false
    }))
}

pub fn user_json() -> Value {
    json!({ "_id": "u1", "username": "ana", "email": "ana@example.com", "fullName": "Ana Lima" })
}

/// Mount `GET /users/current-user` answering with the test identity.
pub async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users/current-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json())))
        .mount(server)
        .await;
}

/// Rehydrate `ctx` into an authenticated session.
pub async fn sign_in(server: &MockServer, ctx: &Context) {
    mount_current_user(server).await;
    assert!(ctx.session().rehydrate().await.is_some());
    server.reset().await;
}
