// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A stand-in completion API for tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use flashgen_core::cooldown::Cooldown;
use portpicker::pick_unused_port;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::time::sleep;

use crate::config::Settings;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::utils::wait_for_server;

const MOCK_HOST: &str = "127.0.0.1";

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    authorization: Arc<Mutex<Option<String>>>,
    request: Arc<Mutex<Option<Value>>>,
}

pub struct MockCompletion {
    port: u16,
    state: MockState,
}

impl MockCompletion {
    /// Answer every request with a chat completion whose content is `content`.
    pub async fn start(content: &str) -> Fallible<Self> {
        Self::spawn(StatusCode::OK, chat_body(content), Duration::ZERO).await
    }

    /// Like [`MockCompletion::start`], but each answer is sent after `delay`.
    pub async fn start_delayed(content: &str, delay: Duration) -> Fallible<Self> {
        Self::spawn(StatusCode::OK, chat_body(content), delay).await
    }

    /// Answer every request with a raw body and status.
    pub async fn start_with_status(status: u16, body: &str) -> Fallible<Self> {
        let status = StatusCode::from_u16(status)
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        Self::spawn(status, body.to_string(), Duration::ZERO).await
    }

    async fn spawn(status: StatusCode, body: String, delay: Duration) -> Fallible<Self> {
        let port = pick_unused_port().unwrap();
        let state = MockState {
            status,
            body,
            delay,
            hits: Arc::new(AtomicUsize::new(0)),
            authorization: Arc::new(Mutex::new(None)),
            request: Arc::new(Mutex::new(None)),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(completions_handler))
            .with_state(state.clone());
        let listener = TcpListener::bind(format!("{MOCK_HOST}:{port}")).await?;
        spawn(async move { axum::serve(listener, app).await });
        wait_for_server(MOCK_HOST, port).await?;
        Ok(Self { port, state })
    }

    /// Settings pointing at this mock, with no cooldown.
    pub fn settings(&self) -> Settings {
        Settings {
            endpoint: format!("http://{MOCK_HOST}:{}/v1/chat/completions", self.port),
            model: "test-model".to_string(),
            cooldown: Cooldown::new(Duration::ZERO),
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.authorization.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<Value> {
        self.state.request.lock().unwrap().clone()
    }
}

fn chat_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop",
        }],
    })
    .to_string()
}

async fn completions_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.authorization.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.request.lock().unwrap() = serde_json::from_str(&body).ok();
    if !state.delay.is_zero() {
        sleep(state.delay).await;
    }
    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
