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

use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Instant;

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use flashgen_core::completion::FetchError;
use flashgen_core::flip::FlipTween;
use flashgen_core::flip::Side;
use flashgen_core::parser::Flashcard;
use flashgen_core::widget::Widget;
use serde::Deserialize;
use serde::Serialize;
use tokio::spawn;

use crate::cmd::serve::get::render_page;
use crate::cmd::serve::state::ServerState;

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    subject: Option<String>,
}

#[derive(Deserialize)]
enum Action {
    Generate,
    Flip,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> (StatusCode, Html<String>) {
    match form.action {
        Action::Generate => generate(&state, form.subject).await,
        Action::Flip => {
            flip(&state);
        }
    }
    (StatusCode::OK, Html(render_page(&state)))
}

#[derive(Serialize)]
pub struct FlipResponse {
    side: Side,
    from: f64,
    to: f64,
    duration_ms: u64,
}

pub async fn flip_handler(State(state): State<ServerState>) -> Json<FlipResponse> {
    let (side, tween) = flip(&state);
    Json(FlipResponse {
        side,
        from: tween.from,
        to: tween.to,
        duration_ms: tween.duration.as_millis() as u64,
    })
}

fn flip(state: &ServerState) -> (Side, FlipTween) {
    let mut widget = state.widget.lock().unwrap();
    let tween = widget.flip();
    log::debug!("Flipped card to {}", widget.side());
    (widget.side(), tween)
}

/// Fetch a new card for the submitted subject, unless the gate is busy.
///
/// Failures are logged and otherwise ignored: the previous card stays up.
async fn generate(state: &ServerState, subject: Option<String>) {
    let subject = {
        let mut widget = state.widget.lock().unwrap();
        if let Some(subject) = subject {
            widget.set_subject(subject);
        }
        match widget.begin_fetch(Instant::now()) {
            Some(subject) => subject,
            None => {
                log::debug!("Ignoring generate request: subject is blank or a fetch is pending");
                return;
            }
        }
    };
    log::info!("Fetching flashcard about {subject}");
    // The fetch runs in its own task, which also applies the outcome, so that
    // a dropped connection cannot leave the gate stuck in flight.
    let client = state.client.clone();
    let widget = state.widget.clone();
    let task = spawn(async move {
        let outcome = client.fetch_flashcard(&subject).await;
        if let Err(e) = &outcome {
            log::error!("Error fetching flashcard: {e}");
        }
        apply_outcome(&widget, outcome);
    });
    if let Err(e) = task.await {
        let error = FetchError::Aborted(e.to_string());
        log::error!("Error fetching flashcard: {error}");
        apply_outcome(&state.widget, Err(error));
    }
}

/// Finish the pending fetch. A poisoned lock is taken over rather than
/// propagated, so the gate always leaves the in-flight state.
fn apply_outcome(widget: &Mutex<Widget>, outcome: Result<Flashcard, FetchError>) {
    widget
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .finish_fetch(outcome, Instant::now());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use flashgen_core::cooldown::Cooldown;

    use super::*;

    fn in_flight_widget() -> Widget {
        let mut widget = Widget::new(Cooldown::new(Duration::ZERO));
        widget.set_subject("Rust");
        widget.begin_fetch(Instant::now()).unwrap();
        widget
    }

    #[test]
    fn test_apply_outcome() {
        let widget = Mutex::new(in_flight_widget());
        let card = Flashcard {
            question: "Q?".to_string(),
            answer: "A.".to_string(),
        };
        apply_outcome(&widget, Ok(card.clone()));
        let widget = widget.lock().unwrap();
        assert!(!widget.is_in_flight());
        assert_eq!(widget.card(), Some(&card));
    }

    #[test]
    fn test_apply_outcome_on_poisoned_lock() {
        let widget = Arc::new(Mutex::new(in_flight_widget()));
        let poisoner = widget.clone();
        let result = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("panic while holding the widget lock");
        })
        .join();
        assert!(result.is_err());
        assert!(widget.is_poisoned());

        apply_outcome(&widget, Err(FetchError::Aborted("task panicked".to_string())));
        let widget = widget.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(!widget.is_in_flight());
        assert!(widget.card().is_none());
    }
}
