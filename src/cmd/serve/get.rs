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

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use flashgen_core::flip::FlipTween;
use flashgen_core::widget::Widget;
use maud::Markup;
use maud::html;
use serde::Serialize;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    (StatusCode::OK, Html(render_page(&state)))
}

pub fn render_page(state: &ServerState) -> String {
    let widget = state.widget.lock().unwrap();
    let body = render_widget(&widget, Instant::now());
    page_template(body).into_string()
}

/// What the page script polls while a fetch is in flight.
#[derive(Serialize)]
pub struct GateStatus {
    fetching: bool,
    in_flight: bool,
    cooldown_ms: u64,
}

pub async fn status_handler(State(state): State<ServerState>) -> Json<GateStatus> {
    let status = {
        let widget = state.widget.lock().unwrap();
        gate_status(&widget, Instant::now())
    };
    Json(status)
}

fn gate_status(widget: &Widget, now: Instant) -> GateStatus {
    GateStatus {
        fetching: widget.is_fetching(now),
        in_flight: widget.is_in_flight(),
        cooldown_ms: widget.cooldown_remaining(now).as_millis() as u64,
    }
}

fn render_widget(widget: &Widget, now: Instant) -> Markup {
    let fetching = widget.is_fetching(now);
    let disabled = !widget.can_generate(now);
    let label = if fetching {
        "Fetching..."
    } else {
        "Generate Flashcard"
    };
    let in_flight = widget.is_in_flight();
    let cooldown_ms = widget.cooldown_remaining(now).as_millis().to_string();
    let side = widget.side();
    // The flip that brought the card to its current side.
    let tween = FlipTween::between(side.toggle(), side);
    let inner_style = format!(
        "transform: rotateY({}deg); transition: {};",
        side.angle(),
        tween.css_transition()
    );
    html! {
        div.flashcard {
            form #subject-form action="/" method="post" {
                input type="hidden" name="action" value="Generate";
                input #subject type="text" name="subject" placeholder="Enter a subject..." autocomplete="off" value=(widget.subject());
                button #generate type="submit" disabled[disabled] data-fetching=(fetching.to_string()) data-in-flight=(in_flight.to_string()) data-cooldown-ms=(cooldown_ms) {
                    (label)
                }
            }
            form #card-form action="/" method="post" {
                button #card .card type="submit" name="action" value="Flip" data-side=(side.to_string()) title="Click to flip" {
                    span #card-inner .card-inner style=(inner_style) {
                        span.card-face.card-front { (widget.question()) }
                        span.card-face.card-back { (widget.answer()) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flashgen_core::completion::FetchError;
    use flashgen_core::cooldown::Cooldown;
    use flashgen_core::parser::Flashcard;
    use flashgen_core::widget::PLACEHOLDER;

    use super::*;

    #[test]
    fn test_initial_render() {
        let widget = Widget::default();
        let html = render_widget(&widget, Instant::now()).into_string();
        assert!(html.contains("Generate Flashcard"));
        assert!(html.contains("disabled"));
        assert!(html.contains("data-side=\"front\""));
        assert!(html.contains("rotateY(0deg)"));
        assert!(html.contains("transition: transform 0.6s"));
        let placeholder = html! { (PLACEHOLDER) }.into_string();
        assert_eq!(html.matches(&placeholder).count(), 2);
    }

    #[test]
    fn test_render_fetching() {
        let now = Instant::now();
        let mut widget = Widget::new(Cooldown::new(Duration::from_secs(5)));
        widget.set_subject("Rust");
        widget.begin_fetch(now).unwrap();
        widget.finish_fetch(
            Ok(Flashcard {
                question: "Q?".to_string(),
                answer: "A.".to_string(),
            }),
            now,
        );
        let html = render_widget(&widget, now).into_string();
        assert!(html.contains("Fetching..."));
        assert!(html.contains("data-cooldown-ms=\"5000\""));
        assert!(html.contains("value=\"Rust\""));
        assert!(html.contains("Q?"));
        assert!(html.contains("A."));
    }

    #[test]
    fn test_render_in_flight() {
        let now = Instant::now();
        let mut widget = Widget::default();
        widget.set_subject("Rust");
        widget.begin_fetch(now).unwrap();
        let html = render_widget(&widget, now).into_string();
        assert!(html.contains("Fetching..."));
        assert!(html.contains("disabled"));
        assert!(html.contains("data-fetching=\"true\""));
        assert!(html.contains("data-in-flight=\"true\""));
        assert!(html.contains("data-cooldown-ms=\"0\""));

        // Once the outcome is in, the page carries the cooldown instead.
        widget.finish_fetch(
            Ok(Flashcard {
                question: "Q?".to_string(),
                answer: "A.".to_string(),
            }),
            now,
        );
        let html = render_widget(&widget, now).into_string();
        assert!(html.contains("data-in-flight=\"false\""));
        assert!(html.contains("data-cooldown-ms=\"1000\""));
    }

    #[test]
    fn test_gate_status() {
        let now = Instant::now();
        let mut widget = Widget::default();
        widget.set_subject("Rust");
        let status = gate_status(&widget, now);
        assert!(!status.fetching);
        assert!(!status.in_flight);
        assert_eq!(status.cooldown_ms, 0);

        widget.begin_fetch(now).unwrap();
        let status = gate_status(&widget, now);
        assert!(status.fetching);
        assert!(status.in_flight);
        assert_eq!(status.cooldown_ms, 0);

        widget.finish_fetch(Err(FetchError::Transport("refused".to_string())), now);
        let status = gate_status(&widget, now + Duration::from_millis(400));
        assert!(status.fetching);
        assert!(!status.in_flight);
        assert_eq!(status.cooldown_ms, 600);
    }

    #[test]
    fn test_render_enabled() {
        let mut widget = Widget::default();
        widget.set_subject("Rust");
        let html = render_widget(&widget, Instant::now()).into_string();
        assert!(!html.contains("disabled"));
        assert!(html.contains("data-fetching=\"false\""));
    }

    #[test]
    fn test_render_back() {
        let mut widget = Widget::default();
        widget.flip();
        let html = render_widget(&widget, Instant::now()).into_string();
        assert!(html.contains("data-side=\"back\""));
        assert!(html.contains("rotateY(180deg)"));
    }
}
