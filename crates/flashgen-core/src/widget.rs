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

use std::time::Duration;
use std::time::Instant;

use crate::completion::FetchError;
use crate::cooldown::Cooldown;
use crate::cooldown::FetchGate;
use crate::flip::FlipTween;
use crate::flip::Side;
use crate::parser::Flashcard;
use crate::subject::Subject;

/// Shown on both faces until the first card is fetched.
pub const PLACEHOLDER: &str = "Click \"Generate Flashcard\"";

/// The state of the flashcard widget.
///
/// Fetching and flipping are independent: the card can be flipped while a
/// fetch is in flight, and a fetch does not change which side is up.
pub struct Widget {
    /// Raw text of the subject input.
    subject: String,
    /// The last successfully fetched card.
    card: Option<Flashcard>,
    gate: FetchGate,
    cooldown: Cooldown,
    side: Side,
}

impl Widget {
    pub fn new(cooldown: Cooldown) -> Self {
        Self {
            subject: String::new(),
            card: None,
            gate: FetchGate::Idle,
            cooldown,
            side: Side::Front,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn card(&self) -> Option<&Flashcard> {
        self.card.as_ref()
    }

    pub fn question(&self) -> &str {
        self.card
            .as_ref()
            .map(|c| c.question.as_str())
            .unwrap_or(PLACEHOLDER)
    }

    pub fn answer(&self) -> &str {
        self.card
            .as_ref()
            .map(|c| c.answer.as_str())
            .unwrap_or(PLACEHOLDER)
    }

    /// Whether a fetch is in flight or cooling down.
    pub fn is_fetching(&self, now: Instant) -> bool {
        self.gate.is_busy(now)
    }

    /// Whether a fetch has started and its outcome is not in yet.
    pub fn is_in_flight(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn cooldown_remaining(&self, now: Instant) -> Duration {
        self.gate.remaining(now)
    }

    /// Whether the trigger should be enabled.
    pub fn can_generate(&self, now: Instant) -> bool {
        !self.subject.trim().is_empty() && !self.gate.is_busy(now)
    }

    /// Start a fetch for the current subject.
    ///
    /// Returns `None` without touching any state when the subject is blank
    /// or the gate is busy.
    pub fn begin_fetch(&mut self, now: Instant) -> Option<Subject> {
        if !self.can_generate(now) {
            return None;
        }
        let subject = Subject::new(self.subject.clone())?;
        if self.gate.try_begin(now) {
            Some(subject)
        } else {
            None
        }
    }

    /// Apply the outcome of a fetch. Errors leave the current card in place.
    pub fn finish_fetch(&mut self, outcome: Result<Flashcard, FetchError>, now: Instant) {
        if let Ok(card) = outcome {
            self.card = Some(card);
        }
        self.gate.finish(now, self.cooldown);
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Flip the card. The side changes immediately; the returned tween is
    /// what the display should play.
    pub fn flip(&mut self) -> FlipTween {
        let from = self.side;
        self.side = from.toggle();
        FlipTween::between(from, self.side)
    }
}

impl Default for Widget {
    fn default() -> Self {
        Self::new(Cooldown::default())
    }
}
