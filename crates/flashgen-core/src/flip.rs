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

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

use serde::Serialize;

/// How long a flip takes to play.
pub const FLIP_DURATION: Duration = Duration::from_millis(600);

/// Which face of the card is logically up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    pub fn toggle(self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    /// Rotation of the card container, in degrees around the Y axis.
    pub fn angle(self) -> f64 {
        match self {
            Side::Front => 0.0,
            Side::Back => 180.0,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Front => write!(f, "front"),
            Side::Back => write!(f, "back"),
        }
    }
}

/// A rotation to play on the card container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipTween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl FlipTween {
    pub fn between(from: Side, to: Side) -> Self {
        Self {
            from: from.angle(),
            to: to.angle(),
            duration: FLIP_DURATION,
        }
    }

    /// The CSS `transition` value that plays this tween.
    pub fn css_transition(&self) -> String {
        format!("transform {}s", self.duration.as_secs_f64())
    }
}
