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

/// How long the fetch gate stays closed after a fetch completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown(Duration);

impl Cooldown {
    pub const DEFAULT: Cooldown = Cooldown(Duration::from_secs(1));

    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Guards against overlapping fetches.
///
/// The gate is busy while a fetch is in flight and for the cooldown period
/// after it finishes, whether it succeeded or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchGate {
    Idle,
    InFlight,
    CoolingDown { until: Instant },
}

impl FetchGate {
    pub fn is_busy(&self, now: Instant) -> bool {
        match self {
            FetchGate::Idle => false,
            FetchGate::InFlight => true,
            FetchGate::CoolingDown { until } => now < *until,
        }
    }

    /// Whether a fetch has started and not yet finished. Unlike the cooldown,
    /// this has no known end.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FetchGate::InFlight)
    }

    /// Time left until the gate opens again. Zero when idle, and also zero
    /// while in flight since the cooldown has not started yet.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self {
            FetchGate::CoolingDown { until } => until.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }

    /// Close the gate for a new fetch. Returns `false`, leaving the gate
    /// untouched, if it is still busy.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_busy(now) {
            return false;
        }
        *self = FetchGate::InFlight;
        true
    }

    /// Mark the current fetch as done and start the cooldown.
    pub fn finish(&mut self, now: Instant, cooldown: Cooldown) {
        *self = FetchGate::CoolingDown {
            until: now + cooldown.duration(),
        };
    }
}
