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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use flashgen_core::cooldown::Cooldown;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// Name of the environment variable holding the API key at build time.
pub const API_KEY_ENV: &str = "FLASHGEN_API_KEY";

/// The API key baked into the binary.
pub const BUILD_API_KEY: Option<&str> = option_env!("FLASHGEN_API_KEY");

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Runtime settings for talking to the completion API.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub model: String,
    pub cooldown: Cooldown,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            cooldown: Cooldown::DEFAULT,
        }
    }
}

/// The on-disk TOML representation. Every key is optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    endpoint: Option<String>,
    model: Option<String>,
    cooldown_ms: Option<u64>,
}

impl Settings {
    pub fn parse(text: &str) -> Fallible<Self> {
        let file: SettingsFile = toml::from_str(text)
            .map_err(|e| ErrorReport::new(format!("invalid settings file: {e}")))?;
        let defaults = Settings::default();
        Ok(Settings {
            endpoint: file.endpoint.unwrap_or(defaults.endpoint),
            model: file.model.unwrap_or(defaults.model),
            cooldown: file
                .cooldown_ms
                .map(|ms| Cooldown::new(Duration::from_millis(ms)))
                .unwrap_or(defaults.cooldown),
        })
    }

    /// Load settings from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            None => Ok(Settings::default()),
            Some(path) => {
                if !path.exists() {
                    return fail(format!(
                        "settings file {} does not exist.",
                        path.display()
                    ));
                }
                let text = read_to_string(path)?;
                Settings::parse(&text)
            }
        }
    }
}

/// Pick the API key from what was captured at build time.
pub fn resolve_api_key(build_key: Option<&str>) -> Fallible<String> {
    match build_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => fail(format!(
            "no API key: set {API_KEY_ENV} when building flashgen."
        )),
    }
}
