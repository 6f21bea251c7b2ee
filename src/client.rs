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

use flashgen_core::completion::ChatRequest;
use flashgen_core::completion::FetchError;
use flashgen_core::completion::extract_content;
use flashgen_core::parser::Flashcard;
use flashgen_core::parser::parse_flashcard;
use flashgen_core::prompt::build_prompt;
use flashgen_core::subject::Subject;

use crate::config::Settings;

/// Client for a chat completions endpoint.
///
/// No request timeout is set: a fetch runs until the API answers or the
/// connection fails.
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(settings: &Settings, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
        }
    }

    /// Send a single user message and return the text of the first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String, FetchError> {
        let request = ChatRequest::user(&self.model, prompt);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        log::debug!("Completion response: {body}");
        extract_content(&body)
    }

    pub async fn fetch_flashcard(&self, subject: &Subject) -> Result<Flashcard, FetchError> {
        let text = self.complete(&build_prompt(subject)).await?;
        Ok(parse_flashcard(&text))
    }
}
