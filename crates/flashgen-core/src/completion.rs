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

//! Wire types for the chat completions API.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A request with a single user message.
    pub fn user(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Why a flashcard fetch failed.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchError {
    /// The request could not be sent, or the body could not be read.
    Transport(String),
    /// The API answered with a non-success status.
    Status { status: u16, body: String },
    /// The body was not a chat completion with at least one choice.
    Shape(String),
    /// The task performing the fetch did not run to completion.
    Aborted(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Status { status, body } => {
                write!(f, "API returned status {status}: {body}")
            }
            FetchError::Shape(msg) => write!(f, "unexpected response shape: {msg}"),
            FetchError::Aborted(msg) => write!(f, "fetch aborted: {msg}"),
        }
    }
}

impl Error for FetchError {}

/// Pull the text of the first choice out of a chat completion body.
pub fn extract_content(body: &str) -> Result<String, FetchError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Shape(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| FetchError::Shape("response has no choices".to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_json() {
        let request = ChatRequest::user("gpt-3.5-turbo", "hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "hello"}],
            })
        );
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Question: a\nAnswer: b"}}]}"#;
        assert_eq!(extract_content(body), Ok("Question: a\nAnswer: b".to_string()));
    }

    #[test]
    fn test_extract_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"one"}},{"message":{"content":"two"}}]}"#;
        assert_eq!(extract_content(body), Ok("one".to_string()));
    }

    #[test]
    fn test_empty_choices() {
        let result = extract_content(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(FetchError::Shape(_))));
    }

    #[test]
    fn test_error_body() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert!(matches!(extract_content(body), Err(FetchError::Shape(_))));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            extract_content("<html>bad gateway</html>"),
            Err(FetchError::Shape(_))
        ));
    }
}
