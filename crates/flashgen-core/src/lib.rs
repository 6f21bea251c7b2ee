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

//! flashgen-core: Core library for the flashgen flashcard widget.
//!
//! This library has no I/O. It provides:
//! - Subject validation and prompt construction
//! - Parsing a question/answer pair out of completion text
//! - Wire types for the chat completions API
//! - The fetch gate (in-flight flag with a cooldown tail)
//! - The card flip state machine
//! - The widget state that ties all of the above together

pub mod completion;
pub mod cooldown;
pub mod error;
pub mod flip;
pub mod parser;
pub mod prompt;
pub mod subject;
pub mod widget;

// Re-exports for convenience
pub use completion::{ChatRequest, FetchError, extract_content};
pub use cooldown::{Cooldown, FetchGate};
pub use error::{ErrorReport, Fallible, fail};
pub use flip::{FlipTween, Side};
pub use parser::{Flashcard, parse_flashcard};
pub use prompt::build_prompt;
pub use subject::Subject;
pub use widget::Widget;
