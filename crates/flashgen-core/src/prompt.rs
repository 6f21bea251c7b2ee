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

use crate::subject::Subject;

/// Build the user message asking for a flashcard about `subject` in the
/// two-line format that [`crate::parser::parse_flashcard`] understands.
pub fn build_prompt(subject: &Subject) -> String {
    format!(
        "Please generate a flashcard with a question about the subject \"{subject}\" and provide the answer. Format it as:\nQuestion: [Your question here]\nAnswer: [The answer here]"
    )
}
