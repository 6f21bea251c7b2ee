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

use serde::Deserialize;
use serde::Serialize;

const QUESTION_LABEL: &str = "question:";
const ANSWER_LABEL: &str = "answer:";

pub const NO_QUESTION: &str = "No question found.";
pub const NO_ANSWER: &str = "No answer found.";

/// A question/answer pair extracted from completion text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Extract a flashcard from free text.
///
/// The first line starting with `Question:` (ignoring case) is the question,
/// and the first line starting with `Answer:` is the answer. The label and
/// the whitespace after it are stripped. Only the first matching line of
/// each kind is used, so multi-line answers are truncated to their first
/// line.
///
/// This never fails: a missing (or empty) field is replaced with a fixed
/// fallback string.
pub fn parse_flashcard(text: &str) -> Flashcard {
    let question = find_labelled(text, QUESTION_LABEL).unwrap_or(NO_QUESTION);
    let answer = find_labelled(text, ANSWER_LABEL).unwrap_or(NO_ANSWER);
    Flashcard {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn find_labelled<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let line = text.lines().find(|line| starts_with_label(line, label))?;
    let rest = line[label.len()..].trim_start();
    if rest.is_empty() { None } else { Some(rest) }
}

fn starts_with_label(line: &str, label: &str) -> bool {
    line.get(..label.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(label))
}
