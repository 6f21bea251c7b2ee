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

use flashgen_core::parser::Flashcard;
use flashgen_core::subject::Subject;

use crate::client::CompletionClient;
use crate::config::Settings;
use crate::error::ErrorReport;
use crate::error::Fallible;

/// Fetch a single flashcard and print it to stdout.
pub async fn generate_card(settings: &Settings, api_key: String, subject: String) -> Fallible<()> {
    let card = fetch_card(settings, api_key, subject).await?;
    println!("{}", format_card(&card));
    Ok(())
}

async fn fetch_card(settings: &Settings, api_key: String, subject: String) -> Fallible<Flashcard> {
    let subject = Subject::new(subject).ok_or_else(|| ErrorReport::new("subject is empty."))?;
    let client = CompletionClient::new(settings, api_key);
    log::info!("Fetching flashcard about {subject}");
    let card = client.fetch_flashcard(&subject).await?;
    Ok(card)
}

fn format_card(card: &Flashcard) -> String {
    format!("Question: {}\nAnswer: {}", card.question, card.answer)
}
