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

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use tokio::spawn;

use crate::cmd::generate::generate_card;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::config::BUILD_API_KEY;
use crate::config::Settings;
use crate::config::resolve_api_key;
use crate::error::Fallible;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the flashcard page.
    Serve {
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Path to a TOML settings file (endpoint, model, cooldown_ms).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Generate one flashcard and print it.
    Generate {
        /// What the flashcard should be about.
        subject: String,
        /// Path to a TOML settings file (endpoint, model, cooldown_ms).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            host,
            port,
            config,
            open_browser,
        } => {
            let settings = Settings::load(config.as_deref())?;
            let api_key = resolve_api_key(BUILD_API_KEY)?;
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            if let Err(e) = open::that(format!("http://{browser_host}:{port}/")) {
                                log::error!("Failed to open browser: {e}");
                            }
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                host,
                port,
                settings,
                api_key,
            };
            start_server(config).await
        }
        Command::Generate { subject, config } => {
            let settings = Settings::load(config.as_deref())?;
            let api_key = resolve_api_key(BUILD_API_KEY)?;
            generate_card(&settings, api_key, subject).await
        }
    }
}
