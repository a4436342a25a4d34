//! Scores the emotions of texts given as arguments, or one per stdin line.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parley::hume::{HumeClient, HumeConfigBuilder};
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";
const TOP_EMOTIONS: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(api_key) = env::var("HUME_API_KEY") else {
        eprintln!("HUME_API_KEY environment variable is not set");
        return ExitCode::FAILURE;
    };
    let mut config = HumeConfigBuilder::with_api_key(api_key);
    if let Ok(base_url) = env::var("HUME_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let client = HumeClient::new(config.build());

    let mut texts: Vec<String> = env::args().skip(1).collect();
    if texts.is_empty() {
        texts = read_lines().await;
    }
    if texts.is_empty() {
        eprintln!("Nothing to analyze, pass texts as arguments or via stdin");
        return ExitCode::FAILURE;
    }

    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}")
    {
        progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    progress_bar
        .set_message(format!("🔍 Analyzing {} texts...", texts.len()));
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let results = client.analyze(&texts).await;
    progress_bar.finish_and_clear();

    let results = match results {
        Ok(results) => results,
        Err(err) => {
            eprintln!("{} {err}", "Analysis failed:".bright_red());
            return ExitCode::FAILURE;
        }
    };

    for (text, result) in texts.iter().zip(&results) {
        println!("{}{}", BAR_CHAR.bright_cyan(), text.bright_white().bold());
        if result.is_empty() {
            println!("{}no emotions detected", BAR_CHAR.bright_cyan());
        }
        for emotion in result.top(TOP_EMOTIONS) {
            println!(
                "{}{}: {:.2}",
                BAR_CHAR.bright_cyan(),
                emotion.name,
                emotion.score
            );
        }
        println!();
    }
    ExitCode::SUCCESS
}

async fn read_lines() -> Vec<String> {
    let mut lines = io::BufReader::new(io::stdin()).lines();
    let mut texts = Vec::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if !line.is_empty() {
                    texts.push(line.to_owned());
                }
            }
            Ok(None) => break,
            Err(err) => {
                error!("error reading input: {}", err);
                break;
            }
        }
    }
    texts
}
