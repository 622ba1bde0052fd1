use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{JudgmentPrompt, SubmissionClient, SubmissionController, SubmissionOutcome};
use shared::domain::Digit;

mod config;
mod data_url;

use config::{load_settings, validate_server_url};
use data_url::encode_data_url;

#[derive(Parser, Debug)]
#[command(about = "Submit a drawing to the digit classification service")]
struct Args {
    /// Image file holding the drawing (png, jpeg, or gif).
    image: PathBuf,
    /// Overrides the configured service URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./sketch.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Judgment prompt on stderr/stdin. An empty line accepts the guess;
/// EOF behaves like a dismissed prompt.
struct StdinPrompt;

impl JudgmentPrompt for StdinPrompt {
    fn solicit(&self, guess: Digit) -> Option<String> {
        eprint!("Nice drawing, is that {guess}? [{guess}] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim();
                if answer.is_empty() {
                    Some(guess.to_string())
                } else {
                    Some(answer.to_string())
                }
            }
        }
    }

    fn acknowledge(&self) {
        eprintln!("Understood! Thank you for correcting me!");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let server_url = args.server_url.unwrap_or(settings.server_url);
    validate_server_url(&server_url)?;

    let bytes = fs::read(&args.image)
        .with_context(|| format!("failed to read drawing '{}'", args.image.display()))?;
    let img = encode_data_url(&bytes);

    let controller =
        SubmissionController::new(SubmissionClient::new(server_url), Arc::new(StdinPrompt));
    match controller.submit(&img).await? {
        SubmissionOutcome::GuessConfirmed { drawing } => {
            println!(
                "Guess {} confirmed for drawing {}.",
                drawing.guess, drawing.id.0
            );
        }
        SubmissionOutcome::CorrectionSent { drawing, digit } => {
            println!(
                "Corrected drawing {} from {} to {digit}.",
                drawing.id.0, drawing.guess
            );
        }
        SubmissionOutcome::JudgmentSkipped { drawing } => {
            println!(
                "Kept server guess {} for drawing {}.",
                drawing.guess, drawing.id.0
            );
        }
    }

    Ok(())
}
