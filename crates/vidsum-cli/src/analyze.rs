use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use vidsum_core::VideoSession;
use vidsum_gemini::{GeminiAnalyzer, GeminiClient};

use crate::render;

/// Analyze a video file, print the summary, then take follow-up
/// questions on stdin. With `json` set, print the parsed sections as
/// JSON instead and skip the chat loop.
pub async fn run_analyze(file: PathBuf, model_override: Option<String>, json: bool) -> Result<()> {
    let mut config = vidsum_config::load_config().unwrap_or_default();
    if let Some(model) = model_override {
        config.model = model;
    }

    let api_key = vidsum_config::resolve_api_key()?;
    let client = GeminiClient::new(&config, api_key);
    let analyzer = Arc::new(GeminiAnalyzer::new(client));
    let mut session = VideoSession::new(analyzer, config.max_upload_bytes);

    session
        .load_video_file(&file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("Analyzing {} with {}...", file.display(), config.model);
    let summary = session
        .start_analysis()
        .await
        .context("Video analysis failed")?;

    let sections = vidsum_format::parse_sections(&summary);
    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }
    print!("{}", render::render_sections(&sections));

    println!("\nAsk follow-up questions about the video.");
    println!("Type 'reset' to discard the session, 'exit' or Ctrl+D to quit.\n");

    // Interactive loop
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = stdin.lock().read_line(&mut line)?;
        if bytes == 0 {
            // EOF (Ctrl+D)
            println!();
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }
        if input == "reset" {
            session.reset();
            println!("Session discarded.");
            break;
        }

        match session.send_followup(input).await {
            Ok(reply) => println!("{reply}\n"),
            Err(e) => println!("Error: {e}\n"),
        }
    }

    Ok(())
}
