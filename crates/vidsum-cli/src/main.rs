mod analyze;
mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidsum", about = "Video summarization and follow-up chat CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a video file, then chat about it
    Analyze {
        /// Path to the video file
        file: std::path::PathBuf,

        /// Model ID to use (e.g. "gemini-2.5-pro")
        #[arg(short, long)]
        model: Option<String>,

        /// Print the parsed sections as JSON and exit (no follow-up chat)
        #[arg(long)]
        json: bool,
    },
    /// Check configuration and credential
    Health,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, model, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(analyze::run_analyze(file, model, json))?;
        }
        Commands::Health => {
            let config = vidsum_config::load_config().unwrap_or_default();
            println!("vidsum configuration");
            println!("  model: {}", config.model);
            println!("  endpoint: {}", config.base_url);
            println!("  request timeout: {}s", config.request_timeout_secs);
            println!(
                "  advisory upload ceiling: {} MiB",
                config.max_upload_bytes / (1024 * 1024)
            );
            match vidsum_config::resolve_api_key() {
                Ok(_) => println!("  credential: present"),
                Err(e) => println!("  credential: {e}"),
            }
        }
    }

    Ok(())
}
