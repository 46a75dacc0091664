use anyhow::Result;
use clap::{Parser, Subcommand};
use topic_muse::{
    api::ToolKind,
    config,
    terminal::{self, SliderPresets},
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "muse")]
#[command(about = "Ask the generation API for puns and short stories")]
struct CliArgs {
    #[command(subcommand)]
    tool: ToolCommand,
}

#[derive(Debug, Subcommand)]
enum ToolCommand {
    /// Generate a pun about a topic.
    Joke {
        /// Generate once for this topic instead of starting a session.
        #[arg(long)]
        topic: Option<String>,
    },
    /// Generate a short story about a topic.
    Story {
        /// Generate once for this topic instead of starting a session.
        #[arg(long)]
        topic: Option<String>,
        /// Initial temperature slider position.
        #[arg(long)]
        temperature: Option<f64>,
        /// Initial token budget slider position.
        #[arg(long)]
        max_tokens: Option<u32>,
    },
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Traces go to stderr so stdout only carries the display region
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Using generation API at {}", config.api.base_url);

    let (tool, topic, presets) = match args.tool {
        ToolCommand::Joke { topic } => (ToolKind::Joke, topic, SliderPresets::default()),
        ToolCommand::Story {
            topic,
            temperature,
            max_tokens,
        } => (
            ToolKind::Story,
            topic,
            SliderPresets {
                temperature,
                max_tokens,
            },
        ),
    };

    let generator = terminal::wire(&config, tool, &presets)?;
    let mut stdout = tokio::io::stdout();

    match topic {
        Some(topic) => {
            let outcome = terminal::run_once(&generator, &topic, &mut stdout).await?;
            if outcome.is_error() {
                std::process::exit(1);
            }
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            terminal::run_session(&generator, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
