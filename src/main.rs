use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use litmus::config::Config;
use litmus::pipeline::analyze::Analyzer;

/// Litmus: misinformation risk assessment for short text claims.
///
/// Scores a piece of text for misinformation risk, explains the score, and
/// optionally rates the credibility of a cited source URL.
#[derive(Parser)]
#[command(name = "litmus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a text for misinformation risk
    Analyze {
        /// The text to analyze (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// URL of the source the text came from
        #[arg(long)]
        source_url: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also show the extracted features
        #[arg(long)]
        features: bool,
    },

    /// Download the ONNX named-entity model (~430 MB)
    DownloadModel,

    /// Show configuration and which model files are present
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("litmus=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            file,
            source_url,
            json,
            features,
        } => {
            let text = read_input(text, file)?;
            if text.trim().is_empty() {
                anyhow::bail!("Nothing to analyze: the input text is empty.");
            }

            let config = Config::load()?;
            config.require_models()?;

            info!("Loading models...");
            let analyzer = Analyzer::from_config(&config)?;

            let (result, bundle) = analyzer.analyze_detailed(&text, source_url.as_deref())?;

            if json {
                let output = if features {
                    serde_json::json!({ "result": result, "features": bundle })
                } else {
                    serde_json::to_value(&result)?
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                litmus::output::terminal::display_result(&result, features.then_some(&bundle));
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading ONNX models...");
            println!("  Destination: {}", config.ner_model_dir.display());

            litmus::model::download::download_ner_model(&config.ner_model_dir).await?;

            println!("\n{}", "Models downloaded successfully.".bold());
            println!("You can now run `litmus analyze \"some claim\"`.");
        }

        Commands::Status => {
            let config = Config::load()?;
            litmus::status::show(&config);
        }
    }

    Ok(())
}

/// Resolve the text to analyze: positional argument, then --file, then stdin.
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}
