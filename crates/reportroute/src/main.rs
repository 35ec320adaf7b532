use anyhow::Result;
use clap::{Parser, Subcommand};
use reportroute_common::{logger, AppConfig};
use reportroute_engine::{Extractor, ReportTemplate, Summarizer, SummaryOptions};
use reportroute_llm::OpenAiClient;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "reportroute")]
#[command(about = "ReportRoute - AI-powered text structuring and summarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text into a structured report using a template file
    Report {
        /// Report template JSON file ({"fields": {...}})
        #[arg(long)]
        template: PathBuf,

        /// Input text file (reads stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Summarize text and structure the summary into a report
    Summarize {
        /// Summary length (short, medium, long)
        #[arg(long, default_value = "medium")]
        length: String,

        /// Summary focus (general, key_points, action_items)
        #[arg(long, default_value = "general")]
        focus: String,

        /// Summary language (ko, en, ja, ...)
        #[arg(long, default_value = "ko")]
        language: String,

        /// Input text file (reads stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Read input text from a file, or stdin when no file is given
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() also loads .env
    let config = AppConfig::from_env()?;
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;

    tracing::info!("ReportRoute starting - Model: {}", config.openai_model);

    let client = Arc::new(OpenAiClient::new(
        &config.openai_base_url,
        &config.openai_api_key,
        &config.openai_model,
    )?);

    match cli.command {
        Commands::Report { template, input } => {
            let raw = std::fs::read_to_string(&template)?;
            let template: ReportTemplate = serde_json::from_str(&raw)?;
            let text = read_input(input.as_ref())?;

            let extractor = Extractor::new(client);
            let report = extractor.extract(&text, &template).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Summarize {
            length,
            focus,
            language,
            input,
        } => {
            let text = read_input(input.as_ref())?;
            let options = SummaryOptions {
                length,
                focus,
                language,
            };

            let summarizer = Summarizer::new(client);
            let result = summarizer.summarize(&text, &options).await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
