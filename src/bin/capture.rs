use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use search_capture::clients::{ChatStreamClient, SearchModel};
use search_capture::config::RunConfig;
use search_capture::pipeline::{extract_report, ExtractionSummary, Pipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Capture a streamed search-chat answer and extract its cited sources", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES (also read from .env):
    HY_USER                    Gateway user id (required for `run`)
    HY_TOKEN                   Gateway access token (required for `run`)
    HY_AGENT_ID                Agent id [default: naQivTmsDa]
    HY_CHAT_ID                 Conversation id [default: new conversation]
    HY_SOURCE                  Request source tag [default: web]
    HY_BASE_URL                Gateway base URL [default: http://localhost:8002/v1]
    CAPTURE_OUTPUT_DIR         Directory for capture files [default: outputs]
    CAPTURE_FILENAME_FORMAT    Capture filename template
    CAPTURE_TIMESTAMP_FORMAT   strftime pattern for {timestamp}
    CAPTURE_MAX_QUERY_LENGTH   Query preview length in logs
    RUST_LOG                   Log filter [default: search_capture=info]

EXAMPLES:
    capture run \"Which majors had the best employment rate this year?\"
    capture run --model hunyuan-t1 --no-extract \"...\"
    capture extract outputs/deepseek-r1-search_20250101_120000_5d41402a.txt")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stream an answer to disk, then extract narrative and citations
    Run {
        /// Question sent to the model
        query: String,

        /// Model id
        #[arg(short, long, default_value = "deepseek-r1-search")]
        model: String,

        /// Override the capture directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the gateway base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Report destination
        #[arg(short, long, default_value = "final_extracted_content.txt")]
        report: PathBuf,

        /// Only persist the stream; skip extraction
        #[arg(long)]
        no_extract: bool,
    },
    /// Extract narrative and citations from an existing capture file
    Extract {
        /// Capture file to read
        #[arg(default_value = "output.txt")]
        input: PathBuf,

        /// Report destination
        #[arg(short, long, default_value = "extracted_content.txt")]
        report: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("search_capture=info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn print_summary(summary: &ExtractionSummary) {
    println!("\n=== Extraction complete ===");
    println!("Narrative length: {} characters", summary.narrative_chars);
    println!("Citations: {}", summary.citation_count);
    println!("Report saved to: {}", summary.report_path.display());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    match args.command {
        Command::Run { query, model, output_dir, base_url, report, no_extract } => {
            let mut config = RunConfig::from_env().context("loading configuration")?;
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir);
            }
            if let Some(url) = base_url {
                config = config.with_base_url(url);
            }

            let model = SearchModel::from_id(&model);
            let pipeline = Pipeline::new(ChatStreamClient::new(&config), config.naming.clone());

            let pending = pipeline.open(&model, &query).await.context("sending the query")?;
            println!("Capture file: {}\n", pending.path.display());

            let mut stdout = io::stdout();
            let capture = pending.write(&mut stdout).await.context("capturing the response stream")?;
            println!("\n\n=== Streamed content ===\n{}", capture.text);

            if no_extract {
                println!("Extraction skipped; run `capture extract {}` later.", capture.path.display());
                return Ok(());
            }

            let summary = extract_report(&capture.path, &report).context("extracting the capture")?;
            print_summary(&summary);
        }
        Command::Extract { input, report } => {
            let summary = extract_report(&input, &report)
                .with_context(|| format!("extracting {}", input.display()))?;
            print_summary(&summary);
        }
    }

    Ok(())
}
