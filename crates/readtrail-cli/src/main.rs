//! ReadTrail CLI: fetch and validate book-cover images.
//!
//! Configuration comes from `READTRAIL_*` environment variables (or `.env`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use readtrail_core::models::{ImageRequest, IngestReport};
use readtrail_core::ErrorMetadata;
use readtrail_cli::{init_tracing, inspect_file, store_cover};
use readtrail_ingest::{is_valid_image_url, ImageIngestor, SizePolicy};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "readtrail", about = "ReadTrail cover image tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a cover image, validate it and save it
    Fetch {
        /// URL of the image
        url: String,
        /// Base filename (sanitized; extension is derived)
        #[arg(long, default_value = "cover")]
        filename: String,
        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Check whether a value is an acceptable image URL
    CheckUrl {
        /// Value to check
        value: String,
    },
    /// Validate a local file as if it had been served with a content type
    Inspect {
        /// Path to the file
        file: PathBuf,
        /// Content type to validate against
        #[arg(long)]
        content_type: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn fetch(
    ingestor: &ImageIngestor,
    url: String,
    filename: String,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let request = ImageRequest::new(url, filename);
    let result = ingestor.ingest(&request).await;
    let report = IngestReport::from(&result);

    if let Err(e) = &result {
        if !e.use_fallback() {
            print_json(&serde_json::json!({ "report": report }))?;
            return Err(anyhow::anyhow!("{}", e.client_message()));
        }
    }

    let stored = store_cover(&request.url, &result, out_dir).await?;
    print_json(&serde_json::json!({ "report": report, "stored": stored }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let ingestor =
        ImageIngestor::from_env().context("Failed to load READTRAIL_* configuration")?;

    match cli.command {
        Commands::Fetch {
            url,
            filename,
            out_dir,
        } => {
            fetch(&ingestor, url, filename, &out_dir).await?;
        }
        Commands::CheckUrl { value } => {
            print_json(&serde_json::json!({
                "value": value,
                "valid": is_valid_image_url(&value),
            }))?;
        }
        Commands::Inspect { file, content_type } => {
            let policy = SizePolicy::from(ingestor.config());
            let verdict = inspect_file(&file, &content_type, &policy).await?;
            print_json(&verdict)?;
        }
    }

    Ok(())
}
