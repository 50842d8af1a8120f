use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use sdg_classify::{
    process_with_config, BuiltinEndpoint, Config, Progress, SdgClient, StopHandle,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to $SDG_CLASSIFY_CONFIG or ./config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input CSV file, overrides data_input_folder/data_input_file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the timestamped output CSV is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Hosted classifier to use
    #[arg(short, long, value_enum, conflicts_with = "classifier_url")]
    model: Option<BuiltinEndpoint>,

    /// Custom classifier endpoint
    #[arg(long)]
    classifier_url: Option<String>,

    /// Certainty threshold between 0 and 1
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Seconds to wait before each classifier call
    #[arg(short, long)]
    rate_limit: Option<f64>,

    /// Name of the column holding the text to classify
    #[arg(long)]
    text_column: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let path = Config::default_path();
            if path.exists() {
                Config::load(&path)?
            } else {
                info!("No config file at {}, using defaults", path.display());
                Config::default()
            }
        }
    };

    if let Some(input) = &args.input {
        config.data_input_folder = PathBuf::new();
        config.data_input_file = input.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.data_output_folder = output_dir.clone();
    }
    if let Some(model) = args.model {
        config.classifier_url = model.url().to_string();
    }
    if let Some(url) = &args.classifier_url {
        config.classifier_url = url.clone();
    }
    if let Some(threshold) = args.threshold {
        config.sdg_threshold = threshold;
    }
    if let Some(rate_limit) = args.rate_limit {
        config.rate_limit = rate_limit;
    }
    if let Some(text_column) = &args.text_column {
        config.text_column = text_column.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn report_progress(progress: Progress) {
    info!(
        "{:.1}% done. Records remaining: {}, Estimated time: {:.2} seconds",
        progress.percent,
        progress.remaining_rows(),
        progress.estimated_remaining().as_secs_f64()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting SDG Classification ===");
    let config = load_config(&args)?;

    let client = SdgClient::builder()
        .with_custom_endpoint(&config.classifier_url)?
        .build()?;

    let stop = StopHandle::new();
    let worker_stop = stop.clone();
    let mut worker = tokio::spawn(async move {
        let mut callback = report_progress;
        process_with_config(&config, &client, &worker_stop, Some(&mut callback)).await
    });

    let joined = tokio::select! {
        result = &mut worker => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping after the current row and saving progress...");
            stop.request_stop();
            worker.await
        }
    };
    let summary = joined.context("Classification task panicked")??;

    println!("\nResults:");
    println!("  Output file: {}", summary.output_path.display());
    println!("  Rows: {}", summary.total_rows);
    println!("  Classified: {}", summary.counts.classified);
    println!("  Without text: {}", summary.counts.skipped);
    println!("  Failed: {}", summary.counts.failed);
    if summary.counts.stopped {
        println!("  Stopped early, remaining rows were left empty");
    }

    Ok(())
}
