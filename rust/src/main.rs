use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dotenv::dotenv;
use funcsummary_tags::{open_source, Settings, SystemClock, TagExtractor, TagsError};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "funcsummary-tags")]
#[command(version, about = "Generate a tagmanager php.tags file from a PHP function summary")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

fn run() -> Result<()> {
    let settings = Settings::from_env();
    let source = open_source(&settings.source);
    let extractor = TagExtractor::new(SystemClock);
    let summary = extractor
        .run(&*source, &settings.output)
        .with_context(|| format!("Failed to create tags from {}", settings.source))?;

    println!(
        "Created: {} with {} tags",
        summary.output.display().to_string().bright_cyan(),
        summary.record_count.to_string().bright_green()
    );
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            let code = e.downcast_ref::<TagsError>().map_or(1, TagsError::exit_code);
            ExitCode::from(code)
        }
    }
}
