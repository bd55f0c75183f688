// Dump a tagmanager tags file in readable form, one raw line followed by
// its decoded rendering.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use funcsummary_tags::tags::decode_line;
use funcsummary_tags::TagsError;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "print_tags", version, about = "Print the tags of a tagmanager tags file")]
struct Cli {
    /// Tags file to read (default stdin)
    #[arg(value_name = "file")]
    file: Option<PathBuf>,

    /// Emit one JSON object per tag instead of readable lines
    #[arg(long)]
    json: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(p) => std::fs::read(p).with_context(|| format!("Failed to read {}", p.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = read_input(cli.file.as_ref())?;
    let mut out = BufWriter::new(io::stdout().lock());

    let mut count = 0usize;
    for (idx, line) in input.split(|&b| b == b'\n').enumerate() {
        let Some(tag) = decode_line(line, idx + 1)? else {
            continue;
        };
        count += 1;
        if cli.json {
            serde_json::to_writer(&mut out, &tag)?;
            out.write_all(b"\n")?;
        } else {
            out.write_all(line)?;
            out.write_all(b"\n")?;
            writeln!(out, "{}", tag.display_line().green())?;
        }
    }
    out.flush()?;
    tracing::debug!(count, "printed tags");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            let code = e.downcast_ref::<TagsError>().map_or(1, TagsError::exit_code);
            ExitCode::from(code)
        }
    }
}
