mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{Level, info};

use cli::Cli;
use thumbcarve::extraction::Extractor;
use thumbcarve::writer::LocalFileWriter;

const USAGE_EXIT_CODE: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(USAGE_EXIT_CODE);
        }
        Err(e) => e.exit(),
    };

    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.extract_options();
    let output_dir = options.output_dir.clone();

    let extractor = Extractor::new(options).context("Invalid extraction options")?;

    let mut writer = LocalFileWriter::new(&output_dir)
        .with_context(|| format!("Failed to prepare output directory: {:?}", output_dir))?;

    // Zero images, skipped records and failed writes still exit 0.
    let report = extractor
        .run_path(&cli.file, &mut writer)
        .with_context(|| format!("Failed to open input file: {:?}", cli.file))?;

    info!(
        "{} files written to {} ({} bytes)",
        writer.files_written(),
        output_dir.display(),
        writer.bytes_written()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.summary());
    }

    Ok(())
}
