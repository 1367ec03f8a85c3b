//! logo-bg-remover - remove the dark background from a logo
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use logo_bg_remover::{exit_codes, BackgroundRemover, Cli, RemovalOptions};
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    std::process::exit(match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.output_path();
    let options = RemovalOptions::builder()
        .dark_threshold(cli.dark_threshold)
        .isolated_threshold(cli.isolated_threshold)
        .build();

    let result = BackgroundRemover::remove(&cli.input, &output, &options)
        .with_context(|| format!("Failed to remove background from {}", cli.input.display()))?;

    if cli.verbose > 0 {
        println!(
            "  {}x{}: {} background + {} isolated pixels cleared ({:.1}%)",
            result.image_size.0,
            result.image_size.1,
            result.background_pixels,
            result.isolated_pixels,
            result.coverage_percent()
        );
    }

    if !cli.quiet {
        println!("Saved: {}", output.display());
    }

    Ok(())
}
