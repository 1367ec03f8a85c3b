//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::background::{DEFAULT_DARK_THRESHOLD, DEFAULT_ISOLATED_THRESHOLD};

/// Logo processed when no input path is given
pub const DEFAULT_LOGO_PATH: &str = "static/astrogroot-logo.png";

/// Remove the dark background from a logo, keeping the subject on a transparent canvas
#[derive(Parser, Debug)]
#[command(name = "logo-bg-remover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input image (any format the decoder recognises)
    #[arg(default_value = DEFAULT_LOGO_PATH)]
    pub input: PathBuf,

    /// Output PNG path [default: overwrite INPUT]
    pub output: Option<PathBuf>,

    /// Luminance (0-1) at or below which border-connected pixels are removed
    #[arg(long, default_value_t = DEFAULT_DARK_THRESHOLD, value_parser = parse_threshold)]
    pub dark_threshold: f64,

    /// Luminance (0-1) at or below which any pixel is removed
    #[arg(long, default_value_t = DEFAULT_ISOLATED_THRESHOLD, value_parser = parse_threshold)]
    pub isolated_threshold: f64,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the confirmation line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Where the result is written
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.input.clone())
    }
}

/// Parse a luminance threshold in [0, 1]
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("threshold must be between 0 and 1, got {}", value))
    }
}
