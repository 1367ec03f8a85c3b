//! logo-bg-remover - strip the dark background from a raster logo
//!
//! Flood-fills dark pixels inward from the image border, clears isolated
//! near-black specks, and saves the subject on a transparent PNG canvas.
//!
//! # Example
//!
//! ```no_run
//! use logo_bg_remover::{BackgroundRemover, RemovalOptions};
//! use std::path::Path;
//!
//! let options = RemovalOptions::builder().dark_threshold(0.3).build();
//! let result = BackgroundRemover::remove(
//!     Path::new("logo.png"),
//!     Path::new("logo-transparent.png"),
//!     &options,
//! )?;
//! println!("removed {} pixels", result.total_removed());
//! # Ok::<(), logo_bg_remover::BackgroundError>(())
//! ```

pub mod background;
pub mod cli;

use std::path::Path;

pub use background::{
    BackgroundError, BackgroundMask, BackgroundRemover, RemovalOptions, RemovalOptionsBuilder,
    RemovalResult, DEFAULT_DARK_THRESHOLD, DEFAULT_ISOLATED_THRESHOLD,
};
pub use cli::{Cli, DEFAULT_LOGO_PATH};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
}

/// Remove the background of `input_path` and write a PNG to `output_path`
///
/// Thresholds outside [0, 1] are clamped.
pub fn remove_background(
    input_path: &Path,
    output_path: &Path,
    dark_threshold: f64,
    isolated_threshold: f64,
) -> background::Result<RemovalResult> {
    let options = RemovalOptions::builder()
        .dark_threshold(dark_threshold)
        .isolated_threshold(isolated_threshold)
        .build();
    BackgroundRemover::remove(input_path, output_path, &options)
}
