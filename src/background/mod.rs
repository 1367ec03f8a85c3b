//! Background removal for raster logos
//!
//! Clears the dark backdrop around a logo so the subject ends up on a
//! transparent canvas.
//!
//! # Algorithm
//!
//! 1. Collect border pixels whose luminance is at or below the dark threshold
//! 2. Grow that set through 4-connected dark neighbours with an explicit work-list
//! 3. Zero the alpha of every pixel in the set
//! 4. Zero the alpha of any remaining pixel at or below the stricter isolated threshold
//!
//! RGB channels are never modified; only alpha changes.

mod remover;
mod types;

// Re-export public API
pub use remover::{
    BackgroundMask, BackgroundRemover, RemovalOptions, RemovalOptionsBuilder, RemovalResult,
    DEFAULT_DARK_THRESHOLD, DEFAULT_ISOLATED_THRESHOLD,
};

pub use types::{BackgroundError, Result};
