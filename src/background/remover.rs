//! Dark background removal
//!
//! Finds the dark region connected to the image border and makes it
//! transparent, then clears any very dark pixels the fill could not reach.
//!
//! # Algorithm
//!
//! 1. Luminance per pixel using ITU-R BT.601 weights, normalised to [0, 1]
//! 2. Border pixels at or below the dark threshold seed the fill
//! 3. Work-list flood fill over 4-connected neighbours (no diagonals)
//! 4. Alpha zeroed for the filled region, then for isolated near-black pixels

use image::{ImageFormat, ImageReader, Rgba, RgbaImage};
use std::collections::VecDeque;
use std::fs::Permissions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::types::{BackgroundError, Result};

// ============================================================
// Constants
// ============================================================

/// Luminance at or below which a border-connected pixel is background
pub const DEFAULT_DARK_THRESHOLD: f64 = 0.28;

/// Luminance at or below which any pixel is removed regardless of connectivity
pub const DEFAULT_ISOLATED_THRESHOLD: f64 = 0.15;

/// BT.601 luma weights
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// 4-connected neighbourhood
const NEIGHBORS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// ============================================================
// Types
// ============================================================

/// Options for background removal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalOptions {
    /// Threshold for the border-connected flood fill
    pub dark_threshold: f64,

    /// Stricter threshold for pixels not reached by the fill
    pub isolated_threshold: f64,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            isolated_threshold: DEFAULT_ISOLATED_THRESHOLD,
        }
    }
}

impl RemovalOptions {
    /// Create a builder
    pub fn builder() -> RemovalOptionsBuilder {
        RemovalOptionsBuilder::default()
    }
}

/// Builder for RemovalOptions
#[derive(Debug, Default)]
pub struct RemovalOptionsBuilder {
    options: RemovalOptions,
}

impl RemovalOptionsBuilder {
    /// Set the flood fill threshold
    #[must_use]
    pub fn dark_threshold(mut self, threshold: f64) -> Self {
        self.options.dark_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the isolated pixel threshold
    #[must_use]
    pub fn isolated_threshold(mut self, threshold: f64) -> Self {
        self.options.isolated_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> RemovalOptions {
        self.options
    }
}

/// Set of pixel coordinates classified as background
///
/// Stored as a dense grid so membership checks during the fill are O(1)
/// and no coordinate can be inserted twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    members: Vec<bool>,
    len: usize,
}

impl BackgroundMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            members: vec![false; width as usize * height as usize],
            len: 0,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns false if the coordinate was already a member
    fn insert(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        if self.members[idx] {
            return false;
        }
        self.members[idx] = true;
        self.len += 1;
        true
    }

    /// Check whether a coordinate is in the set
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.members[self.index(x, y)]
    }

    /// Number of member pixels
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no pixel is background
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grid dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Iterate over member coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.members
            .iter()
            .enumerate()
            .filter(|&(_, &member)| member)
            .map(move |(idx, _)| ((idx % width) as u32, (idx / width) as u32))
    }
}

/// Background removal result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalResult {
    /// Image dimensions
    pub image_size: (u32, u32),

    /// Pixels cleared by the border flood fill
    pub background_pixels: u32,

    /// Pixels cleared by the isolated dark pixel pass
    pub isolated_pixels: u32,
}

impl RemovalResult {
    /// Total pixels made transparent
    pub fn total_removed(&self) -> u32 {
        self.background_pixels + self.isolated_pixels
    }

    /// Percentage of the image made transparent
    pub fn coverage_percent(&self) -> f64 {
        let total = self.image_size.0 as u64 * self.image_size.1 as u64;
        if total == 0 {
            return 0.0;
        }
        (self.total_removed() as f64 / total as f64) * 100.0
    }

    /// Check if any pixel was removed
    pub fn has_removals(&self) -> bool {
        self.total_removed() > 0
    }
}

// ============================================================
// Background Remover
// ============================================================

/// Background removal processor
pub struct BackgroundRemover;

impl BackgroundRemover {
    /// Remove the background from an image file and save the result as PNG
    ///
    /// The output is written to a temporary file next to `output_path` and
    /// renamed into place, so a failed run never leaves a truncated file.
    /// `output_path` may equal `input_path`.
    pub fn remove(
        input_path: &Path,
        output_path: &Path,
        options: &RemovalOptions,
    ) -> Result<RemovalResult> {
        if !input_path.exists() {
            return Err(BackgroundError::ImageNotFound(input_path.to_path_buf()));
        }

        let mut rgba = Self::load(input_path)?;
        let result = Self::remove_in_place(&mut rgba, options);
        Self::save_png(&rgba, output_path)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            background = result.background_pixels,
            isolated = result.isolated_pixels,
            "removed {:.1}% of pixels",
            result.coverage_percent()
        );

        Ok(result)
    }

    /// Remove the background from an RGBA image in place
    pub fn remove_in_place(image: &mut RgbaImage, options: &RemovalOptions) -> RemovalResult {
        let mask = Self::find_background(image, options.dark_threshold);
        let background_pixels = Self::clear_mask(image, &mask);
        let isolated_pixels = Self::clear_isolated(image, options.isolated_threshold);

        RemovalResult {
            image_size: image.dimensions(),
            background_pixels,
            isolated_pixels,
        }
    }

    /// Find the dark region reachable from the image border
    pub fn find_background(image: &RgbaImage, threshold: f64) -> BackgroundMask {
        let (width, height) = image.dimensions();
        let mut mask = BackgroundMask::new(width, height);
        let mut queue = VecDeque::new();

        for (x, y) in Self::border_seeds(image, threshold) {
            if mask.insert(x, y) {
                queue.push_back((x, y));
            }
        }
        let seeds = mask.len();

        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in &NEIGHBORS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;

                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let nx = nx as u32;
                let ny = ny as u32;

                if !mask.contains(nx, ny) && Self::is_dark(image.get_pixel(nx, ny), threshold) {
                    mask.insert(nx, ny);
                    queue.push_back((nx, ny));
                }
            }
        }

        debug!(seeds, filled = mask.len(), "flood fill complete");
        mask
    }

    /// Border pixels that qualify as fill seeds, each listed once
    pub fn border_seeds(image: &RgbaImage, threshold: f64) -> Vec<(u32, u32)> {
        let (width, height) = image.dimensions();
        Self::border_coords(width, height)
            .into_iter()
            .filter(|&(x, y)| Self::is_dark(image.get_pixel(x, y), threshold))
            .collect()
    }

    /// Make every pixel in the mask transparent, returning how many changed
    pub fn clear_mask(image: &mut RgbaImage, mask: &BackgroundMask) -> u32 {
        let mut cleared = 0u32;
        for (x, y) in mask.iter() {
            let pixel = image.get_pixel_mut(x, y);
            if pixel.0[3] > 0 {
                pixel.0[3] = 0;
                cleared += 1;
            }
        }
        cleared
    }

    /// Make every remaining pixel at or below `threshold` transparent
    pub fn clear_isolated(image: &mut RgbaImage, threshold: f64) -> u32 {
        let mut cleared = 0u32;
        for pixel in image.pixels_mut() {
            if Self::is_dark(pixel, threshold) {
                pixel.0[3] = 0;
                cleared += 1;
            }
        }
        debug!(cleared, threshold, "isolated dark pixels cleared");
        cleared
    }

    /// Perceptual luminance in [0, 1]
    pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
        (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) / 255.0
    }

    /// Visible and at or below the luminance threshold
    pub fn is_dark(pixel: &Rgba<u8>, threshold: f64) -> bool {
        let [r, g, b, a] = pixel.0;
        a > 0 && Self::luminance(r, g, b) <= threshold
    }

    /// Coordinates of the outermost ring, without duplicates
    fn border_coords(width: u32, height: u32) -> Vec<(u32, u32)> {
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let rows = if height > 1 { vec![0, height - 1] } else { vec![0] };
        let cols = if width > 1 { vec![0, width - 1] } else { vec![0] };

        let mut coords = Vec::with_capacity(2 * (width as usize + height as usize));
        for &y in &rows {
            coords.extend((0..width).map(|x| (x, y)));
        }
        for y in 1..height.saturating_sub(1) {
            coords.extend(cols.iter().map(|&x| (x, y)));
        }
        coords
    }

    /// Decode any supported format, sniffing the content rather than trusting the extension
    fn load(path: &Path) -> Result<RgbaImage> {
        let decode_err = |source: image::ImageError| BackgroundError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let img = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;

        debug!(width = img.width(), height = img.height(), "decoded {}", path.display());
        Ok(img.to_rgba8())
    }

    /// Encode as PNG into a sibling temp file, then rename over `output_path`
    ///
    /// A symlinked output is resolved first so the link target receives the
    /// new image and the link itself survives.
    fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| BackgroundError::Write {
            path: output_path.to_path_buf(),
            source,
        };

        let target =
            std::fs::canonicalize(output_path).unwrap_or_else(|_| output_path.to_path_buf());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".logo-bg-")
            .suffix(".png")
            .tempfile_in(dir)
            .map_err(write_err)?;

        // Set explicitly so the result does not depend on the umask
        if let Some(permissions) = Self::output_permissions(&target) {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(write_err)?;
        }

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            image
                .write_to(&mut writer, ImageFormat::Png)
                .map_err(|source| BackgroundError::Encode {
                    path: output_path.to_path_buf(),
                    source,
                })?;
            writer.flush().map_err(write_err)?;
        }

        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Mode for the written file: that of the file being replaced, else 0644
    fn output_permissions(path: &Path) -> Option<Permissions> {
        if let Ok(metadata) = std::fs::metadata(path) {
            return Some(metadata.permissions());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            Some(Permissions::from_mode(0o644))
        }
        #[cfg(not(unix))]
        {
            None
        }
    }
}

// ============================================================
// Tests
// ============================================================
