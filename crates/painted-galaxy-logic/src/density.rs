//! Painted density → weighted sampling grid.
//!
//! [`PixelGrid`] is the immutable RGBA snapshot handed over by whatever
//! decoded the canvas. [`WeightGrid`] is the mutable arena the placement
//! algorithm consumes: a flat array of per-pixel weights plus one running
//! total per row and a grand total, all updated incrementally as pixels are
//! zeroed out.

use crate::constants::density::MAX_PIXEL_WEIGHT;
use crate::error::ModelError;

/// Decoded canvas pixels, row-major RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ModelError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ModelError::PixelBufferSize {
                expected,
                found: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    /// A grid where every pixel has the same colour.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let rgba = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self { width, height, rgba }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[i..i + 4].copy_from_slice(&pixel);
    }

    /// Sampling weight of one pixel, 0 to [`MAX_PIXEL_WEIGHT`].
    ///
    /// The painted image should be grayscale, but RGB is averaged anyway.
    pub fn weight(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.pixel(x, y);
        let brightness = (r as f64 + g as f64 + b as f64) / 3.0 / 255.0;
        let alpha = a as f64 / 255.0;
        (brightness * alpha * MAX_PIXEL_WEIGHT as f64).round() as u32
    }
}

/// Weighted sampling arena built from a [`PixelGrid`].
#[derive(Debug, Clone)]
pub struct WeightGrid {
    width: u32,
    height: u32,
    weights: Vec<u32>,
    row_totals: Vec<u64>,
    total: u64,
}

impl WeightGrid {
    pub fn from_pixels(pixels: &PixelGrid) -> Self {
        let (width, height) = (pixels.width(), pixels.height());
        let mut weights = Vec::with_capacity(width as usize * height as usize);
        let mut row_totals = Vec::with_capacity(height as usize);
        let mut total = 0u64;
        for y in 0..height {
            let mut row_total = 0u64;
            for x in 0..width {
                let w = pixels.weight(x, y);
                row_total += w as u64;
                weights.push(w);
            }
            row_totals.push(row_total);
            total += row_total;
        }
        Self {
            width,
            height,
            weights,
            row_totals,
            total,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sum of all remaining weights.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn row_total(&self, y: u32) -> u64 {
        self.row_totals[y as usize]
    }

    pub fn weight(&self, x: u32, y: u32) -> u32 {
        self.weights[self.index(x, y)]
    }

    /// The pixel whose cumulative weight range contains `target`
    /// (`0 <= target < total`). Scans row totals, then cells of one row.
    pub fn locate(&self, target: u64) -> Option<(u32, u32)> {
        if target >= self.total {
            return None;
        }
        let mut current = 0u64;
        for y in 0..self.height {
            let row_total = self.row_totals[y as usize];
            if current + row_total <= target {
                current += row_total;
                continue;
            }
            for x in 0..self.width {
                let w = self.weights[self.index(x, y)] as u64;
                if current + w > target {
                    return Some((x, y));
                }
                current += w;
            }
            // Row total disagreed with its cells.
            return None;
        }
        None
    }

    /// Zero one pixel, keeping row and grand totals in step.
    /// Out-of-bounds coordinates are ignored.
    pub fn zero_out(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        let w = self.weights[idx] as u64;
        if w == 0 {
            return;
        }
        self.weights[idx] = 0;
        self.row_totals[y as usize] -= w;
        self.total -= w;
    }

    /// Zero every pixel within Euclidean distance `radius` of `(cx, cy)`.
    pub fn zero_out_disc(&mut self, cx: u32, cy: u32, radius: f64) {
        let reach = radius.floor() as i64;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if (dx as f64).hypot(dy as f64) <= radius {
                    self.zero_out(cx as i64 + dx, cy as i64 + dy);
                }
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
