//! Canvas image encoding and decoding.
//!
//! A project's [`Canvas`] is an encoded image (PNG when produced here). The
//! placement generator needs raw pixels, so [`decode_pixels`] turns the blob
//! into a [`PixelGrid`] of exactly canvas size, resizing uploads that were
//! painted at a different resolution.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use log::debug;

use painted_galaxy_logic::constants::canvas;
use painted_galaxy_logic::density::PixelGrid;
use painted_galaxy_logic::error::ModelError;
use painted_galaxy_logic::project::Canvas;

/// Errors raised while converting between canvas blobs and pixels.
#[derive(Debug)]
pub enum CanvasError {
    Decode(image::ImageError),
    Encode(image::ImageError),
    /// Decoded pixels did not match their reported dimensions.
    Pixels(ModelError),
}

impl From<image::ImageError> for CanvasError {
    fn from(err: image::ImageError) -> Self {
        CanvasError::Decode(err)
    }
}

impl From<ModelError> for CanvasError {
    fn from(err: ModelError) -> Self {
        CanvasError::Pixels(err)
    }
}

impl std::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanvasError::Decode(e) => write!(f, "Canvas decode error: {}", e),
            CanvasError::Encode(e) => write!(f, "Canvas encode error: {}", e),
            CanvasError::Pixels(e) => write!(f, "Canvas pixel error: {}", e),
        }
    }
}

impl std::error::Error for CanvasError {}

/// Encode pixels as a PNG canvas.
pub fn encode_pixels(pixels: &PixelGrid) -> Result<Canvas, CanvasError> {
    let image = RgbaImage::from_raw(pixels.width(), pixels.height(), pixels.as_rgba().to_vec())
        .ok_or_else(|| {
            CanvasError::Pixels(ModelError::PixelBufferSize {
                expected: pixels.width() as usize * pixels.height() as usize * 4,
                found: pixels.as_rgba().len(),
            })
        })?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(CanvasError::Encode)?;
    Ok(Canvas::from_bytes(out.into_inner()))
}

/// A canvas-sized, opaque black (zero density) PNG.
pub fn blank_canvas() -> Result<Canvas, CanvasError> {
    encode_pixels(&PixelGrid::filled(
        canvas::WIDTH,
        canvas::HEIGHT,
        canvas::BACKGROUND_RGBA,
    ))
}

/// Decode a canvas into a canvas-sized RGBA grid.
pub fn decode_pixels(blob: &Canvas) -> Result<PixelGrid, CanvasError> {
    let mut image = image::load_from_memory(blob.as_bytes())?;
    let (width, height) = image.dimensions();
    if width != canvas::WIDTH || height != canvas::HEIGHT {
        debug!(
            "resizing canvas from {}x{} to {}x{}",
            width,
            height,
            canvas::WIDTH,
            canvas::HEIGHT
        );
        image = image.resize_exact(canvas::WIDTH, canvas::HEIGHT, FilterType::Triangle);
    }
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelGrid::new(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_canvas_has_no_density() {
        let blank = blank_canvas().expect("encode blank canvas");
        let pixels = decode_pixels(&blank).expect("decode blank canvas");
        assert_eq!(pixels.width(), canvas::WIDTH);
        assert_eq!(pixels.height(), canvas::HEIGHT);
        assert_eq!(pixels.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(pixels.weight(500, 500), 0);
    }

    #[test]
    fn test_round_trip_keeps_painted_pixels() {
        let mut painted = PixelGrid::filled(canvas::WIDTH, canvas::HEIGHT, [0, 0, 0, 255]);
        painted.set_pixel(10, 20, [255, 255, 255, 255]);
        let pixels = decode_pixels(&encode_pixels(&painted).unwrap()).unwrap();
        assert_eq!(pixels, painted);
    }

    #[test]
    fn test_smaller_images_are_resized() {
        let small = PixelGrid::filled(10, 10, [255, 255, 255, 255]);
        let pixels = decode_pixels(&encode_pixels(&small).unwrap()).unwrap();
        assert_eq!((pixels.width(), pixels.height()), (canvas::WIDTH, canvas::HEIGHT));
        assert_eq!(pixels.weight(500, 500), 100);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = decode_pixels(&Canvas::from_bytes(b"not an image".to_vec())).unwrap_err();
        assert!(matches!(err, CanvasError::Decode(_)));
        assert!(err.to_string().starts_with("Canvas decode error"));
    }

    #[test]
    fn test_empty_canvas_fails_to_decode() {
        assert!(decode_pixels(&Canvas::default()).is_err());
    }
}
