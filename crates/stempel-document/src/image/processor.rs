// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor - decoding, aspect-preserving and exact resizing, and
// format-preserving output. Operates on in-memory images using the `image`
// crate.

use image::{DynamicImage, ImageFormat, ImageReader};
use stempel_core::Size;
use stempel_core::error::StempelError;
use tracing::{debug, info, instrument};

/// Resampling filter for every resize. Matches the smooth scaling the
/// on-screen preview uses.
pub(crate) const FILTER: image::imageops::FilterType = image::imageops::FilterType::Lanczos3;

/// Wrapper around a single decoded image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so the
/// source bitmap a caller holds is never modified.
///
/// ```ignore
/// let thumb = ImageProcessor::open("stamp.png")?
///     .fit_within(120, 120)
///     .into_dynamic();
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// Fails with `InvalidImage` when the file cannot be decoded or has no
    /// pixels.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, StempelError> {
        let path = path.as_ref();
        let failed = |err: &dyn std::fmt::Display| {
            StempelError::InvalidImage(format!("failed to open {}: {}", path.display(), err))
        };
        // Format from the contents; the extension is only a fallback.
        let img = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| failed(&err))?
            .decode()
            .map_err(|err| failed(&err))?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Self::checked(img)
    }

    /// Create a processor from raw encoded bytes (PNG, JPEG, BMP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, StempelError> {
        let img = image::load_from_memory(data)
            .map_err(|err| StempelError::InvalidImage(format!("failed to decode image: {}", err)))?;
        debug!(width = img.width(), height = img.height(), "Image decoded from bytes");
        Self::checked(img)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    fn checked(image: DynamicImage) -> Result<Self, StempelError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(StempelError::InvalidImage("image has no pixels".into()));
        }
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize the image to fit within `max_width` x `max_height`, preserving
    /// aspect ratio.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        let resized = self.image.resize(max_width, max_height, FILTER);
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized = self.image.resize_exact(width, height, FILTER);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Write the image to a file. See [`save_image`].
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), StempelError> {
        save_image(&self.image, path)
    }
}

/// Write `image` to a file. The format is inferred from the file extension;
/// formats without an alpha channel get the image flattened to RGB first.
#[instrument(skip(image), fields(path = %path.as_ref().display()))]
pub fn save_image(
    image: &DynamicImage,
    path: impl AsRef<std::path::Path>,
) -> Result<(), StempelError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|err| {
        StempelError::InvalidImage(format!("unknown output format for {}: {}", path.display(), err))
    })?;

    let result = if supports_alpha(format) {
        image.save_with_format(path, format)
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)
    };
    result.map_err(|err| {
        StempelError::InvalidImage(format!(
            "failed to save image to {}: {}",
            path.display(),
            err
        ))
    })?;
    info!(?format, "Image written");
    Ok(())
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn fit_within_preserves_aspect() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(400, 200));
        let out = ImageProcessor::from_dynamic(img).fit_within(100, 100);
        assert_eq!(out.size(), Size::new(100, 50));
    }

    #[test]
    fn resize_exact_ignores_aspect() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(400, 200));
        let out = ImageProcessor::from_dynamic(img).resize_exact(30, 90);
        assert_eq!((out.width(), out.height()), (30, 90));
    }

    #[test]
    fn garbage_bytes_are_invalid_image() {
        let result = ImageProcessor::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(StempelError::InvalidImage(_))));
    }

    #[test]
    fn missing_file_is_invalid_image() {
        let result = ImageProcessor::open("/nonexistent/stempel/doc.png");
        assert!(matches!(result, Err(StempelError::InvalidImage(_))));
    }

    #[test]
    fn save_jpeg_flattens_alpha() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255])));

        ImageProcessor::from_dynamic(img).save(&path).expect("save jpeg");
        let reloaded = ImageProcessor::open(&path).unwrap();
        assert_eq!(reloaded.size(), Size::new(8, 8));
    }

    #[test]
    fn save_png_round_trips_pixels() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])));

        ImageProcessor::from_dynamic(img.clone()).save(&path).unwrap();
        let reloaded = ImageProcessor::open(&path).unwrap().into_dynamic();
        assert_eq!(reloaded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn mislabelled_file_is_decoded_from_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let png = tmp.path().join("scan.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 7, Rgb([4, 5, 6])))
            .save(&png)
            .unwrap();

        let as_jpg = tmp.path().join("scan.jpg");
        let bare = tmp.path().join("scan");
        std::fs::copy(&png, &as_jpg).unwrap();
        std::fs::copy(&png, &bare).unwrap();

        for path in [as_jpg, bare] {
            let img = ImageProcessor::open(&path).unwrap();
            assert_eq!(img.size(), Size::new(5, 7), "{}", path.display());
        }
    }

    #[test]
    fn save_image_borrows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("borrowed.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([7, 7, 7])));

        save_image(&img, &path).unwrap();
        assert_eq!(ImageProcessor::open(&path).unwrap().size(), Size::new(3, 3));
        assert_eq!(img.width(), 3);
    }

    #[test]
    fn save_without_extension_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let result = ImageProcessor::from_dynamic(img).save(tmp.path().join("noext"));
        assert!(matches!(result, Err(StempelError::InvalidImage(_))));
    }
}
