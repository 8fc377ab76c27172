// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cache store - size settings and the most recent stamp/signature images,
// kept in one per-user directory across sessions.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use stempel_core::error::{Result, StempelError};
use stempel_core::{OverlayKind, SizeSettings};
use tracing::{debug, info, instrument, warn};

use crate::data_dir;

const SETTINGS_FILE: &str = "settings.json";

/// Directory-backed store for settings and cached source images.
///
/// Construct one at startup and hand it to whoever needs it. Only one image
/// per kind is kept; caching a new one replaces the old file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        debug!("cache directory ready");
        Ok(Self { dir })
    }

    /// Open the store in the per-user cache directory.
    pub fn open_default() -> Result<Self> {
        let dir = data_dir::default_cache_dir().ok_or(StempelError::CacheDirUnavailable)?;
        Self::new(dir)
    }

    /// Root directory of this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Path of the cached source image for `kind`.
    pub fn image_path(&self, kind: OverlayKind) -> PathBuf {
        self.dir.join(kind.cache_file_name())
    }

    // -- Settings -------------------------------------------------------------

    /// Load the size settings, writing the defaults first if none exist.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<SizeSettings> {
        let path = self.settings_path();
        if !path.exists() {
            let defaults = SizeSettings::default();
            self.save(&defaults)?;
            info!(path = %path.display(), "settings created with defaults");
            return Ok(defaults);
        }

        let data = std::fs::read_to_string(&path)?;
        let settings: SizeSettings = serde_json::from_str(&data)?;
        if !settings.is_valid() {
            warn!(
                path = %path.display(),
                stamp_mm = settings.stamp_diameter_mm,
                signature_mm = settings.signature_width_mm,
                "settings hold a zero size, using defaults"
            );
            return Ok(SizeSettings::default());
        }
        debug!(
            stamp_mm = settings.stamp_diameter_mm,
            signature_mm = settings.signature_width_mm,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Replace the persisted settings.
    #[instrument(skip(self))]
    pub fn save(&self, settings: &SizeSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        write_replacing(&self.settings_path(), json.as_bytes())
    }

    // -- Images ---------------------------------------------------------------

    /// Load the cached source image for `kind`, if one was stored.
    #[instrument(skip(self))]
    pub fn load_cached_image(&self, kind: OverlayKind) -> Result<Option<DynamicImage>> {
        let path = self.image_path(kind);
        if !path.exists() {
            return Ok(None);
        }
        let failed = |err: &dyn std::fmt::Display| {
            StempelError::InvalidImage(format!("cached {kind} at {}: {err}", path.display()))
        };
        let img = ImageReader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| failed(&err))?
            .decode()
            .map_err(|err| failed(&err))?;
        info!(width = img.width(), height = img.height(), "cached image loaded");
        Ok(Some(img))
    }

    /// Store `image` as the cached source for `kind`, replacing any previous one.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn cache_image(&self, kind: OverlayKind, image: &DynamicImage) -> Result<()> {
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(image.to_rgba8())
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| StempelError::InvalidImage(format!("PNG encoding failed: {err}")))?;
        write_replacing(&self.image_path(kind), &buffer)?;
        debug!(bytes = buffer.len(), "image cached");
        Ok(())
    }

    /// Forget the cached source for `kind`. Returns whether a file was removed.
    pub fn clear_cached_image(&self, kind: OverlayKind) -> Result<bool> {
        match std::fs::remove_file(self.image_path(kind)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `data` to a sibling temp file, then rename it over `path`.
fn write_replacing(path: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, data)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        warn!(path = %path.display(), error = %e, "rename failed, removing temp file");
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
