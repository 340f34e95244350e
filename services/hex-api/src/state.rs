//! Application state and the image registry.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use hex_common::{HexError, HexResult};

/// One registered source image: file on disk plus its recorded dimensions.
///
/// Dimensions are recorded at upload time by the collaborator that owns
/// persistence; the engine trusts them rather than re-probing the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Registry of uploaded world-map images, loaded from `manifest.json` in the
/// images directory at startup.
#[derive(Debug)]
pub struct ImageStore {
    root: PathBuf,
    entries: HashMap<String, ImageEntry>,
}

impl ImageStore {
    /// Load the manifest from `<root>/manifest.json`.
    pub fn load(root: impl Into<PathBuf>) -> HexResult<Self> {
        let root = root.into();
        let manifest_path = root.join("manifest.json");
        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            HexError::ManifestError(format!("cannot read {}: {}", manifest_path.display(), e))
        })?;
        let entries: HashMap<String, ImageEntry> = serde_json::from_str(&raw)?;

        info!(images = entries.len(), root = %root.display(), "Image manifest loaded");
        Ok(Self { root, entries })
    }

    /// Look up a registered image by id.
    pub fn entry(&self, image_id: &str) -> HexResult<&ImageEntry> {
        self.entries
            .get(image_id)
            .ok_or_else(|| HexError::ImageNotFound(image_id.to_string()))
    }

    /// Read the raw bytes of a registered image along with its recorded
    /// dimensions.
    pub fn read_image(&self, image_id: &str) -> HexResult<(Vec<u8>, u32, u32)> {
        let entry = self.entry(image_id)?;
        let path = self.root.join(&entry.filename);
        let bytes = fs::read(&path).map_err(|e| {
            HexError::SourceImageUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Ok((bytes, entry.width, entry.height))
    }
}

/// Shared application state.
pub struct AppState {
    pub images: ImageStore,
}

impl AppState {
    pub fn new(images_dir: &str) -> HexResult<Self> {
        Ok(Self {
            images: ImageStore::load(images_dir)?,
        })
    }
}
