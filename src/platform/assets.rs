//! Texture and font handles
//!
//! Decoding is the backend's business. The level only holds opaque ids, handed
//! to it at construction. A failed load leaves the slot empty and whatever
//! used it is not drawn.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque texture handle issued by an [`AssetLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque font handle issued by an [`AssetLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
}

pub trait AssetLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, AssetError>;
    fn load_font(&mut self, path: &Path) -> Result<FontId, AssetError>;
}

/// Asset file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub rabbit_texture: PathBuf,
    pub sheep_texture: PathBuf,
    pub font: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            rabbit_texture: PathBuf::from("gfx/rabbit_sheet.png"),
            sheep_texture: PathBuf::from("gfx/sheep_sheet.png"),
            font: PathBuf::from("font/arial.ttf"),
        }
    }
}

/// Pre-loaded handles injected into the level
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelAssets {
    pub rabbit: Option<TextureId>,
    pub sheep: Option<TextureId>,
    pub font: Option<FontId>,
}

impl LevelAssets {
    /// Load every asset the level uses. Failures are logged and leave the
    /// handle empty.
    pub fn load(loader: &mut dyn AssetLoader, paths: &AssetPaths) -> Self {
        let rabbit = loader
            .load_texture(&paths.rabbit_texture)
            .inspect_err(|e| log::error!("No rabbit texture: {}", e))
            .ok();
        let sheep = loader
            .load_texture(&paths.sheep_texture)
            .inspect_err(|e| log::error!("No sheep texture: {}", e))
            .ok();
        let font = loader
            .load_font(&paths.font)
            .inspect_err(|e| log::error!("Error loading font: {}", e))
            .ok();

        Self {
            rabbit,
            sheep,
            font,
        }
    }
}

/// Loader that only checks the file exists and is non-empty, and hands out
/// sequential ids.
///
/// Used by the headless runner where nothing is actually decoded.
#[derive(Debug, Clone, Default)]
pub struct PathAssetLoader {
    root: PathBuf,
    next_id: u32,
}

impl PathAssetLoader {
    /// Resolve asset paths relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: 0,
        }
    }

    fn resolve(&mut self, path: &Path) -> Result<u32, AssetError> {
        let full = self.root.join(path);
        let len = match std::fs::metadata(&full) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(AssetError::NotFound(full)),
        };
        if len == 0 {
            return Err(AssetError::Decode {
                path: full,
                reason: "file is empty".to_owned(),
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }
}

impl AssetLoader for PathAssetLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, AssetError> {
        self.resolve(path).map(TextureId)
    }

    fn load_font(&mut self, path: &Path) -> Result<FontId, AssetError> {
        self.resolve(path).map(FontId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_leave_empty_handles() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = PathAssetLoader::new(dir.path());
        let assets = LevelAssets::load(&mut loader, &AssetPaths::default());
        assert_eq!(assets, LevelAssets::default());
    }

    #[test]
    fn test_present_assets_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths {
            rabbit_texture: PathBuf::from("rabbit.png"),
            sheep_texture: PathBuf::from("sheep.png"),
            font: PathBuf::from("missing.ttf"),
        };
        std::fs::write(dir.path().join("rabbit.png"), b"png").unwrap();
        std::fs::write(dir.path().join("sheep.png"), b"png").unwrap();

        let mut loader = PathAssetLoader::new(dir.path());
        let assets = LevelAssets::load(&mut loader, &paths);
        assert_eq!(assets.rabbit, Some(TextureId(0)));
        assert_eq!(assets.sheep, Some(TextureId(1)));
        assert_eq!(assets.font, None);
    }

    #[test]
    fn test_empty_asset_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blank.png"), b"").unwrap();
        std::fs::create_dir(dir.path().join("gfx")).unwrap();

        let mut loader = PathAssetLoader::new(dir.path());
        let err = loader.load_texture(Path::new("blank.png")).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        assert!(err.to_string().contains("file is empty"));

        // A directory is not an asset
        let err = loader.load_font(Path::new("gfx")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));

        // Failed loads do not use up ids
        std::fs::write(dir.path().join("rabbit.png"), b"png").unwrap();
        assert_eq!(loader.load_texture(Path::new("rabbit.png")).unwrap(), TextureId(0));
    }
}
