// Asset file lookup and loading

use super::{AssetError, Portrait};
use std::path::{Path, PathBuf};

/// Kinds of asset the game loads from disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Character portraits shown in menus and combat
    Portrait,
    /// JSON definition files
    Data,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Portrait => "portraits",
            AssetType::Data => "data",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Portrait => &["png", "jpg", "jpeg"],
            AssetType::Data => &["json"],
        }
    }
}

/// Finds and reads asset files under a base directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Load and decode a portrait image
    pub fn load_portrait(&self, name: &str) -> Result<Portrait, AssetError> {
        let bytes = self.load_bytes(AssetType::Portrait, name)?;
        Portrait::from_bytes(name, &bytes)
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    /// List all assets of a given type, sorted by name
    pub fn list_assets(&self, asset_type: AssetType) -> Result<Vec<String>, AssetError> {
        let dir = self.base_path.join(asset_type.default_directory());

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let extensions = asset_type.extensions();
        let mut assets = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let matches = path
                .extension()
                .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false);

            if matches {
                if let Some(name) = path.file_name() {
                    assets.push(name.to_string_lossy().to_string());
                }
            }
        }

        assets.sort();
        Ok(assets)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let portraits = dir.join("portraits");
        std::fs::create_dir_all(&portraits).unwrap();
        image::RgbaImage::new(width, height)
            .save(portraits.join(name))
            .unwrap();
    }

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Portrait.default_directory(), "portraits");
        assert_eq!(AssetType::Data.default_directory(), "data");
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Portrait, "hero.png");

        assert_eq!(path, PathBuf::from("/game/assets/portraits/hero.png"));
    }

    #[test]
    fn test_missing_portrait_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());

        let err = loader.load_portrait("ghost.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_load_portrait() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "hero.png", 4, 3);
        let loader = AssetLoader::new(dir.path());

        let portrait = loader.load_portrait("hero.png").unwrap();
        assert_eq!(portrait.bounds(), (4, 3));
        assert_eq!(portrait.name(), "hero.png");
    }

    #[test]
    fn test_corrupt_portrait_fails_decode() {
        let dir = tempfile::tempdir().unwrap();
        let portraits = dir.path().join("portraits");
        std::fs::create_dir_all(&portraits).unwrap();
        std::fs::write(portraits.join("bad.png"), b"not a png").unwrap();
        let loader = AssetLoader::new(dir.path());

        let err = loader.load_portrait("bad.png").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_list_assets_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png", 1, 1);
        write_png(dir.path(), "a.png", 1, 1);
        std::fs::write(dir.path().join("portraits").join("notes.txt"), "x").unwrap();
        let loader = AssetLoader::new(dir.path());

        assert_eq!(
            loader.list_assets(AssetType::Portrait).unwrap(),
            vec!["a.png".to_string(), "b.png".to_string()]
        );
        assert!(loader.list_assets(AssetType::Data).unwrap().is_empty());
    }
}
