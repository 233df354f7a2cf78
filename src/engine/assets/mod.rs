// Asset loading
//
// Resolves asset files under a base directory and decodes the images the
// game needs (character portraits).

mod loader;
mod portrait;

pub use loader::{AssetLoader, AssetType};
pub use portrait::Portrait;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("portraits/hero.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: portraits/hero.png");
    }
}
