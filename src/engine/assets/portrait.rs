// Decoded portrait images

use super::AssetError;

/// Side length of the generated placeholder portrait
const PLACEHOLDER_SIZE: u32 = 16;

/// A decoded portrait, kept as RGBA pixels ready for upload
#[derive(Debug, Clone)]
pub struct Portrait {
    name: String,
    pixels: image::RgbaImage,
    placeholder: bool,
}

impl Portrait {
    /// Decode a png/jpeg portrait
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;

        Ok(Self {
            name: name.to_string(),
            pixels: img.to_rgba8(),
            placeholder: false,
        })
    }

    /// Magenta square used when a portrait can't be loaded
    pub fn placeholder() -> Self {
        Self {
            name: "placeholder".to_string(),
            pixels: image::RgbaImage::from_pixel(
                PLACEHOLDER_SIZE,
                PLACEHOLDER_SIZE,
                image::Rgba([255, 0, 255, 255]),
            ),
            placeholder: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width and height in pixels
    pub fn bounds(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Raw RGBA bytes, row-major
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}
