// Tile map: blocking layers, tile geometry and the draw target

use glam::Vec2;

/// Errors building a map from text rows
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    #[error("Map has no rows")]
    Empty,

    #[error("Row {row} is {actual} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a sprite-sheet frame with its foot at `position` (pixels)
    Sprite { frame: usize, position: Vec2 },
}

/// Display list that a renderer drains once per frame
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sprite draw
    pub fn draw_sprite(&mut self, frame: usize, position: Vec2) {
        self.commands.push(DrawCommand::Sprite { frame, position });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take all recorded commands, leaving the canvas empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Blocking flags for one layer, row-major
#[derive(Debug, Clone)]
struct TileLayer {
    blocking: Vec<bool>,
}

/// A rectangular grid of tiles with one or more layers
#[derive(Debug, Clone)]
pub struct GameMap {
    width: usize,
    height: usize,
    tile_width: f32,
    tile_height: f32,
    /// Pixel position of the map's top-left corner
    origin: Vec2,
    layers: Vec<TileLayer>,
    /// Layer currently being drawn
    pub render_layer: usize,
    /// Draw target for sprites on this map
    pub canvas: Canvas,
}

impl GameMap {
    /// Create an open map (nothing blocks) with `layer_count` layers
    pub fn new(
        width: usize,
        height: usize,
        tile_width: f32,
        tile_height: f32,
        layer_count: usize,
    ) -> Self {
        let layers = (0..layer_count)
            .map(|_| TileLayer {
                blocking: vec![false; width * height],
            })
            .collect();

        Self {
            width,
            height,
            tile_width,
            tile_height,
            origin: Vec2::ZERO,
            layers,
            render_layer: 0,
            canvas: Canvas::new(),
        }
    }

    /// Build a map from text rows where `#` marks a blocking tile on
    /// `collision_layer`. Layers below it are created open.
    pub fn from_ascii(
        rows: &[&str],
        tile_width: f32,
        tile_height: f32,
        collision_layer: usize,
    ) -> Result<Self, MapError> {
        let width = rows.first().ok_or(MapError::Empty)?.chars().count();
        let height = rows.len();
        let mut map = Self::new(width, height, tile_width, tile_height, collision_layer + 1);

        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, tile) in row.chars().enumerate() {
                if tile == '#' {
                    map.set_blocking(x as i32, y as i32, collision_layer, true);
                }
            }
        }

        Ok(map)
    }

    /// Move the map's top-left corner (pixels)
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn tile_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Mark a tile as blocking or open, adding layers as needed.
    /// Out-of-bounds tiles are ignored.
    pub fn set_blocking(&mut self, x: i32, y: i32, layer: usize, blocked: bool) {
        let Some(index) = self.tile_index(x, y) else {
            return;
        };
        let cells = self.width * self.height;
        while self.layers.len() <= layer {
            self.layers.push(TileLayer {
                blocking: vec![false; cells],
            });
        }
        if let Some(cell) = self
            .layers
            .get_mut(layer)
            .and_then(|l| l.blocking.get_mut(index))
        {
            *cell = blocked;
        }
    }

    /// Whether a tile blocks movement on `layer`.
    ///
    /// Tiles outside the map always block; a layer the map doesn't have
    /// blocks nothing.
    pub fn is_blocking_tile(&self, x: i32, y: i32, layer: usize) -> bool {
        let Some(index) = self.tile_index(x, y) else {
            return true;
        };
        self.layers
            .get(layer)
            .and_then(|l| l.blocking.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Pixel position of the bottom-centre of a tile, where a sprite's feet go
    pub fn tile_foot(&self, tile_x: f32, tile_y: f32) -> Vec2 {
        Vec2::new(
            self.origin.x + self.tile_width * tile_x + self.tile_width / 2.0,
            self.origin.y + self.tile_height * (tile_y + 1.0),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
