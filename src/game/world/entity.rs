// Map entity: where a sprite stands and which frame it shows

use glam::Vec2;

use super::map::GameMap;

/// A sprite placed on the tile grid
#[derive(Debug, Clone)]
pub struct Entity {
    /// Continuous tile column (fractional mid-slide)
    pub tile_x: f32,
    /// Continuous tile row (fractional mid-slide)
    pub tile_y: f32,
    /// Frame shown when standing still
    pub start_frame: usize,
    frame: usize,
    /// Last pixel position the entity was drawn at
    position: Vec2,
}

impl Entity {
    pub fn new(tile_x: i32, tile_y: i32, start_frame: usize) -> Self {
        Self {
            tile_x: tile_x as f32,
            tile_y: tile_y as f32,
            start_frame,
            frame: start_frame,
            position: Vec2::ZERO,
        }
    }

    /// Current tile position
    pub fn tile(&self) -> Vec2 {
        Vec2::new(self.tile_x, self.tile_y)
    }

    pub fn set_tile(&mut self, tile: Vec2) {
        self.tile_x = tile.x;
        self.tile_y = tile.y;
    }

    /// Tile the entity occupies, rounding any fractional slide position
    pub fn tile_coords(&self) -> (i32, i32) {
        (self.tile_x.round() as i32, self.tile_y.round() as i32)
    }

    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Place the entity on tile `(x, y)` and redraw it there
    pub fn teleport(&mut self, x: i32, y: i32, map: &mut GameMap) {
        self.tile_x = x as f32;
        self.tile_y = y as f32;
        self.teleport_and_draw(map);
    }

    /// Snap the pixel position to the current tile and draw into the map's canvas
    pub fn teleport_and_draw(&mut self, map: &mut GameMap) {
        self.position = map.tile_foot(self.tile_x, self.tile_y);
        map.canvas.draw_sprite(self.frame, self.position);
    }

    /// Draw at the current (possibly mid-slide) tile position
    pub fn draw(&self, map: &mut GameMap) {
        let position = map.tile_foot(self.tile_x, self.tile_y);
        map.canvas.draw_sprite(self.frame, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::map::DrawCommand;

    #[test]
    fn test_new_entity_shows_start_frame() {
        let entity = Entity::new(2, 3, 7);
        assert_eq!(entity.frame(), 7);
        assert_eq!(entity.tile(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_tile_coords_round() {
        let mut entity = Entity::new(0, 0, 0);
        entity.set_tile(Vec2::new(2.6, 1.2));
        assert_eq!(entity.tile_coords(), (3, 1));
    }

    #[test]
    fn test_teleport_and_draw_records_sprite() {
        let mut map = GameMap::new(4, 4, 16.0, 16.0, 3);
        let mut entity = Entity::new(1, 1, 5);

        entity.teleport_and_draw(&mut map);

        assert_eq!(entity.position(), Vec2::new(24.0, 32.0));
        assert_eq!(
            map.canvas.commands(),
            &[DrawCommand::Sprite {
                frame: 5,
                position: Vec2::new(24.0, 32.0)
            }]
        );
    }

    #[test]
    fn test_teleport_moves_entity() {
        let mut map = GameMap::new(4, 4, 16.0, 16.0, 3);
        let mut entity = Entity::new(0, 0, 0);
        entity.teleport(3, 2, &mut map);
        assert_eq!(entity.tile_coords(), (3, 2));
        assert_eq!(map.canvas.len(), 1);
    }
}
