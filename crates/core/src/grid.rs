//! Row-major tile storage for one floor.

use crate::error::GridError;
use crate::tile::{Tile, TileKind};
use crate::types::{Direction, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TileKind::Void)
    }

    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self { width, height, tiles: vec![Tile::new(kind); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn checked_index(&self, pos: Pos) -> Result<usize, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds { pos, width: self.width, height: self.height });
        }
        Ok((pos.y as usize) * self.width + (pos.x as usize))
    }

    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        self.checked_index(pos).ok().map(|index| &self.tiles[index])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        self.checked_index(pos).ok().map(|index| &mut self.tiles[index])
    }

    /// Panics when `pos` is off the grid; callers must stay in bounds.
    pub fn tile(&self, pos: Pos) -> &Tile {
        match self.checked_index(pos) {
            Ok(index) => &self.tiles[index],
            Err(error) => panic!("{error}"),
        }
    }

    /// Panics when `pos` is off the grid; callers must stay in bounds.
    pub fn tile_mut(&mut self, pos: Pos) -> &mut Tile {
        match self.checked_index(pos) {
            Ok(index) => &mut self.tiles[index],
            Err(error) => panic!("{error}"),
        }
    }

    pub fn kind_at(&self, pos: Pos) -> Option<TileKind> {
        self.get(pos).map(|tile| tile.kind)
    }

    /// Replaces the tile kind, keeping its visibility flags.
    pub fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        self.tile_mut(pos).kind = kind;
    }

    /// Off-grid positions are never walkable.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(Tile::walkable)
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|tile| tile.explored)
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|tile| tile.visible)
    }

    pub fn clear_visible(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    /// In-bounds neighbours in `Direction::ALL` order.
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = (Direction, Pos)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, pos.step(direction)))
            .filter(|(_, next)| self.in_bounds(*next))
    }

    /// Plain glyph map, one line per row. Ignores visibility.
    pub fn render_ascii(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                text.push(self.tiles[y * self.width + x].glyph());
            }
            text.push('\n');
        }
        text
    }
}
