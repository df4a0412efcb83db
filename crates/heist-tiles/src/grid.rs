//! CollisionGrid: the merged collision surface of a room.

use crate::layer::TileLayer;
use crate::query::{Tile, TileQuery};

/// Solid cells of a room. A cell is solid if any source layer has a tile there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGrid {
    pub width: u32,
    pub height: u32,
    solid: Vec<bool>,
}

impl CollisionGrid {
    /// An open room with no solid cells.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            solid: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Merge several layers (walls, furniture, ...) into one grid.
    /// Cells outside a smaller layer count as empty for that layer.
    pub fn from_layers(width: u32, height: u32, layers: &[&TileLayer]) -> Self {
        let mut grid = Self::open(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if layers.iter().any(|layer| layer.tile(x, y).is_some()) {
                    grid.set_solid(x, y, true);
                }
            }
        }
        grid
    }

    /// Build from an ASCII picture: `#` is solid, anything else open.
    /// Rows shorter than the widest row are padded with open cells.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::open(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set_solid(x as i32, y as i32, true);
                }
            }
        }
        grid
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Mark or clear a cell. Out-of-bounds writes are ignored.
    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) {
        if let Some(i) = self.index(x, y) {
            self.solid[i] = solid;
        }
    }

    /// Number of solid cells.
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }
}

impl TileQuery for CollisionGrid {
    fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        let i = self.index(x, y)?;
        self.solid[i].then_some(Tile { id: 1 })
    }
}
