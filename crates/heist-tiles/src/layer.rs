//! TileLayer: one rectangular layer of tile ids.

use crate::query::{Tile, TileQuery};

/// One layer of a room, row-major tile ids (0 = no tile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    ids: Vec<u32>,
}

impl TileLayer {
    /// Create a layer from row-major ids. Returns None if `ids` does not
    /// hold exactly `width * height` entries.
    pub fn new(name: impl Into<String>, width: u32, height: u32, ids: Vec<u32>) -> Option<Self> {
        if ids.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            name: name.into(),
            width,
            height,
            ids,
        })
    }

    /// An all-empty layer.
    pub fn empty(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            ids: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Row-major index of an in-bounds cell.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Raw id at a cell; 0 for empty or out of bounds.
    pub fn id_at(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(0, |i| self.ids[i])
    }

    /// Overwrite one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, id: u32) {
        if let Some(i) = self.index(x, y) {
            self.ids[i] = id;
        }
    }

    /// Iterate `(x, y, id)` over non-empty cells.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, u32)> + '_ {
        let width = self.width as usize;
        self.ids
            .iter()
            .enumerate()
            .filter(|(_, id)| **id != 0)
            .map(move |(i, &id)| ((i % width) as i32, (i / width) as i32, id))
    }
}

impl TileQuery for TileLayer {
    fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        match self.id_at(x, y) {
            0 => None,
            id => Some(Tile { id }),
        }
    }
}
