//! The collision query guards use to test sight lines.

/// A tile on a layer. Id 0 means empty; anything else is drawn and blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: u32,
}

/// Grid lookup consumed by the vision cone and guard movement.
///
/// Implementations must return `None` for out-of-bounds coordinates
/// instead of panicking.
pub trait TileQuery {
    fn tile(&self, x: i32, y: i32) -> Option<Tile>;

    /// Whether the cell blocks movement and sight.
    fn is_solid(&self, x: i32, y: i32) -> bool {
        matches!(self.tile(x, y), Some(tile) if tile.id != 0)
    }
}

impl<T: TileQuery + ?Sized> TileQuery for &T {
    fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        (**self).tile(x, y)
    }
}
