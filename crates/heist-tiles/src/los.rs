//! Line-of-sight calculation against tile collision.
//!
//! Uses stepped ray traversal at half-tile spacing. Coarser steps can skip
//! a one-tile wall on a diagonal; finer steps only repeat cells.

use glam::Vec2;

use heist_core::constants::LOS_SAMPLE_STEP;
use heist_core::types::pixel_to_cell;

use crate::query::TileQuery;

/// Check line of sight between two pixel-space points.
///
/// Returns true if no sampled cell along the segment is solid. Both
/// endpoints are sampled, so a target standing inside a wall is not visible.
pub fn has_line_of_sight<Q: TileQuery + ?Sized>(tiles: &Q, from: Vec2, to: Vec2) -> bool {
    let delta = to - from;
    let distance = delta.length();

    let steps = (distance / LOS_SAMPLE_STEP).ceil() as usize;
    if steps == 0 {
        let cell = pixel_to_cell(from);
        return !tiles.is_solid(cell.x, cell.y);
    }

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let cell = pixel_to_cell(from + delta * t);
        if tiles.is_solid(cell.x, cell.y) {
            return false; // Wall blocks sight
        }
    }

    true
}
