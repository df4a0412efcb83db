//! Guard vision cone.
//!
//! A circular sector anchored at the center of the guard's tile. The
//! heading is continuous (degrees, screen space) and chases a target
//! heading set from the guard's cardinal facing. The polygon is rebuilt on
//! every update so the drawn cone and the containment test always agree.

use glam::Vec2;

use heist_core::constants::*;
use heist_core::enums::Direction;
use heist_core::state::VisionConeView;
use heist_core::types::grid_to_pixel_center;
use heist_tiles::{has_line_of_sight, TileQuery};

/// Wrap an angle in degrees into [-180, 180).
pub fn normalize_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Sector-shaped detection volume owned by one guard.
#[derive(Debug, Clone)]
pub struct VisionCone {
    /// Guard grid position.
    position: Vec2,
    current_rotation: f32,
    target_rotation: f32,
    /// Range before the detection multiplier (pixels).
    base_range: f32,
    /// Effective range (pixels).
    range: f32,
    detection_multiplier: f32,
    /// Full sector width (degrees).
    angle: f32,
    smooth_rotation: bool,
    /// Center followed by the arc points (pixels).
    vertices: Vec<Vec2>,
}

impl VisionCone {
    /// Build a cone for a guard at `position` (grid) facing `direction`.
    ///
    /// `range_tiles` and `angle_degrees` that are negative or not finite are
    /// treated as zero, which yields a cone that never detects anything.
    pub fn new(
        position: Vec2,
        direction: Direction,
        range_tiles: f32,
        angle_degrees: f32,
        smooth_rotation: bool,
    ) -> Self {
        let range_tiles = if range_tiles.is_finite() {
            range_tiles.max(0.0)
        } else {
            0.0
        };
        let angle = if angle_degrees.is_finite() {
            angle_degrees.clamp(0.0, 360.0)
        } else {
            0.0
        };
        let base_range = range_tiles * TILE_SIZE * VISION_RANGE_MARGIN;
        let heading = direction.degrees();

        let mut cone = Self {
            position,
            current_rotation: heading,
            target_rotation: heading,
            base_range,
            range: base_range,
            detection_multiplier: STANDING_DETECTION_MULTIPLIER,
            angle,
            smooth_rotation,
            vertices: Vec::with_capacity(VISION_ARC_SEGMENTS + 2),
        };
        cone.update(position, 0.0);
        cone
    }

    /// Rescale the effective range from the base range.
    pub fn set_detection_multiplier(&mut self, multiplier: f32) {
        self.detection_multiplier = multiplier;
        self.range = self.base_range * multiplier;
    }

    /// Re-anchor to the guard and advance the heading toward the target.
    ///
    /// Smooth cones turn at most `VISION_ROTATION_SPEED_DEG * dt` per call and
    /// never overshoot. Other cones, or calls with `dt <= 0`, snap.
    pub fn update(&mut self, position: Vec2, dt: f32) {
        self.position = position;

        if self.smooth_rotation && dt > 0.0 {
            let diff = self.target_rotation - self.current_rotation;
            if diff.abs() > VISION_SNAP_EPSILON_DEG {
                let step = VISION_ROTATION_SPEED_DEG * dt;
                self.current_rotation += diff.clamp(-step, step);
            } else {
                self.current_rotation = self.target_rotation;
            }
        } else {
            self.current_rotation = self.target_rotation;
        }

        self.rebuild_vertices();
    }

    /// Aim at a cardinal direction.
    pub fn set_target_rotation(&mut self, direction: Direction) {
        self.set_target_heading(direction.degrees());
    }

    /// Aim at an arbitrary heading (degrees).
    ///
    /// The current heading is shifted by a full turn when needed so the
    /// following tween takes the short way around.
    pub fn set_target_heading(&mut self, degrees: f32) {
        self.target_rotation = degrees;

        let diff = self.target_rotation - self.current_rotation;
        if diff > 180.0 {
            self.current_rotation += 360.0;
        } else if diff < -180.0 {
            self.current_rotation -= 360.0;
        }

        if !self.smooth_rotation {
            self.current_rotation = self.target_rotation;
        }
    }

    fn rebuild_vertices(&mut self) {
        let center = self.center();
        let base = self.current_rotation.to_radians();
        let half = self.half_angle().to_radians();

        self.vertices.clear();
        self.vertices.push(center);
        for i in 0..=VISION_ARC_SEGMENTS {
            let a = base - half + (half * 2.0 * i as f32) / VISION_ARC_SEGMENTS as f32;
            self.vertices
                .push(center + Vec2::new(a.cos(), a.sin()) * self.range);
        }
    }

    /// Whether `point` (pixels) is inside the sector and, when a collision
    /// surface is given, visible from the cone's center.
    pub fn contains_point(&self, point: Vec2, tiles: Option<&dyn TileQuery>) -> bool {
        if self.range <= 0.0 || self.angle <= 0.0 {
            return false;
        }

        let center = self.center();
        // Each test rejects NaN so a corrupted cone sees nothing
        let offset = point - center;
        let distance = offset.length();
        if distance.is_nan() || distance > self.range {
            return false;
        }

        let bearing = offset.y.atan2(offset.x).to_degrees();
        let diff = normalize_degrees(bearing - self.current_rotation);
        if diff.is_nan() || diff.abs() > self.half_angle() {
            return false;
        }

        match tiles {
            Some(tiles) => has_line_of_sight(tiles, center, point),
            None => true,
        }
    }

    /// Eye position: center of the guard's tile (pixels).
    pub fn center(&self) -> Vec2 {
        grid_to_pixel_center(self.position)
    }

    /// Current heading in degrees. May sit outside [-180, 180] mid-turn.
    pub fn heading(&self) -> f32 {
        self.current_rotation
    }

    pub fn target_heading(&self) -> f32 {
        self.target_rotation
    }

    /// Effective range in pixels.
    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn base_range(&self) -> f32 {
        self.base_range
    }

    pub fn detection_multiplier(&self) -> f32 {
        self.detection_multiplier
    }

    pub fn half_angle(&self) -> f32 {
        self.angle / 2.0
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth_rotation
    }

    pub fn is_turning(&self) -> bool {
        self.current_rotation != self.target_rotation
    }

    /// Center followed by `VISION_ARC_SEGMENTS + 1` arc points.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn view(&self) -> VisionConeView {
        VisionConeView {
            vertices: self.vertices.clone(),
            heading: self.current_rotation,
            range: self.range,
        }
    }
}
