//! Guard construction from map-editor objects.
//!
//! A guard object carries a `guardType` of `patrol` or `stationary` plus
//! optional `direction`, `primaryDirection`, `waypoints` (`"x,y;x,y"` in
//! tiles), `detectionRange`, `detectionAngle`, `moveSpeed`,
//! `rotationSpeed` and `primaryDirectionChance`.

use glam::Vec2;
use thiserror::Error;

use heist_core::enums::{Direction, GuardKind};
use heist_core::types::pixel_to_cell;
use heist_tiles::TiledObject;

use crate::guard::{Behavior, Guard, GuardSpec, PatrolRoute, StationaryBehavior};
use crate::tuning::GuardTuning;

/// Why a map object could not become a guard.
#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    #[error("Object {object_id} has no guardType property")]
    MissingGuardType { object_id: u32 },

    #[error("Object {object_id} has unknown guardType {value:?}")]
    UnknownGuardType { object_id: u32, value: String },

    #[error("Object {object_id} has malformed waypoint {entry:?}")]
    InvalidWaypoint { object_id: u32, entry: String },

    #[error("Object {object_id} property {name} is not a number: {value:?}")]
    InvalidNumber {
        object_id: u32,
        name: String,
        value: String,
    },
}

/// Parse a `guardType` value.
pub fn parse_guard_kind(value: &str) -> Option<GuardKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "patrol" => Some(GuardKind::Patrol),
        "stationary" => Some(GuardKind::Stationary),
        _ => None,
    }
}

/// Parse `"x,y;x,y;..."` into grid waypoints. Empty entries are skipped.
/// On failure returns the offending entry.
pub fn parse_waypoints(text: &str) -> Result<Vec<Vec2>, String> {
    text.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.split(',').map(|p| p.trim().parse::<f32>());
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
                    Ok(Vec2::new(x, y))
                }
                _ => Err(entry.to_string()),
            }
        })
        .collect()
}

fn number_property(object: &TiledObject, name: &str) -> Result<Option<f32>, SpawnError> {
    let Some(text) = object.property_text(name) else {
        return Ok(None);
    };
    text.trim()
        .parse::<f32>()
        .map(Some)
        .map_err(|_| SpawnError::InvalidNumber {
            object_id: object.id,
            name: name.to_string(),
            value: text,
        })
}

/// Build a guard from a `Guards` layer object.
///
/// The guard stands in the grid cell containing the object's center.
pub fn guard_from_object(object: &TiledObject, tuning: &GuardTuning) -> Result<Guard, SpawnError> {
    let object_id = object.id;
    let kind_text = object
        .property_text("guardType")
        .ok_or(SpawnError::MissingGuardType { object_id })?;
    let kind = parse_guard_kind(&kind_text).ok_or_else(|| SpawnError::UnknownGuardType {
        object_id,
        value: kind_text.clone(),
    })?;

    let direction = object
        .property_text("direction")
        .map(|d| Direction::from_name(&d))
        .unwrap_or_default();

    let mut spec = GuardSpec {
        position: pixel_to_cell(object.center()).as_vec2(),
        direction,
        ..GuardSpec::default()
    };
    if let Some(range) = number_property(object, "detectionRange")? {
        spec.detection_range = range;
    }
    if let Some(angle) = number_property(object, "detectionAngle")? {
        spec.detection_angle = angle;
    }

    let behavior = match kind {
        GuardKind::Stationary => {
            let primary = object
                .property_text("primaryDirection")
                .map(|d| Direction::from_name(&d))
                .unwrap_or(direction);
            let mut stationary = StationaryBehavior::new(primary, tuning);
            if let Some(speed) = number_property(object, "rotationSpeed")? {
                stationary.rotation_speed = speed;
            }
            if let Some(chance) = number_property(object, "primaryDirectionChance")? {
                stationary.primary_direction_chance = f64::from(chance);
            }
            Behavior::Stationary(stationary)
        }
        GuardKind::Patrol => {
            let waypoints = match object.property_text("waypoints") {
                Some(text) => parse_waypoints(&text)
                    .map_err(|entry| SpawnError::InvalidWaypoint { object_id, entry })?,
                None => Vec::new(),
            };
            let speed = number_property(object, "moveSpeed")?.unwrap_or(tuning.patrol_speed);
            Behavior::Patrol(PatrolRoute::new(waypoints, speed))
        }
    };

    Ok(Guard::new(spec, behavior, *tuning))
}
