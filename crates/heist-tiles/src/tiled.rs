//! Room maps authored in the Tiled editor (JSON export).
//!
//! Only the parts the guard subsystem reads are modelled: tile layers for
//! collision and object groups for guard placement.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::grid::CollisionGrid;
use crate::layer::TileLayer;

/// Wall layer name in museum room maps.
pub const WALL_COLLISION_LAYER: &str = "Wall-Collision";

/// Furniture/display-case layer name; optional.
pub const OBJECT_COLLISION_LAYER: &str = "Room-Objects-Collision";

/// Object group holding guard placements.
pub const GUARDS_LAYER: &str = "Guards";

/// Errors reading a room map.
#[derive(Debug, Error)]
pub enum TiledError {
    /// Malformed JSON or unexpected shape
    #[error("Map JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required layer is absent
    #[error("Layer not found: {0}")]
    MissingLayer(String),

    /// Tile data does not cover the layer
    #[error("Layer {name} has {actual} tiles, expected {expected}")]
    DataLength {
        /// Layer name
        name: String,
        /// width * height
        expected: usize,
        /// Length of the data array
        actual: usize,
    },
}

/// Top-level map document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiledMap {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<TiledLayer>,
}

/// A tile layer or an object group; unused fields stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiledLayer {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default)]
    pub objects: Vec<TiledObject>,
}

/// A placed object (guard, item, exit, ...). Coordinates in pixels, top-left.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TiledObject {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub properties: Vec<TiledProperty>,
}

/// Custom property attached to an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiledProperty {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: Value,
}

impl TiledMap {
    /// Parse a map from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, TiledError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> Option<&TiledLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Load a named tile layer sized to the map.
    pub fn tile_layer(&self, name: &str) -> Result<TileLayer, TiledError> {
        let layer = self
            .layer(name)
            .ok_or_else(|| TiledError::MissingLayer(name.to_string()))?;
        let expected = (self.width as usize) * (self.height as usize);
        TileLayer::new(name, self.width, self.height, layer.data.clone()).ok_or(
            TiledError::DataLength {
                name: name.to_string(),
                expected,
                actual: layer.data.len(),
            },
        )
    }

    /// Merge the wall layer and, if present, the furniture layer into one grid.
    pub fn collision_grid(&self) -> Result<CollisionGrid, TiledError> {
        let walls = self.tile_layer(WALL_COLLISION_LAYER)?;
        let objects = match self.layer(OBJECT_COLLISION_LAYER) {
            Some(_) => Some(self.tile_layer(OBJECT_COLLISION_LAYER)?),
            None => None,
        };

        let mut layers = vec![&walls];
        layers.extend(objects.as_ref());
        Ok(CollisionGrid::from_layers(self.width, self.height, &layers))
    }

    /// Objects of a named object group; empty if the group is missing.
    pub fn objects(&self, layer_name: &str) -> &[TiledObject] {
        self.layer(layer_name)
            .map(|l| l.objects.as_slice())
            .unwrap_or(&[])
    }
}

impl TiledObject {
    /// Raw property value by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Property rendered as text. Numbers and booleans are stringified;
    /// null and nested values count as absent.
    pub fn property_text(&self, name: &str) -> Option<String> {
        match self.property(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Center of the object's bounding box (pixels).
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
