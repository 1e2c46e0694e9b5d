//! Rooms placed by the tool

use crate::{
    CellKind, GizmoHandle, GridIndexer, ObjectHandle, ResizeOutcome, RoomGrid, RoomId,
    CM_PER_METRE,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room footprint in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: u32,
    pub height: u32,
}

impl RoomSize {
    /// Create a size, raising zero dimensions to one tile
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for RoomSize {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

/// Placement of a room in the scene. Translation is in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomTransform {
    pub translation: [f32; 3],
    /// Rotation around the vertical axis
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl RoomTransform {
    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            yaw_degrees: 0.0,
        }
    }
}

/// Selection overlay box in room-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsBox {
    /// Box centre in centimetres
    pub center: [f32; 3],
    /// Per-axis scale of a one-metre cube
    pub scale: [f32; 3],
}

/// A rectangular room of floor tiles bounded by walls
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    /// Host scene object representing the room; cells are attached to it
    pub actor: ObjectHandle,
    /// Room height in metres
    pub height: u32,
    pub transform: RoomTransform,
    /// Manipulation gizmo bound to this room. Missing only when the host
    /// restored the room behind the tool's back.
    pub gizmo: Option<GizmoHandle>,
    grid: RoomGrid,
}

impl Room {
    /// Create a new room without any cells
    pub fn new(actor: ObjectHandle, size: RoomSize, height: u32, transform: RoomTransform) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor,
            height: height.max(1),
            transform,
            gizmo: None,
            grid: RoomGrid::new(size),
        }
    }

    pub fn size(&self) -> RoomSize {
        self.grid.size()
    }

    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut RoomGrid {
        &mut self.grid
    }

    /// Index arithmetic for this room at the given tile size
    pub fn indexer(&self, tile_size_cm: u32) -> GridIndexer {
        GridIndexer::new(self.size(), tile_size_cm)
    }

    /// Change the footprint, see [`RoomGrid::resize`]
    pub fn resize(&mut self, size: RoomSize) -> ResizeOutcome {
        self.grid.resize(size)
    }

    /// Check whether a handle is one of this room's persistent cells
    pub fn owns(&self, handle: ObjectHandle) -> bool {
        self.grid.contains(handle)
    }

    /// Local position of a slot
    pub fn slot_position(&self, kind: CellKind, index: usize, tile_size_cm: u32) -> [f32; 3] {
        let indexer = self.indexer(tile_size_cm);
        match kind {
            CellKind::Tile => indexer.position_of_tile(index),
            CellKind::Wall => indexer.position_of_wall(index),
        }
    }

    /// Yaw of a slot's cell object
    pub fn slot_yaw(&self, kind: CellKind, index: usize) -> f32 {
        match kind {
            CellKind::Tile => 0.0,
            CellKind::Wall => self.indexer(1).wall_orientation(index).yaw_degrees(),
        }
    }

    /// Overlay box enclosing the room, padded by ten centimetres
    pub fn bounds_box(&self, tile_size_m: u32) -> BoundsBox {
        let size = self.size();
        let extent = [
            (size.width * tile_size_m) as f32,
            (size.height * tile_size_m) as f32,
            self.height as f32,
        ];
        let half = CM_PER_METRE as f32 / 2.0;
        BoundsBox {
            center: extent.map(|metres| metres * half),
            scale: extent.map(|metres| metres + 0.1),
        }
    }
}
