//! Tool settings persisted with the scene

use crate::{CellKind, MeshRef, PositionSnap, RoomSize, RotationSnap};
use serde::{Deserialize, Serialize};

/// Conversion between the metre values shown in the UI and grid centimetres
pub const CM_PER_METRE: u32 = 100;
/// Largest room footprint per axis, in tiles
pub const MAX_ROOM_TILES: u32 = 50;
/// Largest room height in metres
pub const MAX_ROOM_HEIGHT: u32 = 20;
/// Largest tile edge in metres
pub const MAX_TILE_SIZE: u32 = 100;

pub const DEFAULT_FLOOR_MESH: &str = "meshes/room_floor.glb#Mesh0";
pub const DEFAULT_WALL_MESH: &str = "meshes/room_wall.glb#Mesh0";

fn default_floor_mesh() -> MeshRef {
    MeshRef::new(DEFAULT_FLOOR_MESH)
}

fn default_wall_mesh() -> MeshRef {
    MeshRef::new(DEFAULT_WALL_MESH)
}

fn default_true() -> bool {
    true
}

/// Settings the room tool reads at session start and writes back on change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default)]
    pub position_snap: PositionSnap,
    #[serde(default)]
    pub rotation_snap: RotationSnap,
    /// Footprint of newly spawned rooms
    #[serde(default)]
    pub room_size: RoomSize,
    #[serde(default = "default_true")]
    pub show_all_gizmos: bool,
    /// Height of newly spawned rooms in metres
    pub init_height: u32,
    /// Tile edge length in metres
    pub tile_size: u32,
    /// Spawn point for new rooms in centimetres
    #[serde(default)]
    pub spawn_position: [f32; 3],
    #[serde(default = "default_floor_mesh")]
    pub floor_mesh: MeshRef,
    #[serde(default = "default_wall_mesh")]
    pub wall_mesh: MeshRef,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            position_snap: PositionSnap::SnapX10,
            rotation_snap: RotationSnap::NoSnapping,
            room_size: RoomSize::new(3, 2),
            show_all_gizmos: true,
            init_height: 2,
            tile_size: 2,
            spawn_position: [0.0; 3],
            floor_mesh: default_floor_mesh(),
            wall_mesh: default_wall_mesh(),
        }
    }
}

impl ToolSettings {
    /// Tile edge length used by the grid arithmetic
    pub fn tile_size_cm(&self) -> u32 {
        self.tile_size * CM_PER_METRE
    }

    /// Mesh used when spawning a new cell of this kind
    pub fn mesh_for(&self, kind: CellKind) -> &MeshRef {
        match kind {
            CellKind::Tile => &self.floor_mesh,
            CellKind::Wall => &self.wall_mesh,
        }
    }

    /// Clamp every numeric field into the range the property panel allows
    pub fn clamped(mut self) -> Self {
        self.room_size = RoomSize::new(
            self.room_size.width.min(MAX_ROOM_TILES),
            self.room_size.height.min(MAX_ROOM_TILES),
        );
        self.init_height = self.init_height.clamp(1, MAX_ROOM_HEIGHT);
        self.tile_size = self.tile_size.clamp(1, MAX_TILE_SIZE);
        self
    }
}
