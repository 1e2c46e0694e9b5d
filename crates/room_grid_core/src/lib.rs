//! Core data structures for room_grid_editor
//!
//! This crate provides the engine-independent types behind the room tool:
//! - `GridIndexer` - Conversions between slot indices and room-local positions
//! - `RoomGrid` - Tile and wall slot storage with content-preserving resize
//! - `Room` - A placed room with its size, transform and gizmo association
//! - `PositionSnap` / `RotationSnap` - Gizmo snapping increments
//! - `ToolSettings` - Per-scene tool configuration

mod grid;
mod handle;
mod indexer;
mod room;
mod settings;
mod snap;

pub use grid::{ResizeOutcome, RoomGrid};
pub use handle::{CellKind, GizmoHandle, MeshRef, ObjectHandle, RoomId};
pub use indexer::{GridError, GridIndexer, WallOrientation};
pub use room::{BoundsBox, Room, RoomSize, RoomTransform};
pub use settings::{
    ToolSettings, CM_PER_METRE, DEFAULT_FLOOR_MESH, DEFAULT_WALL_MESH, MAX_ROOM_HEIGHT,
    MAX_ROOM_TILES, MAX_TILE_SIZE,
};
pub use snap::{PositionSnap, RotationSnap};
