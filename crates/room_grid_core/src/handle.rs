//! Opaque handles for objects owned by the host scene

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a room inside the tool's registry
pub type RoomId = Uuid;

/// Handle of a scene object (room actor, tile, wall or overlay) owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

/// Handle of a manipulation gizmo owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GizmoHandle(pub u64);

/// Which slot array a cell object lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Floor cell
    Tile,
    /// Boundary cell, X- or Y-aligned
    Wall,
}

impl CellKind {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CellKind::Tile => "Tile",
            CellKind::Wall => "Wall",
        }
    }
}

/// Reference to a mesh asset, stored as an asset path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshRef(pub String);

impl MeshRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Asset path of the mesh
    pub fn path(&self) -> &str {
        &self.0
    }
}
