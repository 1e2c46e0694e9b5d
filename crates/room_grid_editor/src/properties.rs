//! Property panel state and the change messages it emits

use crate::selection::EditMode;
use room_grid_core::{MeshRef, PositionSnap, RoomId, RoomSize, RotationSnap, ToolSettings};

/// One edited field of the property panel
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    EditMode(EditMode),
    PositionSnap(PositionSnap),
    RotationSnap(RotationSnap),
    ShowAllGizmos(bool),
    /// Replace every tile of the current room with the default fill
    ResetFloor,
    ClearFloor,
    /// Replace every wall of the current room with the default perimeter
    ResetWalls,
    ClearWalls,
    RoomSize(RoomSize),
    /// Tile edge length in metres
    TileSize(u32),
    /// Height of new rooms in metres
    InitHeight(u32),
    SpawnPosition([f32; 3]),
    FloorMesh(MeshRef),
    WallMesh(MeshRef),
    RoomSelection(RoomId),
}

/// Values shown in the property panel for the running session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolProperties {
    pub edit_mode: EditMode,
    pub settings: ToolSettings,
    /// Room highlighted in the room picker
    pub room_selection: Option<RoomId>,
}

impl ToolProperties {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            edit_mode: EditMode::default(),
            settings: settings.clamped(),
            room_selection: None,
        }
    }

    /// Apply a plain settings edit, clamped to the panel's ranges.
    ///
    /// Returns `true` when the change belongs in the persisted settings.
    pub fn apply(&mut self, change: &FieldChange) -> bool {
        let settings = &mut self.settings;
        match change {
            FieldChange::PositionSnap(snap) => settings.position_snap = *snap,
            FieldChange::RotationSnap(snap) => settings.rotation_snap = *snap,
            FieldChange::ShowAllGizmos(show) => settings.show_all_gizmos = *show,
            FieldChange::RoomSize(size) => settings.room_size = *size,
            FieldChange::TileSize(size) => settings.tile_size = *size,
            FieldChange::InitHeight(height) => settings.init_height = *height,
            FieldChange::SpawnPosition(position) => settings.spawn_position = *position,
            FieldChange::FloorMesh(mesh) => settings.floor_mesh = mesh.clone(),
            FieldChange::WallMesh(mesh) => settings.wall_mesh = mesh.clone(),
            FieldChange::EditMode(_)
            | FieldChange::ResetFloor
            | FieldChange::ClearFloor
            | FieldChange::ResetWalls
            | FieldChange::ClearWalls
            | FieldChange::RoomSelection(_) => return false,
        }
        *settings = settings.clone().clamped();
        true
    }
}
