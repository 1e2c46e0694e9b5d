//! Edit modes and the temporary/persistent cell selection state machine

use crate::host::{GizmoKind, MaterialRole, SceneHost};
use crate::registry::RoomRegistry;
use crate::RoomToolError;
use bevy::log::{debug, warn};
use room_grid_core::{
    CellKind, GizmoHandle, MeshRef, ObjectHandle, RoomId, RoomTransform, ToolSettings,
};
use serde::{Deserialize, Serialize};

/// Interaction mode of the room tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditMode {
    /// Clicks place the spawn point for new rooms
    #[default]
    CreateRooms,
    /// Clicks select rooms; the current room can be resized and reset
    ManageRooms,
    EditWalls,
    EditTiles,
}

impl EditMode {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EditMode::CreateRooms => "Create Rooms",
            EditMode::ManageRooms => "Manage Rooms",
            EditMode::EditWalls => "Edit Walls",
            EditMode::EditTiles => "Edit Tiles",
        }
    }

    /// Returns all variants for UI enumeration
    pub fn all() -> &'static [EditMode] {
        &[
            EditMode::CreateRooms,
            EditMode::ManageRooms,
            EditMode::EditWalls,
            EditMode::EditTiles,
        ]
    }

    /// Cell kind edited in this mode, if any
    pub fn cell_kind(&self) -> Option<CellKind> {
        match self {
            EditMode::EditWalls => Some(CellKind::Wall),
            EditMode::EditTiles => Some(CellKind::Tile),
            EditMode::CreateRooms | EditMode::ManageRooms => None,
        }
    }
}

/// The cell currently highlighted in an edit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedCell {
    pub kind: CellKind,
    pub index: usize,
    pub handle: ObjectHandle,
}

/// How a click on a cell object is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// The selected cell was clicked again
    Toggle,
    /// Another cell of the session room was clicked
    Reselect,
    /// A cell of a different room was clicked
    SwitchRoom(RoomId),
    /// The object belongs to no known room
    Ignore,
}

/// Temporary cells spawned for one room while editing one cell kind
#[derive(Debug)]
struct EditSession {
    room: RoomId,
    kind: CellKind,
    /// Same length as the room's slot array of `kind`; a slot holds a temp
    /// object only when the room has no persistent object there
    temp: Vec<Option<ObjectHandle>>,
}

#[derive(Debug, Default)]
pub struct EditSelectionController {
    mode: EditMode,
    session: Option<EditSession>,
    selected: Option<SelectedCell>,
    /// Selection overlay and the room it is attached to
    bounds: Option<(RoomId, ObjectHandle)>,
    placement: Option<GizmoHandle>,
}

impl EditSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Record the active mode. Session teardown and setup are driven by the tool.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.selected = None;
    }

    pub fn selected(&self) -> Option<SelectedCell> {
        self.selected
    }

    /// Room whose cells are currently being edited
    pub fn session_room(&self) -> Option<RoomId> {
        self.session.as_ref().map(|session| session.room)
    }

    /// Temporary object at a slot of the running session
    pub fn temp_at(&self, index: usize) -> Option<ObjectHandle> {
        self.session
            .as_ref()
            .and_then(|session| session.temp.get(index).copied().flatten())
    }

    pub fn bounds(&self) -> Option<(RoomId, ObjectHandle)> {
        self.bounds
    }

    pub fn placement(&self) -> Option<GizmoHandle> {
        self.placement
    }

    /// Start editing one cell kind of a room.
    ///
    /// Persistent cells get the persist-unselected material. Every empty slot
    /// gets a temporary object, reusing the one already spawned when the
    /// session is restarted for the same room and kind. A persistent cell
    /// whose mesh vanished is dropped from the room and replaced by a temp.
    pub fn begin_session(
        &mut self,
        host: &mut dyn SceneHost,
        registry: &mut RoomRegistry,
        room_id: RoomId,
        kind: CellKind,
        settings: &ToolSettings,
    ) {
        let mut temp = match self.session.take() {
            Some(session) if session.room == room_id && session.kind == kind => session.temp,
            Some(other) => {
                self.session = Some(other);
                self.end_session(host, registry);
                Vec::new()
            }
            None => Vec::new(),
        };
        self.selected = None;

        let tile_size_cm = settings.tile_size_cm();
        let mesh = settings.mesh_for(kind);
        let mut spawned = Vec::new();
        let mut dropped = Vec::new();

        let Some(room) = registry.get_mut(room_id) else {
            for handle in temp.into_iter().flatten() {
                host.destroy_object(handle);
            }
            return;
        };
        let slot_count = room.grid().slots(kind).len();
        temp.resize(slot_count, None);

        for index in 0..slot_count {
            if let Some(persistent) = room.grid().get(kind, index) {
                if host.mesh_of(persistent).is_some() {
                    host.set_material(persistent, MaterialRole::PersistUnselected);
                    continue;
                }
                warn!(
                    "{}, replacing slot {} of room {} with a temporary {}",
                    RoomToolError::MissingComponent(persistent),
                    index,
                    room_id,
                    kind.display_name()
                );
                room.grid_mut().take(kind, index);
                dropped.push(persistent);
            }

            let reusable = temp[index].filter(|handle| host.is_alive(*handle));
            let handle = match reusable {
                Some(handle) => handle,
                None => {
                    let handle = host.spawn_slot(room, kind, index, tile_size_cm, mesh);
                    spawned.push(handle);
                    handle
                }
            };
            host.set_material(handle, MaterialRole::TempUnselected);
            temp[index] = Some(handle);
        }

        for handle in dropped {
            registry.forget_owner(handle);
        }
        for handle in spawned {
            registry.set_owner(handle, room_id);
        }

        debug!(
            "Editing {}s of room {} ({} slots)",
            kind.display_name(),
            room_id,
            slot_count
        );
        self.session = Some(EditSession {
            room: room_id,
            kind,
            temp,
        });
    }

    /// Destroy every temporary object and give persistent cells their own
    /// materials back
    pub fn end_session(&mut self, host: &mut dyn SceneHost, registry: &mut RoomRegistry) {
        self.selected = None;
        let Some(session) = self.session.take() else {
            return;
        };

        for handle in session.temp.into_iter().flatten() {
            host.destroy_object(handle);
            registry.forget_owner(handle);
        }

        if let Some(room) = registry.get(session.room) {
            for (_, handle) in room.grid().occupied(session.kind) {
                host.set_material(handle, MaterialRole::Original);
            }
        }
    }

    /// Decide how a click on `object` is handled within the running session
    pub fn classify_click(&self, registry: &RoomRegistry, object: ObjectHandle) -> ClickAction {
        if self.selected.is_some_and(|cell| cell.handle == object) {
            return ClickAction::Toggle;
        }

        let owner = registry.owner_of(object);
        let same_parent = self
            .selected
            .is_some_and(|cell| owner.is_some() && registry.owner_of(cell.handle) == owner);
        if same_parent || self.slot_of(registry, object).is_some() {
            return ClickAction::Reselect;
        }

        match owner {
            Some(room) => ClickAction::SwitchRoom(room),
            None => ClickAction::Ignore,
        }
    }

    /// Move the selected cell between the temporary and persistent arrays
    pub fn toggle_persistence(&mut self, host: &mut dyn SceneHost, registry: &mut RoomRegistry) {
        let (Some(cell), Some(session)) = (self.selected, self.session.as_mut()) else {
            return;
        };
        let Some(room) = registry.get_mut(session.room) else {
            return;
        };
        let Some(temp_slot) = session.temp.get_mut(cell.index) else {
            return;
        };

        if *temp_slot == Some(cell.handle) {
            *temp_slot = None;
            room.grid_mut().set(cell.kind, cell.index, cell.handle);
            host.set_material(cell.handle, MaterialRole::PersistSelected);
        } else if room.grid().get(cell.kind, cell.index) == Some(cell.handle) {
            room.grid_mut().take(cell.kind, cell.index);
            *temp_slot = Some(cell.handle);
            host.set_material(cell.handle, MaterialRole::TempSelected);
        }
    }

    /// Clear the selection, restoring the unselected material of its role
    pub fn deselect(&mut self, host: &mut dyn SceneHost, registry: &RoomRegistry) {
        let Some(cell) = self.selected.take() else {
            return;
        };
        if let Some((_, persistent)) = self.slot_of(registry, cell.handle) {
            host.set_material(cell.handle, MaterialRole::for_cell(persistent, false));
        }
    }

    /// Select a cell of the session room.
    ///
    /// Returns the cell's mesh, which becomes the default for new cells of
    /// that kind.
    pub fn select(
        &mut self,
        host: &mut dyn SceneHost,
        registry: &RoomRegistry,
        object: ObjectHandle,
    ) -> Option<MeshRef> {
        let (index, persistent) = self.slot_of(registry, object)?;
        let kind = self.session.as_ref()?.kind;
        host.set_material(object, MaterialRole::for_cell(persistent, true));
        self.selected = Some(SelectedCell {
            kind,
            index,
            handle: object,
        });
        host.mesh_of(object)
    }

    /// Slot of `object` in the session room as `(index, persistent)`
    fn slot_of(&self, registry: &RoomRegistry, object: ObjectHandle) -> Option<(usize, bool)> {
        let session = self.session.as_ref()?;
        if let Some(index) = session.temp.iter().position(|slot| *slot == Some(object)) {
            return Some((index, false));
        }
        registry
            .get(session.room)?
            .grid()
            .index_of(session.kind, object)
            .map(|index| (index, true))
    }

    /// Attach the selection overlay to a room. Does nothing if the room
    /// already has it.
    pub fn show_bounds(
        &mut self,
        host: &mut dyn SceneHost,
        registry: &mut RoomRegistry,
        room_id: RoomId,
        tile_size_m: u32,
    ) {
        if self.bounds.is_some_and(|(room, _)| room == room_id) {
            return;
        }
        self.hide_bounds(host, registry);

        let Some(room) = registry.get(room_id) else {
            return;
        };
        let handle = host.spawn_bounds(&room.bounds_box(tile_size_m));
        host.attach_child(room.actor, handle);
        registry.set_owner(handle, room_id);
        self.bounds = Some((room_id, handle));
    }

    pub fn hide_bounds(&mut self, host: &mut dyn SceneHost, registry: &mut RoomRegistry) {
        if let Some((_, handle)) = self.bounds.take() {
            host.destroy_object(handle);
            registry.forget_owner(handle);
        }
    }

    /// Show the spawn point indicator, creating it on first use
    pub fn show_placement(&mut self, host: &mut dyn SceneHost, position: [f32; 3]) {
        if self.placement.is_none() {
            let gizmo = host.create_gizmo(
                GizmoKind::Placement,
                &RoomTransform::from_translation(position),
            );
            self.placement = Some(gizmo);
        }
    }

    pub fn move_placement(&mut self, host: &mut dyn SceneHost, position: [f32; 3]) {
        if let Some(gizmo) = self.placement {
            host.set_gizmo_transform(gizmo, &RoomTransform::from_translation(position));
        }
    }

    pub fn hide_placement(&mut self, host: &mut dyn SceneHost) {
        if let Some(gizmo) = self.placement.take() {
            host.destroy_gizmo(gizmo);
        }
    }

    /// Drop every bookkeeping reference without touching the scene
    pub fn forget(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::recording::{HostCall, RecordingHost};
    use room_grid_core::{Room, RoomSize};

    /// Registry with one 2x1 room holding a persistent tile at slot 0
    fn setup() -> (RecordingHost, RoomRegistry, RoomId, ObjectHandle) {
        let mut host = RecordingHost::new();
        let mut registry = RoomRegistry::new();
        let actor = host.spawn_room(&RoomTransform::default(), RoomSize::new(2, 1), 2);
        let tile = host.preexisting(Some(MeshRef::new("floor")));
        let mut room = Room::new(actor, RoomSize::new(2, 1), 2, RoomTransform::default());
        room.grid_mut().set_tile(0, tile);
        let id = registry.insert(room);
        (host, registry, id, tile)
    }

    #[test]
    fn test_edit_mode_cell_kind() {
        assert_eq!(EditMode::EditWalls.cell_kind(), Some(CellKind::Wall));
        assert_eq!(EditMode::EditTiles.cell_kind(), Some(CellKind::Tile));
        assert_eq!(EditMode::ManageRooms.cell_kind(), None);
        assert_eq!(EditMode::default(), EditMode::CreateRooms);
        assert_eq!(EditMode::all().len(), 4);
    }

    #[test]
    fn test_begin_session_spawns_temps_for_empty_slots() {
        let (mut host, mut registry, id, tile) = setup();
        let mut controller = EditSelectionController::new();
        let settings = ToolSettings::default();

        controller.begin_session(&mut host, &mut registry, id, CellKind::Tile, &settings);

        assert_eq!(host.material(tile), Some(MaterialRole::PersistUnselected));
        assert_eq!(controller.temp_at(0), None);
        let temp = controller.temp_at(1).unwrap();
        assert_eq!(host.material(temp), Some(MaterialRole::TempUnselected));
        assert_eq!(registry.owner_of(temp), Some(id));
        assert!(host.calls.contains(&HostCall::SpawnCell {
            kind: CellKind::Tile,
            handle: temp,
            position: [300.0, 100.0, 0.0],
            yaw_degrees: 0.0,
        }));
    }

    #[test]
    fn test_restarting_session_reuses_temps() {
        let (mut host, mut registry, id, _) = setup();
        let mut controller = EditSelectionController::new();
        let settings = ToolSettings::default();

        controller.begin_session(&mut host, &mut registry, id, CellKind::Tile, &settings);
        let temp = controller.temp_at(1);
        controller.begin_session(&mut host, &mut registry, id, CellKind::Tile, &settings);

        assert_eq!(controller.temp_at(1), temp);
        assert_eq!(host.live_cells(CellKind::Tile), 1);
    }

    #[test]
    fn test_missing_mesh_is_replaced_by_temp() {
        let (mut host, mut registry, id, tile) = setup();
        host.strip_mesh(tile);
        let mut controller = EditSelectionController::new();

        controller.begin_session(
            &mut host,
            &mut registry,
            id,
            CellKind::Tile,
            &ToolSettings::default(),
        );

        let room = registry.get(id).unwrap();
        assert_eq!(room.grid().tile(0), None);
        assert!(controller.temp_at(0).is_some());
        assert_eq!(registry.owner_of(tile), None);
    }

    #[test]
    fn test_end_session_cleans_up() {
        let (mut host, mut registry, id, tile) = setup();
        let mut controller = EditSelectionController::new();
        controller.begin_session(
            &mut host,
            &mut registry,
            id,
            CellKind::Tile,
            &ToolSettings::default(),
        );
        let temp = controller.temp_at(1).unwrap();

        controller.end_session(&mut host, &mut registry);

        assert!(host.destroyed(temp));
        assert_eq!(registry.owner_of(temp), None);
        assert_eq!(host.material(tile), Some(MaterialRole::Original));
        assert_eq!(controller.session_room(), None);
    }

    #[test]
    fn test_click_resolution() {
        let (mut host, mut registry, id, tile) = setup();
        let other_actor = host.spawn_room(&RoomTransform::default(), RoomSize::new(1, 1), 2);
        let other_tile = host.preexisting(Some(MeshRef::new("floor")));
        let mut other = Room::new(other_actor, RoomSize::new(1, 1), 2, RoomTransform::default());
        other.grid_mut().set_tile(0, other_tile);
        let other_id = registry.insert(other);

        let mut controller = EditSelectionController::new();
        controller.begin_session(
            &mut host,
            &mut registry,
            id,
            CellKind::Tile,
            &ToolSettings::default(),
        );
        let temp = controller.temp_at(1).unwrap();

        assert_eq!(controller.classify_click(&registry, tile), ClickAction::Reselect);
        controller.select(&mut host, &registry, tile);
        assert_eq!(controller.classify_click(&registry, tile), ClickAction::Toggle);
        assert_eq!(controller.classify_click(&registry, temp), ClickAction::Reselect);
        assert_eq!(
            controller.classify_click(&registry, other_tile),
            ClickAction::SwitchRoom(other_id)
        );
        assert_eq!(
            controller.classify_click(&registry, ObjectHandle(999)),
            ClickAction::Ignore
        );
    }

    #[test]
    fn test_select_returns_mesh_and_highlights() {
        let (mut host, mut registry, id, tile) = setup();
        let mut controller = EditSelectionController::new();
        controller.begin_session(
            &mut host,
            &mut registry,
            id,
            CellKind::Tile,
            &ToolSettings::default(),
        );
        let temp = controller.temp_at(1).unwrap();

        assert_eq!(
            controller.select(&mut host, &registry, tile),
            Some(MeshRef::new("floor"))
        );
        assert_eq!(host.material(tile), Some(MaterialRole::PersistSelected));

        controller.deselect(&mut host, &registry);
        controller.select(&mut host, &registry, temp);
        assert_eq!(host.material(tile), Some(MaterialRole::PersistUnselected));
        assert_eq!(host.material(temp), Some(MaterialRole::TempSelected));
        assert_eq!(
            controller.selected(),
            Some(SelectedCell {
                kind: CellKind::Tile,
                index: 1,
                handle: temp
            })
        );
    }

    #[test]
    fn test_toggle_twice_restores_role() {
        let (mut host, mut registry, id, _) = setup();
        let mut controller = EditSelectionController::new();
        controller.begin_session(
            &mut host,
            &mut registry,
            id,
            CellKind::Tile,
            &ToolSettings::default(),
        );
        let temp = controller.temp_at(1).unwrap();
        controller.select(&mut host, &registry, temp);

        controller.toggle_persistence(&mut host, &mut registry);
        assert_eq!(registry.get(id).unwrap().grid().tile(1), Some(temp));
        assert_eq!(controller.temp_at(1), None);
        assert_eq!(host.material(temp), Some(MaterialRole::PersistSelected));

        controller.toggle_persistence(&mut host, &mut registry);
        assert_eq!(registry.get(id).unwrap().grid().tile(1), None);
        assert_eq!(controller.temp_at(1), Some(temp));
        assert_eq!(host.material(temp), Some(MaterialRole::TempSelected));
    }

    #[test]
    fn test_bounds_not_duplicated() {
        let (mut host, mut registry, id, _) = setup();
        let mut controller = EditSelectionController::new();

        controller.show_bounds(&mut host, &mut registry, id, 2);
        controller.show_bounds(&mut host, &mut registry, id, 2);
        assert_eq!(host.count(|call| matches!(call, HostCall::SpawnBounds(_))), 1);

        let (_, handle) = controller.bounds().unwrap();
        assert_eq!(registry.owner_of(handle), Some(id));

        controller.hide_bounds(&mut host, &mut registry);
        assert!(host.destroyed(handle));
        assert!(controller.bounds().is_none());
    }

    #[test]
    fn test_placement_indicator() {
        let mut host = RecordingHost::new();
        let mut controller = EditSelectionController::new();

        controller.show_placement(&mut host, [0.0; 3]);
        controller.show_placement(&mut host, [0.0; 3]);
        let gizmo = controller.placement().unwrap();
        assert_eq!(
            host.count(|call| matches!(call, HostCall::CreateGizmo(..))),
            1
        );

        controller.hide_placement(&mut host);
        assert_eq!(host.gizmo_visible(gizmo), None);
        assert!(controller.placement().is_none());
    }
}
