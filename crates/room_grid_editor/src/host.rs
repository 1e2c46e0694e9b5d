//! Boundary between the room tool and the editor hosting it
//!
//! The tool never touches scene objects directly. Everything it spawns,
//! destroys, re-materials or selects goes through [`SceneHost`], and every
//! scene query (liveness, meshes, pre-existing rooms) comes back through it.

use room_grid_core::{
    BoundsBox, CellKind, GizmoHandle, MeshRef, ObjectHandle, Room, RoomSize, RoomTransform,
    ToolSettings,
};

/// Material variant applied to a cell object while an edit mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    /// The mesh's own materials, used outside the edit modes
    Original,
    TempSelected,
    TempUnselected,
    PersistSelected,
    PersistUnselected,
}

impl MaterialRole {
    /// Material for a cell of the given role and selection state
    pub fn for_cell(persistent: bool, selected: bool) -> Self {
        match (persistent, selected) {
            (true, true) => MaterialRole::PersistSelected,
            (true, false) => MaterialRole::PersistUnselected,
            (false, true) => MaterialRole::TempSelected,
            (false, false) => MaterialRole::TempUnselected,
        }
    }
}

/// What a gizmo manipulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoKind {
    /// Translate/rotate handle bound to a room
    Room,
    /// Free-floating indicator for where the next room spawns
    Placement,
}

/// Kind of object a viewport ray hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Tile,
    Wall,
    Room,
    Other,
}

impl HitKind {
    pub fn cell_kind(&self) -> Option<CellKind> {
        match self {
            HitKind::Tile => Some(CellKind::Tile),
            HitKind::Wall => Some(CellKind::Wall),
            HitKind::Room | HitKind::Other => None,
        }
    }
}

/// Result of the host's ray cast for a viewport click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickHit {
    /// World-space hit point in centimetres
    pub point: [f32; 3],
    pub object: ObjectHandle,
    pub kind: HitKind,
}

/// A cell object found attached to a room in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneChild {
    pub handle: ObjectHandle,
    pub kind: CellKind,
    /// Position relative to the room origin
    pub local_position: [f32; 3],
}

/// A room actor that already exists in the scene when the tool starts
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRoom {
    pub actor: ObjectHandle,
    pub size: RoomSize,
    pub height: u32,
    pub transform: RoomTransform,
    pub children: Vec<SceneChild>,
}

/// Scene, gizmo and UI services the room tool relies on.
///
/// Calls are assumed to succeed; the tool does not retry or re-verify them.
pub trait SceneHost {
    /// Spawn an empty room actor
    fn spawn_room(&mut self, transform: &RoomTransform, size: RoomSize, height: u32)
        -> ObjectHandle;

    /// Record a room's new footprint on its actor
    fn set_room_size(&mut self, room: ObjectHandle, size: RoomSize);

    /// Spawn a tile or wall at a room-local position
    fn spawn_cell_object(
        &mut self,
        kind: CellKind,
        position: [f32; 3],
        yaw_degrees: f32,
        mesh: &MeshRef,
    ) -> ObjectHandle;

    /// Spawn the selection overlay box
    fn spawn_bounds(&mut self, bounds: &BoundsBox) -> ObjectHandle;

    fn destroy_object(&mut self, handle: ObjectHandle);

    /// Attach `child` to `parent`, keeping its relative transform
    fn attach_child(&mut self, parent: ObjectHandle, child: ObjectHandle);

    fn set_material(&mut self, handle: ObjectHandle, role: MaterialRole);

    /// Mesh of a cell object; `None` when its mesh component is gone
    fn mesh_of(&self, handle: ObjectHandle) -> Option<MeshRef>;

    fn set_mesh(&mut self, handle: ObjectHandle, mesh: &MeshRef);

    /// Whether the object still exists and is not pending destruction
    fn is_alive(&self, handle: ObjectHandle) -> bool;

    fn set_room_transform(&mut self, room: ObjectHandle, transform: &RoomTransform);

    fn create_gizmo(&mut self, kind: GizmoKind, transform: &RoomTransform) -> GizmoHandle;

    fn destroy_gizmo(&mut self, gizmo: GizmoHandle);

    fn set_gizmo_visible(&mut self, gizmo: GizmoHandle, visible: bool);

    fn set_gizmo_transform(&mut self, gizmo: GizmoHandle, transform: &RoomTransform);

    /// Mirror the current room in the host's own selection
    fn set_selected_in_host_ui(&mut self, room: Option<ObjectHandle>);

    /// Room actors already present in the scene, with their attached cells
    fn scene_rooms(&mut self) -> Vec<SceneRoom>;

    /// Settings object stored with the scene, if any
    fn load_settings(&self) -> Option<ToolSettings>;

    fn store_settings(&mut self, settings: &ToolSettings);

    /// Spawn the cell object for one slot of a room and attach it to the room
    fn spawn_slot(
        &mut self,
        room: &Room,
        kind: CellKind,
        index: usize,
        tile_size_cm: u32,
        mesh: &MeshRef,
    ) -> ObjectHandle {
        let position = room.slot_position(kind, index, tile_size_cm);
        let handle = self.spawn_cell_object(kind, position, room.slot_yaw(kind, index), mesh);
        self.attach_child(room.actor, handle);
        handle
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Host double that records every call for assertions

    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        SpawnRoom(ObjectHandle),
        SpawnCell {
            kind: CellKind,
            handle: ObjectHandle,
            position: [f32; 3],
            yaw_degrees: f32,
        },
        SpawnBounds(ObjectHandle),
        Destroy(ObjectHandle),
        Attach {
            parent: ObjectHandle,
            child: ObjectHandle,
        },
        SetMaterial(ObjectHandle, MaterialRole),
        SetMesh(ObjectHandle, MeshRef),
        SetRoomTransform(ObjectHandle, RoomTransform),
        SetRoomSize(ObjectHandle, RoomSize),
        CreateGizmo(GizmoKind, GizmoHandle),
        DestroyGizmo(GizmoHandle),
        SetGizmoVisible(GizmoHandle, bool),
        SetGizmoTransform(GizmoHandle, RoomTransform),
        SelectInUi(Option<ObjectHandle>),
        StoreSettings,
    }

    #[derive(Default)]
    pub struct RecordingHost {
        next_object: u64,
        next_gizmo: u64,
        pub calls: Vec<HostCall>,
        pub alive: HashSet<ObjectHandle>,
        pub gizmos: HashMap<GizmoHandle, bool>,
        pub meshes: HashMap<ObjectHandle, MeshRef>,
        pub materials: HashMap<ObjectHandle, MaterialRole>,
        pub cells: HashMap<ObjectHandle, CellKind>,
        pub settings: Option<ToolSettings>,
        pub scene: Vec<SceneRoom>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        /// Allocate a handle for an object the scene already contains
        pub fn preexisting(&mut self, mesh: Option<MeshRef>) -> ObjectHandle {
            let handle = self.allocate();
            if let Some(mesh) = mesh {
                self.meshes.insert(handle, mesh);
            }
            handle
        }

        /// Simulate the mesh component being deleted in the scene
        pub fn strip_mesh(&mut self, handle: ObjectHandle) {
            self.meshes.remove(&handle);
        }

        /// Live cell objects of one kind
        pub fn live_cells(&self, kind: CellKind) -> usize {
            self.cells
                .iter()
                .filter(|(handle, k)| **k == kind && self.alive.contains(handle))
                .count()
        }

        pub fn material(&self, handle: ObjectHandle) -> Option<MaterialRole> {
            self.materials.get(&handle).copied()
        }

        pub fn gizmo_visible(&self, gizmo: GizmoHandle) -> Option<bool> {
            self.gizmos.get(&gizmo).copied()
        }

        pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
            self.calls.iter().filter(|call| predicate(call)).count()
        }

        pub fn destroyed(&self, handle: ObjectHandle) -> bool {
            self.calls.contains(&HostCall::Destroy(handle))
        }

        fn allocate(&mut self) -> ObjectHandle {
            self.next_object += 1;
            let handle = ObjectHandle(self.next_object);
            self.alive.insert(handle);
            handle
        }
    }

    impl SceneHost for RecordingHost {
        fn spawn_room(
            &mut self,
            _transform: &RoomTransform,
            _size: RoomSize,
            _height: u32,
        ) -> ObjectHandle {
            let handle = self.allocate();
            self.calls.push(HostCall::SpawnRoom(handle));
            handle
        }

        fn set_room_size(&mut self, room: ObjectHandle, size: RoomSize) {
            self.calls.push(HostCall::SetRoomSize(room, size));
        }

        fn spawn_cell_object(
            &mut self,
            kind: CellKind,
            position: [f32; 3],
            yaw_degrees: f32,
            mesh: &MeshRef,
        ) -> ObjectHandle {
            let handle = self.allocate();
            self.meshes.insert(handle, mesh.clone());
            self.cells.insert(handle, kind);
            self.calls.push(HostCall::SpawnCell {
                kind,
                handle,
                position,
                yaw_degrees,
            });
            handle
        }

        fn spawn_bounds(&mut self, _bounds: &BoundsBox) -> ObjectHandle {
            let handle = self.allocate();
            self.calls.push(HostCall::SpawnBounds(handle));
            handle
        }

        fn destroy_object(&mut self, handle: ObjectHandle) {
            self.alive.remove(&handle);
            self.calls.push(HostCall::Destroy(handle));
        }

        fn attach_child(&mut self, parent: ObjectHandle, child: ObjectHandle) {
            self.calls.push(HostCall::Attach { parent, child });
        }

        fn set_material(&mut self, handle: ObjectHandle, role: MaterialRole) {
            self.materials.insert(handle, role);
            self.calls.push(HostCall::SetMaterial(handle, role));
        }

        fn mesh_of(&self, handle: ObjectHandle) -> Option<MeshRef> {
            self.meshes.get(&handle).cloned()
        }

        fn set_mesh(&mut self, handle: ObjectHandle, mesh: &MeshRef) {
            self.meshes.insert(handle, mesh.clone());
            self.calls.push(HostCall::SetMesh(handle, mesh.clone()));
        }

        fn is_alive(&self, handle: ObjectHandle) -> bool {
            self.alive.contains(&handle)
        }

        fn set_room_transform(&mut self, room: ObjectHandle, transform: &RoomTransform) {
            self.calls.push(HostCall::SetRoomTransform(room, *transform));
        }

        fn create_gizmo(&mut self, kind: GizmoKind, _transform: &RoomTransform) -> GizmoHandle {
            self.next_gizmo += 1;
            let gizmo = GizmoHandle(self.next_gizmo);
            self.gizmos.insert(gizmo, true);
            self.calls.push(HostCall::CreateGizmo(kind, gizmo));
            gizmo
        }

        fn destroy_gizmo(&mut self, gizmo: GizmoHandle) {
            self.gizmos.remove(&gizmo);
            self.calls.push(HostCall::DestroyGizmo(gizmo));
        }

        fn set_gizmo_visible(&mut self, gizmo: GizmoHandle, visible: bool) {
            if let Some(state) = self.gizmos.get_mut(&gizmo) {
                *state = visible;
            }
            self.calls.push(HostCall::SetGizmoVisible(gizmo, visible));
        }

        fn set_gizmo_transform(&mut self, gizmo: GizmoHandle, transform: &RoomTransform) {
            self.calls.push(HostCall::SetGizmoTransform(gizmo, *transform));
        }

        fn set_selected_in_host_ui(&mut self, room: Option<ObjectHandle>) {
            self.calls.push(HostCall::SelectInUi(room));
        }

        fn scene_rooms(&mut self) -> Vec<SceneRoom> {
            std::mem::take(&mut self.scene)
        }

        fn load_settings(&self) -> Option<ToolSettings> {
            self.settings.clone()
        }

        fn store_settings(&mut self, settings: &ToolSettings) {
            self.settings = Some(settings.clone());
            self.calls.push(HostCall::StoreSettings);
        }
    }
}
