//! Bevy integration: a [`SceneHost`] over a `World` and the plugin that
//! feeds editor input to the room tool
//!
//! Scene objects, room actors and gizmos are all plain entities. Handles
//! handed to the tool are the entity bits, so they survive round trips
//! through the tool untouched.

use crate::host::{GizmoKind, MaterialRole, SceneChild, SceneHost, SceneRoom};
use crate::properties::FieldChange;
use crate::registry::RoomListSnapshot;
use crate::tool::RoomTool;
use crate::{ClickHit, RoomToolError};
use bevy::prelude::*;
use room_grid_core::{
    BoundsBox, CellKind, GizmoHandle, MeshRef, ObjectHandle, RoomSize, RoomTransform,
    ToolSettings,
};

// ============================================================================
// Components and resources
// ============================================================================

/// Root entity of a room; cells are its children
#[derive(Component, Debug, Clone, Copy)]
pub struct RoomActor {
    pub size: RoomSize,
    /// Height in metres
    pub height: u32,
}

/// A tile or wall belonging to a room
#[derive(Component, Debug, Clone, Copy)]
pub struct CellObject {
    pub kind: CellKind,
}

/// Mesh asset path shown by a cell
#[derive(Component, Debug, Clone)]
pub struct CellMesh(pub MeshRef);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMaterial(pub MaterialRole);

/// Selection overlay around the room being managed
#[derive(Component, Debug, Clone, Copy)]
pub struct RoomBounds {
    pub scale: Vec3,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ToolGizmo(pub GizmoKind);

/// Tool settings saved with the scene
#[derive(Resource, Debug, Clone)]
pub struct SceneRoomSettings(pub ToolSettings);

/// Room actor mirrored in the editor's own selection
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SelectedRoom(pub Option<Entity>);

// ============================================================================
// WorldHost
// ============================================================================

pub struct WorldHost<'w> {
    world: &'w mut World,
}

impl<'w> WorldHost<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

pub fn object_handle(entity: Entity) -> ObjectHandle {
    ObjectHandle(entity.to_bits())
}

pub fn gizmo_handle(entity: Entity) -> GizmoHandle {
    GizmoHandle(entity.to_bits())
}

fn object_entity(handle: ObjectHandle) -> Entity {
    Entity::from_bits(handle.0)
}

fn gizmo_entity(handle: GizmoHandle) -> Entity {
    Entity::from_bits(handle.0)
}

fn to_transform(transform: &RoomTransform) -> Transform {
    Transform::from_translation(Vec3::from_array(transform.translation))
        .with_rotation(Quat::from_rotation_z(transform.yaw_degrees.to_radians()))
}

fn from_transform(transform: &Transform) -> RoomTransform {
    let (yaw, _, _) = transform.rotation.to_euler(EulerRot::ZYX);
    RoomTransform {
        translation: transform.translation.to_array(),
        yaw_degrees: yaw.to_degrees(),
    }
}

impl SceneHost for WorldHost<'_> {
    fn spawn_room(
        &mut self,
        transform: &RoomTransform,
        size: RoomSize,
        height: u32,
    ) -> ObjectHandle {
        let entity = self
            .world
            .spawn((
                RoomActor { size, height },
                to_transform(transform),
                Visibility::Visible,
                Name::new("Room"),
            ))
            .id();
        object_handle(entity)
    }

    fn set_room_size(&mut self, room: ObjectHandle, size: RoomSize) {
        if let Some(mut actor) = self.world.get_mut::<RoomActor>(object_entity(room)) {
            actor.size = size;
        }
    }

    fn spawn_cell_object(
        &mut self,
        kind: CellKind,
        position: [f32; 3],
        yaw_degrees: f32,
        mesh: &MeshRef,
    ) -> ObjectHandle {
        let transform = Transform::from_translation(Vec3::from_array(position))
            .with_rotation(Quat::from_rotation_z(yaw_degrees.to_radians()));
        let entity = self
            .world
            .spawn((
                CellObject { kind },
                CellMesh(mesh.clone()),
                CellMaterial(MaterialRole::Original),
                transform,
                Visibility::Visible,
                Name::new(kind.display_name()),
            ))
            .id();
        object_handle(entity)
    }

    fn spawn_bounds(&mut self, bounds: &BoundsBox) -> ObjectHandle {
        let scale = Vec3::from_array(bounds.scale);
        let entity = self
            .world
            .spawn((
                RoomBounds { scale },
                Transform::from_translation(Vec3::from_array(bounds.center)).with_scale(scale),
                Visibility::Visible,
                Name::new("Room Bounds"),
            ))
            .id();
        object_handle(entity)
    }

    fn destroy_object(&mut self, handle: ObjectHandle) {
        let _ = self
            .world
            .get_entity_mut(object_entity(handle))
            .map(|entity| entity.despawn());
    }

    fn attach_child(&mut self, parent: ObjectHandle, child: ObjectHandle) {
        let child = object_entity(child);
        if self.world.get_entity(child).is_err() {
            return;
        }
        if let Ok(mut parent) = self.world.get_entity_mut(object_entity(parent)) {
            parent.add_child(child);
        }
    }

    fn set_material(&mut self, handle: ObjectHandle, role: MaterialRole) {
        if let Ok(mut entity) = self.world.get_entity_mut(object_entity(handle)) {
            entity.insert(CellMaterial(role));
        }
    }

    fn mesh_of(&self, handle: ObjectHandle) -> Option<MeshRef> {
        self.world
            .get::<CellMesh>(object_entity(handle))
            .map(|mesh| mesh.0.clone())
    }

    fn set_mesh(&mut self, handle: ObjectHandle, mesh: &MeshRef) {
        if let Ok(mut entity) = self.world.get_entity_mut(object_entity(handle)) {
            entity.insert(CellMesh(mesh.clone()));
        }
    }

    fn is_alive(&self, handle: ObjectHandle) -> bool {
        self.world.get_entity(object_entity(handle)).is_ok()
    }

    fn set_room_transform(&mut self, room: ObjectHandle, transform: &RoomTransform) {
        if let Some(mut current) = self.world.get_mut::<Transform>(object_entity(room)) {
            *current = to_transform(transform);
        }
    }

    fn create_gizmo(&mut self, kind: GizmoKind, transform: &RoomTransform) -> GizmoHandle {
        let entity = self
            .world
            .spawn((
                ToolGizmo(kind),
                to_transform(transform),
                Visibility::Visible,
                Name::new("Room Tool Gizmo"),
            ))
            .id();
        gizmo_handle(entity)
    }

    fn destroy_gizmo(&mut self, gizmo: GizmoHandle) {
        let _ = self
            .world
            .get_entity_mut(gizmo_entity(gizmo))
            .map(|entity| entity.despawn());
    }

    fn set_gizmo_visible(&mut self, gizmo: GizmoHandle, visible: bool) {
        if let Some(mut visibility) = self.world.get_mut::<Visibility>(gizmo_entity(gizmo)) {
            *visibility = if visible {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }

    fn set_gizmo_transform(&mut self, gizmo: GizmoHandle, transform: &RoomTransform) {
        if let Some(mut current) = self.world.get_mut::<Transform>(gizmo_entity(gizmo)) {
            *current = to_transform(transform);
        }
    }

    fn set_selected_in_host_ui(&mut self, room: Option<ObjectHandle>) {
        self.world.insert_resource(SelectedRoom(room.map(object_entity)));
    }

    fn scene_rooms(&mut self) -> Vec<SceneRoom> {
        let mut query = self
            .world
            .query::<(Entity, &RoomActor, &Transform, Option<&Children>)>();
        let found: Vec<(Entity, RoomActor, Transform, Vec<Entity>)> = query
            .iter(self.world)
            .map(|(entity, actor, transform, children)| {
                let children = children
                    .map(|children| children.iter().collect())
                    .unwrap_or_default();
                (entity, *actor, *transform, children)
            })
            .collect();

        found
            .into_iter()
            .map(|(entity, actor, transform, children)| SceneRoom {
                actor: object_handle(entity),
                size: actor.size,
                height: actor.height,
                transform: from_transform(&transform),
                children: children
                    .into_iter()
                    .filter_map(|child| {
                        let cell = self.world.get::<CellObject>(child)?;
                        let local = self.world.get::<Transform>(child)?;
                        Some(SceneChild {
                            handle: object_handle(child),
                            kind: cell.kind,
                            local_position: local.translation.to_array(),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    fn load_settings(&self) -> Option<ToolSettings> {
        self.world
            .get_resource::<SceneRoomSettings>()
            .map(|settings| settings.0.clone())
    }

    fn store_settings(&mut self, settings: &ToolSettings) {
        self.world.insert_resource(SceneRoomSettings(settings.clone()));
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Editor input forwarded to the room tool
#[derive(Debug, Clone)]
pub enum RoomToolInput {
    Setup,
    Shutdown,
    Click(Option<ClickHit>),
    FieldChanged(FieldChange),
    RoomListChanged(RoomListSnapshot),
    RoomDestroyed(ObjectHandle),
    GizmoMoved(GizmoHandle, RoomTransform),
    GizmoDestroyed(GizmoHandle),
}

/// Inputs queued since the last frame
#[derive(Resource, Debug, Default)]
pub struct RoomToolInputs {
    queue: Vec<RoomToolInput>,
}

impl RoomToolInputs {
    pub fn push(&mut self, input: RoomToolInput) {
        self.queue.push(input);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Resource, Debug, Default)]
pub struct RoomToolState {
    pub tool: RoomTool,
}

impl RoomToolState {
    fn dispatch(
        &mut self,
        host: &mut WorldHost<'_>,
        input: RoomToolInput,
    ) -> Result<(), RoomToolError> {
        match input {
            RoomToolInput::Setup => self.tool.setup(host),
            RoomToolInput::Shutdown => self.tool.shutdown(host),
            RoomToolInput::Click(hit) => return self.tool.on_click(host, hit),
            RoomToolInput::FieldChanged(change) => {
                return self.tool.on_field_changed(host, change)
            }
            RoomToolInput::RoomListChanged(edited) => {
                return self.tool.on_room_list_changed(host, edited)
            }
            RoomToolInput::RoomDestroyed(actor) => {
                return self.tool.on_room_destroyed(host, actor)
            }
            RoomToolInput::GizmoMoved(gizmo, transform) => {
                return self.tool.on_gizmo_moved(host, gizmo, transform)
            }
            RoomToolInput::GizmoDestroyed(gizmo) => self.tool.on_gizmo_destroyed(gizmo),
        }
        Ok(())
    }
}

/// Plugin running the room tool inside a Bevy app
pub struct RoomToolPlugin;

impl Plugin for RoomToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomToolInputs>()
            .init_resource::<RoomToolState>()
            .add_systems(
                Update,
                (queue_removed_objects, process_room_tool_inputs).chain(),
            );
    }
}

/// Turn despawns done outside the tool into notifications
fn queue_removed_objects(
    mut removed_rooms: RemovedComponents<RoomActor>,
    mut removed_gizmos: RemovedComponents<ToolGizmo>,
    mut inputs: ResMut<RoomToolInputs>,
) {
    for entity in removed_rooms.read() {
        inputs.push(RoomToolInput::RoomDestroyed(object_handle(entity)));
    }
    for entity in removed_gizmos.read() {
        inputs.push(RoomToolInput::GizmoDestroyed(gizmo_handle(entity)));
    }
}

fn process_room_tool_inputs(world: &mut World) {
    let inputs = match world.get_resource_mut::<RoomToolInputs>() {
        Some(mut inputs) => std::mem::take(&mut inputs.queue),
        None => return,
    };
    let delta = world
        .get_resource::<Time>()
        .map(|time| time.delta_secs())
        .unwrap_or_default();

    world.try_resource_scope(|world, mut state: Mut<RoomToolState>| {
        let mut host = WorldHost::new(world);
        for input in inputs {
            if let Err(e) = state.dispatch(&mut host, input) {
                if !e.is_fatal() {
                    warn!("Room tool input rejected: {}", e);
                }
            }
        }
        state.tool.tick(delta);
    });
}
