//! The room tool: routes clicks, property edits and host notifications to
//! the registry and the edit selection controller

use crate::host::{ClickHit, GizmoKind, SceneChild, SceneHost, SceneRoom};
use crate::preferences::RoomToolPreferences;
use crate::properties::{FieldChange, ToolProperties};
use crate::registry::{RoomListChange, RoomListSnapshot, RoomRegistry};
use crate::selection::{ClickAction, EditMode, EditSelectionController};
use crate::RoomToolError;
use bevy::log::{debug, error, info, warn};
use room_grid_core::{
    CellKind, GizmoHandle, GridIndexer, MeshRef, ObjectHandle, Room, RoomId, RoomTransform,
    ToolSettings,
};

/// Interactive room construction tool.
///
/// Holds all session state; the scene host is passed into every handler.
/// A fatal error latches the tool: every later handler returns
/// [`RoomToolError::Faulted`] until [`RoomTool::shutdown`] and a new
/// [`RoomTool::setup`].
#[derive(Debug, Default)]
pub struct RoomTool {
    properties: ToolProperties,
    registry: RoomRegistry,
    controller: EditSelectionController,
    fault: Option<RoomToolError>,
}

impl RoomTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &ToolProperties {
        &self.properties
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.properties.settings
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &EditSelectionController {
        &self.controller
    }

    pub fn mode(&self) -> EditMode {
        self.controller.mode()
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.registry.current()
    }

    /// Room list for the host's list widget
    pub fn room_list(&self) -> RoomListSnapshot {
        self.registry.snapshot()
    }

    /// The fatal error the tool is latched on, if any
    pub fn fault(&self) -> Option<&RoomToolError> {
        self.fault.as_ref()
    }

    /// Start a session, seeding scenes without settings from the user's
    /// preferences file
    pub fn setup(&mut self, host: &mut dyn SceneHost) {
        let defaults = RoomToolPreferences::load().default_settings;
        self.setup_with_defaults(host, defaults);
    }

    /// Start a session: load settings, adopt the rooms already in the scene
    /// and show the placement indicator
    pub fn setup_with_defaults(&mut self, host: &mut dyn SceneHost, defaults: ToolSettings) {
        *self = Self::default();

        let settings = match host.load_settings() {
            Some(settings) => settings,
            None => {
                host.store_settings(&defaults);
                defaults
            }
        };
        self.properties = ToolProperties::new(settings);

        for scene_room in host.scene_rooms() {
            self.adopt_room(host, scene_room);
        }

        let visibility = self.apply_gizmo_visibility(host);
        let _ = self.latch(visibility);
        let spawn_position = self.properties.settings.spawn_position;
        self.controller.show_placement(host, spawn_position);

        info!("Room tool started with {} rooms", self.registry.len());
    }

    /// End the session: restore cell materials, destroy every gizmo and
    /// overlay, forget all bookkeeping and clear the fault latch
    pub fn shutdown(&mut self, host: &mut dyn SceneHost) {
        self.controller.end_session(host, &mut self.registry);
        self.controller.hide_bounds(host, &mut self.registry);
        self.controller.hide_placement(host);

        for gizmo in self.registry.iter().filter_map(|room| room.gizmo) {
            host.destroy_gizmo(gizmo);
        }

        info!("Room tool shut down");
        *self = Self::default();
    }

    /// Per-frame hook
    pub fn tick(&mut self, _delta_seconds: f32) {}

    /// Handle a viewport click. `None` means the ray hit nothing.
    pub fn on_click(
        &mut self,
        host: &mut dyn SceneHost,
        hit: Option<ClickHit>,
    ) -> Result<(), RoomToolError> {
        self.ensure_healthy()?;
        let result = self.handle_click(host, hit);
        self.latch(result)
    }

    /// Handle an edit in the property panel
    pub fn on_field_changed(
        &mut self,
        host: &mut dyn SceneHost,
        change: FieldChange,
    ) -> Result<(), RoomToolError> {
        self.ensure_healthy()?;
        let result = self.handle_field_change(host, change);
        self.latch(result)
    }

    /// Handle an edit of the room list widget
    pub fn on_room_list_changed(
        &mut self,
        host: &mut dyn SceneHost,
        edited: RoomListSnapshot,
    ) -> Result<(), RoomToolError> {
        self.ensure_healthy()?;
        let result = self.handle_room_list(host, &edited);
        self.latch(result)
    }

    /// The host destroyed a room actor
    pub fn on_room_destroyed(
        &mut self,
        host: &mut dyn SceneHost,
        actor: ObjectHandle,
    ) -> Result<(), RoomToolError> {
        self.ensure_healthy()?;
        let Some(id) = self.registry.find_by_actor(actor) else {
            return Ok(());
        };
        let result = self.delete_room(host, id);
        self.latch(result)
    }

    /// A gizmo was dragged to a new transform
    pub fn on_gizmo_moved(
        &mut self,
        host: &mut dyn SceneHost,
        gizmo: GizmoHandle,
        transform: RoomTransform,
    ) -> Result<(), RoomToolError> {
        self.ensure_healthy()?;
        let result = self.handle_gizmo_moved(host, gizmo, transform);
        self.latch(result)
    }

    /// A gizmo disappeared without the tool's involvement, e.g. through the
    /// host's undo history. The owning room becomes invalid.
    pub fn on_gizmo_destroyed(&mut self, gizmo: GizmoHandle) {
        if let Some(id) = self.registry.find_by_gizmo(gizmo) {
            warn!("Gizmo of room {} was destroyed outside the room tool", id);
            if let Some(room) = self.registry.get_mut(id) {
                room.gizmo = None;
            }
        }
    }

    fn ensure_healthy(&self) -> Result<(), RoomToolError> {
        match self.fault {
            Some(_) => Err(RoomToolError::Faulted),
            None => Ok(()),
        }
    }

    /// Latch fatal errors so the tool refuses further work
    fn latch<T>(&mut self, result: Result<T, RoomToolError>) -> Result<T, RoomToolError> {
        if let Err(e) = &result {
            if e.is_fatal() {
                error!("{}", e);
                self.fault = Some(e.clone());
            }
        }
        result
    }

    fn persist(&self, host: &mut dyn SceneHost) {
        host.store_settings(&self.properties.settings);
    }

    fn is_live(host: &dyn SceneHost, room: &Room) -> bool {
        host.is_alive(room.actor)
    }

    fn gizmo_of(&self, id: RoomId) -> Result<GizmoHandle, RoomToolError> {
        self.registry
            .get(id)
            .and_then(|room| room.gizmo)
            .ok_or(RoomToolError::InvalidRoomState { room: id })
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Register a room found in the scene, rebuilding its slots from the
    /// positions of its attached cells
    fn adopt_room(&mut self, host: &mut dyn SceneHost, scene_room: SceneRoom) {
        let mut room = Room::new(
            scene_room.actor,
            scene_room.size,
            scene_room.height,
            scene_room.transform,
        );
        let indexer = room.indexer(self.properties.settings.tile_size_cm());

        for child in &scene_room.children {
            match Self::child_slot(&indexer, child) {
                Ok(index) => room.grid_mut().set(child.kind, index, child.handle),
                Err(e) => debug!(
                    "Ignoring {} {:?} of room {:?}: {}",
                    child.kind.display_name(),
                    child.handle,
                    scene_room.actor,
                    e
                ),
            }
        }

        room.gizmo = Some(host.create_gizmo(GizmoKind::Room, &room.transform));
        let id = self.registry.insert(room);
        info!(
            "Adopted room {} ({} children) from scene",
            id,
            scene_room.children.len()
        );
    }

    /// Slot a scene child occupies, from its room-local position
    fn child_slot(indexer: &GridIndexer, child: &SceneChild) -> Result<usize, RoomToolError> {
        let index = match child.kind {
            CellKind::Tile => indexer.tile_index_of(child.local_position)?,
            CellKind::Wall => indexer.wall_index_of(child.local_position)?,
        };
        Ok(index)
    }

    /// Spawn a room with the default fill at the spawn position and make it
    /// current
    pub fn spawn_room(&mut self, host: &mut dyn SceneHost) -> Result<RoomId, RoomToolError> {
        let settings = &self.properties.settings;
        let transform = RoomTransform::from_translation(settings.spawn_position);
        let actor = host.spawn_room(&transform, settings.room_size, settings.init_height);
        let mut room = Room::new(actor, settings.room_size, settings.init_height, transform);

        let gizmo = host.create_gizmo(GizmoKind::Room, &transform);
        if self.mode() == EditMode::CreateRooms && !settings.show_all_gizmos {
            host.set_gizmo_visible(gizmo, false);
        }
        room.gizmo = Some(gizmo);

        let size = room.size();
        let id = self.registry.insert(room);
        self.fill_default(host, id, CellKind::Tile);
        self.fill_default(host, id, CellKind::Wall);
        self.set_current_room(host, Some(id))?;

        info!("Spawned room {} ({}x{})", id, size.width, size.height);
        Ok(id)
    }

    /// Delete a room with all its cells and its gizmo. Unknown rooms are
    /// ignored.
    pub fn delete_room(&mut self, host: &mut dyn SceneHost, id: RoomId) -> Result<(), RoomToolError> {
        if !self.registry.contains(id) {
            return Ok(());
        }
        if self.registry.current() == Some(id) {
            self.set_current_room(host, None)?;
        }

        // Only the deleted room's session and overlay go away
        let was_active = self.controller.session_room() == Some(id)
            || self.controller.bounds().is_some_and(|(room, _)| room == id);
        if was_active {
            self.controller.hide_bounds(host, &mut self.registry);
            self.controller.end_session(host, &mut self.registry);
        }

        let Some(mut room) = self.registry.remove(id) else {
            return Ok(());
        };
        if let Some(gizmo) = room.gizmo {
            host.destroy_gizmo(gizmo);
        }
        for handle in room.grid_mut().drain_all() {
            host.destroy_object(handle);
        }
        if host.is_alive(room.actor) {
            host.destroy_object(room.actor);
        }
        info!("Deleted room {}", id);

        let recovered = self.try_current_room(host)?;
        if was_active && recovered.is_some() && self.mode() != EditMode::CreateRooms {
            self.enter_mode(host)?;
        }
        Ok(())
    }

    /// Current room, recovering the last active or first room when the
    /// current one is gone
    pub fn try_current_room(
        &mut self,
        host: &mut dyn SceneHost,
    ) -> Result<Option<RoomId>, RoomToolError> {
        let previous = self.registry.current();
        let found = self
            .registry
            .first_or_current(|room| Self::is_live(&*host, room));
        if found.is_some() && found != previous {
            self.set_current_room(host, found)?;
        }
        Ok(found)
    }

    /// Make a room current, updating gizmo visibility, the selection overlay
    /// and the host selection
    pub fn set_current_room(
        &mut self,
        host: &mut dyn SceneHost,
        id: Option<RoomId>,
    ) -> Result<(), RoomToolError> {
        let mode = self.mode();
        let show_all = self.properties.settings.show_all_gizmos;

        let previous = self
            .registry
            .current()
            .filter(|prev| self.registry.get(*prev).is_some_and(|room| Self::is_live(&*host, room)));
        if let Some(prev) = previous {
            let gizmo = self.gizmo_of(prev)?;
            if Some(prev) != id {
                self.controller.hide_bounds(host, &mut self.registry);
            }
            host.set_gizmo_visible(gizmo, show_all);
        }

        if self.registry.current() != id {
            self.registry.set_current(id);
        }

        let Some(id) = id else {
            return Ok(());
        };
        let gizmo = self.gizmo_of(id)?;

        if mode == EditMode::ManageRooms {
            self.controller.show_bounds(
                host,
                &mut self.registry,
                id,
                self.properties.settings.tile_size,
            );
            self.pull_room_properties(id);
        }

        host.set_gizmo_visible(gizmo, mode != EditMode::CreateRooms || show_all);
        self.properties.room_selection = Some(id);
        if let Some(room) = self.registry.get(id) {
            host.set_selected_in_host_ui(Some(room.actor));
        }
        Ok(())
    }

    /// Copy a room's size and height into the panel
    fn pull_room_properties(&mut self, id: RoomId) {
        if let Some(room) = self.registry.get(id) {
            self.properties.settings.room_size = room.size();
            self.properties.settings.init_height = room.height;
        }
    }

    /// Change the current room, restarting the edit session around it
    fn switch_room(&mut self, host: &mut dyn SceneHost, id: RoomId) -> Result<(), RoomToolError> {
        if self.registry.current() == Some(id) {
            return Ok(());
        }
        self.controller.end_session(host, &mut self.registry);
        self.set_current_room(host, Some(id))?;
        self.enter_mode(host)
    }

    /// Resize the current room to the panel's room size. Only in ManageRooms.
    pub fn resize_current_room(&mut self, host: &mut dyn SceneHost) -> Result<(), RoomToolError> {
        if self.mode() != EditMode::ManageRooms {
            return Ok(());
        }
        let Some(id) = self.try_current_room(host)? else {
            return Ok(());
        };

        let tile_size_cm = self.properties.settings.tile_size_cm();
        let new_size = self.properties.settings.room_size;
        let floor_mesh = self.properties.settings.floor_mesh.clone();
        let Some(room) = self.registry.get_mut(id) else {
            return Ok(());
        };

        let outcome = room.resize(new_size);
        if outcome.is_empty() {
            return Ok(());
        }
        host.set_room_size(room.actor, room.size());

        let mut spawned = Vec::with_capacity(outcome.new_tile_slots.len());
        for &index in &outcome.new_tile_slots {
            let handle = host.spawn_slot(room, CellKind::Tile, index, tile_size_cm, &floor_mesh);
            room.grid_mut().set_tile(index, handle);
            spawned.push(handle);
        }

        for handle in outcome.removed_tiles.iter().chain(&outcome.removed_walls) {
            host.destroy_object(*handle);
            self.registry.forget_owner(*handle);
        }
        for handle in spawned {
            self.registry.set_owner(handle, id);
        }

        info!(
            "Resized room {} to {}x{}: {} tiles and {} walls removed, {} tiles added",
            id,
            new_size.width,
            new_size.height,
            outcome.removed_tiles.len(),
            outcome.removed_walls.len(),
            outcome.new_tile_slots.len()
        );

        self.controller.hide_bounds(host, &mut self.registry);
        self.controller
            .show_bounds(host, &mut self.registry, id, self.properties.settings.tile_size);
        Ok(())
    }

    /// Spawn the default cells of one kind into the empty slots of a room:
    /// every tile, or the perimeter walls
    fn fill_default(&mut self, host: &mut dyn SceneHost, id: RoomId, kind: CellKind) {
        let settings = &self.properties.settings;
        let tile_size_cm = settings.tile_size_cm();
        let Some(room) = self.registry.get_mut(id) else {
            return;
        };

        let slots: Vec<usize> = match kind {
            CellKind::Tile => (0..room.grid().tiles().len()).collect(),
            CellKind::Wall => room.indexer(tile_size_cm).perimeter_wall_indices(),
        };

        let mut spawned = Vec::with_capacity(slots.len());
        for index in slots {
            if room.grid().get(kind, index).is_some() {
                continue;
            }
            let handle = host.spawn_slot(room, kind, index, tile_size_cm, settings.mesh_for(kind));
            room.grid_mut().set(kind, index, handle);
            spawned.push(handle);
        }

        for handle in spawned {
            self.registry.set_owner(handle, id);
        }
    }

    /// Destroy every cell of one kind in a room
    fn clear_cells(&mut self, host: &mut dyn SceneHost, id: RoomId, kind: CellKind) {
        let Some(room) = self.registry.get_mut(id) else {
            return;
        };
        for handle in room.grid_mut().clear(kind) {
            host.destroy_object(handle);
            self.registry.forget_owner(handle);
        }
    }

    /// Reset or clear the floor or walls of the current room
    fn rebuild_cells(&mut self, host: &mut dyn SceneHost, kind: CellKind, refill: bool) {
        if self.mode() != EditMode::ManageRooms {
            debug!("Ignoring {} rebuild outside Manage Rooms", kind.display_name());
            return;
        }
        let Some(id) = self.registry.current() else {
            return;
        };
        self.clear_cells(host, id, kind);
        if refill {
            self.fill_default(host, id, kind);
        }
    }

    // ========================================================================
    // Modes and gizmos
    // ========================================================================

    fn change_mode(&mut self, host: &mut dyn SceneHost, mode: EditMode) -> Result<(), RoomToolError> {
        self.controller.end_session(host, &mut self.registry);
        self.controller.set_mode(mode);
        self.properties.edit_mode = mode;
        debug!("Edit mode changed to {}", mode.display_name());
        self.enter_mode(host)
    }

    /// Bring the scene in line with the current mode: start an edit session
    /// for the active room, toggle the placement indicator and the overlay
    fn enter_mode(&mut self, host: &mut dyn SceneHost) -> Result<(), RoomToolError> {
        let mode = self.mode();

        if let Some(active) = self.try_current_room(host)? {
            let gizmo = self.gizmo_of(active)?;
            if let Some(kind) = mode.cell_kind() {
                self.controller.begin_session(
                    host,
                    &mut self.registry,
                    active,
                    kind,
                    &self.properties.settings,
                );
            }
            if mode != EditMode::CreateRooms {
                self.pull_room_properties(active);
                host.set_gizmo_visible(gizmo, true);
            }
        }

        if mode == EditMode::CreateRooms {
            self.set_current_room(host, None)?;
            let spawn_position = self.properties.settings.spawn_position;
            self.controller.show_placement(host, spawn_position);
        } else {
            self.controller.hide_placement(host);
        }

        match (mode, self.registry.current()) {
            (EditMode::ManageRooms, Some(id)) => self.controller.show_bounds(
                host,
                &mut self.registry,
                id,
                self.properties.settings.tile_size,
            ),
            _ => self.controller.hide_bounds(host, &mut self.registry),
        }
        Ok(())
    }

    /// Show or hide room gizmos according to the current room, the mode and
    /// the show-all flag
    fn apply_gizmo_visibility(&mut self, host: &mut dyn SceneHost) -> Result<(), RoomToolError> {
        let show_all = self.properties.settings.show_all_gizmos;
        let current_visible = self.mode() != EditMode::CreateRooms || show_all;
        let current = self.registry.current();

        for room in self.registry.iter() {
            let gizmo = room
                .gizmo
                .ok_or(RoomToolError::InvalidRoomState { room: room.id })?;
            let visible = if Some(room.id) == current {
                current_visible
            } else {
                show_all
            };
            host.set_gizmo_visible(gizmo, visible);
        }
        Ok(())
    }

    fn handle_gizmo_moved(
        &mut self,
        host: &mut dyn SceneHost,
        gizmo: GizmoHandle,
        transform: RoomTransform,
    ) -> Result<(), RoomToolError> {
        let settings = &self.properties.settings;
        let snapped = transform.snapped(settings.position_snap, settings.rotation_snap);
        let interactive = self.mode() != EditMode::CreateRooms || settings.show_all_gizmos;

        if interactive {
            if let Some(id) = self.registry.find_by_gizmo(gizmo) {
                self.switch_room(host, id)?;
                if let Some(room) = self.registry.get_mut(id) {
                    room.transform = snapped;
                    host.set_selected_in_host_ui(Some(room.actor));
                    host.set_room_transform(room.actor, &snapped);
                    host.set_gizmo_transform(gizmo, &snapped);
                }
                return Ok(());
            }
        }

        if self.mode() == EditMode::CreateRooms
            && self.controller.placement() == Some(gizmo)
            && self.properties.settings.spawn_position != snapped.translation
        {
            self.properties.settings.spawn_position = snapped.translation;
            host.set_gizmo_transform(gizmo, &snapped);
            self.persist(host);
        }
        Ok(())
    }

    // ========================================================================
    // Input
    // ========================================================================

    fn handle_click(
        &mut self,
        host: &mut dyn SceneHost,
        hit: Option<ClickHit>,
    ) -> Result<(), RoomToolError> {
        let Some(hit) = hit else {
            return Ok(());
        };

        match self.mode() {
            EditMode::CreateRooms => {
                self.properties.settings.spawn_position = hit.point;
                self.persist(host);
                self.controller.move_placement(host, hit.point);
                Ok(())
            }
            EditMode::ManageRooms => match self.registry.owner_of(hit.object) {
                Some(id) => self.set_current_room(host, Some(id)),
                None => Ok(()),
            },
            mode @ (EditMode::EditWalls | EditMode::EditTiles) => {
                if hit.kind.cell_kind() != mode.cell_kind() {
                    return Ok(());
                }
                if self.try_current_room(host)?.is_none() {
                    return Ok(());
                }
                self.handle_cell_click(host, hit.object)
            }
        }
    }

    /// Toggle, reselect or switch rooms for a click on a cell object
    fn handle_cell_click(
        &mut self,
        host: &mut dyn SceneHost,
        object: ObjectHandle,
    ) -> Result<(), RoomToolError> {
        let action = self.controller.classify_click(&self.registry, object);
        debug!("Cell click on {:?}: {:?}", object, action);

        match action {
            ClickAction::Toggle => {
                self.controller.toggle_persistence(host, &mut self.registry);
            }
            ClickAction::Reselect => {
                self.controller.deselect(host, &self.registry);
                self.select_cell(host, object);
            }
            ClickAction::SwitchRoom(id) => {
                self.controller.deselect(host, &self.registry);
                self.controller.end_session(host, &mut self.registry);
                self.set_current_room(host, Some(id))?;
                self.enter_mode(host)?;
                self.select_cell(host, object);
            }
            ClickAction::Ignore => {}
        }
        Ok(())
    }

    /// Select a cell and make its mesh the default for new cells of its kind
    fn select_cell(&mut self, host: &mut dyn SceneHost, object: ObjectHandle) {
        let Some(mesh) = self.controller.select(host, &self.registry, object) else {
            return;
        };
        if let Some(cell) = self.controller.selected() {
            self.set_default_mesh(cell.kind, mesh);
        }
    }

    fn set_default_mesh(&mut self, kind: CellKind, mesh: MeshRef) {
        match kind {
            CellKind::Tile => self.properties.settings.floor_mesh = mesh,
            CellKind::Wall => self.properties.settings.wall_mesh = mesh,
        }
    }

    fn handle_field_change(
        &mut self,
        host: &mut dyn SceneHost,
        change: FieldChange,
    ) -> Result<(), RoomToolError> {
        match change {
            FieldChange::EditMode(mode) => self.change_mode(host, mode),
            FieldChange::ShowAllGizmos(_) => {
                self.properties.apply(&change);
                self.persist(host);
                self.apply_gizmo_visibility(host)
            }
            FieldChange::RoomSize(_) => {
                self.properties.apply(&change);
                self.persist(host);
                self.resize_current_room(host)
            }
            FieldChange::SpawnPosition(position) => {
                self.properties.apply(&change);
                self.persist(host);
                self.controller.move_placement(host, position);
                Ok(())
            }
            FieldChange::PositionSnap(_)
            | FieldChange::RotationSnap(_)
            | FieldChange::TileSize(_)
            | FieldChange::InitHeight(_) => {
                self.properties.apply(&change);
                self.persist(host);
                Ok(())
            }
            FieldChange::FloorMesh(ref mesh) => {
                self.change_mesh(host, CellKind::Tile, mesh.clone());
                Ok(())
            }
            FieldChange::WallMesh(ref mesh) => {
                self.change_mesh(host, CellKind::Wall, mesh.clone());
                Ok(())
            }
            FieldChange::ResetFloor => {
                self.rebuild_cells(host, CellKind::Tile, true);
                Ok(())
            }
            FieldChange::ClearFloor => {
                self.rebuild_cells(host, CellKind::Tile, false);
                Ok(())
            }
            FieldChange::ResetWalls => {
                self.rebuild_cells(host, CellKind::Wall, true);
                Ok(())
            }
            FieldChange::ClearWalls => {
                self.rebuild_cells(host, CellKind::Wall, false);
                Ok(())
            }
            FieldChange::RoomSelection(id) => {
                let live = self
                    .registry
                    .get(id)
                    .is_some_and(|room| Self::is_live(&*host, room));
                if live {
                    self.switch_room(host, id)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Re-mesh the selected cell, or store the mesh as the spawn default
    fn change_mesh(&mut self, host: &mut dyn SceneHost, kind: CellKind, mesh: MeshRef) {
        match self.controller.selected() {
            Some(cell) => {
                if cell.kind == kind && self.mode().cell_kind() == Some(kind) {
                    host.set_mesh(cell.handle, &mesh);
                }
                self.set_default_mesh(kind, mesh);
            }
            None => {
                self.set_default_mesh(kind, mesh);
                self.persist(host);
            }
        }
    }

    fn handle_room_list(
        &mut self,
        host: &mut dyn SceneHost,
        edited: &RoomListSnapshot,
    ) -> Result<(), RoomToolError> {
        match self.registry.reconcile(edited)? {
            RoomListChange::Unchanged => Ok(()),
            RoomListChange::Added => self.spawn_room(host).map(|_| ()),
            RoomListChange::Removed(id) => self.delete_room(host, id),
            RoomListChange::Cleared(ids) => {
                for id in ids {
                    self.delete_room(host, id)?;
                }
                Ok(())
            }
        }
    }
}
