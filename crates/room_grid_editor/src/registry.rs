//! Registry of every room known to the tool
//!
//! Rooms are stored in an arena keyed by [`RoomId`]; the insertion order is
//! the order shown in the host's room list. Each mutation bumps a version so
//! list edits coming back from the host UI can be checked against the
//! snapshot they were made from.

use crate::RoomToolError;
use room_grid_core::{GizmoHandle, ObjectHandle, Room, RoomId};
use std::collections::HashMap;

/// Room list as exposed to (and edited by) the host UI.
/// `None` entries are list slots the user cleared or just added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomListSnapshot {
    pub version: u64,
    pub rooms: Vec<Option<RoomId>>,
}

/// What an edited room list asks the tool to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomListChange {
    Unchanged,
    /// One entry was added; spawn a new room for it
    Added,
    /// One tracked room disappeared from the list
    Removed(RoomId),
    /// The list was emptied; rooms to delete, most recent first
    Cleared(Vec<RoomId>),
}

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    order: Vec<RoomId>,
    version: u64,
    current: Option<RoomId>,
    last_active: Option<RoomId>,
    /// Weak association from scene objects (cells, overlays) to their room
    owners: HashMap<ObjectHandle, RoomId>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Room ids in insertion order
    pub fn ids(&self) -> &[RoomId] {
        &self.order
    }

    /// Rooms in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.order.iter().filter_map(|id| self.rooms.get(id))
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> RoomListSnapshot {
        RoomListSnapshot {
            version: self.version,
            rooms: self.order.iter().copied().map(Some).collect(),
        }
    }

    /// Add a room, registering ownership of the cells it already holds
    pub fn insert(&mut self, room: Room) -> RoomId {
        let id = room.id;
        for handle in room.grid().tiles().iter().chain(room.grid().walls()).flatten() {
            self.owners.insert(*handle, id);
        }
        self.order.push(id);
        self.rooms.insert(id, room);
        self.version += 1;
        id
    }

    /// Remove a room. Unknown ids are ignored, so a deletion notification
    /// arriving after an explicit delete is harmless.
    pub fn remove(&mut self, id: RoomId) -> Option<Room> {
        let room = self.rooms.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.owners.retain(|_, owner| *owner != id);
        if self.current == Some(id) {
            self.current = None;
        }
        if self.last_active == Some(id) {
            self.last_active = None;
        }
        self.version += 1;
        Some(room)
    }

    /// Compare an edited host list against the tracked rooms
    pub fn reconcile(&self, edited: &RoomListSnapshot) -> Result<RoomListChange, RoomToolError> {
        if edited.version != self.version {
            return Err(RoomToolError::StaleRoomList {
                expected: self.version,
                actual: edited.version,
            });
        }

        let tracked = self.order.len();
        let actual = edited.rooms.len();

        if actual == 0 {
            if tracked == 0 {
                return Ok(RoomListChange::Unchanged);
            }
            return Ok(RoomListChange::Cleared(
                self.order.iter().rev().copied().collect(),
            ));
        }

        if actual == tracked + 1 {
            return Ok(RoomListChange::Added);
        }

        if actual == tracked || actual + 1 == tracked {
            let missing = self
                .order
                .iter()
                .copied()
                .find(|id| !edited.rooms.contains(&Some(*id)));
            return match missing {
                Some(id) => Ok(RoomListChange::Removed(id)),
                None if actual == tracked => Ok(RoomListChange::Unchanged),
                None => Err(RoomToolError::RegistryMismatch {
                    expected: tracked,
                    actual,
                }),
            };
        }

        Err(RoomToolError::RegistryMismatch {
            expected: tracked,
            actual,
        })
    }

    pub fn current(&self) -> Option<RoomId> {
        self.current
    }

    pub fn last_active(&self) -> Option<RoomId> {
        self.last_active
    }

    /// Make a room current, remembering the previous one as last active
    pub fn set_current(&mut self, id: Option<RoomId>) {
        self.last_active = self.current.filter(|previous| self.contains(*previous));
        self.current = id.filter(|id| self.contains(*id));
    }

    /// Current room, recovering a selection when there is none.
    ///
    /// The host can invalidate rooms without telling the tool, so a current
    /// room that is no longer live is dropped first. Recovery prefers the last
    /// active room and then the first registered one.
    pub fn first_or_current(&mut self, is_live: impl Fn(&Room) -> bool) -> Option<RoomId> {
        if let Some(id) = self.current {
            if self.rooms.get(&id).is_some_and(&is_live) {
                return Some(id);
            }
            self.current = None;
        }

        let recovered = self
            .last_active
            .filter(|id| self.rooms.get(id).is_some_and(&is_live))
            .or_else(|| {
                self.order
                    .iter()
                    .copied()
                    .find(|id| self.rooms.get(id).is_some_and(&is_live))
            })?;
        self.current = Some(recovered);
        Some(recovered)
    }

    pub fn find_by_gizmo(&self, gizmo: GizmoHandle) -> Option<RoomId> {
        self.iter().find(|room| room.gizmo == Some(gizmo)).map(|room| room.id)
    }

    pub fn find_by_actor(&self, actor: ObjectHandle) -> Option<RoomId> {
        self.iter().find(|room| room.actor == actor).map(|room| room.id)
    }

    /// Record that a scene object belongs to a room
    pub fn set_owner(&mut self, handle: ObjectHandle, room: RoomId) {
        if self.contains(room) {
            self.owners.insert(handle, room);
        }
    }

    /// Room owning a scene object: its actor, a cell or an overlay
    pub fn owner_of(&self, handle: ObjectHandle) -> Option<RoomId> {
        self.owners
            .get(&handle)
            .copied()
            .or_else(|| self.find_by_actor(handle))
    }

    pub fn forget_owner(&mut self, handle: ObjectHandle) {
        self.owners.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_grid_core::{RoomSize, RoomTransform};

    fn room(actor: u64) -> Room {
        Room::new(
            ObjectHandle(actor),
            RoomSize::new(2, 2),
            2,
            RoomTransform::default(),
        )
    }

    #[test]
    fn test_insert_and_remove() {
        let mut registry = RoomRegistry::new();
        assert!(registry.is_empty());

        let a = registry.insert(room(1));
        let b = registry.insert(room(2));
        assert_eq!(registry.ids(), &[a, b]);
        assert_eq!(registry.version(), 2);

        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.ids(), &[b]);
        assert_eq!(registry.version(), 3);
    }

    #[test]
    fn test_insert_registers_cell_owners() {
        let mut registry = RoomRegistry::new();
        let mut with_cells = room(1);
        with_cells.grid_mut().set_tile(0, ObjectHandle(10));
        let id = registry.insert(with_cells);

        assert_eq!(registry.owner_of(ObjectHandle(10)), Some(id));
        assert_eq!(registry.owner_of(ObjectHandle(1)), Some(id));
        assert_eq!(registry.owner_of(ObjectHandle(99)), None);

        registry.remove(id);
        assert_eq!(registry.owner_of(ObjectHandle(10)), None);
    }

    #[test]
    fn test_reconcile_added() {
        let mut registry = RoomRegistry::new();
        registry.insert(room(1));
        let mut edited = registry.snapshot();
        edited.rooms.push(None);
        assert_eq!(registry.reconcile(&edited), Ok(RoomListChange::Added));
    }

    #[test]
    fn test_reconcile_removed_and_cleared_entry() {
        let mut registry = RoomRegistry::new();
        let a = registry.insert(room(1));
        let b = registry.insert(room(2));

        let mut removed = registry.snapshot();
        removed.rooms.remove(0);
        assert_eq!(registry.reconcile(&removed), Ok(RoomListChange::Removed(a)));

        let mut cleared = registry.snapshot();
        cleared.rooms[1] = None;
        assert_eq!(registry.reconcile(&cleared), Ok(RoomListChange::Removed(b)));

        assert_eq!(
            registry.reconcile(&registry.snapshot()),
            Ok(RoomListChange::Unchanged)
        );
    }

    #[test]
    fn test_reconcile_emptied_reverse_order() {
        let mut registry = RoomRegistry::new();
        let a = registry.insert(room(1));
        let b = registry.insert(room(2));
        let c = registry.insert(room(3));

        let edited = RoomListSnapshot {
            version: registry.version(),
            rooms: Vec::new(),
        };
        assert_eq!(
            registry.reconcile(&edited),
            Ok(RoomListChange::Cleared(vec![c, b, a]))
        );
    }

    #[test]
    fn test_reconcile_rejects_other_deltas() {
        let mut registry = RoomRegistry::new();
        registry.insert(room(1));
        registry.insert(room(2));
        registry.insert(room(3));

        let mut edited = registry.snapshot();
        edited.rooms.truncate(1);
        assert_eq!(
            registry.reconcile(&edited),
            Err(RoomToolError::RegistryMismatch {
                expected: 3,
                actual: 1
            })
        );

        let mut grown = registry.snapshot();
        grown.rooms.extend([None, None]);
        assert!(matches!(
            registry.reconcile(&grown),
            Err(RoomToolError::RegistryMismatch { .. })
        ));
    }

    #[test]
    fn test_reconcile_rejects_stale_snapshot() {
        let mut registry = RoomRegistry::new();
        let stale = registry.snapshot();
        registry.insert(room(1));
        assert_eq!(
            registry.reconcile(&stale),
            Err(RoomToolError::StaleRoomList {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_set_current_tracks_last_active() {
        let mut registry = RoomRegistry::new();
        let a = registry.insert(room(1));
        let b = registry.insert(room(2));

        registry.set_current(Some(a));
        registry.set_current(Some(b));
        assert_eq!(registry.current(), Some(b));
        assert_eq!(registry.last_active(), Some(a));

        registry.set_current(None);
        assert_eq!(registry.current(), None);
        assert_eq!(registry.last_active(), Some(b));
    }

    #[test]
    fn test_first_or_current_recovery() {
        let mut registry = RoomRegistry::new();
        assert_eq!(registry.first_or_current(|_| true), None);

        let a = registry.insert(room(1));
        let b = registry.insert(room(2));

        // Nothing selected: first entry
        assert_eq!(registry.first_or_current(|_| true), Some(a));

        // Current room died in the host: fall back to last active
        registry.set_current(Some(b));
        registry.set_current(Some(a));
        assert_eq!(
            registry.first_or_current(|room| room.actor != ObjectHandle(1)),
            Some(b)
        );
        assert_eq!(registry.current(), Some(b));
    }

    #[test]
    fn test_removing_current_clears_reference() {
        let mut registry = RoomRegistry::new();
        let a = registry.insert(room(1));
        let b = registry.insert(room(2));
        registry.set_current(Some(a));

        registry.remove(a);
        assert_eq!(registry.current(), None);
        assert_eq!(registry.first_or_current(|_| true), Some(b));

        registry.remove(b);
        assert_eq!(registry.first_or_current(|_| true), None);
    }
}
