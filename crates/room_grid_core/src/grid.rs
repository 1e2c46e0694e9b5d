//! Tile and wall slot storage for a single room

use crate::indexer::{GridIndexer, WallOrientation};
use crate::{CellKind, ObjectHandle, RoomSize};

/// Tile size used for pure index arithmetic where positions do not matter
const INDEX_ONLY_TILE_SIZE: u32 = 100;

/// Result of a grid resize.
///
/// Removed handles belong to cells that fell outside the new bounds; the
/// caller is responsible for destroying them. Walls are never added by a
/// resize, only tiles are reported for population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Occupied tile slots carried over to the new layout
    pub migrated_tiles: usize,
    /// Occupied wall slots carried over to the new layout
    pub migrated_walls: usize,
    pub removed_tiles: Vec<ObjectHandle>,
    pub removed_walls: Vec<ObjectHandle>,
    /// Tile indices (in the new layout) created purely by the size increase
    pub new_tile_slots: Vec<usize>,
}

impl ResizeOutcome {
    pub fn is_empty(&self) -> bool {
        self.migrated_tiles == 0
            && self.migrated_walls == 0
            && self.removed_tiles.is_empty()
            && self.removed_walls.is_empty()
            && self.new_tile_slots.is_empty()
    }
}

/// The persistent tile and wall slots of a room.
///
/// Both arrays are sized from the room dimensions: `width * height` tiles and
/// `width * (height + 1) + (width + 1) * height` walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGrid {
    size: RoomSize,
    tiles: Vec<Option<ObjectHandle>>,
    walls: Vec<Option<ObjectHandle>>,
}

impl RoomGrid {
    /// Create an empty grid for the given size
    pub fn new(size: RoomSize) -> Self {
        let indexer = GridIndexer::new(size, INDEX_ONLY_TILE_SIZE);
        Self {
            size: indexer.size(),
            tiles: vec![None; indexer.tile_count()],
            walls: vec![None; indexer.wall_count()],
        }
    }

    pub fn size(&self) -> RoomSize {
        self.size
    }

    pub fn tiles(&self) -> &[Option<ObjectHandle>] {
        &self.tiles
    }

    pub fn walls(&self) -> &[Option<ObjectHandle>] {
        &self.walls
    }

    /// Slot array for a cell kind
    pub fn slots(&self, kind: CellKind) -> &[Option<ObjectHandle>] {
        match kind {
            CellKind::Tile => &self.tiles,
            CellKind::Wall => &self.walls,
        }
    }

    fn slots_mut(&mut self, kind: CellKind) -> &mut Vec<Option<ObjectHandle>> {
        match kind {
            CellKind::Tile => &mut self.tiles,
            CellKind::Wall => &mut self.walls,
        }
    }

    /// Get the occupant of a slot, if any
    pub fn get(&self, kind: CellKind, index: usize) -> Option<ObjectHandle> {
        self.slots(kind).get(index).copied().flatten()
    }

    pub fn tile(&self, index: usize) -> Option<ObjectHandle> {
        self.get(CellKind::Tile, index)
    }

    pub fn wall(&self, index: usize) -> Option<ObjectHandle> {
        self.get(CellKind::Wall, index)
    }

    /// Store a handle in a slot. Indices outside the current bounds are ignored.
    pub fn set(&mut self, kind: CellKind, index: usize, handle: ObjectHandle) {
        if let Some(slot) = self.slots_mut(kind).get_mut(index) {
            *slot = Some(handle);
        }
    }

    pub fn set_tile(&mut self, index: usize, handle: ObjectHandle) {
        self.set(CellKind::Tile, index, handle);
    }

    pub fn set_wall(&mut self, index: usize, handle: ObjectHandle) {
        self.set(CellKind::Wall, index, handle);
    }

    /// Empty a slot, returning its previous occupant
    pub fn take(&mut self, kind: CellKind, index: usize) -> Option<ObjectHandle> {
        self.slots_mut(kind).get_mut(index).and_then(Option::take)
    }

    /// Find the slot index holding a handle
    pub fn index_of(&self, kind: CellKind, handle: ObjectHandle) -> Option<usize> {
        self.slots(kind).iter().position(|slot| *slot == Some(handle))
    }

    /// Check whether a handle occupies any tile or wall slot
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.index_of(CellKind::Tile, handle).is_some()
            || self.index_of(CellKind::Wall, handle).is_some()
    }

    /// Iterate over occupied slots of one kind as `(index, handle)`
    pub fn occupied(&self, kind: CellKind) -> impl Iterator<Item = (usize, ObjectHandle)> + '_ {
        self.slots(kind)
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|handle| (index, handle)))
    }

    /// Empty every slot of one kind, returning the removed handles
    pub fn clear(&mut self, kind: CellKind) -> Vec<ObjectHandle> {
        self.slots_mut(kind)
            .iter_mut()
            .filter_map(Option::take)
            .collect()
    }

    /// Empty every slot, returning all removed handles (tiles first)
    pub fn drain_all(&mut self) -> Vec<ObjectHandle> {
        let mut handles = self.clear(CellKind::Tile);
        handles.extend(self.clear(CellKind::Wall));
        handles
    }

    /// Resize both slot arrays, keeping every cell whose grid position still
    /// lies inside the new bounds.
    ///
    /// X-aligned walls have one extra row and Y-aligned walls one extra
    /// column, so their bounds tests admit a coordinate equal to the new
    /// height or width respectively.
    pub fn resize(&mut self, new_size: RoomSize) -> ResizeOutcome {
        let new_size = RoomSize::new(new_size.width, new_size.height);
        let mut outcome = ResizeOutcome::default();
        if new_size == self.size {
            return outcome;
        }

        let old = GridIndexer::new(self.size, INDEX_ONLY_TILE_SIZE);
        let new = GridIndexer::new(new_size, INDEX_ONLY_TILE_SIZE);
        let mut tiles = vec![None; new.tile_count()];
        let mut walls = vec![None; new.wall_count()];

        for (index, slot) in self.walls.iter_mut().enumerate() {
            let Some(handle) = slot.take() else {
                continue;
            };
            let (orientation, x, y) = old.wall_coords(index);
            let outside = match orientation {
                WallOrientation::Horizontal => x >= new_size.width || y > new_size.height,
                WallOrientation::Vertical => x > new_size.width || y >= new_size.height,
            };
            if outside {
                outcome.removed_walls.push(handle);
            } else {
                walls[new.wall_index(orientation, x, y)] = Some(handle);
                outcome.migrated_walls += 1;
            }
        }

        for (index, slot) in self.tiles.iter_mut().enumerate() {
            let Some(handle) = slot.take() else {
                continue;
            };
            let (x, y) = old.tile_coords(index);
            if x >= new_size.width || y >= new_size.height {
                outcome.removed_tiles.push(handle);
            } else {
                tiles[new.tile_index(x, y)] = Some(handle);
                outcome.migrated_tiles += 1;
            }
        }

        // New columns beside the old rows, then whole new rows
        let kept_rows = self.size.height.min(new_size.height);
        for y in 0..kept_rows {
            for x in self.size.width..new_size.width {
                outcome.new_tile_slots.push(new.tile_index(x, y));
            }
        }
        for y in self.size.height..new_size.height {
            for x in 0..new_size.width {
                outcome.new_tile_slots.push(new.tile_index(x, y));
            }
        }

        self.size = new_size;
        self.tiles = tiles;
        self.walls = walls;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Grid of the given size with every tile and wall slot occupied
    fn filled_grid(width: u32, height: u32) -> RoomGrid {
        let mut grid = RoomGrid::new(RoomSize::new(width, height));
        let mut next = 1;
        for index in 0..grid.tiles().len() {
            grid.set_tile(index, ObjectHandle(next));
            next += 1;
        }
        for index in 0..grid.walls().len() {
            grid.set_wall(index, ObjectHandle(next));
            next += 1;
        }
        grid
    }

    #[test]
    fn test_new_grid() {
        let grid = RoomGrid::new(RoomSize::new(3, 2));
        assert_eq!(grid.tiles().len(), 6);
        assert_eq!(grid.walls().len(), 17);
        assert!(grid.tiles().iter().all(|t| t.is_none()));
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = RoomGrid::new(RoomSize::new(2, 2));
        grid.set_tile(4, ObjectHandle(7));
        grid.set_wall(99, ObjectHandle(8));
        assert!(!grid.contains(ObjectHandle(7)));
        assert!(!grid.contains(ObjectHandle(8)));

        grid.set_tile(3, ObjectHandle(7));
        assert_eq!(grid.tile(3), Some(ObjectHandle(7)));
        assert_eq!(grid.index_of(CellKind::Tile, ObjectHandle(7)), Some(3));
        assert_eq!(grid.take(CellKind::Tile, 3), Some(ObjectHandle(7)));
        assert_eq!(grid.tile(3), None);
    }

    #[test]
    fn test_shrink_width_removes_column() {
        let mut grid = filled_grid(3, 2);
        let column: Vec<_> = [2, 5].iter().filter_map(|&i| grid.tile(i)).collect();

        let outcome = grid.resize(RoomSize::new(2, 2));

        assert_eq!(outcome.removed_tiles.len(), 2);
        for handle in &column {
            assert!(outcome.removed_tiles.contains(handle));
        }
        assert_eq!(outcome.migrated_tiles, 4);
        assert!(outcome.new_tile_slots.is_empty());
        assert_eq!(grid.tiles().len(), 4);
        assert_eq!(grid.walls().len(), 12);
        assert!(grid.tiles().iter().all(|t| t.is_some()));

        // X-aligned walls at x == 2 and Y-aligned walls at x == 3 are gone
        assert_eq!(outcome.removed_walls.len(), 3 + 2);
        assert_eq!(outcome.migrated_walls, 12);
    }

    #[test]
    fn test_resize_keeps_handles_unique() {
        let mut grid = filled_grid(3, 2);
        grid.resize(RoomSize::new(2, 2));

        let mut seen = HashSet::new();
        for handle in grid.tiles().iter().chain(grid.walls()).flatten() {
            assert!(seen.insert(*handle), "handle {:?} stored twice", handle);
        }
    }

    #[test]
    fn test_resize_remaps_by_position() {
        let mut grid = filled_grid(3, 2);
        // Tile (1, 1) and Y-aligned wall (3, 1) of the old layout
        let tile = grid.tile(4).unwrap();
        let wall = grid.wall(16).unwrap();

        grid.resize(RoomSize::new(4, 2));

        let indexer = GridIndexer::new(grid.size(), 100);
        assert_eq!(grid.tile(indexer.tile_index(1, 1)), Some(tile));
        assert_eq!(
            grid.wall(indexer.wall_index(WallOrientation::Vertical, 3, 1)),
            Some(wall)
        );
    }

    #[test]
    fn test_grow_height_adds_tiles_only() {
        let mut grid = filled_grid(3, 2);
        let outcome = grid.resize(RoomSize::new(3, 3));

        assert_eq!(outcome.new_tile_slots, vec![6, 7, 8]);
        assert!(outcome.removed_tiles.is_empty());
        assert!(outcome.removed_walls.is_empty());
        assert_eq!(outcome.migrated_walls, 17);
        assert_eq!(grid.walls().len(), 3 * 4 + 4 * 3);
        assert_eq!(grid.walls().iter().flatten().count(), 17);
    }

    #[test]
    fn test_grow_width_reports_new_column() {
        let mut grid = filled_grid(2, 2);
        let outcome = grid.resize(RoomSize::new(3, 2));
        assert_eq!(outcome.new_tile_slots, vec![2, 5]);
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut grid = filled_grid(2, 2);
        let before = grid.clone();
        assert!(grid.resize(RoomSize::new(2, 2)).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_drain_all() {
        let mut grid = filled_grid(1, 1);
        let handles = grid.drain_all();
        assert_eq!(handles.len(), 1 + 4);
        assert!(grid.tiles().iter().chain(grid.walls()).all(|s| s.is_none()));
    }
}
