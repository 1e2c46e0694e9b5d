//! Slot index arithmetic for tiles and walls
//!
//! Index progression on a 3x2 room. X-aligned walls come first, followed by
//! the Y-aligned walls of the `(width + 1) x height` sub-grid:
//!
//! ```text
//!     0       1       2
//!  9     10      11      12
//!     3       4       5
//! 13     14      15      16
//!     6       7       8
//! ```
//!
//! Tiles use plain row-major order, `x + y * width`. All arithmetic is integer
//! arithmetic on centimetres; positions are local to the room origin.

use crate::RoomSize;

/// Error returned when a position resolves to no valid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Resolved index is negative or past the end of the slot array
    OutOfRange { index: i64, len: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::OutOfRange { index, len } => {
                write!(f, "Slot index {} out of range (0..{})", index, len)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Alignment of a wall slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallOrientation {
    /// Runs along X, rotation 0°
    Horizontal,
    /// Runs along Y, rotation 90°
    Vertical,
}

impl WallOrientation {
    /// Yaw applied to walls of this orientation
    pub fn yaw_degrees(&self) -> f32 {
        match self {
            WallOrientation::Horizontal => 0.0,
            WallOrientation::Vertical => 90.0,
        }
    }
}

/// Converts between slot indices and room-local positions for one room size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndexer {
    width: i64,
    height: i64,
    tile_size: i64,
}

impl GridIndexer {
    /// Create an indexer for a room. `tile_size_cm` should be a multiple of 4
    /// so the quarter-tile tolerance band is exact.
    pub fn new(size: RoomSize, tile_size_cm: u32) -> Self {
        Self {
            width: size.width.max(1) as i64,
            height: size.height.max(1) as i64,
            tile_size: tile_size_cm.max(1) as i64,
        }
    }

    pub fn size(&self) -> RoomSize {
        RoomSize::new(self.width as u32, self.height as u32)
    }

    /// Tile edge length in centimetres
    pub fn tile_size(&self) -> u32 {
        self.tile_size as u32
    }

    pub fn tile_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Number of X-aligned walls; also the offset of the first Y-aligned wall
    pub fn horizontal_wall_count(&self) -> usize {
        (self.width * (self.height + 1)) as usize
    }

    pub fn vertical_wall_count(&self) -> usize {
        ((self.width + 1) * self.height) as usize
    }

    pub fn wall_count(&self) -> usize {
        self.horizontal_wall_count() + self.vertical_wall_count()
    }

    /// Flat tile index of grid cell `(x, y)`
    pub fn tile_index(&self, x: u32, y: u32) -> usize {
        (x as i64 + y as i64 * self.width) as usize
    }

    /// Flat wall index of sub-grid cell `(x, y)` of the given orientation
    pub fn wall_index(&self, orientation: WallOrientation, x: u32, y: u32) -> usize {
        match orientation {
            WallOrientation::Horizontal => (x as i64 + y as i64 * self.width) as usize,
            WallOrientation::Vertical => {
                self.horizontal_wall_count() + (x as i64 + y as i64 * (self.width + 1)) as usize
            }
        }
    }

    /// Grid cell of a tile index
    pub fn tile_coords(&self, index: usize) -> (u32, u32) {
        let index = index as i64;
        ((index % self.width) as u32, (index / self.width) as u32)
    }

    /// Orientation and sub-grid cell of a wall index
    pub fn wall_coords(&self, index: usize) -> (WallOrientation, u32, u32) {
        let horizontal = self.horizontal_wall_count();
        if index < horizontal {
            let index = index as i64;
            (
                WallOrientation::Horizontal,
                (index % self.width) as u32,
                (index / self.width) as u32,
            )
        } else {
            let local = (index - horizontal) as i64;
            let columns = self.width + 1;
            (
                WallOrientation::Vertical,
                (local % columns) as u32,
                (local / columns) as u32,
            )
        }
    }

    pub fn wall_orientation(&self, index: usize) -> WallOrientation {
        if index < self.horizontal_wall_count() {
            WallOrientation::Horizontal
        } else {
            WallOrientation::Vertical
        }
    }

    /// Resolve a local position to the nearest tile.
    ///
    /// Tile centres sit at half a tile; shifting by a quarter tile before the
    /// truncating division assigns the band around each centre to it.
    pub fn tile_index_of(&self, position: [f32; 3]) -> Result<usize, GridError> {
        let x = position[0] as i64;
        let y = position[1] as i64;
        let quarter = self.tile_size / 4;

        let index_x = (x - quarter) / self.tile_size;
        let index_y = (y - quarter) / self.tile_size;

        self.checked(index_x + index_y * self.width, self.tile_count())
    }

    /// Resolve a local position to the nearest wall.
    ///
    /// X-aligned walls sit at half-tile X positions, Y-aligned walls on whole
    /// tile X positions. Shifting by a quarter tile and testing the remainder
    /// against half a tile picks the family, then truncating division picks
    /// the cell within it.
    pub fn wall_index_of(&self, position: [f32; 3]) -> Result<usize, GridError> {
        let x = position[0] as i64;
        let y = position[1] as i64;
        let quarter = self.tile_size / 4;
        let half = self.tile_size / 2;

        let index = if (self.tile_size + x - quarter) % self.tile_size < half {
            let index_x = (x - quarter) / self.tile_size;
            let index_y = (y + quarter) / self.tile_size;
            index_x + index_y * self.width
        } else {
            let index_x = (x + quarter) / self.tile_size;
            let index_y = (y - quarter) / self.tile_size;
            self.horizontal_wall_count() as i64 + index_x + index_y * (self.width + 1)
        };

        self.checked(index, self.wall_count())
    }

    /// Local centre of a tile. Only meaningful for indices below `tile_count`.
    pub fn position_of_tile(&self, index: usize) -> [f32; 3] {
        let (x, y) = self.tile_coords(index);
        let half = self.tile_size / 2;
        [
            (x as i64 * self.tile_size + half) as f32,
            (y as i64 * self.tile_size + half) as f32,
            0.0,
        ]
    }

    /// Local centre of a wall. Only meaningful for indices below `wall_count`.
    pub fn position_of_wall(&self, index: usize) -> [f32; 3] {
        let half = self.tile_size / 2;
        match self.wall_coords(index) {
            (WallOrientation::Horizontal, x, y) => [
                (x as i64 * self.tile_size + half) as f32,
                (y as i64 * self.tile_size) as f32,
                0.0,
            ],
            (WallOrientation::Vertical, x, y) => [
                (x as i64 * self.tile_size) as f32,
                (y as i64 * self.tile_size + half) as f32,
                0.0,
            ],
        }
    }

    /// Wall slots on the outer boundary: the first and last X-aligned rows
    /// and the first and last Y-aligned columns
    pub fn perimeter_wall_indices(&self) -> Vec<usize> {
        let width = self.width as u32;
        let height = self.height as u32;
        let mut indices = Vec::with_capacity(2 * (width + height) as usize);

        for y in [0, height] {
            for x in 0..width {
                indices.push(self.wall_index(WallOrientation::Horizontal, x, y));
            }
        }
        for y in 0..height {
            for x in [0, width] {
                indices.push(self.wall_index(WallOrientation::Vertical, x, y));
            }
        }
        indices
    }

    fn checked(&self, index: i64, len: usize) -> Result<usize, GridError> {
        if index < 0 || index >= len as i64 {
            Err(GridError::OutOfRange { index, len })
        } else {
            Ok(index as usize)
        }
    }
}
