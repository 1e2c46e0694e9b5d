//! Error types for the room tool

use room_grid_core::{GridError, ObjectHandle, RoomId};

#[derive(Debug, Clone, PartialEq)]
pub enum RoomToolError {
    /// A room lacks its gizmo, usually after an external undo/redo touched it
    InvalidRoomState { room: RoomId },
    /// The host room list changed by more than the tool can reconcile
    RegistryMismatch { expected: usize, actual: usize },
    /// The host room list was edited from an outdated snapshot
    StaleRoomList { expected: u64, actual: u64 },
    /// A position or index resolved to no slot
    OutOfRange(GridError),
    /// A cell object lost its mesh component outside the tool's control
    MissingComponent(ObjectHandle),
    /// The tool hit a fatal error earlier and must be shut down and set up again
    Faulted,
}

impl RoomToolError {
    /// Fatal errors latch the tool until it is restarted
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RoomToolError::InvalidRoomState { .. }
                | RoomToolError::RegistryMismatch { .. }
                | RoomToolError::StaleRoomList { .. }
        )
    }
}

impl std::fmt::Display for RoomToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomToolError::InvalidRoomState { room } => write!(
                f,
                "Room {} in invalid state! Exit the tool and reopen to recover internal state",
                room
            ),
            RoomToolError::RegistryMismatch { expected, actual } => write!(
                f,
                "Room list size {} does not match tracked size {}; exit the tool and reopen",
                actual, expected
            ),
            RoomToolError::StaleRoomList { expected, actual } => write!(
                f,
                "Room list edit based on version {} but registry is at version {}",
                actual, expected
            ),
            RoomToolError::OutOfRange(e) => write!(f, "{}", e),
            RoomToolError::MissingComponent(handle) => {
                write!(f, "Object {:?} has no mesh component", handle)
            }
            RoomToolError::Faulted => {
                write!(f, "Room tool is faulted; exit the tool and reopen it")
            }
        }
    }
}

impl std::error::Error for RoomToolError {}

impl From<GridError> for RoomToolError {
    fn from(e: GridError) -> Self {
        RoomToolError::OutOfRange(e)
    }
}
