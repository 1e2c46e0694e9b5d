//! room_grid_editor - Grid-based room construction tool for Bevy editors
//!
//! This crate provides an interactive tool for laying out rooms:
//! - Room spawning, deletion and resizing driven by an editable room list
//! - Snapped translate/rotate gizmos per room
//! - Tile and wall editing with temporary placeholders for empty slots
//! - Per-scene settings plus user default settings on disk
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use room_grid_editor::{RoomToolInput, RoomToolInputs, RoomToolPlugin};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(RoomToolPlugin)
//!         .add_systems(Startup, |mut inputs: ResMut<RoomToolInputs>| {
//!             inputs.push(RoomToolInput::Setup);
//!         })
//!         .run();
//! }
//! ```

pub mod ecs;
mod error;
pub mod host;
pub mod preferences;
pub mod properties;
pub mod registry;
pub mod selection;
pub mod tool;

pub use room_grid_core;

pub use ecs::{RoomToolInput, RoomToolInputs, RoomToolPlugin, RoomToolState, WorldHost};
pub use error::RoomToolError;
pub use host::{ClickHit, GizmoKind, HitKind, MaterialRole, SceneChild, SceneHost, SceneRoom};
pub use preferences::{PreferencesError, RoomToolPreferences};
pub use properties::{FieldChange, ToolProperties};
pub use registry::{RoomListChange, RoomListSnapshot, RoomRegistry};
pub use selection::{ClickAction, EditMode, EditSelectionController, SelectedCell};
pub use tool::RoomTool;
