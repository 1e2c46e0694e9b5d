//! User-default preferences for the room tool
//!
//! Scenes store their own [`ToolSettings`]. These preferences only seed a
//! scene that has none yet.

mod file;

pub use file::PreferencesError;

use room_grid_core::ToolSettings;
use serde::{Deserialize, Serialize};

/// Preferences stored in the user's config directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomToolPreferences {
    /// Settings applied to scenes without a stored settings object
    #[serde(default)]
    pub default_settings: ToolSettings,
}
