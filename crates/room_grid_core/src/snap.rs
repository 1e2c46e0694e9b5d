//! Snapping increments for room gizmos

use crate::RoomTransform;
use serde::{Deserialize, Serialize};

/// Translation snapping in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PositionSnap {
    NoSnapping,
    #[default]
    SnapX10,
    SnapX100,
    SnapX1000,
}

impl PositionSnap {
    /// Snap increment in centimetres, `None` when snapping is off
    pub fn increment(&self) -> Option<f32> {
        match self {
            PositionSnap::NoSnapping => None,
            PositionSnap::SnapX10 => Some(10.0),
            PositionSnap::SnapX100 => Some(100.0),
            PositionSnap::SnapX1000 => Some(1000.0),
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PositionSnap::NoSnapping => "No snapping",
            PositionSnap::SnapX10 => "10 cm",
            PositionSnap::SnapX100 => "100 cm",
            PositionSnap::SnapX1000 => "1000 cm",
        }
    }

    /// Returns all variants for UI enumeration
    pub fn all() -> &'static [PositionSnap] {
        &[
            PositionSnap::NoSnapping,
            PositionSnap::SnapX10,
            PositionSnap::SnapX100,
            PositionSnap::SnapX1000,
        ]
    }

    /// Round each axis to the nearest increment
    pub fn apply(&self, translation: [f32; 3]) -> [f32; 3] {
        match self.increment() {
            Some(step) => translation.map(|value| (value / step).round() * step),
            None => translation,
        }
    }
}

/// Yaw snapping in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationSnap {
    #[default]
    NoSnapping,
    SnapZ5,
    SnapZ15,
    SnapZ45,
}

impl RotationSnap {
    /// Snap increment in degrees, `None` when snapping is off
    pub fn increment(&self) -> Option<f32> {
        match self {
            RotationSnap::NoSnapping => None,
            RotationSnap::SnapZ5 => Some(5.0),
            RotationSnap::SnapZ15 => Some(15.0),
            RotationSnap::SnapZ45 => Some(45.0),
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RotationSnap::NoSnapping => "No snapping",
            RotationSnap::SnapZ5 => "5°",
            RotationSnap::SnapZ15 => "15°",
            RotationSnap::SnapZ45 => "45°",
        }
    }

    /// Returns all variants for UI enumeration
    pub fn all() -> &'static [RotationSnap] {
        &[
            RotationSnap::NoSnapping,
            RotationSnap::SnapZ5,
            RotationSnap::SnapZ15,
            RotationSnap::SnapZ45,
        ]
    }

    pub fn apply(&self, yaw_degrees: f32) -> f32 {
        match self.increment() {
            Some(step) => (yaw_degrees / step).round() * step,
            None => yaw_degrees,
        }
    }
}

impl RoomTransform {
    /// Apply both snapping rules to a transform
    pub fn snapped(&self, position: PositionSnap, rotation: RotationSnap) -> Self {
        Self {
            translation: position.apply(self.translation),
            yaw_degrees: rotation.apply(self.yaw_degrees),
        }
    }
}
