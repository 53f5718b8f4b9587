//! Input-source boundary types.
//!
//! The core consumes discrete action transitions and continuous axis
//! samples produced by an external input layer. It never polls devices.

use serde::{Deserialize, Serialize};

/// Edge of a discrete action transition.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InputEdge {
    Pressed,
    Released,
}

/// Identifies the device a sample came from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Conventional id for the primary (keyboard/mouse) device.
    pub const PRIMARY: DeviceId = DeviceId(0);
}

/// A discrete action transition (e.g. "jump" pressed on device 0).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionInput {
    pub action: String,
    pub edge: InputEdge,
    pub device: DeviceId,
}

impl ActionInput {
    pub fn new(action: impl Into<String>, edge: InputEdge, device: DeviceId) -> Self {
        Self {
            action: action.into(),
            edge,
            device,
        }
    }
}

/// A continuous axis sample (e.g. "move_x" at 0.7 on device 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisInput {
    pub axis: String,
    pub value: f32,
    pub device: DeviceId,
}

impl AxisInput {
    pub fn new(axis: impl Into<String>, value: f32, device: DeviceId) -> Self {
        Self {
            axis: axis.into(),
            value,
            device,
        }
    }
}
