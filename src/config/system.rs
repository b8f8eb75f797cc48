//! Machine configuration - root configuration structure.

use serde::Deserialize;

use super::mechanical::MechanicalConstants;
use super::winding::WindingDefaults;

/// Root configuration structure from TOML.
///
/// ```toml
/// [mechanics]
/// steps_per_revolution = 200
/// leadscrew_pitch_mm = 2.0
/// spool_width_mm = 14.8
///
/// [winding]
/// winder_speed_rev_per_sec = 0.3
/// wind_pitch_mm_per_rev = 0.4
/// hysteresis_mm = 2.0
/// input_policy = "permissive"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Fixed mechanical constants.
    pub mechanics: MechanicalConstants,

    /// Initial winding settings.
    pub winding: WindingDefaults,
}
