//! Initial winding settings from TOML.

use serde::Deserialize;

use super::limits::InputPolicy;
use super::units::{Millimeters, MillimetersPerRev, RevolutionsPerSec};

/// Start-up values for the runtime-adjustable winding settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindingDefaults {
    /// Winder speed.
    #[serde(rename = "winder_speed_rev_per_sec")]
    pub winder_speed: RevolutionsPerSec,

    /// Guide travel per winder revolution.
    #[serde(rename = "wind_pitch_mm_per_rev")]
    pub wind_pitch: MillimetersPerRev,

    /// Compensation travel after each guide reversal.
    #[serde(rename = "hysteresis_mm")]
    pub hysteresis: Millimeters,

    /// Screening applied to runtime settings.
    pub input_policy: InputPolicy,
}

impl WindingDefaults {
    /// 0.3 rev/s, 0.4 mm/rev, 2.0 mm hysteresis, permissive.
    pub const DEFAULT: Self = Self {
        winder_speed: RevolutionsPerSec(0.3),
        wind_pitch: MillimetersPerRev(0.4),
        hysteresis: Millimeters(2.0),
        input_policy: InputPolicy::Permissive,
    };
}

impl Default for WindingDefaults {
    fn default() -> Self {
        Self::DEFAULT
    }
}
