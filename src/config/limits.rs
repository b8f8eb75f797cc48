//! Guide traverse limits and the input policy applied to runtime settings.

use serde::Deserialize;

/// How runtime configuration values are screened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Accept every value; nonsensical settings simply shape the motion.
    #[default]
    Permissive,
    /// Reject values that would make the traverse limits meaningless.
    Strict,
}

/// Guide traverse limits in (fractional) steps.
///
/// The lower limit is the guide origin. The upper limit sits one spool width
/// plus one hysteresis distance above it, so that after compensation travel
/// the guide lays cable across exactly the spool width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLimits {
    /// Lower reversal point.
    pub lower: f32,
    /// Upper reversal point.
    pub upper: f32,
    /// Compensation travel after each reversal.
    pub hysteresis: f32,
}

impl GuideLimits {
    /// Derive limits from a hysteresis distance and the spool width, both in steps.
    pub fn new(hysteresis_steps: f32, spool_width_steps: f32) -> Self {
        let lower = 0.0;
        Self {
            lower,
            upper: lower + hysteresis_steps + spool_width_steps,
            hysteresis: hysteresis_steps,
        }
    }

    /// Distance between the reversal points.
    #[inline]
    pub fn span(&self) -> f32 {
        self.upper - self.lower
    }

    /// `true` once the guide has reached or passed a limit in its direction of travel.
    #[inline]
    pub fn reached(&self, position: i64, rate: f32) -> bool {
        let position = position as f32;
        (rate < 0.0 && position <= self.lower) || (rate > 0.0 && position >= self.upper)
    }

    /// `true` once compensation travel after a reversal is done.
    ///
    /// `rate` is the guide rate after the reversal.
    #[inline]
    pub fn compensated(&self, position: i64, rate: f32) -> bool {
        let position = position as f32;
        (rate < 0.0 && position <= self.upper - self.hysteresis)
            || (rate > 0.0 && position >= self.lower + self.hysteresis)
    }
}
