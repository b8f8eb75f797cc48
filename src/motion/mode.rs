//! Run modes and the transitions between them.

use core::fmt;

/// What the coordinator is currently doing, and therefore which axes it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    /// Nothing is driven.
    #[default]
    Stopped,
    /// Guide-only move towards a target position.
    Guide,
    /// Winder-only move towards a target turn count.
    Winder,
    /// Coordinated winding: winder turns, guide traverses.
    Winding,
    /// Guide-only compensation travel after a reversal; the winder waits.
    Reversing,
}

impl RunMode {
    /// Whether the guide is stepped in this mode.
    #[inline]
    pub fn is_guide_active(self) -> bool {
        matches!(self, RunMode::Guide | RunMode::Winding | RunMode::Reversing)
    }

    /// Whether the winder is stepped in this mode.
    #[inline]
    pub fn is_winder_active(self) -> bool {
        matches!(self, RunMode::Winder | RunMode::Winding)
    }

    /// Numeric mode code reported to status consumers.
    ///
    /// Bit 0 is the guide, bit 1 the winder; reversing is reported as 5.
    pub fn code(self) -> u8 {
        match self {
            RunMode::Stopped => 0,
            RunMode::Guide => 1,
            RunMode::Winder => 2,
            RunMode::Winding => 3,
            RunMode::Reversing => 5,
        }
    }

    /// Mode name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            RunMode::Stopped => "Stopped",
            RunMode::Guide => "Guide",
            RunMode::Winder => "Winder",
            RunMode::Winding => "Winding",
            RunMode::Reversing => "Reversing",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which traverse limit the guide hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitSide {
    /// The guide origin side.
    Lower,
    /// The far flange side.
    Upper,
}

/// A mode transition detected by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// The winder reached its target while winding.
    WindComplete,
    /// The winder reached its target during a winder-only move.
    WinderMoveComplete,
    /// The guide hit a traverse limit and turned around.
    GuideReversed {
        /// Limit that was reached.
        at: LimitSide,
    },
    /// Compensation travel finished; winding resumes.
    HysteresisComplete,
    /// The guide reached its target during a guide-only move.
    GuideMoveComplete,
}

impl ModeEvent {
    /// Mode entered as a result of this event.
    pub fn next_mode(self) -> RunMode {
        match self {
            ModeEvent::WindComplete
            | ModeEvent::WinderMoveComplete
            | ModeEvent::GuideMoveComplete => RunMode::Stopped,
            ModeEvent::GuideReversed { .. } => RunMode::Reversing,
            ModeEvent::HysteresisComplete => RunMode::Winding,
        }
    }
}

impl fmt::Display for ModeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeEvent::WindComplete => write!(f, "Winding complete"),
            ModeEvent::WinderMoveComplete => write!(f, "Winder move complete"),
            ModeEvent::GuideReversed { at: LimitSide::Lower } => {
                write!(f, "Guide reversed at lower limit")
            }
            ModeEvent::GuideReversed { at: LimitSide::Upper } => {
                write!(f, "Guide reversed at upper limit")
            }
            ModeEvent::HysteresisComplete => write!(f, "Hysteresis compensation complete"),
            ModeEvent::GuideMoveComplete => write!(f, "Guide move complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_predicates() {
        let cases = [
            (RunMode::Stopped, false, false),
            (RunMode::Guide, true, false),
            (RunMode::Winder, false, true),
            (RunMode::Winding, true, true),
            (RunMode::Reversing, true, false),
        ];

        for (mode, guide, winder) in cases {
            assert_eq!(mode.is_guide_active(), guide, "{}", mode);
            assert_eq!(mode.is_winder_active(), winder, "{}", mode);
        }
    }

    #[test]
    fn test_codes_match_activation_bits() {
        for mode in [RunMode::Stopped, RunMode::Guide, RunMode::Winder, RunMode::Winding] {
            assert_eq!(mode.code() & 1 != 0, mode.is_guide_active());
            assert_eq!(mode.code() & 2 != 0, mode.is_winder_active());
        }
        assert_eq!(RunMode::Reversing.code(), 5);
    }

    #[test]
    fn test_event_targets() {
        assert_eq!(ModeEvent::WindComplete.next_mode(), RunMode::Stopped);
        assert_eq!(
            ModeEvent::GuideReversed { at: LimitSide::Upper }.next_mode(),
            RunMode::Reversing
        );
        assert_eq!(ModeEvent::HysteresisComplete.next_mode(), RunMode::Winding);
    }
}
