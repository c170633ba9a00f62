use log::trace;

use super::mapping::clamp_angle;

/// Weight given to the previous smoothed angle; the raw angle contributes
/// the remaining (1 - ALPHA). Part of the deployed servo behavior, so fixed
/// rather than configurable.
pub const ALPHA: f32 = 0.7;

/// Exponential smoother for the servo angle. Holds the only copy of the
/// smoothing history; callers must feed it exactly once per tick, in tick
/// order, since the recurrence depends on sequential history.
pub struct AngleSmoother {
    last_angle: u8,
}

impl AngleSmoother {
    /// The neutral angle seeds the recurrence before any history exists
    pub fn new(neutral_angle: u8) -> Self {
        AngleSmoother {
            last_angle: clamp_angle(neutral_angle as f32) as u8,
        }
    }

    /// smoothed = round(previous * ALPHA + raw * (1 - ALPHA)), re-clamped
    /// to [0,180] (a no-op unless the inputs were already out of range).
    pub fn smooth(&mut self, raw_angle: u8) -> u8 {
        let smoothed = self.last_angle as f32 * ALPHA + raw_angle as f32 * (1. - ALPHA);
        let smoothed = clamp_angle(smoothed.round()) as u8;
        trace!(
            "Smoothing: raw {} + previous {} -> {}",
            raw_angle,
            self.last_angle,
            smoothed
        );
        self.last_angle = smoothed;
        smoothed
    }

    pub fn last_angle(&self) -> u8 {
        self.last_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_from_neutral_seed() {
        let mut smoother = AngleSmoother::new(90);
        let raw = [15, 129, 180, 180];
        let mut expected_last = 90_f32;
        for r in raw {
            let expected = (expected_last * 0.7 + r as f32 * 0.3).round();
            assert_eq!(smoother.smooth(r), expected as u8);
            expected_last = expected;
        }
    }

    #[test]
    fn test_first_tick_uses_seed() {
        let mut smoother = AngleSmoother::new(90);
        // round(90 * 0.7 + 0 * 0.3) = 63
        assert_eq!(smoother.smooth(0), 63);
        assert_eq!(smoother.last_angle(), 63);
    }

    #[test]
    fn test_converges_towards_steady_input() {
        let mut smoother = AngleSmoother::new(90);
        let mut latest = 0;
        for _ in 0..40 {
            latest = smoother.smooth(180);
            assert!(latest <= 180);
        }
        // Integer rounding leaves the fixed point a degree shy of the input
        assert!(latest >= 179);
    }

    #[test]
    fn test_output_stays_in_range() {
        let mut smoother = AngleSmoother::new(0);
        for r in [180, 0, 180, 0, 180] {
            let smoothed = smoother.smooth(r);
            assert!(smoothed <= 180);
        }
    }
}
