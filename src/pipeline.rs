use std::time::SystemTime;

use log::debug;

use crate::{
    geometry_utils::distance,
    settings::Cli,
    systems::{mapping::ControlValue, ControlMode, Systems},
    Point2D,
};

/// A control value cleared for publishing, with the context the wire
/// formats need. At most one per tick.
#[derive(Debug)]
pub struct ControlUpdate {
    pub value: ControlValue,
    /// Raw fingertip distance in px, before mapping
    pub finger_distance: f32,
    pub timestamp: SystemTime,
}

/// What a single tick resolved to.
#[derive(Debug)]
pub enum TickOutcome {
    /// No gesture detected; nothing computed, no state touched
    NoSignal,
    /// A value was computed but the gate held it back
    Held,
    /// The caller should send this update to the transport
    Publish(ControlUpdate),
}

/// Per-tick driver: sample -> distance -> map -> smooth -> gate. Owns all
/// pipeline state; one instance per deployment, driven from a single
/// thread, one tick at a time.
pub struct GesturePipeline {
    pub systems: Systems,
}

impl GesturePipeline {
    pub fn new(mode: ControlMode, config: &Cli) -> Self {
        GesturePipeline {
            systems: Systems::new(mode, config),
        }
    }

    pub fn tick(&mut self, sample: Option<(Point2D, Point2D)>, now: SystemTime) -> TickOutcome {
        let Some((a, b)) = sample else {
            debug!("No fingertip pair this tick");
            return TickOutcome::NoSignal;
        };

        let finger_distance = distance(&a, &b);
        let mapped = self.systems.mapper.map(finger_distance);

        let value = match (&mut self.systems.smoother, mapped) {
            (Some(smoother), ControlValue::Angle(raw)) => ControlValue::Angle(smoother.smooth(raw)),
            (_, other) => other,
        };

        if self.systems.gate.should_publish(&value, now) {
            // Marked before the transport send: a failed publish still
            // counts as the last attempt (see gate::mark_published)
            self.systems.gate.mark_published(value, now);
            TickOutcome::Publish(ControlUpdate {
                value,
                finger_distance,
                timestamp: now,
            })
        } else {
            TickOutcome::Held
        }
    }
}
