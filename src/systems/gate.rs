use std::time::{Duration, SystemTime};

use log::trace;

use super::mapping::ControlValue;

/// When the gate lets a tick's control value through to the transport.
pub enum GatePolicy {
    /// Emit every tick a valid control value exists (servo variant)
    Always,
    /// Emit on state change, or when the interval since the last publish
    /// has elapsed, whichever comes first (switch variant). Bounds
    /// staleness at `interval` while reacting to transitions immediately.
    RateLimitedOnChange { interval: Duration },
}

#[derive(Debug, Default)]
struct GateState {
    last_published: Option<ControlValue>,
    last_publish_time: Option<SystemTime>,
}

pub struct PublishGate {
    policy: GatePolicy,
    state: GateState,
}

impl PublishGate {
    pub fn new(policy: GatePolicy) -> Self {
        PublishGate {
            policy,
            state: GateState::default(),
        }
    }

    /// Decide whether this tick's value goes out. Does not change state;
    /// callers that go on to publish must call `mark_published`.
    pub fn should_publish(&self, value: &ControlValue, now: SystemTime) -> bool {
        match &self.policy {
            GatePolicy::Always => true,
            GatePolicy::RateLimitedOnChange { interval } => {
                let changed = match &self.state.last_published {
                    Some(last) => last != value,
                    None => true, // nothing published yet
                };
                let interval_elapsed = match self.state.last_publish_time {
                    Some(last_time) => match now.duration_since(last_time) {
                        Ok(elapsed) => elapsed > *interval,
                        // Clock went backwards; treat as not elapsed
                        Err(_) => false,
                    },
                    None => true,
                };
                trace!(
                    "Gate decision: changed {}, interval elapsed {}",
                    changed,
                    interval_elapsed
                );
                changed || interval_elapsed
            }
        }
    }

    /// Record that a publish was attempted this tick. Both fields update
    /// together; a failed transport send still counts as the last attempt,
    /// so a down broker is not hammered every tick.
    pub fn mark_published(&mut self, value: ControlValue, now: SystemTime) {
        self.state.last_published = Some(value);
        self.state.last_publish_time = Some(now);
    }

    pub fn last_published(&self) -> Option<&ControlValue> {
        self.state.last_published.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::mapping::SwitchState;

    fn at(seconds: f64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs_f64(seconds)
    }

    const ON: ControlValue = ControlValue::Switch(SwitchState::On);
    const OFF: ControlValue = ControlValue::Switch(SwitchState::Off);

    fn rate_limited() -> PublishGate {
        PublishGate::new(GatePolicy::RateLimitedOnChange {
            interval: Duration::from_secs(1),
        })
    }

    #[test]
    fn test_always_policy_never_holds() {
        let gate = PublishGate::new(GatePolicy::Always);
        assert!(gate.should_publish(&ControlValue::Angle(90), at(0.)));
        assert!(gate.should_publish(&ControlValue::Angle(90), at(0.01)));
    }

    #[test]
    fn test_rate_limited_on_change_sequence() {
        let mut gate = rate_limited();

        // First ever value publishes
        assert!(gate.should_publish(&OFF, at(0.)));
        gate.mark_published(OFF, at(0.));

        // Same value, interval not elapsed: held
        assert!(!gate.should_publish(&OFF, at(0.5)));

        // Changed value publishes immediately
        assert!(gate.should_publish(&ON, at(0.6)));
        gate.mark_published(ON, at(0.6));

        // Same value again, but interval elapsed since t=0.6
        assert!(gate.should_publish(&ON, at(1.7)));
        gate.mark_published(ON, at(1.7));

        assert_eq!(gate.last_published(), Some(&ON));
    }

    #[test]
    fn test_interval_boundary_is_exclusive() {
        let mut gate = rate_limited();
        gate.mark_published(OFF, at(0.));
        // Exactly the interval is not "more than" the interval
        assert!(!gate.should_publish(&OFF, at(1.0)));
        assert!(gate.should_publish(&OFF, at(1.001)));
    }

    #[test]
    fn test_failed_send_still_suppresses_retry() {
        let mut gate = rate_limited();
        // The caller marks before knowing if the transport send succeeded
        gate.mark_published(OFF, at(0.));
        assert!(!gate.should_publish(&OFF, at(0.2)));
    }
}
