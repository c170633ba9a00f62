pub mod gate;
pub mod mapping;
pub mod smoothing;

use std::time::Duration;

use gate::{GatePolicy, PublishGate};
use mapping::SignalMapper;
use smoothing::AngleSmoother;

use crate::settings::Cli;

/// Which deployed variant this pipeline instance is running as.
#[derive(Debug, Clone, Copy)]
pub enum ControlMode {
    /// Servo: continuous angle, smoothed, published every tick
    Continuous,
    /// Switch: on/off state, rate-limited + publish-on-change
    Discrete,
}

pub struct Systems {
    pub mapper: SignalMapper,
    /// Only the continuous variant smooths; the switch value is already
    /// quantized by the threshold
    pub smoother: Option<AngleSmoother>,
    pub gate: PublishGate,
}

impl Systems {
    pub fn new(mode: ControlMode, config: &Cli) -> Systems {
        match mode {
            ControlMode::Continuous => Systems {
                mapper: SignalMapper::LinearServo {
                    input_min: config.mapping_input_min,
                    input_max: config.mapping_input_max,
                },
                smoother: Some(AngleSmoother::new(config.neutral_angle)),
                gate: PublishGate::new(GatePolicy::Always),
            },
            ControlMode::Discrete => Systems {
                mapper: SignalMapper::ThresholdSwitch {
                    threshold: config.switch_threshold,
                },
                smoother: None,
                gate: PublishGate::new(GatePolicy::RateLimitedOnChange {
                    interval: Duration::from_secs_f64(config.switch_publish_interval),
                }),
            },
        }
    }
}
