use map_range::MapRange;
use serde::{Deserialize, Serialize};

pub const ANGLE_MIN: f32 = 0.;
pub const ANGLE_MAX: f32 = 180.;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchState::On => "on",
            SwitchState::Off => "off",
        }
    }
}

/// The control signal derived from fingertip distance. A given pipeline
/// instance only ever produces one of the two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlValue {
    /// Servo angle in whole degrees, always within [0,180]
    Angle(u8),
    Switch(SwitchState),
}

pub fn clamp_angle(angle: f32) -> f32 {
    angle.clamp(ANGLE_MIN, ANGLE_MAX)
}

/// Strategy for converting a fingertip distance (px) into a control value;
/// selected once, at configuration time.
pub enum SignalMapper {
    /// Linear remap of [input_min, input_max] px onto [0,180] degrees,
    /// saturating outside the input range
    LinearServo { input_min: f32, input_max: f32 },
    /// On iff distance is strictly greater than the threshold. No
    /// hysteresis: a distance sitting exactly on the boundary can toggle
    /// every tick.
    ThresholdSwitch { threshold: f32 },
}

impl SignalMapper {
    pub fn map(&self, distance: f32) -> ControlValue {
        match self {
            SignalMapper::LinearServo {
                input_min,
                input_max,
            } => {
                let angle = distance.map_range(*input_min..*input_max, ANGLE_MIN..ANGLE_MAX);
                ControlValue::Angle(clamp_angle(angle).round() as u8)
            }
            SignalMapper::ThresholdSwitch { threshold } => {
                if distance > *threshold {
                    ControlValue::Switch(SwitchState::On)
                } else {
                    ControlValue::Switch(SwitchState::Off)
                }
            }
        }
    }
}
