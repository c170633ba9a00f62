use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// JSON payload for the servo variant's single control topic. Field names
/// are the contract with the actuator firmware; do not rename.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ServoControlMessage {
    /// Whole degrees, 0..=180
    pub servo_angle: u8,
    /// Raw fingertip distance, whole pixels
    pub finger_distance: u32,
    /// Epoch seconds
    pub timestamp: f64,
}

impl ServoControlMessage {
    pub fn new(servo_angle: u8, finger_distance: f32, timestamp: SystemTime) -> Self {
        ServoControlMessage {
            servo_angle,
            finger_distance: finger_distance as u32,
            timestamp: timestamp
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs_f64(),
        }
    }
}

/// The switch variant's distance topic carries the pixel distance as a
/// plain decimal integer string.
pub fn distance_payload(finger_distance: f32) -> String {
    format!("{}", finger_distance as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_servo_message_json_shape() {
        let timestamp = UNIX_EPOCH + Duration::from_millis(1_700_000_000_500);
        let message = ServoControlMessage::new(129, 200.7, timestamp);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["servo_angle"], 129);
        assert_eq!(json["finger_distance"], 200);
        assert_eq!(json["timestamp"], 1_700_000_000.5);
    }

    #[test]
    fn test_distance_payload_truncates_to_whole_pixels() {
        assert_eq!(distance_payload(0.), "0");
        assert_eq!(distance_payload(123.9), "123");
    }
}
