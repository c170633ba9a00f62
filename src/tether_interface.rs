use anyhow::{anyhow, Result};
use log::debug;
use tether_agent::{ChannelDefinition, ChannelOptionsBuilder, TetherAgent};

use crate::{
    messages::{distance_payload, ServoControlMessage},
    pipeline::ControlUpdate,
    systems::mapping::ControlValue,
    tracking::LandmarkFrame,
};

pub struct Inputs {
    pub landmarks_input: ChannelDefinition,
}

impl Inputs {
    pub fn new(tether_agent: &mut TetherAgent) -> Inputs {
        // The upstream hand-detector agent publishes one landmark frame
        // per camera frame
        let landmarks_input = ChannelOptionsBuilder::create_receiver("handLandmarks")
            .qos(Some(0))
            .build(tether_agent)
            .expect("failed to create Input Channel");

        Inputs { landmarks_input }
    }
}

pub fn decode_landmark_frame(payload: &[u8]) -> Result<LandmarkFrame> {
    rmp_serde::from_slice(payload).map_err(|e| anyhow!("failed to decode landmark frame: {e}"))
}

/// Boundary to the transport: deliver one payload to one topic. The
/// transport owns connection lifecycle and any background I/O; callers
/// never retry a failed publish, they log it and move on to the next tick.
pub trait ControlPublisher {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<()>;
}

impl ControlPublisher for TetherAgent {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<()> {
        // Actuator firmware listens on plain custom topics, so bypass the
        // tether topic convention
        self.publish_raw(topic, payload, Some(0), Some(false))
            .map_err(|e| anyhow!("transport rejected publish on \"{topic}\": {e}"))
    }
}

/// Servo variant: one JSON message on one topic.
pub fn publish_servo_update(
    publisher: &impl ControlPublisher,
    topic: &str,
    update: &ControlUpdate,
) -> Result<()> {
    let ControlValue::Angle(servo_angle) = update.value else {
        return Err(anyhow!("servo publish requires an angle control value"));
    };
    let message = ServoControlMessage::new(servo_angle, update.finger_distance, update.timestamp);
    debug!("Sending {:?} on \"{}\"", message, topic);
    let payload = serde_json::to_vec(&message)?;
    publisher.publish(topic, &payload)
}

/// Switch variant: plain-text distance and state payloads on two topics.
/// Both sends belong to the same gate decision for this tick.
pub fn publish_switch_update(
    publisher: &impl ControlPublisher,
    distance_topic: &str,
    state_topic: &str,
    update: &ControlUpdate,
) -> Result<()> {
    let ControlValue::Switch(state) = update.value else {
        return Err(anyhow!("switch publish requires a switch control value"));
    };
    publisher.publish(
        distance_topic,
        distance_payload(update.finger_distance).as_bytes(),
    )?;
    publisher.publish(state_topic, state.as_str().as_bytes())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::systems::mapping::SwitchState;

    #[derive(Default)]
    struct RecordingPublisher {
        sent: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl ControlPublisher for RecordingPublisher {
        fn publish(&self, topic: &str, payload: &[u8]) -> Result<()> {
            self.sent
                .borrow_mut()
                .push((String::from(topic), payload.to_vec()));
            Ok(())
        }
    }

    fn update(value: ControlValue) -> ControlUpdate {
        ControlUpdate {
            value,
            finger_distance: 142.7,
            timestamp: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        }
    }

    #[test]
    fn test_servo_update_payload() {
        let publisher = RecordingPublisher::default();
        publish_servo_update(
            &publisher,
            "esp32/servo/control",
            &update(ControlValue::Angle(96)),
        )
        .unwrap();

        let sent = publisher.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "esp32/servo/control");
        let message: ServoControlMessage = serde_json::from_slice(&sent[0].1).unwrap();
        assert_eq!(message.servo_angle, 96);
        assert_eq!(message.finger_distance, 142);
        assert_eq!(message.timestamp, 1_700_000_000.);
    }

    #[test]
    fn test_switch_update_payloads() {
        let publisher = RecordingPublisher::default();
        publish_switch_update(
            &publisher,
            "gesture/fingerDistance",
            "gesture/led",
            &update(ControlValue::Switch(SwitchState::On)),
        )
        .unwrap();

        let sent = publisher.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "gesture/fingerDistance");
        assert_eq!(sent[0].1, b"142");
        assert_eq!(sent[1].0, "gesture/led");
        assert_eq!(sent[1].1, b"on");
    }

    #[test]
    fn test_wrong_value_kind_is_rejected() {
        let publisher = RecordingPublisher::default();
        assert!(publish_servo_update(
            &publisher,
            "esp32/servo/control",
            &update(ControlValue::Switch(SwitchState::Off)),
        )
        .is_err());
        assert!(publisher.sent.borrow().is_empty());
    }
}
