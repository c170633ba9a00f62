use std::net::{IpAddr, Ipv4Addr};

use clap::Parser;

// Some defaults; all of which can be overriden via CLI args
const TETHER_HOST: std::net::IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

const MAPPING_INPUT_MIN: f32 = 20.;
const MAPPING_INPUT_MAX: f32 = 250.;
const NEUTRAL_ANGLE: u8 = 90;

const SWITCH_THRESHOLD: f32 = 100.;
const SWITCH_PUBLISH_INTERVAL: f64 = 1.0;

const SERVO_TOPIC: &str = "esp32/servo/control";
const SWITCH_DISTANCE_TOPIC: &str = "gesture/fingerDistance";
const SWITCH_STATE_TOPIC: &str = "gesture/led";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The IP address of the MQTT broker (server)
    #[arg(long = "tether.host", default_value_t=TETHER_HOST)]
    pub tether_host: std::net::IpAddr,

    /// The Agent Role (type)
    #[arg(long="tether.role",default_value_t=String::from("gestureControl"))]
    pub agent_role: String,

    /// The Agent Group (ID)
    #[arg(long="tether.group",default_value_t=String::from("any"))]
    pub agent_group: String,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,

    /// Fingertip distance (px) that maps to the minimum servo angle
    #[arg(long = "mapping.inputMin", default_value_t = MAPPING_INPUT_MIN)]
    pub mapping_input_min: f32,

    /// Fingertip distance (px) that maps to the maximum servo angle
    #[arg(long = "mapping.inputMax", default_value_t = MAPPING_INPUT_MAX)]
    pub mapping_input_max: f32,

    /// Seed angle (degrees) used before any smoothing history exists
    #[arg(long = "smoothing.neutralAngle", default_value_t = NEUTRAL_ANGLE)]
    pub neutral_angle: u8,

    /// Fingertip distance (px) above which the switch turns on
    #[arg(long = "switch.threshold", default_value_t = SWITCH_THRESHOLD)]
    pub switch_threshold: f32,

    /// Min seconds between switch publishes when the state is unchanged
    #[arg(long = "switch.publishInterval", default_value_t = SWITCH_PUBLISH_INTERVAL)]
    pub switch_publish_interval: f64,

    /// Topic for servo control messages (JSON)
    #[arg(long="servo.topic",default_value_t=String::from(SERVO_TOPIC))]
    pub servo_topic: String,

    /// Topic for raw fingertip distance (decimal integer string, px)
    #[arg(long="switch.distanceTopic",default_value_t=String::from(SWITCH_DISTANCE_TOPIC))]
    pub switch_distance_topic: String,

    /// Topic for switch state ("on"/"off")
    #[arg(long="switch.stateTopic",default_value_t=String::from(SWITCH_STATE_TOPIC))]
    pub switch_state_topic: String,
}
