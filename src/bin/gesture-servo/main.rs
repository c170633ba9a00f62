use clap::Parser;

use env_logger::Env;
use log::{debug, error, info};
use std::thread;
use std::time::{Duration, SystemTime};
use tether_agent::TetherAgentOptionsBuilder;

use gesture_mqtt_controller::pipeline::{GesturePipeline, TickOutcome};
use gesture_mqtt_controller::settings::Cli;
use gesture_mqtt_controller::systems::ControlMode;
use gesture_mqtt_controller::tether_interface::{
    decode_landmark_frame, publish_servo_update, Inputs,
};
use gesture_mqtt_controller::tracking::fingertip_pair;

/// Below this fingertip distance (px) the gesture counts as a pinch
const PINCH_PROXIMITY_PX: f32 = 50.;

fn main() {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("paho_mqtt", log::LevelFilter::Warn)
        .filter_module("tether_agent", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    let mut tether_agent = TetherAgentOptionsBuilder::new(&cli.agent_role)
        .id(Some(&cli.agent_group))
        .host(Some(&cli.tether_host.to_string()))
        .build()
        .expect("failed to init and/or connect Tether Agent");

    let inputs = Inputs::new(&mut tether_agent);
    let mut pipeline = GesturePipeline::new(ControlMode::Continuous, &cli);

    info!(
        "Servo controller ready; publishing on \"{}\"",
        &cli.servo_topic
    );

    loop {
        let mut work_done = false;

        if let Some((topic, message)) = tether_agent.check_messages() {
            work_done = true;
            if inputs.landmarks_input.matches(&topic) {
                let frame = match decode_landmark_frame(&message) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!("{}", e);
                        continue;
                    }
                };

                match pipeline.tick(fingertip_pair(&frame), SystemTime::now()) {
                    TickOutcome::Publish(update) => {
                        if update.finger_distance < PINCH_PROXIMITY_PX {
                            debug!(
                                "Pinch: fingertips only {}px apart",
                                update.finger_distance as u32
                            );
                        }
                        // Never retried; next tick brings a fresh value anyway
                        if let Err(e) =
                            publish_servo_update(&tether_agent, &cli.servo_topic, &update)
                        {
                            error!("Failed to publish servo control: {}", e);
                        }
                    }
                    TickOutcome::Held => {}
                    TickOutcome::NoSignal => {}
                }
            }
        }

        if !work_done {
            thread::sleep(Duration::from_millis(1));
        }
    }
}
