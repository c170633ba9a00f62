use clap::Parser;

use env_logger::Env;
use log::{debug, error, info};
use std::thread;
use std::time::{Duration, SystemTime};
use tether_agent::TetherAgentOptionsBuilder;

use gesture_mqtt_controller::pipeline::{GesturePipeline, TickOutcome};
use gesture_mqtt_controller::settings::Cli;
use gesture_mqtt_controller::systems::mapping::ControlValue;
use gesture_mqtt_controller::systems::ControlMode;
use gesture_mqtt_controller::tether_interface::{
    decode_landmark_frame, publish_switch_update, Inputs,
};
use gesture_mqtt_controller::tracking::fingertip_pair;

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
    let mut pipeline = GesturePipeline::new(ControlMode::Discrete, &cli);

    info!(
        "Switch controller ready; publishing on \"{}\" and \"{}\"",
        &cli.switch_distance_topic, &cli.switch_state_topic
    );

    let mut message_count: u64 = 0;

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
                        match publish_switch_update(
                            &tether_agent,
                            &cli.switch_distance_topic,
                            &cli.switch_state_topic,
                            &update,
                        ) {
                            Ok(()) => {
                                message_count += 1;
                                if let ControlValue::Switch(state) = update.value {
                                    info!(
                                        "[{}] Distance: {}px -> {}",
                                        message_count,
                                        update.finger_distance as u32,
                                        state.as_str()
                                    );
                                }
                            }
                            // Never retried; the gate counts the attempt
                            // either way
                            Err(e) => error!("Failed to publish switch state: {}", e),
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
