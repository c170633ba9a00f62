pub mod geometry_utils;
pub mod messages;
pub mod pipeline;
pub mod settings;
pub mod systems;
pub mod tether_interface;
pub mod tracking;

pub type Point2D = (f32, f32);
