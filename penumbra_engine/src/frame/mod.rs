//! Frame module
//!
//! Configuration, per-frame inputs, post-process program construction and
//! the frame driver that records, submits and presents one frame.

mod config;
mod frame_inputs;
mod programs;
mod frame_driver;

pub use config::FrameConfig;
pub use frame_inputs::FrameInputs;
pub use programs::{PostPrograms, ProgramSources};
pub use frame_driver::FrameDriver;
#[cfg(test)]
pub(crate) use frame_driver::create_targets;
