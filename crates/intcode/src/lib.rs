//! Driver programs built on the Intcode machine.
//!
//! Each module here is a client of the `intcode-vm` driver contract: it owns
//! one or more machines, feeds their input channels, runs them until they
//! block, and interprets what comes out of their output channels.
//!
//! - [`diagnostics`]: memory-patch runs and self-test runs
//! - [`amplifier`]: serial amplifier chains and feedback rings
//! - [`robot`]: the hull-painting robot
//! - [`arcade`]: the arcade cabinet and its autopilot
//! - [`droid`]: repair-droid maze exploration
//! - [`scaffold`]: scaffold camera and the vacuum robot

pub mod amplifier;
pub mod arcade;
pub mod diagnostics;
pub mod droid;
mod error;
pub mod grid;
mod load;
pub mod robot;
pub mod scaffold;

pub use error::DriverError;
pub use load::{read_program, LoadError};
