//! Terminal front end for the arcade cabinet.
//!
//! The cabinet's machine suspends every time it wants a joystick reading;
//! this front end draws the screen between suspensions and answers with
//! whatever the keyboard (or the autopilot) says. One frame per reading.

mod app;
mod event;
mod ui;

pub use app::App;

use std::error::Error;

/// Run the arcade: load the program image named on the command line and
/// hand it to the event loop.
pub fn run() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: intcode-arcade <program-image>")?;
    let program = intcode::read_program(&path)?;
    let mut app = App::new(&program)?;
    event::run_event_loop(&mut app)?;
    Ok(())
}
