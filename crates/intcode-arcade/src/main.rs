//! Intcode arcade - play the cabinet in a terminal.
//!
//! Usage: `intcode-arcade <program-image>`. Arrow keys steer the joystick,
//! `a` hands the paddle to the autopilot, `q` quits.

fn main() {
    if let Err(e) = intcode_arcade::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
