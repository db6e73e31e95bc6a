//! Application state for the arcade.

use intcode::arcade::{Cabinet, Joystick};
use intcode::DriverError;
use intcode_vm::{Program, Status};

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The cabinet is live and consuming joystick readings.
    Playing,
    /// The game program halted; the final score stands.
    GameOver,
    /// The cabinet errored; see the message.
    Broken,
}

/// Application state.
pub struct App {
    /// The cabinet being played.
    pub cabinet: Cabinet,
    /// Whether the autopilot holds the joystick.
    pub autopilot: bool,
    /// Deflection queued by the keyboard for the next reading.
    pub joystick: Joystick,
    /// Where the game stands.
    pub phase: Phase,
    /// Error text when the cabinet broke.
    pub last_error: Option<String>,
    /// Whether the app is still running.
    pub running: bool,
}

impl App {
    /// Insert quarters and get ready to play.
    pub fn new(program: &Program) -> Result<Self, DriverError> {
        Ok(Self {
            cabinet: Cabinet::with_quarters(program)?,
            autopilot: false,
            joystick: Joystick::Neutral,
            phase: Phase::Playing,
            last_error: None,
            running: true,
        })
    }

    /// Queue a joystick deflection for the next reading.
    pub fn steer(&mut self, joystick: Joystick) {
        self.autopilot = false;
        self.joystick = joystick;
    }

    /// Toggle the autopilot.
    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
    }

    /// Advance the cabinet by one joystick reading. Called once per frame.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let joystick = if self.autopilot {
            self.cabinet.autopilot()
        } else {
            // A key tap deflects the stick for a single reading.
            std::mem::take(&mut self.joystick)
        };
        match self.cabinet.advance(joystick) {
            Ok(Status::Halted) => self.phase = Phase::GameOver,
            Ok(_) => {}
            Err(e) => {
                self.last_error = Some(e.to_string());
                self.phase = Phase::Broken;
            }
        }
    }
}
