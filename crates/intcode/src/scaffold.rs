//! Scaffold camera and the vacuum robot.
//!
//! The camera program prints the scaffold as ASCII art, one code per output
//! value, rows separated by newlines. Waking the robot (memory address 0
//! set to 2) turns the same program into an interactive one that reads a
//! movement routine as ASCII lines and reports collected dust as its final
//! output.

use std::fmt;

use intcode_vm::{Machine, Program, Status};

use crate::error::{blocked_failure, DriverError};
use crate::grid::{Direction, Point};

/// One entry of a movement routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TurnLeft,
    TurnRight,
    Forward(i64),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::TurnLeft => write!(f, "L"),
            Command::TurnRight => write!(f, "R"),
            Command::Forward(n) => write!(f, "{}", n),
        }
    }
}

/// Format a command list the way the robot reads it: comma-separated on one
/// line.
pub fn routine_line(commands: &[Command]) -> String {
    let parts: Vec<String> = commands.iter().map(Command::to_string).collect();
    parts.join(",")
}

/// A captured camera frame.
#[derive(Clone, Debug)]
pub struct ScaffoldView {
    rows: Vec<Vec<u8>>,
    robot: Option<(Point, Direction)>,
}

impl ScaffoldView {
    /// Parse a frame from its ASCII text.
    pub fn from_text(text: &str) -> ScaffoldView {
        let rows: Vec<Vec<u8>> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.bytes().collect())
            .collect();
        let mut robot = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, &b) in row.iter().enumerate() {
                let facing = match b {
                    b'^' => Some(Direction::Up),
                    b'>' => Some(Direction::Right),
                    b'v' => Some(Direction::Down),
                    b'<' => Some(Direction::Left),
                    _ => None,
                };
                if let Some(facing) = facing {
                    robot = Some((Point::new(x as i64, y as i64), facing));
                }
            }
        }
        ScaffoldView { rows, robot }
    }

    /// The robot's position and facing, if it is in the frame.
    pub fn robot(&self) -> Option<(Point, Direction)> {
        self.robot
    }

    /// Whether `point` is on the scaffold (the robot itself stands on it).
    pub fn is_scaffold(&self, point: Point) -> bool {
        if point.x < 0 || point.y < 0 {
            return false;
        }
        match self
            .rows
            .get(point.y as usize)
            .and_then(|row| row.get(point.x as usize))
        {
            Some(b'.') | None => false,
            Some(_) => true,
        }
    }

    /// Sum over all scaffold intersections of x*y.
    pub fn alignment_sum(&self) -> i64 {
        let mut sum = 0;
        for (y, row) in self.rows.iter().enumerate() {
            for x in 0..row.len() {
                let point = Point::new(x as i64, y as i64);
                let crossing = self.is_scaffold(point)
                    && Direction::ALL.iter().all(|&d| self.is_scaffold(point.step(d)));
                if crossing {
                    sum += point.x * point.y;
                }
            }
        }
        sum
    }

    /// Trace the scaffold end to end from the robot's position, producing
    /// the full uncompressed movement command list.
    pub fn trace_path(&self) -> Vec<Command> {
        let Some((mut position, mut facing)) = self.robot else {
            return Vec::new();
        };
        let start = position;
        let mut commands = Vec::new();
        let mut run = 0;

        loop {
            if self.is_scaffold(position.step(facing)) {
                position = position.step(facing);
                run += 1;
                continue;
            }
            if run > 0 {
                commands.push(Command::Forward(run));
                run = 0;
            }
            if self.is_scaffold(position.step(facing.turn_left())) {
                facing = facing.turn_left();
                commands.push(Command::TurnLeft);
            } else if self.is_scaffold(position.step(facing.turn_right())) {
                facing = facing.turn_right();
                commands.push(Command::TurnRight);
            } else if position == start && self.is_scaffold(position.step(facing.reverse())) {
                // Parked facing away from the scaffold: turn around in place.
                facing = facing.reverse();
                commands.push(Command::TurnRight);
                commands.push(Command::TurnRight);
            } else {
                break;
            }
        }
        commands
    }

    /// The frame as text, rows separated by newlines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }
}

/// Run the camera program to completion and parse the frame it prints.
pub fn capture_view(program: &Program) -> Result<ScaffoldView, DriverError> {
    let mut machine = Machine::new(program);
    if machine.run_until_blocked() != Status::Halted {
        return Err(blocked_failure(&machine, "capturing the camera frame"));
    }
    let text = ascii_text(machine.drain_output())?;
    Ok(ScaffoldView::from_text(&text))
}

/// Wake the vacuum robot and stream it a movement routine.
///
/// `main` names the subroutines to play (e.g. `"A,B,A,C"`); `a`, `b`, `c`
/// are their command lists. Returns the dust count the robot reports after
/// finishing its sweep. With `video` on, the robot prints a frame after
/// every move; the frames are discarded here either way.
pub fn run_vacuum(
    program: &Program,
    main: &str,
    a: &[Command],
    b: &[Command],
    c: &[Command],
    video: bool,
) -> Result<i64, DriverError> {
    let mut machine = Machine::new(program);
    machine.memory_mut().write(0, 2)?;
    for line in [
        main.to_string(),
        routine_line(a),
        routine_line(b),
        routine_line(c),
        if video { "y" } else { "n" }.to_string(),
    ] {
        machine.feed(line.bytes().map(i64::from));
        machine.push_input(10);
    }

    if machine.run_until_blocked() != Status::Halted {
        return Err(blocked_failure(&machine, "sweeping the scaffold"));
    }
    machine
        .drain_output()
        .last()
        .copied()
        .filter(|&dust| dust > 127)
        .ok_or_else(|| DriverError::Protocol("vacuum robot reported no dust count".to_string()))
}

/// Decode a stream of ASCII output values, rejecting anything out of range.
fn ascii_text(output: Vec<i64>) -> Result<String, DriverError> {
    output
        .into_iter()
        .map(|value| {
            u8::try_from(value)
                .ok()
                .filter(u8::is_ascii)
                .map(char::from)
                .ok_or_else(|| {
                    DriverError::Protocol(format!("camera emitted non-ASCII value {}", value))
                })
        })
        .collect()
}
