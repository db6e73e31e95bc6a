//! The hull-painting robot.
//!
//! The controller program reads the color of the panel under the robot and
//! answers with two values: the color to paint it and which way to turn.
//! The robot then advances one panel and the cycle repeats until the
//! controller halts.

use std::collections::HashMap;

use intcode_vm::{Machine, Program, Status};

use crate::error::{blocked_failure, DriverError};
use crate::grid::{Direction, Point};

/// Panel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    fn from_output(value: i64) -> Result<Color, DriverError> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            other => Err(DriverError::Protocol(format!(
                "robot painted unknown color {}",
                other
            ))),
        }
    }

    fn camera_value(self) -> i64 {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

/// The panels the robot has painted at least once. Unpainted panels are
/// black.
#[derive(Clone, Debug, Default)]
pub struct Hull {
    panels: HashMap<Point, Color>,
}

impl Hull {
    /// The color at `point` (black if never painted).
    pub fn color_at(&self, point: Point) -> Color {
        self.panels.get(&point).copied().unwrap_or_default()
    }

    /// How many distinct panels were painted at least once.
    pub fn painted_count(&self) -> usize {
        self.panels.len()
    }

    /// Render the painted region as rows of `#` (white) and `.` (black).
    pub fn render(&self) -> String {
        let white: Vec<Point> = self
            .panels
            .iter()
            .filter(|(_, &c)| c == Color::White)
            .map(|(&p, _)| p)
            .collect();
        let Some(first) = white.first() else {
            return String::new();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &white {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let mut out = String::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let glyph = match self.color_at(Point::new(x, y)) {
                    Color::White => '#',
                    Color::Black => '.',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

/// Run the painting robot from the origin facing up, over a hull whose
/// origin panel starts as `start`. Returns the finished hull.
pub fn paint_hull(program: &Program, start: Color) -> Result<Hull, DriverError> {
    let mut machine = Machine::new(program);
    let mut hull = Hull::default();
    if start == Color::White {
        hull.panels.insert(Point::ORIGIN, start);
    }

    let mut position = Point::ORIGIN;
    let mut facing = Direction::Up;
    let mut pending: Vec<i64> = Vec::new();

    loop {
        machine.push_input(hull.color_at(position).camera_value());
        let status = machine.run_until_blocked();
        pending.extend(machine.drain_output());

        // Paint-and-turn pairs; a trailing unpaired value stays buffered
        // until the controller produces its partner.
        for pair in pending.chunks_exact(2) {
            hull.panels.insert(position, Color::from_output(pair[0])?);
            facing = match pair[1] {
                0 => facing.turn_left(),
                1 => facing.turn_right(),
                other => {
                    return Err(DriverError::Protocol(format!(
                        "robot made unknown turn {}",
                        other
                    )))
                }
            };
            position = position.step(facing);
        }
        let consumed = pending.len() - pending.len() % 2;
        pending.drain(..consumed);

        match status {
            Status::Suspended => continue,
            Status::Halted => break,
            _ => return Err(blocked_failure(&machine, "driving the painting robot")),
        }
    }

    if !pending.is_empty() {
        return Err(DriverError::Protocol(
            "robot halted mid paint-and-turn pair".to_string(),
        ));
    }
    Ok(hull)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(cells: &[i64]) -> Program {
        Program::new(cells.to_vec())
    }

    #[test]
    fn paints_and_turns() {
        // Paint white + turn left, then paint black + turn left, then halt.
        let controller = program(&[104, 1, 104, 0, 104, 0, 104, 0, 99]);
        let hull = paint_hull(&controller, Color::Black).unwrap();

        assert_eq!(hull.painted_count(), 2);
        assert_eq!(hull.color_at(Point::ORIGIN), Color::White);
        // After turning left from Up the robot walked to (-1, 0).
        assert_eq!(hull.color_at(Point::new(-1, 0)), Color::Black);
    }

    #[test]
    fn starting_panel_color_is_visible_to_the_camera() {
        // Echo the camera reading back as the paint color, turn right.
        let controller = program(&[3, 100, 4, 100, 104, 1, 99]);
        let hull = paint_hull(&controller, Color::White).unwrap();
        assert_eq!(hull.color_at(Point::ORIGIN), Color::White);
    }

    #[test]
    fn render_draws_white_panels() {
        // Paint the origin white, turn right, paint (1, 0) white, halt.
        let controller = program(&[104, 1, 104, 1, 104, 1, 104, 0, 99]);
        let hull = paint_hull(&controller, Color::Black).unwrap();
        assert_eq!(hull.render(), "##\n");
    }

    #[test]
    fn unknown_color_is_a_protocol_error() {
        let controller = program(&[104, 9, 104, 0, 99]);
        let err = paint_hull(&controller, Color::Black).unwrap_err();
        assert!(matches!(err, DriverError::Protocol(_)));
    }

    #[test]
    fn halting_mid_pair_is_a_protocol_error() {
        let controller = program(&[104, 1, 99]);
        let err = paint_hull(&controller, Color::Black).unwrap_err();
        assert!(matches!(err, DriverError::Protocol(_)));
    }
}
