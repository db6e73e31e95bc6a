//! Repair-droid maze exploration.
//!
//! The droid accepts one movement command at a time (north/south/west/east)
//! and answers with what happened: it hit a wall, it moved, or it moved and
//! is now on the oxygen system. The transport sits behind the [`Remote`]
//! trait so the explorer can be exercised against a scripted maze as well
//! as a live machine.

use std::collections::{HashMap, VecDeque};

use intcode_vm::{Machine, Program, Status};

use crate::error::{blocked_failure, DriverError};
use crate::grid::Point;

/// A movement command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    North,
    South,
    West,
    East,
}

impl Movement {
    pub const ALL: [Movement; 4] = [
        Movement::North,
        Movement::South,
        Movement::West,
        Movement::East,
    ];

    /// The command code the droid program expects.
    pub fn command(self) -> i64 {
        match self {
            Movement::North => 1,
            Movement::South => 2,
            Movement::West => 3,
            Movement::East => 4,
        }
    }

    pub fn reverse(self) -> Movement {
        match self {
            Movement::North => Movement::South,
            Movement::South => Movement::North,
            Movement::West => Movement::East,
            Movement::East => Movement::West,
        }
    }

    fn apply(self, point: Point) -> Point {
        let (dx, dy) = match self {
            Movement::North => (0, -1),
            Movement::South => (0, 1),
            Movement::West => (-1, 0),
            Movement::East => (1, 0),
        };
        Point::new(point.x + dx, point.y + dy)
    }
}

/// The droid's answer to a movement command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    /// A wall; the droid did not move.
    Wall,
    /// The droid moved one step.
    Moved,
    /// The droid moved one step and is on the oxygen system.
    MovedToOxygen,
}

/// One movement round-trip with the droid.
pub trait Remote {
    fn probe(&mut self, movement: Movement) -> Result<Reply, DriverError>;
}

/// A [`Remote`] backed by a live machine.
pub struct MachineRemote {
    machine: Machine,
}

impl MachineRemote {
    pub fn new(program: &Program) -> Self {
        Self {
            machine: Machine::new(program),
        }
    }
}

impl Remote for MachineRemote {
    fn probe(&mut self, movement: Movement) -> Result<Reply, DriverError> {
        self.machine.push_input(movement.command());
        let status = self.machine.run_until_blocked();
        if status != Status::Suspended {
            // The droid program loops forever; halting mid-walk is as fatal
            // as a fault.
            return Err(blocked_failure(&self.machine, "moving the droid"));
        }
        match self.machine.pop_output() {
            Some(0) => Ok(Reply::Wall),
            Some(1) => Ok(Reply::Moved),
            Some(2) => Ok(Reply::MovedToOxygen),
            Some(other) => Err(DriverError::Protocol(format!(
                "droid sent unknown status {}",
                other
            ))),
            None => Err(DriverError::Protocol(
                "droid sent no status for a movement".to_string(),
            )),
        }
    }
}

/// What the droid has learned about one location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Wall,
    Open,
}

/// The explored section of the ship.
#[derive(Clone, Debug, Default)]
pub struct SectionMap {
    cells: HashMap<Point, Cell>,
    oxygen: Option<Point>,
}

impl SectionMap {
    /// Where the oxygen system was found, if the section contains one.
    pub fn oxygen(&self) -> Option<Point> {
        self.oxygen
    }

    /// How many locations are known open (including the start).
    pub fn open_count(&self) -> usize {
        self.cells.values().filter(|&&c| c == Cell::Open).count()
    }

    /// Fewest movement commands from the start to the oxygen system.
    pub fn shortest_path_to_oxygen(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances_from(Point::ORIGIN).get(&oxygen).copied()
    }

    /// Minutes for oxygen to flood the whole section: the distance from the
    /// oxygen system to the open location farthest from it.
    pub fn fill_time(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances_from(oxygen).values().max().copied()
    }

    /// Breadth-first distances over open cells.
    fn distances_from(&self, start: Point) -> HashMap<Point, usize> {
        let mut distances = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(point) = queue.pop_front() {
            let next_dist = distances[&point] + 1;
            for movement in Movement::ALL {
                let neighbor = movement.apply(point);
                if self.cells.get(&neighbor) == Some(&Cell::Open)
                    && !distances.contains_key(&neighbor)
                {
                    distances.insert(neighbor, next_dist);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }
}

/// Walk the entire reachable section depth-first, backtracking the droid
/// after each branch, and return the finished map. The droid is back at the
/// start when this returns.
pub fn explore<R: Remote>(remote: &mut R) -> Result<SectionMap, DriverError> {
    let mut map = SectionMap::default();
    map.cells.insert(Point::ORIGIN, Cell::Open);
    visit(remote, &mut map, Point::ORIGIN)?;
    Ok(map)
}

fn visit<R: Remote>(
    remote: &mut R,
    map: &mut SectionMap,
    position: Point,
) -> Result<(), DriverError> {
    for movement in Movement::ALL {
        let next = movement.apply(position);
        if map.cells.contains_key(&next) {
            continue;
        }
        match remote.probe(movement)? {
            Reply::Wall => {
                map.cells.insert(next, Cell::Wall);
            }
            reply => {
                map.cells.insert(next, Cell::Open);
                if reply == Reply::MovedToOxygen {
                    map.oxygen = Some(next);
                }
                visit(remote, map, next)?;
                if remote.probe(movement.reverse())? == Reply::Wall {
                    return Err(DriverError::Protocol(
                        "droid could not backtrack over open ground".to_string(),
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A scripted maze standing in for the droid program. `#` is wall, `.`
    /// open, `O` the oxygen system, `S` the start.
    struct ScriptedMaze {
        rows: Vec<Vec<u8>>,
        position: Point,
    }

    impl ScriptedMaze {
        fn new(text: &str) -> Self {
            let rows: Vec<Vec<u8>> = text.lines().map(|l| l.bytes().collect()).collect();
            let mut start = None;
            for (y, row) in rows.iter().enumerate() {
                for (x, &b) in row.iter().enumerate() {
                    if b == b'S' {
                        start = Some(Point::new(x as i64, y as i64));
                    }
                }
            }
            Self {
                rows,
                position: start.expect("maze needs a start"),
            }
        }

        fn at(&self, point: Point) -> u8 {
            if point.y < 0 || point.x < 0 {
                return b'#';
            }
            self.rows
                .get(point.y as usize)
                .and_then(|row| row.get(point.x as usize))
                .copied()
                .unwrap_or(b'#')
        }
    }

    impl Remote for ScriptedMaze {
        fn probe(&mut self, movement: Movement) -> Result<Reply, DriverError> {
            let next = movement.apply(self.position);
            match self.at(next) {
                b'#' => Ok(Reply::Wall),
                b'O' => {
                    self.position = next;
                    Ok(Reply::MovedToOxygen)
                }
                _ => {
                    self.position = next;
                    Ok(Reply::Moved)
                }
            }
        }
    }

    #[test]
    fn explores_a_corridor() {
        let mut maze = ScriptedMaze::new("#####\n#S.O#\n#####");
        let map = explore(&mut maze).unwrap();
        assert_eq!(map.open_count(), 3);
        assert_eq!(map.shortest_path_to_oxygen(), Some(2));
        assert_eq!(map.fill_time(), Some(2));
        // The explorer backtracked the droid home.
        assert_eq!(maze.position, Point::new(1, 1));
    }

    #[test]
    fn explores_branching_section() {
        let maze_text = "\
#######
#S....#
#.###.#
#...#O#
#######";
        let mut maze = ScriptedMaze::new(maze_text);
        let map = explore(&mut maze).unwrap();
        assert_eq!(map.shortest_path_to_oxygen(), Some(6));
        assert_eq!(map.fill_time(), Some(10));
    }

    #[test]
    fn section_without_oxygen() {
        let mut maze = ScriptedMaze::new("###\n#S#\n###");
        let map = explore(&mut maze).unwrap();
        assert_eq!(map.oxygen(), None);
        assert_eq!(map.shortest_path_to_oxygen(), None);
        assert_eq!(map.fill_time(), None);
    }

    #[test]
    fn machine_remote_decodes_replies() {
        // A droid that answers: wall, moved, moved-to-oxygen, then repeats
        // whatever it last answered.
        // in -> [20]; out 0; in -> [20]; out 1; in -> [20]; out 2; loop out 2.
        let image = Program::new(vec![
            3, 20, 104, 0, 3, 20, 104, 1, 3, 20, 104, 2, 1105, 1, 8, 0, 0, 0, 0, 0, 0,
        ]);
        let mut remote = MachineRemote::new(&image);
        assert_eq!(remote.probe(Movement::North).unwrap(), Reply::Wall);
        assert_eq!(remote.probe(Movement::South).unwrap(), Reply::Moved);
        assert_eq!(remote.probe(Movement::West).unwrap(), Reply::MovedToOxygen);
        assert_eq!(remote.probe(Movement::East).unwrap(), Reply::MovedToOxygen);
    }
}
