//! Station ports.
//!
//! A port is a station-local slot grouping the edges that leave a station
//! in roughly the same direction. Ports drive edge layout and the
//! "which line can be extended from here" query.

use std::fmt;

use serde::Serialize;

use super::Position;

/// One of the eight compass slots around a station.
///
/// Canvas coordinates grow downwards, so `North` points towards smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StationPort {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl StationPort {
    /// Ports in counter-clockwise order starting from east, 45 degrees apart.
    const BY_ANGLE: [StationPort; 8] = [
        StationPort::East,
        StationPort::NorthEast,
        StationPort::North,
        StationPort::NorthWest,
        StationPort::West,
        StationPort::SouthWest,
        StationPort::South,
        StationPort::SouthEast,
    ];

    /// The port at `from` that points towards `to`.
    ///
    /// Coincident positions map to `East`.
    ///
    /// ```
    /// use transit_sim::domain::{Position, StationPort};
    ///
    /// let origin = Position::new(0.0, 0.0);
    /// assert_eq!(StationPort::facing(origin, Position::new(10.0, 0.0)), StationPort::East);
    /// assert_eq!(StationPort::facing(origin, Position::new(0.0, -10.0)), StationPort::North);
    /// assert_eq!(StationPort::facing(origin, Position::new(-5.0, 5.0)), StationPort::SouthWest);
    /// ```
    pub fn facing(from: Position, to: Position) -> StationPort {
        let dx = to.x - from.x;
        let dy = from.y - to.y;
        if dx == 0.0 && dy == 0.0 {
            return StationPort::East;
        }
        let degrees = dy.atan2(dx).to_degrees();
        let sector = (degrees / 45.0).round() as i32;
        Self::BY_ANGLE[sector.rem_euclid(8) as usize]
    }
}

impl fmt::Display for StationPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StationPort::North => "N",
            StationPort::NorthEast => "NE",
            StationPort::East => "E",
            StationPort::SouthEast => "SE",
            StationPort::South => "S",
            StationPort::SouthWest => "SW",
            StationPort::West => "W",
            StationPort::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing(dx: f32, dy: f32) -> StationPort {
        let centre = Position::new(100.0, 100.0);
        StationPort::facing(centre, Position::new(centre.x + dx, centre.y + dy))
    }

    #[test]
    fn cardinal_directions() {
        assert_eq!(facing(50.0, 0.0), StationPort::East);
        assert_eq!(facing(-50.0, 0.0), StationPort::West);
        assert_eq!(facing(0.0, -50.0), StationPort::North);
        assert_eq!(facing(0.0, 50.0), StationPort::South);
    }

    #[test]
    fn diagonal_directions() {
        assert_eq!(facing(50.0, -50.0), StationPort::NorthEast);
        assert_eq!(facing(-50.0, -50.0), StationPort::NorthWest);
        assert_eq!(facing(-50.0, 50.0), StationPort::SouthWest);
        assert_eq!(facing(50.0, 50.0), StationPort::SouthEast);
    }

    #[test]
    fn nearly_horizontal_snaps_to_east() {
        assert_eq!(facing(100.0, 10.0), StationPort::East);
        assert_eq!(facing(100.0, -10.0), StationPort::East);
    }

    #[test]
    fn coincident_positions() {
        assert_eq!(facing(0.0, 0.0), StationPort::East);
    }

    #[test]
    fn edge_ends_face_each_other() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(30.0, 40.0);
        assert_eq!(StationPort::facing(a, b), StationPort::SouthEast);
        assert_eq!(StationPort::facing(b, a), StationPort::NorthWest);
    }
}
