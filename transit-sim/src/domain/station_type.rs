//! Station type tags.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an unrecognised station type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station type: {name:?}")]
pub struct InvalidStationType {
    name: String,
}

/// The shape identity of a station, and the destination of a traveler.
///
/// The set is closed: stations are built only from these variants, so code
/// holding a `StationType` never has to handle an unknown shape.
///
/// # Examples
///
/// ```
/// use transit_sim::domain::StationType;
///
/// assert_eq!(StationType::parse("square").unwrap(), StationType::Square);
/// assert!(StationType::parse("hexagon").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationType {
    Circle,
    Square,
    Triangle,
}

impl StationType {
    /// All station types, in declaration order.
    pub const ALL: [StationType; 3] = [
        StationType::Circle,
        StationType::Square,
        StationType::Triangle,
    ];

    /// Parse a station type from its name (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, InvalidStationType> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(StationType::Circle),
            "square" => Ok(StationType::Square),
            "triangle" => Ok(StationType::Triangle),
            _ => Err(InvalidStationType { name: s.to_string() }),
        }
    }

    /// Returns the lowercase name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            StationType::Circle => "circle",
            StationType::Square => "square",
            StationType::Triangle => "triangle",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
