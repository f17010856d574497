//! Network error types.
//!
//! These are construction-time invariant violations (programming or data
//! errors) plus the capacity rejection returned when a traveler is added
//! to a full station. An unreachable destination is not an error: it is
//! an unresolved [`Route`](crate::routing::Route).

use crate::domain::{EdgeId, InvalidStationType, LineId, StationId};

use super::Traveler;

/// Errors raised while building or mutating the network.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetworkError {
    /// The edge is already part of the line
    #[error("edge {edge} is already part of line {line}")]
    DuplicateEdge { line: LineId, edge: EdgeId },

    /// The edge was created for a different line
    #[error("edge {edge} belongs to line {edge_line}, not {line}")]
    EdgeLineMismatch {
        edge: EdgeId,
        edge_line: LineId,
        line: LineId,
    },

    /// An edge must join two distinct stations
    #[error("edge cannot start and end at station {0}")]
    InvalidEdge(StationId),

    #[error("unknown station {0}")]
    UnknownStation(StationId),

    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    #[error("unknown line {0}")]
    UnknownLine(LineId),

    /// Station built from an unrecognised type name
    #[error(transparent)]
    InvalidStationType(#[from] InvalidStationType),

    /// The station's waiting queue is full; the traveler is handed back
    #[error("station {station} is at capacity ({capacity} waiting)")]
    StationAtCapacity {
        station: StationId,
        capacity: usize,
        traveler: Box<Traveler>,
    },
}

impl NetworkError {
    /// Recover the traveler from a capacity rejection.
    pub fn into_rejected_traveler(self) -> Option<Traveler> {
        match self {
            NetworkError::StationAtCapacity { traveler, .. } => Some(*traveler),
            _ => None,
        }
    }
}
