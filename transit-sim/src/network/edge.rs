//! Track segments.

use crate::domain::{EdgeId, LineId, StationId, StationPort};

/// A track segment between two stations, owned by one line.
///
/// The record is directional (`from` → `to`) but the physical track is
/// ridden both ways: trains and travelers carry a `reversed` flag meaning
/// "travelling `to` → `from`" instead of using a mirrored edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    from: StationId,
    to: StationId,
    line: LineId,
    from_port: StationPort,
    to_port: StationPort,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        line: LineId,
        (from, from_port): (StationId, StationPort),
        (to, to_port): (StationId, StationPort),
    ) -> Self {
        Self {
            id,
            from,
            to,
            line,
            from_port,
            to_port,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> StationId {
        self.from
    }

    pub fn to(&self) -> StationId {
        self.to
    }

    /// The line this edge belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    pub fn from_port(&self) -> StationPort {
        self.from_port
    }

    pub fn to_port(&self) -> StationPort {
        self.to_port
    }

    /// Returns true if either endpoint is `station`.
    pub fn touches_station(&self, station: StationId) -> bool {
        self.from == station || self.to == station
    }

    /// The endpoint opposite `station`, if `station` is an endpoint.
    pub fn other_end(&self, station: StationId) -> Option<StationId> {
        if station == self.from {
            Some(self.to)
        } else if station == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    /// The station a traversal starts from.
    pub fn departure(&self, reversed: bool) -> StationId {
        if reversed { self.to } else { self.from }
    }

    /// The station a traversal ends at.
    pub fn arrival(&self, reversed: bool) -> StationId {
        if reversed { self.from } else { self.to }
    }
}
