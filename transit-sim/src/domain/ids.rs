//! Identifier types for network entities.
//!
//! Stations, edges and lines live in the network arena and are never
//! destroyed, so each identifier doubles as an index into its arena.
//! Identifiers are handed out by an [`IdAllocator`] owned by the network
//! rather than a process-wide counter.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the arena index for this identifier.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                $name(value)
            }
        }
    };
}

entity_id!(
    /// Identifies a station.
    ///
    /// ```
    /// use transit_sim::domain::StationId;
    ///
    /// let id = StationId(3);
    /// assert_eq!(id.to_string(), "S3");
    /// assert_eq!(id.index(), 3);
    /// ```
    StationId,
    "S"
);
entity_id!(
    /// Identifies an edge (a track segment owned by one line).
    EdgeId,
    "E"
);
entity_id!(
    /// Identifies a line.
    LineId,
    "L"
);
entity_id!(
    /// Identifies a train.
    TrainId,
    "T"
);
entity_id!(
    /// Identifies a traveler.
    TravelerId,
    "P"
);

/// Monotonic identifier allocator for one kind of entity.
///
/// # Examples
///
/// ```
/// use transit_sim::domain::{IdAllocator, StationId};
///
/// let mut ids: IdAllocator<StationId> = IdAllocator::new();
/// assert_eq!(ids.allocate(), StationId(0));
/// assert_eq!(ids.allocate(), StationId(1));
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator<I> {
    next: usize,
    _kind: PhantomData<I>,
}

impl<I: From<usize>> IdAllocator<I> {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self {
            next: 0,
            _kind: PhantomData,
        }
    }

    /// Hand out the next identifier.
    pub fn allocate(&mut self) -> I {
        let id = I::from(self.next);
        self.next += 1;
        id
    }
}

impl<I: From<usize>> Default for IdAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic() {
        let mut ids: IdAllocator<LineId> = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert_eq!((a, b, c), (LineId(0), LineId(1), LineId(2)));
    }

    #[test]
    fn allocators_are_independent() {
        let mut stations: IdAllocator<StationId> = IdAllocator::default();
        let mut edges: IdAllocator<EdgeId> = IdAllocator::default();
        stations.allocate();
        stations.allocate();
        assert_eq!(edges.allocate(), EdgeId(0));
        assert_eq!(stations.allocate(), StationId(2));
    }

    #[test]
    fn display_prefixes() {
        assert_eq!(StationId(7).to_string(), "S7");
        assert_eq!(EdgeId(1).to_string(), "E1");
        assert_eq!(LineId(0).to_string(), "L0");
        assert_eq!(TrainId(2).to_string(), "T2");
        assert_eq!(TravelerId(9).to_string(), "P9");
    }
}
