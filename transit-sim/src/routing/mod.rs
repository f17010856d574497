//! Traveler route resolution using BFS.
//!
//! This module answers: "I am waiting at this station and want any station
//! of a given type - which line do I board, in which direction, and where
//! do I get off?"
//!
//! The search runs breadth-first over the station graph, so the chosen
//! destination is always the fewest edge hops away. Ties go to whichever
//! station the graph's edge order discovers first.

mod search;


pub use search::{Route, resolve_route};

use crate::domain::{EdgeId, LineId, StationId};
use crate::network::{Edge, Station};

/// Read-only view of the network used by routing.
///
/// This abstraction keeps the search independent of how the network
/// stores its entities.
pub trait StationGraph {
    fn station(&self, id: StationId) -> Option<&Station>;

    fn edge(&self, id: EdgeId) -> Option<&Edge>;

    /// Every edge a traveler at `station` could ride, in discovery order.
    fn edges_accessible_from(&self, station: StationId) -> Vec<EdgeId>;

    /// Distinct lines serving `station`.
    fn lines_at(&self, station: StationId) -> Vec<LineId>;
}
