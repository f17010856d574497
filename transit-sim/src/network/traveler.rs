//! Travelers (passengers).

use crate::domain::{LineId, StationId, StationType, TravelerId};
use crate::routing::{Route, StationGraph, resolve_route};

/// An agent travelling towards any station of its destination type.
///
/// A traveler is owned by value by exactly one holder at a time: a
/// station's waiting queue or a train's passenger list.
#[derive(Debug, Clone, PartialEq)]
pub struct Traveler {
    id: TravelerId,
    destination: StationType,
    route: Route,
}

impl Traveler {
    /// Create a traveler with an unresolved route.
    pub fn new(id: TravelerId, destination: StationType) -> Self {
        Self {
            id,
            destination,
            route: Route::unresolved(),
        }
    }

    pub fn id(&self) -> TravelerId {
        self.id
    }

    /// The station type this traveler wants to reach.
    pub fn destination(&self) -> StationType {
        self.destination
    }

    /// The most recently resolved route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Where to get off next: a transfer station, or the final stop.
    pub fn target_station(&self) -> Option<StationId> {
        self.route.target_station
    }

    /// Line to board first. `None` when unresolved or already there.
    pub fn target_line(&self) -> Option<LineId> {
        self.route.target_line
    }

    /// Whether the first leg rides its edge backwards.
    pub fn is_reversed(&self) -> bool {
        self.route.is_reversed
    }

    /// Resolve this traveler's route from `start` against the current graph.
    pub fn calculate_target_station<G: StationGraph + ?Sized>(
        &mut self,
        start: StationId,
        graph: &G,
    ) {
        self.route = resolve_route(graph, start, self.destination);
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }
}

impl std::fmt::Display for Traveler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bound for {}", self.id, self.destination)?;
        match (self.route.target_line, self.route.target_station) {
            (Some(line), Some(station)) => write!(
                f,
                " taking {line} (reversed: {}) to {station}",
                self.route.is_reversed
            ),
            (None, Some(station)) => write!(f, " at {station}"),
            _ => write!(f, " with no route"),
        }
    }
}
