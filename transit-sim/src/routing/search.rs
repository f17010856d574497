//! BFS destination search.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::domain::{EdgeId, LineId, StationId, StationType};

use super::StationGraph;

/// Outcome of resolving a traveler's destination.
///
/// An unreachable destination is represented by [`Route::unresolved`],
/// not an error: the traveler waits until the graph changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Route {
    /// Where to get off next: the transfer station if the journey changes
    /// lines, otherwise the final stop.
    pub target_station: Option<StationId>,

    /// Line of the first edge ridden. `None` for zero-hop journeys.
    pub target_line: Option<LineId>,

    /// Whether the first edge is ridden `to` → `from`.
    pub is_reversed: bool,

    /// First edge of the journey.
    pub first_edge: Option<EdgeId>,

    /// The station of the requested type that the journey ends at.
    pub destination: Option<StationId>,
}

impl Route {
    /// The route of a traveler with nowhere to go.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Returns true if a destination was found.
    pub fn is_resolved(&self) -> bool {
        self.destination.is_some()
    }

    /// Returns true if a train on `line`, leaving along `edge` in the given
    /// direction, starts this route's first leg.
    pub fn boards(&self, line: LineId, edge: EdgeId, reversed: bool) -> bool {
        self.target_line == Some(line)
            && self.first_edge == Some(edge)
            && self.is_reversed == reversed
    }
}

/// BFS queue entry.
#[derive(Debug, Clone)]
struct SearchState {
    station: StationId,

    /// Edge used to arrive here; `None` for the start.
    arrived_by: Option<EdgeId>,

    /// Where the traveler last changed lines.
    transfer_station: Option<StationId>,

    /// Lines reachable from here without a further transfer.
    current_lines: HashSet<LineId>,

    /// First edge of the whole journey.
    first_edge: Option<EdgeId>,
}

/// Resolve the route from `start` to the nearest station of `destination` type.
///
/// The start station itself is checked first, so a traveler already at a
/// matching station resolves with no line. Each station is enqueued at most
/// once; the first dequeued match ends the search.
pub fn resolve_route<G: StationGraph + ?Sized>(
    graph: &G,
    start: StationId,
    destination: StationType,
) -> Route {
    if graph.station(start).is_none() {
        return Route::unresolved();
    }

    let mut visited: HashSet<StationId> = HashSet::new();
    let mut queue: VecDeque<SearchState> = VecDeque::new();

    visited.insert(start);
    queue.push_back(SearchState {
        station: start,
        arrived_by: None,
        transfer_station: None,
        current_lines: graph.lines_at(start).into_iter().collect(),
        first_edge: None,
    });

    while let Some(state) = queue.pop_front() {
        let Some(station) = graph.station(state.station) else {
            continue;
        };

        if station.station_type() == destination {
            let first_edge = state.first_edge.and_then(|id| graph.edge(id));
            let route = Route {
                target_station: Some(state.transfer_station.unwrap_or(state.station)),
                target_line: first_edge.map(|e| e.line()),
                is_reversed: first_edge.is_some_and(|e| e.to() == start),
                first_edge: state.first_edge,
                destination: Some(state.station),
            };
            trace!(
                %start,
                %destination,
                found = %state.station,
                arrived_by = ?state.arrived_by,
                transfer = ?state.transfer_station,
                "Resolved route"
            );
            return route;
        }

        for edge_id in graph.edges_accessible_from(state.station) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(next) = edge.other_end(state.station) else {
                continue;
            };
            if !visited.insert(next) {
                continue;
            }

            let next_lines: HashSet<LineId> = graph.lines_at(next).into_iter().collect();
            let is_transfer = state.current_lines.is_disjoint(&next_lines);

            let first_edge = match state.first_edge {
                Some(first) => Some(first),
                None if is_transfer => None,
                None => Some(edge_id),
            };

            queue.push_back(SearchState {
                station: next,
                arrived_by: Some(edge_id),
                transfer_station: if is_transfer {
                    Some(state.station)
                } else {
                    state.transfer_station
                },
                current_lines: if is_transfer {
                    next_lines
                } else {
                    state.current_lines.clone()
                },
                first_edge,
            });
        }
    }

    trace!(%start, %destination, "No reachable station of destination type");
    Route::unresolved()
}
