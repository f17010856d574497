//! The network arena.
//!
//! `Network` owns every station, edge and line. Entities refer to each
//! other by id, and ids are allocated here, so there are no ownership
//! cycles and no global counters.

use tracing::debug;

use crate::domain::{
    EdgeId, IdAllocator, LineId, Position, StationId, StationPort, StationType, TrainId,
    TravelerId,
};
use crate::routing::{Route, StationGraph, resolve_route};
use crate::simulation::SimConfig;

use super::{Edge, Line, NetworkError, Station, Train, Traveler};

/// The complete transit network and its simulation state.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) config: SimConfig,
    pub(crate) stations: Vec<Station>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) lines: Vec<Line>,
    station_ids: IdAllocator<StationId>,
    edge_ids: IdAllocator<EdgeId>,
    line_ids: IdAllocator<LineId>,
    train_ids: IdAllocator<TrainId>,
    traveler_ids: IdAllocator<TravelerId>,
    pub(crate) delivered: usize,
    pub(crate) tick: u64,
}

impl Network {
    /// Create an empty network.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            stations: Vec::new(),
            edges: Vec::new(),
            lines: Vec::new(),
            station_ids: IdAllocator::new(),
            edge_ids: IdAllocator::new(),
            line_ids: IdAllocator::new(),
            train_ids: IdAllocator::new(),
            traveler_ids: IdAllocator::new(),
            delivered: 0,
            tick: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Lines in registration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.index())
    }

    /// Number of travelers that have reached a station of their type.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Number of completed simulation ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // ---------------------------------------------------------------
    // Topology
    // ---------------------------------------------------------------

    /// Add a station.
    pub fn add_station(&mut self, position: Position, station_type: StationType) -> StationId {
        let id = self.station_ids.allocate();
        debug!(station = %id, %station_type, x = position.x, y = position.y, "Creating station");
        self.stations.push(Station::new(
            id,
            position,
            station_type,
            self.config.station_capacity,
        ));
        id
    }

    /// Add a station from a type name, rejecting unknown types.
    pub fn add_station_named(
        &mut self,
        position: Position,
        station_type: &str,
    ) -> Result<StationId, NetworkError> {
        let station_type = StationType::parse(station_type)?;
        Ok(self.add_station(position, station_type))
    }

    /// Add a line. New lines start locked.
    pub fn add_line(&mut self, color: impl Into<String>) -> LineId {
        let id = self.line_ids.allocate();
        self.lines.push(Line::new(id, color));
        id
    }

    pub fn unlock_line(&mut self, line: LineId) -> Result<(), NetworkError> {
        self.line_mut(line)?.unlock();
        debug!(%line, "Unlocked line");
        Ok(())
    }

    pub fn set_line_hovered(&mut self, line: LineId, hovered: bool) -> Result<(), NetworkError> {
        self.line_mut(line)?.set_hovered(hovered);
        Ok(())
    }

    /// Create an edge for `line`, choosing ports from station positions.
    ///
    /// The edge is not yet part of the line; see [`Network::add_edge`].
    pub fn create_edge(
        &mut self,
        line: LineId,
        from: StationId,
        to: StationId,
    ) -> Result<EdgeId, NetworkError> {
        let from_pos = self.station_checked(from)?.position();
        let to_pos = self.station_checked(to)?.position();
        self.create_edge_with_ports(
            line,
            (from, StationPort::facing(from_pos, to_pos)),
            (to, StationPort::facing(to_pos, from_pos)),
        )
    }

    /// Create an edge for `line` with explicit ports at each end.
    pub fn create_edge_with_ports(
        &mut self,
        line: LineId,
        from: (StationId, StationPort),
        to: (StationId, StationPort),
    ) -> Result<EdgeId, NetworkError> {
        self.line_checked(line)?;
        self.station_checked(from.0)?;
        self.station_checked(to.0)?;
        if from.0 == to.0 {
            return Err(NetworkError::InvalidEdge(from.0));
        }
        let id = self.edge_ids.allocate();
        self.edges.push(Edge::new(id, line, from, to));
        Ok(id)
    }

    /// Add an edge to a line.
    ///
    /// Registers the edge at both endpoint stations' ports. The first edge
    /// of a line spawns its train, carrying one seed traveler.
    pub fn add_edge(&mut self, line: LineId, edge: EdgeId) -> Result<(), NetworkError> {
        let record = self
            .edges
            .get(edge.index())
            .cloned()
            .ok_or(NetworkError::UnknownEdge(edge))?;
        let target = self.line_checked(line)?;
        if target.contains_edge(edge) {
            return Err(NetworkError::DuplicateEdge { line, edge });
        }
        if record.line() != line {
            return Err(NetworkError::EdgeLineMismatch {
                edge,
                edge_line: record.line(),
                line,
            });
        }

        self.station_mut(record.from())?
            .add_edge_to_port(edge, line, record.from_port());
        self.station_mut(record.to())?
            .add_edge_to_port(edge, line, record.to_port());

        let first = self.line_checked(line)?.edges.is_empty();
        let seed = if first {
            let id = self.train_ids.allocate();
            let mut train = Train::new(id, edge, self.config.train_capacity);
            let traveler = self.new_traveler(self.config.seed_destination);
            train.carry(traveler);
            Some(train)
        } else {
            None
        };

        let target = self.line_mut(line)?;
        target.edges.push(edge);
        if let Some(train) = seed {
            debug!(%line, %edge, train = %train.id(), "Spawned train on first edge");
            target.trains.push(train);
        }
        debug!(
            %line,
            %edge,
            from = %record.from(),
            to = %record.to(),
            "Added edge to line"
        );
        Ok(())
    }

    /// Create an edge between two stations and add it to `line`.
    pub fn extend_line(
        &mut self,
        line: LineId,
        from: StationId,
        to: StationId,
    ) -> Result<EdgeId, NetworkError> {
        let edge = self.create_edge(line, from, to)?;
        self.add_edge(line, edge)?;
        Ok(edge)
    }

    // ---------------------------------------------------------------
    // Travelers
    // ---------------------------------------------------------------

    /// Allocate a traveler with an unresolved route.
    pub fn new_traveler(&mut self, destination: StationType) -> Traveler {
        Traveler::new(self.traveler_ids.allocate(), destination)
    }

    /// Queue a traveler at a station and recompute every waiting route there.
    ///
    /// Capacity is enforced: a full station rejects the traveler with
    /// [`NetworkError::StationAtCapacity`], which hands it back.
    pub fn add_person(&mut self, station: StationId, traveler: Traveler) -> Result<(), NetworkError> {
        let target = self.station_mut(station)?;
        if target.is_at_capacity() {
            return Err(NetworkError::StationAtCapacity {
                station,
                capacity: target.capacity(),
                traveler: Box::new(traveler),
            });
        }
        debug!(%station, traveler = %traveler.id(), destination = %traveler.destination(), "Traveler waiting");
        target.push_waiting(traveler);
        self.recalculate_passenger_routes(station);
        Ok(())
    }

    /// Create a traveler bound for `destination` and queue it at `station`.
    pub fn spawn_traveler(
        &mut self,
        station: StationId,
        destination: StationType,
    ) -> Result<TravelerId, NetworkError> {
        self.station_checked(station)?;
        let traveler = self.new_traveler(destination);
        let id = traveler.id();
        self.add_person(station, traveler)?;
        Ok(id)
    }

    /// Remove the waiting traveler at `index`, recomputing the rest.
    pub fn take_person(&mut self, station: StationId, index: usize) -> Option<Traveler> {
        let traveler = self.stations.get_mut(station.index())?.remove_waiting(index)?;
        self.recalculate_passenger_routes(station);
        Some(traveler)
    }

    /// Remove the most recently queued traveler, recomputing the rest.
    pub fn remove_person(&mut self, station: StationId) -> Option<Traveler> {
        let traveler = self.stations.get_mut(station.index())?.pop_waiting()?;
        self.recalculate_passenger_routes(station);
        Some(traveler)
    }

    /// Re-resolve the route of every traveler waiting at `station`.
    pub fn recalculate_passenger_routes(&mut self, station: StationId) {
        let Some(current) = self.stations.get(station.index()) else {
            return;
        };
        let routes: Vec<Route> = current
            .waiting()
            .iter()
            .map(|t| resolve_route(&*self, station, t.destination()))
            .collect();
        if let Some(current) = self.stations.get_mut(station.index()) {
            for (traveler, route) in current.waiting_mut().iter_mut().zip(routes) {
                traveler.set_route(route);
            }
        }
    }

    /// Re-resolve routes at every station, e.g. after the track changed.
    pub fn recalculate_all_routes(&mut self) {
        for idx in 0..self.stations.len() {
            self.recalculate_passenger_routes(StationId(idx));
        }
    }

    // ---------------------------------------------------------------
    // Lookup helpers
    // ---------------------------------------------------------------

    fn station_checked(&self, id: StationId) -> Result<&Station, NetworkError> {
        self.stations
            .get(id.index())
            .ok_or(NetworkError::UnknownStation(id))
    }

    fn station_mut(&mut self, id: StationId) -> Result<&mut Station, NetworkError> {
        self.stations
            .get_mut(id.index())
            .ok_or(NetworkError::UnknownStation(id))
    }

    fn line_checked(&self, id: LineId) -> Result<&Line, NetworkError> {
        self.lines
            .get(id.index())
            .ok_or(NetworkError::UnknownLine(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, NetworkError> {
        self.lines
            .get_mut(id.index())
            .ok_or(NetworkError::UnknownLine(id))
    }
}

impl StationGraph for Network {
    fn station(&self, id: StationId) -> Option<&Station> {
        Network::station(self, id)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        Network::edge(self, id)
    }

    /// Edges registered at the station's ports whose line exists, in
    /// port order. Locked lines count: locking stops trains, not planning.
    fn edges_accessible_from(&self, station: StationId) -> Vec<EdgeId> {
        let Some(station) = self.stations.get(station.index()) else {
            return Vec::new();
        };
        station
            .edges()
            .filter(|entry| self.lines.get(entry.line.index()).is_some())
            .map(|entry| entry.edge)
            .collect()
    }

    fn lines_at(&self, station: StationId) -> Vec<LineId> {
        self.stations
            .get(station.index())
            .map(Station::lines)
            .unwrap_or_default()
    }
}
