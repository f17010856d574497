//! Trains.

use crate::domain::{EdgeId, Position, StationId, TrainId};
use crate::routing::StationGraph;

use super::{Edge, Traveler};

/// A carrier running along one edge of its line at a time.
#[derive(Debug, Clone)]
pub struct Train {
    id: TrainId,
    edge: EdgeId,
    /// Travelling `to` → `from` on the current edge.
    reversed: bool,
    /// Distance covered from the departure end, in canvas units.
    progress: f32,
    /// Ticks left to wait at the departure station.
    dwell: u32,
    capacity: usize,
    passengers: Vec<Traveler>,
    reached_destination: bool,
}

impl Train {
    pub(crate) fn new(id: TrainId, edge: EdgeId, capacity: usize) -> Self {
        Self {
            id,
            edge,
            reversed: false,
            progress: 0.0,
            dwell: 0,
            capacity,
            passengers: Vec::new(),
            reached_destination: false,
        }
    }

    pub fn id(&self) -> TrainId {
        self.id
    }

    /// The edge the train is currently on.
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_dwelling(&self) -> bool {
        self.dwell > 0
    }

    pub fn passengers(&self) -> &[Traveler] {
        &self.passengers
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_room(&self) -> bool {
        self.passengers.len() < self.capacity
    }

    /// Set once the train reaches the end of its edge; cleared by rerouting.
    pub fn reached_destination(&self) -> bool {
        self.reached_destination
    }

    /// The station at the end of the current traversal.
    pub fn destination<G: StationGraph + ?Sized>(&self, graph: &G) -> Option<StationId> {
        graph.edge(self.edge).map(|e| e.arrival(self.reversed))
    }

    /// Interpolated position between the current edge's endpoints.
    pub fn position<G: StationGraph + ?Sized>(&self, graph: &G) -> Option<Position> {
        let edge = graph.edge(self.edge)?;
        let start = graph.station(edge.departure(self.reversed))?.position();
        let end = graph.station(edge.arrival(self.reversed))?.position();
        let length = start.distance_to(end);
        if length == 0.0 {
            return Some(end);
        }
        Some(start.lerp(end, self.progress / length))
    }

    /// Take a traveler aboard. Callers check [`Train::has_room`] first; the
    /// seed passenger and transfers refused by a full station skip the check.
    pub(crate) fn carry(&mut self, traveler: Traveler) {
        self.passengers.push(traveler);
    }

    /// Remove and return every passenger for whom `leaves` holds.
    pub(crate) fn take_passengers(
        &mut self,
        mut leaves: impl FnMut(&Traveler) -> bool,
    ) -> Vec<Traveler> {
        let (leaving, staying): (Vec<Traveler>, Vec<Traveler>) = std::mem::take(&mut self.passengers)
            .into_iter()
            .partition(|t| leaves(t));
        self.passengers = staying;
        leaving
    }

    /// Advance one tick along an edge of the given length.
    pub(crate) fn step(&mut self, edge_length: f32, speed: f32) {
        if self.reached_destination {
            return;
        }
        if self.dwell > 0 {
            self.dwell -= 1;
            return;
        }
        self.progress = (self.progress + speed).min(edge_length);
        if self.progress >= edge_length {
            self.reached_destination = true;
        }
    }

    /// Move onto `edge`, departing from `at`, after a dwell of `pause` ticks.
    ///
    /// Rerouting onto the current edge reverses the train.
    pub(crate) fn reroute(&mut self, edge: &Edge, at: StationId, pause: u32) {
        self.edge = edge.id();
        self.reversed = edge.to() == at;
        self.progress = 0.0;
        self.dwell = pause;
        self.reached_destination = false;
    }
}
