//! Stations: typed graph nodes with ports and a waiting queue.

use std::collections::HashMap;

use crate::domain::{EdgeId, LineId, Position, StationId, StationPort, StationType};

use super::Traveler;

/// An edge registered at one of a station's ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortEntry {
    pub edge: EdgeId,
    pub line: LineId,
}

/// A network node.
///
/// Ports keep their first-use order, and edges keep their insertion order
/// within a port; routing explores edges in exactly that order.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    position: Position,
    station_type: StationType,
    capacity: usize,
    waiting: Vec<Traveler>,
    ports: Vec<(StationPort, Vec<PortEntry>)>,
}

impl Station {
    pub(crate) fn new(
        id: StationId,
        position: Position,
        station_type: StationType,
        capacity: usize,
    ) -> Self {
        Self {
            id,
            position,
            station_type,
            capacity,
            waiting: Vec::new(),
            ports: Vec::new(),
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn station_type(&self) -> StationType {
        self.station_type
    }

    /// Maximum number of waiting travelers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Travelers waiting here, oldest first.
    pub fn waiting(&self) -> &[Traveler] {
        &self.waiting
    }

    pub fn is_at_capacity(&self) -> bool {
        self.waiting.len() >= self.capacity
    }

    /// Register `edge` of `line` at `port`, creating the port on first use.
    pub(crate) fn add_edge_to_port(&mut self, edge: EdgeId, line: LineId, port: StationPort) {
        let entry = PortEntry { edge, line };
        match self.ports.iter_mut().find(|(p, _)| *p == port) {
            Some((_, entries)) => entries.push(entry),
            None => self.ports.push((port, vec![entry])),
        }
    }

    /// Ports in use, in first-use order.
    pub fn ports(&self) -> impl Iterator<Item = (StationPort, &[PortEntry])> {
        self.ports.iter().map(|(p, entries)| (*p, entries.as_slice()))
    }

    /// Edges registered at a single port.
    pub fn edges_at_port(&self, port: StationPort) -> &[PortEntry] {
        self.ports
            .iter()
            .find(|(p, _)| *p == port)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }

    /// Every edge registered here, port by port.
    pub fn edges(&self) -> impl Iterator<Item = &PortEntry> {
        self.ports.iter().flat_map(|(_, entries)| entries.iter())
    }

    /// Distinct lines serving this station, in discovery order.
    pub fn lines(&self) -> Vec<LineId> {
        let mut lines = Vec::new();
        for entry in self.edges() {
            if !lines.contains(&entry.line) {
                lines.push(entry.line);
            }
        }
        lines
    }

    /// A line with exactly one edge here, i.e. one that ends at this
    /// station and could be extended from it.
    pub fn line_for_new_edge(&self) -> Option<LineId> {
        let mut order = Vec::new();
        let mut edges_per_line: HashMap<LineId, usize> = HashMap::new();
        for entry in self.edges() {
            let count = edges_per_line.entry(entry.line).or_insert_with(|| {
                order.push(entry.line);
                0
            });
            *count += 1;
        }
        order
            .into_iter()
            .find(|line| edges_per_line.get(line) == Some(&1))
    }

    pub(crate) fn push_waiting(&mut self, traveler: Traveler) {
        self.waiting.push(traveler);
    }

    pub(crate) fn remove_waiting(&mut self, index: usize) -> Option<Traveler> {
        (index < self.waiting.len()).then(|| self.waiting.remove(index))
    }

    pub(crate) fn pop_waiting(&mut self) -> Option<Traveler> {
        self.waiting.pop()
    }

    pub(crate) fn waiting_mut(&mut self) -> &mut [Traveler] {
        &mut self.waiting
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Station({}) {} at ({}, {})",
            self.id, self.station_type, self.position.x, self.position.y
        )
    }
}
