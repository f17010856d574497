//! Read-only display state for renderers.
//!
//! A snapshot is taken after [`Network::advance`] and carries everything a
//! drawing layer needs: positions, colours, counts and menu icons. Nothing
//! here mutates the network.

use serde::Serialize;

use crate::domain::{EdgeId, LineId, Position, StationId, StationPort, StationType, TrainId};
use crate::network::{MenuIcon, Network};

/// Complete display state at one tick.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSnapshot {
    pub tick: u64,
    pub delivered: usize,
    pub stations: Vec<StationView>,
    pub lines: Vec<LineView>,
}

/// A station as drawn.
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub id: StationId,
    pub position: Position,
    pub station_type: StationType,
    /// Destinations of waiting travelers, oldest first
    pub waiting: Vec<StationType>,
    pub at_capacity: bool,
    pub lines: Vec<LineId>,
}

/// A line, its track and its trains.
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub id: LineId,
    pub color: String,
    pub unlocked: bool,
    pub hovered: bool,
    pub menu_icon: MenuIcon,
    pub edges: Vec<EdgeView>,
    pub trains: Vec<TrainView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub from: StationId,
    pub to: StationId,
    pub from_port: StationPort,
    pub to_port: StationPort,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainView {
    pub id: TrainId,
    pub position: Option<Position>,
    pub reversed: bool,
    /// Destinations of passengers aboard
    pub passengers: Vec<StationType>,
}

impl NetworkSnapshot {
    /// Capture the current display state.
    pub fn capture(network: &Network) -> Self {
        let stations = network
            .stations()
            .iter()
            .map(|station| StationView {
                id: station.id(),
                position: station.position(),
                station_type: station.station_type(),
                waiting: station.waiting().iter().map(|t| t.destination()).collect(),
                at_capacity: station.is_at_capacity(),
                lines: station.lines(),
            })
            .collect();

        let lines = network
            .lines()
            .iter()
            .map(|line| LineView {
                id: line.id(),
                color: line.color().to_string(),
                unlocked: line.is_unlocked(),
                hovered: line.is_hovered(),
                menu_icon: line.menu_icon(),
                edges: line
                    .edges()
                    .iter()
                    .filter_map(|id| network.edge(*id))
                    .map(|edge| EdgeView {
                        id: edge.id(),
                        from: edge.from(),
                        to: edge.to(),
                        from_port: edge.from_port(),
                        to_port: edge.to_port(),
                    })
                    .collect(),
                trains: line
                    .trains()
                    .iter()
                    .map(|train| TrainView {
                        id: train.id(),
                        position: train.position(network),
                        reversed: train.is_reversed(),
                        passengers: train.passengers().iter().map(|t| t.destination()).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            tick: network.tick(),
            delivered: network.delivered(),
            stations,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimConfig;

    fn sample() -> (Network, LineId) {
        let mut net = Network::new(SimConfig::default());
        let a = net.add_station(Position::new(0.0, 0.0), StationType::Circle);
        let b = net.add_station(Position::new(100.0, 0.0), StationType::Square);
        let red = net.add_line("red");
        net.add_line("blue");
        net.extend_line(red, a, b).unwrap();
        net.unlock_line(red).unwrap();
        net.spawn_traveler(a, StationType::Square).unwrap();
        (net, red)
    }

    #[test]
    fn captures_stations_and_lines() {
        let (net, red) = sample();
        let snapshot = NetworkSnapshot::capture(&net);

        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.stations.len(), 2);
        assert_eq!(snapshot.stations[0].waiting, vec![StationType::Square]);
        assert_eq!(snapshot.stations[0].lines, vec![red]);
        assert!(!snapshot.stations[0].at_capacity);

        assert_eq!(snapshot.lines.len(), 2);
        let line = &snapshot.lines[0];
        assert!(line.unlocked);
        assert_eq!(line.menu_icon.color, "red");
        assert_eq!(line.edges.len(), 1);
        assert_eq!(line.edges[0].from_port, StationPort::East);
        assert_eq!(line.trains.len(), 1);
        assert_eq!(line.trains[0].position, Some(Position::new(0.0, 0.0)));
        assert_eq!(line.trains[0].passengers, vec![StationType::Triangle]);

        assert_eq!(snapshot.lines[1].menu_icon.color, "gray");
    }

    #[test]
    fn hovered_empty_line_gets_full_icon() {
        let (mut net, _) = sample();
        let blue = LineId(1);
        net.unlock_line(blue).unwrap();

        let before = NetworkSnapshot::capture(&net);
        assert!(!before.lines[1].hovered);
        assert_eq!(
            before.lines[1].menu_icon.size,
            crate::network::LINE_MENU_SIZE * crate::network::LINE_MENU_INACTIVE_MULTIPLIER
        );

        net.set_line_hovered(blue, true).unwrap();
        let after = NetworkSnapshot::capture(&net);
        assert!(after.lines[1].hovered);
        assert!(!after.lines[0].hovered);
        assert_eq!(after.lines[1].menu_icon.size, crate::network::LINE_MENU_SIZE);
        assert_eq!(after.lines[1].menu_icon.color, "blue");
    }

    #[test]
    fn capture_is_read_only() {
        let (net, _) = sample();
        let before = NetworkSnapshot::capture(&net);
        let after = NetworkSnapshot::capture(&net);
        assert_eq!(
            serde_json::to_string(&before).unwrap(),
            serde_json::to_string(&after).unwrap()
        );
    }

    #[test]
    fn serializes_to_json() {
        let (mut net, _) = sample();
        net.advance();
        let json = serde_json::to_value(NetworkSnapshot::capture(&net)).unwrap();

        assert_eq!(json["tick"], 1);
        assert_eq!(json["stations"][1]["station_type"], "square");
        assert_eq!(json["lines"][0]["edges"][0]["from"], 0);
        assert_eq!(json["lines"][0]["edges"][0]["to_port"], "West");
        let x = json["lines"][0]["trains"][0]["position"]["x"].as_f64().unwrap();
        assert!((x - 2.0).abs() < 1e-4);
    }
}
