//! Per-tick train movement and scheduling.
//!
//! Each tick visits unlocked lines in registration order and, within a
//! line, trains in registration order. A train that reached the end of its
//! edge is serviced in three steps: disembark, reroute, board.

use tracing::{debug, trace};

use crate::domain::{EdgeId, LineId, StationId, TrainId, TravelerId};
use crate::network::{Network, Train};

/// Something that happened to a train during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A traveler reached a station of its destination type.
    Delivered {
        line: LineId,
        train: TrainId,
        traveler: TravelerId,
        station: StationId,
    },
    /// A traveler got off to change lines.
    Transferred {
        line: LineId,
        train: TrainId,
        traveler: TravelerId,
        station: StationId,
    },
    /// The train moved onto its next edge.
    Rerouted {
        line: LineId,
        train: TrainId,
        edge: EdgeId,
        reversed: bool,
    },
    Boarded {
        line: LineId,
        train: TrainId,
        traveler: TravelerId,
        station: StationId,
    },
}

impl TickEvent {
    pub fn line(&self) -> LineId {
        match self {
            TickEvent::Delivered { line, .. }
            | TickEvent::Transferred { line, .. }
            | TickEvent::Rerouted { line, .. }
            | TickEvent::Boarded { line, .. } => *line,
        }
    }

    pub fn train(&self) -> TrainId {
        match self {
            TickEvent::Delivered { train, .. }
            | TickEvent::Transferred { train, .. }
            | TickEvent::Rerouted { train, .. }
            | TickEvent::Boarded { train, .. } => *train,
        }
    }
}

/// What one call to [`Network::advance`] did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<TickEvent>,
}

impl TickReport {
    pub fn delivered(&self) -> usize {
        self.count(|e| matches!(e, TickEvent::Delivered { .. }))
    }

    pub fn boarded(&self) -> usize {
        self.count(|e| matches!(e, TickEvent::Boarded { .. }))
    }

    pub fn rerouted(&self) -> usize {
        self.count(|e| matches!(e, TickEvent::Rerouted { .. }))
    }

    fn count(&self, pred: impl Fn(&TickEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Network {
    /// Advance the simulation by one tick.
    ///
    /// Locked lines are skipped; their track still counts for routing.
    pub fn advance(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            events: Vec::new(),
        };
        for idx in 0..self.lines.len() {
            let line = LineId(idx);
            if !self.lines[idx].is_unlocked() {
                continue;
            }
            self.move_trains(line);
            self.route_trains(line, &mut report.events);
        }
        if !report.events.is_empty() {
            debug!(
                tick = self.tick,
                delivered = report.delivered(),
                boarded = report.boarded(),
                rerouted = report.rerouted(),
                "Tick complete"
            );
        }
        report
    }

    /// Move every train on `line` one tick along its edge.
    fn move_trains(&mut self, line: LineId) {
        let speed = self.config.train_speed;
        let Network {
            lines,
            edges,
            stations,
            ..
        } = self;
        let Some(line) = lines.get_mut(line.index()) else {
            return;
        };
        for train in &mut line.trains {
            let length = edges
                .get(train.edge().index())
                .and_then(|edge| {
                    let from = stations.get(edge.from().index())?.position();
                    let to = stations.get(edge.to().index())?.position();
                    Some(from.distance_to(to))
                })
                .unwrap_or(0.0);
            train.step(length, speed);
        }
    }

    /// Service every train on `line` that has reached its destination.
    pub fn route_trains(&mut self, line: LineId, events: &mut Vec<TickEvent>) {
        let Some(current) = self.lines.get_mut(line.index()) else {
            return;
        };
        let mut trains = std::mem::take(&mut current.trains);
        for train in trains.iter_mut().filter(|t| t.reached_destination()) {
            self.service_train(line, train, events);
        }
        if let Some(current) = self.lines.get_mut(line.index()) {
            current.trains = trains;
        }
    }

    fn service_train(&mut self, line: LineId, train: &mut Train, events: &mut Vec<TickEvent>) {
        let Some(station) = train.destination(&*self) else {
            return;
        };
        self.disembark(line, train, station, events);

        let Some(next) = self.line(line).map(|l| l.next_edge(train, &*self)) else {
            return;
        };
        let Some(edge) = self.edge(next) else {
            return;
        };
        train.reroute(edge, station, self.config.station_pause_ticks);
        trace!(
            %line,
            train = %train.id(),
            %station,
            edge = %next,
            reversed = train.is_reversed(),
            "Rerouted train"
        );
        events.push(TickEvent::Rerouted {
            line,
            train: train.id(),
            edge: next,
            reversed: train.is_reversed(),
        });

        self.board(line, train, station, events);
    }

    /// Drop off passengers whose target is `station` or whose destination
    /// type it matches. Transfers to a full station stay aboard.
    fn disembark(
        &mut self,
        line: LineId,
        train: &mut Train,
        station: StationId,
        events: &mut Vec<TickEvent>,
    ) {
        let Some(station_type) = self.station(station).map(|s| s.station_type()) else {
            return;
        };
        let leaving = train.take_passengers(|t| {
            t.target_station() == Some(station) || t.destination() == station_type
        });

        for traveler in leaving {
            let id = traveler.id();
            if traveler.destination() == station_type {
                self.delivered += 1;
                debug!(%line, train = %train.id(), traveler = %id, %station, "Traveler delivered");
                events.push(TickEvent::Delivered {
                    line,
                    train: train.id(),
                    traveler: id,
                    station,
                });
                continue;
            }

            match self.add_person(station, traveler) {
                Ok(()) => events.push(TickEvent::Transferred {
                    line,
                    train: train.id(),
                    traveler: id,
                    station,
                }),
                Err(err) => {
                    debug!(%station, traveler = %id, error = %err, "Transfer refused, staying aboard");
                    if let Some(traveler) = err.into_rejected_traveler() {
                        train.carry(traveler);
                    }
                }
            }
        }
    }

    /// Board waiting travelers whose first leg this train now runs.
    fn board(
        &mut self,
        line: LineId,
        train: &mut Train,
        station: StationId,
        events: &mut Vec<TickEvent>,
    ) {
        while train.has_room() {
            let Some(index) = self.station(station).and_then(|s| {
                s.waiting()
                    .iter()
                    .position(|t| t.route().boards(line, train.edge(), train.is_reversed()))
            }) else {
                break;
            };
            let Some(traveler) = self.take_person(station, index) else {
                break;
            };
            let id = traveler.id();
            train.carry(traveler);
            events.push(TickEvent::Boarded {
                line,
                train: train.id(),
                traveler: id,
                station,
            });
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Position, StationType};
    use crate::simulation::SimConfig;
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    type Scenario = (
        Vec<StationType>,
        Vec<(usize, usize, usize)>,
        Vec<(u64, usize, StationType)>,
    );

    /// Station types, (line, from, to) edges, and (tick, station, destination) spawns.
    fn scenario_strategy() -> impl Strategy<Value = Scenario> {
        let ty = || proptest::sample::select(StationType::ALL.to_vec());
        (2usize..8).prop_flat_map(move |n| {
            (
                proptest::collection::vec(ty(), n),
                proptest::collection::vec((0usize..3, 0..n, 0..n), 1..16),
                proptest::collection::vec((0u64..24, 0..n, ty()), 0..40),
            )
        })
    }

    fn build(types: &[StationType], edges: &[(usize, usize, usize)]) -> Network {
        let mut net = Network::new(SimConfig {
            station_capacity: 4,
            train_capacity: 2,
            train_speed: 10_000.0,
            station_pause_ticks: 0,
            ..SimConfig::default()
        });
        for (i, ty) in types.iter().enumerate() {
            net.add_station(Position::new(i as f32 * 50.0, (i % 3) as f32 * 40.0), *ty);
        }
        let lines: Vec<LineId> = (0..3).map(|i| net.add_line(format!("line-{i}"))).collect();
        for (line, from, to) in edges {
            if from != to {
                net.extend_line(lines[*line], StationId(*from), StationId(*to))
                    .unwrap();
            }
        }
        for line in lines {
            net.unlock_line(line).unwrap();
        }
        net
    }

    /// Run the scenario, handing each tick's report and the network after it to `check`.
    fn run(
        (types, edges, spawns): &Scenario,
        mut check: impl FnMut(&TickReport, &Network) -> Result<(), TestCaseError>,
    ) -> Result<(), TestCaseError> {
        let mut net = build(types, edges);
        for tick in 0..24u64 {
            for (_, station, destination) in spawns.iter().filter(|(at, _, _)| *at == tick) {
                // Full stations refuse the spawn
                let _ = net.spawn_traveler(StationId(*station), *destination);
            }
            let report = net.advance();
            check(&report, &net)?;
        }
        Ok(())
    }

    proptest! {
        /// Events are grouped by line, lines appear in registration order.
        #[test]
        fn lines_are_serviced_in_order(scenario in scenario_strategy()) {
            run(&scenario, |report, _| {
                let mut seen: Vec<LineId> = Vec::new();
                for event in &report.events {
                    if seen.last() != Some(&event.line()) {
                        prop_assert!(!seen.contains(&event.line()), "line {} split", event.line());
                        if let Some(last) = seen.last() {
                            prop_assert!(last.index() < event.line().index());
                        }
                        seen.push(event.line());
                    }
                }
                Ok(())
            })?;
        }

        /// For each train: disembarking, then one reroute, then boarding.
        #[test]
        fn disembark_reroute_board(scenario in scenario_strategy()) {
            run(&scenario, |report, _| {
                let mut rerouted: HashMap<TrainId, bool> = HashMap::new();
                for event in &report.events {
                    let after_reroute = rerouted.get(&event.train()).copied().unwrap_or(false);
                    match event {
                        TickEvent::Delivered { .. } | TickEvent::Transferred { .. } => {
                            prop_assert!(!after_reroute, "{event:?} after reroute");
                        }
                        TickEvent::Rerouted { .. } => {
                            prop_assert!(!after_reroute, "{event:?} twice in one tick");
                            rerouted.insert(event.train(), true);
                        }
                        TickEvent::Boarded { .. } => {
                            prop_assert!(after_reroute, "{event:?} before reroute");
                        }
                    }
                }
                Ok(())
            })?;
        }

        /// A traveler is either waiting at exactly one station or aboard exactly one train.
        #[test]
        fn travelers_are_never_duplicated(scenario in scenario_strategy()) {
            run(&scenario, |_, net| {
                let mut seen = HashSet::new();
                let waiting = net.stations().iter().flat_map(|s| s.waiting());
                let aboard = net
                    .lines()
                    .iter()
                    .flat_map(|l| l.trains())
                    .flat_map(|t| t.passengers());
                for traveler in waiting.chain(aboard) {
                    prop_assert!(seen.insert(traveler.id()), "{} seen twice", traveler.id());
                }
                Ok(())
            })?;
        }
    }
}
