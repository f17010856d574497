use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_sim::domain::{Position, StationId, StationType};
use transit_sim::network::{Network, NetworkError};
use transit_sim::simulation::SimConfig;
use transit_sim::snapshot::NetworkSnapshot;

/// Ticks to simulate when `TRANSIT_TICKS` is unset.
const DEFAULT_TICKS: u64 = 3000;

/// Ticks between traveler spawns when `TRANSIT_SPAWN_EVERY` is unset.
const DEFAULT_SPAWN_EVERY: u64 = 90;

fn env_or(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!(%name, %value, default, "Ignoring invalid value");
            default
        }),
        Err(_) => default,
    }
}

/// Seven stations and three lines; the third line stays locked.
fn demo_network(config: SimConfig) -> Result<Network, NetworkError> {
    use StationType::{Circle, Square, Triangle};

    let mut net = Network::new(config);
    let layout = [
        (120.0, 300.0, Circle),
        (260.0, 200.0, Triangle),
        (400.0, 300.0, Circle),
        (540.0, 200.0, Square),
        (400.0, 460.0, Triangle),
        (260.0, 460.0, Square),
        (680.0, 300.0, Circle),
    ];
    let stations: Vec<StationId> = layout
        .iter()
        .map(|(x, y, ty)| net.add_station(Position::new(*x, *y), *ty))
        .collect();

    let red = net.add_line("#e74c3c");
    let blue = net.add_line("#3498db");
    net.add_line("#2ecc71");

    for pair in [0, 1, 2, 3, 6].windows(2) {
        net.extend_line(red, stations[pair[0]], stations[pair[1]])?;
    }
    for pair in [5, 4, 2].windows(2) {
        net.extend_line(blue, stations[pair[0]], stations[pair[1]])?;
    }
    net.unlock_line(red)?;
    net.unlock_line(blue)?;
    Ok(net)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let ticks = env_or("TRANSIT_TICKS", DEFAULT_TICKS);
    let spawn_every = env_or("TRANSIT_SPAWN_EVERY", DEFAULT_SPAWN_EVERY).max(1);

    let mut network = demo_network(SimConfig::default()).expect("demo network is well-formed");
    info!(
        stations = network.stations().len(),
        lines = network.lines().len(),
        ticks,
        "Starting simulation"
    );

    let mut next_station = 0usize;
    let mut spawned = 0u64;
    for tick in 1..=ticks {
        if tick % spawn_every == 0 {
            let count = network.stations().len();
            let station = &network.stations()[next_station % count];
            let (id, own_type, full) = (station.id(), station.station_type(), station.is_at_capacity());
            next_station += 1;

            if full {
                warn!(station = %id, "Station full, skipping spawn");
            } else {
                let destination = StationType::ALL
                    .iter()
                    .copied()
                    .filter(|ty| *ty != own_type)
                    .nth((spawned % 2) as usize)
                    .unwrap_or(own_type);
                match network.spawn_traveler(id, destination) {
                    Ok(_) => spawned += 1,
                    Err(err) => warn!(station = %id, error = %err, "Spawn failed"),
                }
            }
        }

        let report = network.advance();
        if report.delivered() > 0 {
            info!(tick, delivered = network.delivered(), "Delivery");
        }
    }

    info!(
        spawned,
        delivered = network.delivered(),
        "Simulation finished"
    );

    let snapshot = NetworkSnapshot::capture(&network);
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
}
