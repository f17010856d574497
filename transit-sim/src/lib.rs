//! Transit network simulation core.
//!
//! Stations spawn travelers bound for a station type, lines of track carry
//! trains between stations, and each traveler resolves a route (possibly
//! with a change of line) to the nearest station of its type.
//!
//! The crate holds the routing and network-state engine only. Drawing and
//! input live elsewhere and talk to it through [`network::Network`]'s
//! mutating operations, [`network::Network::advance`] once per tick, and
//! the read-only [`snapshot::NetworkSnapshot`].

pub mod domain;
pub mod network;
pub mod routing;
pub mod simulation;
pub mod snapshot;
