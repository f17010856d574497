//! Frame-driven simulation.
//!
//! [`Network::advance`](crate::network::Network::advance) is the single
//! per-tick mutation point. It is independent of rendering: a renderer
//! reads positions afterwards, for example through a
//! [`NetworkSnapshot`](crate::snapshot::NetworkSnapshot).

mod config;
mod tick;

pub use config::SimConfig;
pub use tick::{TickEvent, TickReport};
