//! The station/edge/line graph and the entities that move through it.
//!
//! Everything lives in a [`Network`] arena and is addressed by id.

mod edge;
mod error;
mod graph;
mod line;
mod station;
mod train;
mod traveler;

pub use edge::Edge;
pub use error::NetworkError;
pub use graph::Network;
pub use line::{LINE_MENU_INACTIVE_MULTIPLIER, LINE_MENU_SIZE, LOCKED_COLOR, Line, MenuIcon};
pub use station::{PortEntry, Station};
pub use train::Train;
pub use traveler::Traveler;
