//! Domain types for the transit simulation.
//!
//! Leaf value types shared by the network, routing and simulation layers.
//! Types that carry an invariant enforce it at construction time.

mod ids;
mod port;
mod position;
mod station_type;

pub use ids::{EdgeId, IdAllocator, LineId, StationId, TrainId, TravelerId};
pub use port::StationPort;
pub use position::Position;
pub use station_type::{InvalidStationType, StationType};
