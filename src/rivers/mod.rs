//! River networks.
//!
//! Springs are scattered over land in proportion to rainfall, and each one is
//! walked downhill until it reaches the ocean, joins an existing river, or
//! gets stuck.

mod config;
mod network;
mod simulator;

pub use config::RiverConfig;
pub use network::{River, RiverId, RiverNetwork, RiverSegment, SegmentId};
pub use simulator::{RiverStats, SimpleRiverSimulator, TraceOutcome};
