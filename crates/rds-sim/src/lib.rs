//! RDS Station Simulation Library
//!
//! This crate provides a simulation layer for exercising RDS decoding without
//! a receiver. It includes:
//!
//! - **VirtualStation**: Encodes a station name, radio text and flags into
//!   the 0A/2A group sequence a broadcaster sends
//! - **run_station_task**: Async task emitting those groups at the RDS group
//!   rate
//!
//! # Example
//!
//! ```rust
//! use rds_protocol::GroupDecoder;
//! use rds_sim::VirtualStation;
//!
//! let mut station = VirtualStation::new("Test FM", 0x6201);
//! station.set_station_name("TEST FM").unwrap();
//! station.set_radio_text("Hello from the simulator").unwrap();
//!
//! let mut decoder = GroupDecoder::new();
//! for group in station.groups_for_cycle() {
//!     decoder.apply(&group);
//! }
//! assert_eq!(decoder.state().station_name.as_bytes(), b"TEST FM ");
//! ```

pub mod error;
pub mod station;
pub mod station_task;

pub use error::SimError;
pub use station::{VirtualStation, VirtualStationConfig};
pub use station_task::{group_period, run_station_task, StationCommand};
