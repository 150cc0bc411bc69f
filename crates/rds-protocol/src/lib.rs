//! RDS Protocol Library
//!
//! This crate decodes Radio Data System (RDS) groups, the metadata carried on
//! the 57 kHz subcarrier of FM broadcasts, into station state:
//!
//! - **PI**: 16-bit program identification code (block A of every group)
//! - **PTY**: program type code, resolved through [`ProgramTypeCatalog`]
//! - **PS**: 8-character station name, assembled from groups 0A
//! - **RT**: 64-character radio text, assembled from groups 2A
//! - **Flags**: traffic program/announcement and decoder identification
//!
//! # Architecture
//!
//! Demodulation, block synchronisation and error correction happen upstream.
//! This crate starts from four error-corrected 16-bit blocks per group:
//! - [`group`] gives a typed view over the blocks and the text format
//! - [`decoder`] folds groups into a [`StationState`], one group at a time
//! - [`program_type`] is the static PTY table
//! - [`display`] renders state and annotates individual groups
//!
//! Decoding is total: every input group is accepted and every call applies
//! its updates completely.
//!
//! # Example
//!
//! ```rust
//! use rds_protocol::{Group, GroupDecoder};
//!
//! let mut decoder = GroupDecoder::new();
//!
//! // Group 0A, segment 0: station name characters "KX"
//! let group: Group = "6201 04A0 E0CD 4B58".parse().unwrap();
//! decoder.apply(&group);
//!
//! let state = decoder.state();
//! assert_eq!(state.station_identifier, 0x6201);
//! assert_eq!(&state.station_name.as_bytes()[..2], b"KX");
//! assert_eq!(state.program_type().name, "Rock");
//! ```

pub mod decoder;
pub mod display;
pub mod error;
pub mod group;
pub mod program_type;
pub mod segment;

pub use decoder::{
    DecoderIdentification, DecoderStats, GroupDecoder, RadioText, StationName, StationState,
    RADIO_TEXT_LEN, STATION_NAME_LEN,
};
pub use error::ParseError;
pub use group::{CommonFields, Group, GroupType, GroupVersion};
pub use program_type::{ProgramType, ProgramTypeCatalog};
pub use segment::SegmentedBuffer;
