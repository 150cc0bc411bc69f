//! Error types for the station simulator

use thiserror::Error;

/// Errors that can occur while configuring a virtual station
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Station name does not fit the 8-character buffer
    #[error("station name too long: {0} characters (max 8)")]
    StationNameTooLong(usize),

    /// Radio text does not fit the 64-character buffer
    #[error("radio text too long: {0} characters (max 64)")]
    RadioTextTooLong(usize),

    /// Program type code outside 0..=31
    #[error("invalid program type code: {0}")]
    InvalidProgramType(u8),
}
