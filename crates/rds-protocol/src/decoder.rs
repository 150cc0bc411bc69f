//! Group decoder and station state
//!
//! [`GroupDecoder`] folds each received group into a [`StationState`]. The PI
//! code, program type and traffic program flag are taken from every group.
//! Beyond those, only groups 0A (station name, traffic announcement, decoder
//! identification) and 2A (radio text) are decoded; every other type and
//! version is left alone.
//!
//! Each decoded group type maps its segment address to a buffer offset
//! through its own table below. Supporting another group type means adding a
//! table, a decode function and a dispatch arm.

use tracing::{debug, trace};

use crate::group::{
    block_chars, field, flag, Group, GroupVersion, DECODER_ID_SHIFT, RADIO_TEXT_SEGMENT_MASK,
    STATION_NAME_SEGMENT_MASK, TRAFFIC_ANNOUNCEMENT_SHIFT,
};
use crate::program_type::{ProgramType, ProgramTypeCatalog};
use crate::segment::{segment_offsets, SegmentedBuffer};

/// Station name length in characters
pub const STATION_NAME_LEN: usize = 8;

/// Radio text length in characters
pub const RADIO_TEXT_LEN: usize = 64;

/// 8-character station name, 2 characters per group 0A
pub type StationName = SegmentedBuffer<STATION_NAME_LEN, 2>;

/// 64-character radio text, 4 characters per group 2A
pub type RadioText = SegmentedBuffer<RADIO_TEXT_LEN, 4>;

/// Receiver features signalled by the decoder identification bit
///
/// Group 0A sends one DI bit per station name segment, so the segment
/// address decides which feature the bit describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecoderIdentification {
    /// PTY may change between programs
    DynamicProgramType,
    /// Audio is compressed
    Compressed,
    /// Recorded with an artificial head
    ArtificialHead,
    /// Broadcast is stereo
    Stereo,
}

impl DecoderIdentification {
    /// All features, in segment order
    pub const ALL: [DecoderIdentification; 4] = [
        DecoderIdentification::DynamicProgramType,
        DecoderIdentification::Compressed,
        DecoderIdentification::ArtificialHead,
        DecoderIdentification::Stereo,
    ];

    /// Returns a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::DynamicProgramType => "Dynamic PTY",
            Self::Compressed => "Compressed",
            Self::ArtificialHead => "Artificial Head",
            Self::Stereo => "Stereo",
        }
    }
}

/// Group 0A: segment address -> station name offset and the DI feature
const STATION_NAME_SEGMENTS: [(usize, DecoderIdentification); 4] = [
    (0, DecoderIdentification::DynamicProgramType),
    (2, DecoderIdentification::Compressed),
    (4, DecoderIdentification::ArtificialHead),
    (6, DecoderIdentification::Stereo),
];

/// Group 2A: segment address -> radio text offset
const RADIO_TEXT_OFFSETS: [usize; RadioText::SEGMENTS] = segment_offsets(4);

/// Decoded state of one tuned station
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StationState {
    /// Program identification code (PI)
    pub station_identifier: u16,
    /// Program type code (0-31)
    pub program_type_code: u8,
    /// Station name (PS), raw bytes
    pub station_name: StationName,
    /// Radio text (RT), raw bytes
    pub radio_text: RadioText,
    /// Station carries traffic information (TP)
    pub traffic_program: bool,
    /// Traffic announcement in progress (TA)
    pub traffic_announcement: bool,
    /// Music rather than speech
    pub is_music: bool,
    /// Stereo broadcast
    pub is_stereo: bool,
    /// Artificial head recording
    pub is_artificial_head: bool,
    /// Compressed audio
    pub is_compressed: bool,
    /// Program type may change dynamically
    pub is_dynamic_program_type: bool,
}

impl StationState {
    /// Create the state of a freshly tuned station
    pub fn new() -> Self {
        Self {
            station_identifier: 0,
            program_type_code: 0,
            station_name: StationName::new(),
            radio_text: RadioText::new(),
            traffic_program: false,
            traffic_announcement: false,
            is_music: true,
            is_stereo: false,
            is_artificial_head: false,
            is_compressed: false,
            is_dynamic_program_type: false,
        }
    }

    /// Resolve the current program type code through the catalog
    pub fn program_type(&self) -> ProgramType {
        ProgramTypeCatalog::lookup(self.program_type_code as i32)
    }

    /// Current value of a decoder identification flag
    pub fn decoder_identification(&self, feature: DecoderIdentification) -> bool {
        match feature {
            DecoderIdentification::DynamicProgramType => self.is_dynamic_program_type,
            DecoderIdentification::Compressed => self.is_compressed,
            DecoderIdentification::ArtificialHead => self.is_artificial_head,
            DecoderIdentification::Stereo => self.is_stereo,
        }
    }

    fn set_decoder_identification(&mut self, feature: DecoderIdentification, value: bool) {
        let flag = match feature {
            DecoderIdentification::DynamicProgramType => &mut self.is_dynamic_program_type,
            DecoderIdentification::Compressed => &mut self.is_compressed,
            DecoderIdentification::ArtificialHead => &mut self.is_artificial_head,
            DecoderIdentification::Stereo => &mut self.is_stereo,
        };
        *flag = value;
    }
}

impl Default for StationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters kept alongside the station state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderStats {
    /// Groups applied
    pub groups: u64,
    /// Groups whose type/version is not decoded beyond the common fields
    pub ignored: u64,
}

/// Folds received groups into one station's state
#[derive(Debug, Clone, Default)]
pub struct GroupDecoder {
    state: StationState,
    stats: DecoderStats,
}

impl GroupDecoder {
    /// Create a decoder with fresh station state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current station state
    pub fn state(&self) -> &StationState {
        &self.state
    }

    /// Group counters
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Consume the decoder, keeping its station state
    pub fn into_state(self) -> StationState {
        self.state
    }

    /// Discard all decoded state (e.g. after retuning)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply one group given as its four blocks
    pub fn apply_group(&mut self, block_a: u16, block_b: u16, block_c: u16, block_d: u16) {
        self.apply(&Group::new(block_a, block_b, block_c, block_d));
    }

    /// Apply one group
    pub fn apply(&mut self, group: &Group) {
        let group_type = group.group_type();
        trace!(group = %group_type, pi = group.pi(), "applying group");

        self.stats.groups += 1;

        let state = &mut self.state;
        state.station_identifier = group.pi();
        state.program_type_code = group.program_type_code();
        state.traffic_program = group.traffic_program();

        match (group_type.number, group_type.version) {
            (0, GroupVersion::A) => decode_basic_tuning(state, group),
            (2, GroupVersion::A) => decode_radio_text(state, group),
            _ => {
                self.stats.ignored += 1;
                trace!(group = %group_type, "group type not decoded");
            }
        }
    }
}

/// Station name offset and DI feature addressed by a group 0A block B
pub(crate) fn station_name_segment(block_b: u16) -> (usize, DecoderIdentification) {
    STATION_NAME_SEGMENTS[field(block_b, 0, STATION_NAME_SEGMENT_MASK) as usize]
}

/// Radio text offset addressed by a group 2A block B
pub(crate) fn radio_text_offset(block_b: u16) -> usize {
    RADIO_TEXT_OFFSETS[field(block_b, 0, RADIO_TEXT_SEGMENT_MASK) as usize]
}

/// Group 0A: traffic announcement, one DI bit and two station name characters
fn decode_basic_tuning(state: &mut StationState, group: &Group) {
    let block_b = group.block_b();
    let (offset, feature) = station_name_segment(block_b);

    state.traffic_announcement = flag(block_b, TRAFFIC_ANNOUNCEMENT_SHIFT);
    state.set_decoder_identification(feature, flag(block_b, DECODER_ID_SHIFT));

    let chars = block_chars(group.block_d());
    debug!(offset, segment = offset / 2, ?chars, "station name segment");

    let was_complete = state.station_name.is_complete();
    state.station_name.write(offset, chars);
    if !was_complete && state.station_name.is_complete() {
        debug!(
            pi = state.station_identifier,
            name = %String::from_utf8_lossy(state.station_name.as_bytes()),
            "station name complete"
        );
    }
}

/// Group 2A: four radio text characters from blocks C and D
fn decode_radio_text(state: &mut StationState, group: &Group) {
    let offset = radio_text_offset(group.block_b());
    let [c_hi, c_lo] = block_chars(group.block_c());
    let [d_hi, d_lo] = block_chars(group.block_d());

    let chars = [c_hi, c_lo, d_hi, d_lo];
    debug!(offset, segment = offset / 4, ?chars, "radio text segment");

    let was_complete = state.radio_text.is_complete();
    state.radio_text.write(offset, chars);
    if !was_complete && state.radio_text.is_complete() {
        debug!(pi = state.station_identifier, "radio text complete");
    }
}
