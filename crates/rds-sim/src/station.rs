//! Virtual station simulation
//!
//! Provides a simulated broadcaster that encodes its station name, radio
//! text and flags into the same 0A/2A group sequence a real station sends.

use rds_protocol::{
    CommonFields, DecoderIdentification, Group, RADIO_TEXT_LEN, STATION_NAME_LEN,
};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Marks the end of a radio text shorter than the full buffer
const RADIO_TEXT_TERMINATOR: u8 = 0x0D;

/// A simulated station that generates a protocol-accurate group stream
#[derive(Debug, Clone)]
pub struct VirtualStation {
    /// Display name/identifier
    id: String,
    /// PI, PTY and TP carried in every group
    common: CommonFields,
    /// Traffic announcement in progress
    traffic_announcement: bool,
    /// Music/speech switch
    is_music: bool,
    /// Decoder identification bits, in segment order
    decoder_id: [bool; 4],
    /// Station name, space padded
    station_name: [u8; STATION_NAME_LEN],
    /// Radio text as broadcast: terminated and padded to whole segments
    radio_text: Vec<u8>,
    /// Next station name segment to send
    name_cursor: u8,
    /// Next radio text segment to send
    text_cursor: u8,
    /// Whether the next group is a 2A group
    text_turn: bool,
    /// Groups produced so far
    groups_sent: u64,
}

/// Configuration for creating a virtual station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualStationConfig {
    /// Display name/identifier
    pub id: String,
    /// Program identification code
    pub pi: u16,
    /// Program type code (0-31)
    pub program_type_code: u8,
    /// Station carries traffic information
    pub traffic_program: bool,
    /// Station name (up to 8 characters)
    pub station_name: String,
    /// Radio text (up to 64 characters)
    pub radio_text: String,
    /// Broadcast signals stereo
    #[serde(default)]
    pub stereo: bool,
}

impl Default for VirtualStationConfig {
    fn default() -> Self {
        Self {
            id: "Virtual Station".to_string(),
            pi: 0x6201,
            program_type_code: 5, // Rock
            traffic_program: false,
            station_name: "RDS SIM".to_string(),
            radio_text: "Simulated radio text".to_string(),
            stereo: true,
        }
    }
}

impl VirtualStation {
    /// Create a new virtual station with a blank name and no radio text
    pub fn new(id: impl Into<String>, pi: u16) -> Self {
        Self {
            id: id.into(),
            common: CommonFields {
                pi,
                program_type_code: 0,
                traffic_program: false,
            },
            traffic_announcement: false,
            is_music: true,
            decoder_id: [false; 4],
            station_name: [b' '; STATION_NAME_LEN],
            radio_text: Vec::new(),
            name_cursor: 0,
            text_cursor: 0,
            text_turn: false,
            groups_sent: 0,
        }
    }

    /// Create a virtual station from configuration
    pub fn from_config(config: VirtualStationConfig) -> Result<Self, SimError> {
        let mut station = Self::new(config.id, config.pi);
        station.set_program_type(config.program_type_code)?;
        station.set_traffic_program(config.traffic_program);
        station.set_station_name(&config.station_name)?;
        station.set_radio_text(&config.radio_text)?;
        station.set_decoder_identification(DecoderIdentification::Stereo, config.stereo);
        Ok(station)
    }

    /// Get the station's identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the PI code
    pub fn pi(&self) -> u16 {
        self.common.pi
    }

    /// Get the program type code
    pub fn program_type_code(&self) -> u8 {
        self.common.program_type_code
    }

    /// Set the program type code
    pub fn set_program_type(&mut self, code: u8) -> Result<(), SimError> {
        if code > 31 {
            return Err(SimError::InvalidProgramType(code));
        }
        self.common.program_type_code = code;
        Ok(())
    }

    /// Set the traffic program flag
    pub fn set_traffic_program(&mut self, enabled: bool) {
        self.common.traffic_program = enabled;
    }

    /// Get the traffic announcement flag
    pub fn traffic_announcement(&self) -> bool {
        self.traffic_announcement
    }

    /// Set the traffic announcement flag
    pub fn set_traffic_announcement(&mut self, active: bool) {
        self.traffic_announcement = active;
    }

    /// Set the music/speech switch
    pub fn set_music(&mut self, is_music: bool) {
        self.is_music = is_music;
    }

    /// Set one decoder identification feature
    pub fn set_decoder_identification(&mut self, feature: DecoderIdentification, value: bool) {
        self.decoder_id[feature as usize] = value;
    }

    /// Station name as broadcast (8 bytes, space padded)
    pub fn station_name(&self) -> &[u8; STATION_NAME_LEN] {
        &self.station_name
    }

    /// Set the station name; the name cycle restarts from segment 0
    pub fn set_station_name(&mut self, name: &str) -> Result<(), SimError> {
        let bytes = name.as_bytes();
        if bytes.len() > STATION_NAME_LEN {
            return Err(SimError::StationNameTooLong(bytes.len()));
        }
        self.station_name = [b' '; STATION_NAME_LEN];
        self.station_name[..bytes.len()].copy_from_slice(bytes);
        self.name_cursor = 0;
        Ok(())
    }

    /// Radio text as broadcast, including terminator and padding
    pub fn radio_text(&self) -> &[u8] {
        &self.radio_text
    }

    /// Set the radio text; the text cycle restarts from segment 0
    ///
    /// Text shorter than 64 characters is terminated with a carriage return
    /// so receivers know where the message ends.
    pub fn set_radio_text(&mut self, text: &str) -> Result<(), SimError> {
        let bytes = text.as_bytes();
        if bytes.len() > RADIO_TEXT_LEN {
            return Err(SimError::RadioTextTooLong(bytes.len()));
        }

        let mut encoded = bytes.to_vec();
        if !encoded.is_empty() && encoded.len() < RADIO_TEXT_LEN {
            encoded.push(RADIO_TEXT_TERMINATOR);
        }
        let padded_len = encoded.len().div_ceil(4) * 4;
        encoded.resize(padded_len, b' ');

        self.radio_text = encoded;
        self.text_cursor = 0;
        Ok(())
    }

    /// Number of 2A segments needed for the current radio text
    pub fn radio_text_segments(&self) -> u8 {
        (self.radio_text.len() / 4) as u8
    }

    /// Number of groups produced so far
    pub fn groups_sent(&self) -> u64 {
        self.groups_sent
    }

    /// Produce the next group of the broadcast cycle
    ///
    /// 0A and 2A groups alternate. Without radio text only 0A groups are
    /// sent.
    pub fn next_group(&mut self) -> Group {
        let send_text = self.text_turn && self.radio_text_segments() > 0;
        self.text_turn = !self.text_turn;
        self.groups_sent += 1;

        if send_text {
            let segment = self.text_cursor;
            self.text_cursor = (self.text_cursor + 1) % self.radio_text_segments();
            self.radio_text_group(segment)
        } else {
            let segment = self.name_cursor;
            self.name_cursor = (self.name_cursor + 1) % 4;
            self.station_name_group(segment)
        }
    }

    /// Every station name and radio text group once, interleaved
    pub fn groups_for_cycle(&self) -> Vec<Group> {
        let text_segments = self.radio_text_segments();
        let mut groups = Vec::with_capacity(4 + text_segments as usize);
        for segment in 0..text_segments.max(4) {
            if segment < 4 {
                groups.push(self.station_name_group(segment));
            }
            if segment < text_segments {
                groups.push(self.radio_text_group(segment));
            }
        }
        groups
    }

    /// Encode station name segment 0..=3 as a group 0A
    pub fn station_name_group(&self, segment: u8) -> Group {
        let segment = segment & 0x03;
        let i = segment as usize * 2;
        Group::basic_tuning(
            self.common,
            self.traffic_announcement,
            self.is_music,
            self.decoder_id[segment as usize],
            segment,
            [self.station_name[i], self.station_name[i + 1]],
        )
    }

    /// Encode radio text segment as a group 2A
    ///
    /// Segments past the end of the current text carry spaces.
    pub fn radio_text_group(&self, segment: u8) -> Group {
        let segment = segment & 0x0F;
        let i = segment as usize * 4;
        let mut chars = [b' '; 4];
        if let Some(slice) = self.radio_text.get(i..i + 4) {
            chars.copy_from_slice(slice);
        }
        Group::radio_text(self.common, segment, chars)
    }

    /// Get a summary of current state
    pub fn state_summary(&self) -> String {
        format!(
            "{} (PI {:04X}) - \"{}\" PTY {}{}",
            self.id,
            self.common.pi,
            String::from_utf8_lossy(&self.station_name),
            self.common.program_type_code,
            if self.traffic_announcement { " [TA]" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_virtual_station() {
        let station = VirtualStation::new("Test Station", 0x1234);
        assert_eq!(station.id(), "Test Station");
        assert_eq!(station.pi(), 0x1234);
        assert_eq!(station.station_name(), b"        ");
        assert!(station.radio_text().is_empty());
        assert!(!station.traffic_announcement());
    }

    #[test]
    fn test_station_name_padding() {
        let mut station = VirtualStation::new("Test", 0x1234);
        station.set_station_name("KXRT").unwrap();
        assert_eq!(station.station_name(), b"KXRT    ");
        assert_eq!(
            station.set_station_name("TOO LONG NAME"),
            Err(SimError::StationNameTooLong(13))
        );
        assert_eq!(station.station_name(), b"KXRT    ");
    }

    #[test]
    fn test_radio_text_termination() {
        let mut station = VirtualStation::new("Test", 0x1234);
        station.set_radio_text("Hello").unwrap();
        assert_eq!(station.radio_text(), b"Hello\r  ");
        assert_eq!(station.radio_text_segments(), 2);

        let full = "x".repeat(64);
        station.set_radio_text(&full).unwrap();
        assert_eq!(station.radio_text().len(), 64);
        assert!(!station.radio_text().contains(&RADIO_TEXT_TERMINATOR));

        assert_eq!(
            station.set_radio_text(&"x".repeat(65)),
            Err(SimError::RadioTextTooLong(65))
        );
    }

    #[test]
    fn test_invalid_program_type() {
        let mut station = VirtualStation::new("Test", 0x1234);
        assert_eq!(
            station.set_program_type(32),
            Err(SimError::InvalidProgramType(32))
        );
        assert!(station.set_program_type(31).is_ok());
        assert_eq!(station.program_type_code(), 31);
    }

    #[test]
    fn test_next_group_alternates() {
        let mut station = VirtualStation::new("Test", 0x1234);
        station.set_radio_text("Hi").unwrap();

        let types: Vec<u8> = (0..6).map(|_| station.next_group().group_type().number).collect();
        assert_eq!(types, vec![0, 2, 0, 2, 0, 2]);
        assert_eq!(station.groups_sent(), 6);
    }

    #[test]
    fn test_next_group_without_text() {
        let mut station = VirtualStation::new("Test", 0x1234);
        for expected_segment in [0, 1, 2, 3, 0] {
            let group = station.next_group();
            assert_eq!(group.group_type().number, 0);
            assert_eq!(group.block_b() & 0x03, expected_segment);
        }
    }

    #[test]
    fn test_cycle_length() {
        let mut station = VirtualStation::new("Test", 0x1234);
        station.set_radio_text(&"y".repeat(40)).unwrap();
        // 40 chars + terminator -> 11 segments, plus 4 name segments
        assert_eq!(station.groups_for_cycle().len(), 15);
    }

    #[test]
    fn test_state_summary() {
        let mut station = VirtualStation::new("Test", 0x6201);
        station.set_station_name("KXRT").unwrap();
        station.set_traffic_announcement(true);
        assert_eq!(station.state_summary(), "Test (PI 6201) - \"KXRT    \" PTY 0 [TA]");
    }
}
