//! Display and annotation support for groups and station state
//!
//! Monitors use [`annotate_group`] to show what each field of a received
//! group means, and [`render_station`] to show the accumulated state. The
//! decoder stores raw bytes; here bytes outside printable ASCII are shown
//! as `.`.

use std::fmt;
use std::ops::Range;

use crate::decoder::{radio_text_offset, station_name_segment, StationState};
use crate::group::{
    block_chars, field, flag, Group, GroupType, GroupVersion, DECODER_ID_SHIFT,
    MUSIC_SPEECH_SHIFT, PROGRAM_TYPE_MASK, PROGRAM_TYPE_SHIFT,
    TRAFFIC_ANNOUNCEMENT_SHIFT, TRAFFIC_PROGRAM_SHIFT, VERSION_SHIFT,
};
use crate::program_type::ProgramTypeCatalog;

/// Radio text terminator: characters after it are not part of the message
pub const RADIO_TEXT_TERMINATOR: u8 = 0x0D;

/// Kind of field, for UI coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Program identification
    Identifier,
    /// Group type and version
    GroupType,
    /// Program type code
    ProgramType,
    /// Single-bit flag
    Flag,
    /// Segment address
    Segment,
    /// Text characters
    Text,
    /// Data not decoded here
    Data,
}

/// One annotated field of a group
#[derive(Debug, Clone)]
pub struct FieldSegment {
    /// Block index (0 = A .. 3 = D)
    pub block: usize,
    /// Bit range within the block, low bit inclusive, high bit exclusive
    pub bits: Range<u8>,
    /// Short label (e.g. "pi", "pty", "ps")
    pub label: &'static str,
    /// Decoded value
    pub value: String,
    /// Kind of field (UI maps this to colors)
    pub kind: FieldKind,
}

impl FieldSegment {
    fn new(
        block: usize,
        bits: Range<u8>,
        label: &'static str,
        value: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        Self {
            block,
            bits,
            label,
            value: value.into(),
            kind,
        }
    }
}

/// Annotated group ready for display
#[derive(Debug, Clone)]
pub struct AnnotatedGroup {
    /// Group type and version
    pub group_type: GroupType,
    /// One-line summary, e.g. `0A PI=6201 PTY=2 PS[0..2]="AB"`
    pub summary: String,
    /// Annotated fields
    pub segments: Vec<FieldSegment>,
}

// ============================================================================
// Format Helpers
// ============================================================================

/// Render raw broadcast bytes, replacing non-printable bytes with `.`
pub fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (0x20..=0x7E).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Station name as display text (always 8 characters)
pub fn station_name_text(state: &StationState) -> String {
    printable(state.station_name.as_bytes())
}

/// Radio text as display text, cut at the terminator and right-trimmed
pub fn radio_text_text(state: &StationState) -> String {
    let bytes = state.radio_text.as_bytes();
    let end = bytes
        .iter()
        .position(|&b| b == RADIO_TEXT_TERMINATOR)
        .unwrap_or(bytes.len());
    let text = &bytes[..end];
    let trimmed_len = text
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |i| i + 1);
    printable(&text[..trimmed_len])
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Names of the decoder identification features currently signalled
fn decoder_features(state: &StationState) -> Vec<&'static str> {
    crate::DecoderIdentification::ALL
        .iter()
        .filter(|f| state.decoder_identification(**f))
        .map(|f| f.name())
        .collect()
}

/// Multi-line summary of a station's decoded state
pub fn render_station(state: &StationState) -> String {
    let pty = state.program_type();
    let mut lines = vec![
        format!("PI:   {:04X}", state.station_identifier),
        format!("PTY:  {} {} [{}]", pty.code, pty.name, pty.long_label),
        format!("PS:   \"{}\"", station_name_text(state)),
        format!("RT:   \"{}\"", radio_text_text(state)),
        format!(
            "TP:   {}  TA: {}  Music: {}",
            on_off(state.traffic_program),
            on_off(state.traffic_announcement),
            on_off(state.is_music)
        ),
    ];

    let features = decoder_features(state);
    lines.push(if features.is_empty() {
        "DI:   none".to_string()
    } else {
        format!("DI:   {}", features.join(", "))
    });

    lines.join("\n")
}

impl fmt::Display for StationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PI={:04X} PTY={} ({}) PS=\"{}\" RT=\"{}\"",
            self.station_identifier,
            self.program_type_code,
            self.program_type().short_label,
            station_name_text(self),
            radio_text_text(self)
        )?;
        if self.traffic_program {
            write!(f, " TP")?;
        }
        if self.traffic_announcement {
            write!(f, " TA")?;
        }
        if !self.is_music {
            write!(f, " SPEECH")?;
        }
        let features = decoder_features(self);
        if !features.is_empty() {
            write!(f, " DI={}", features.join(","))?;
        }
        Ok(())
    }
}

// ============================================================================
// Group Annotation
// ============================================================================

/// Describe every field of a group
///
/// Groups that the decoder does not handle get only the common fields.
pub fn annotate_group(group: &Group) -> AnnotatedGroup {
    let group_type = group.group_type();
    let block_b = group.block_b();
    let pty = field(block_b, PROGRAM_TYPE_SHIFT, PROGRAM_TYPE_MASK);

    let mut segments = vec![
        FieldSegment::new(0, 0..16, "pi", format!("{:04X}", group.pi()), FieldKind::Identifier),
        FieldSegment::new(
            1,
            VERSION_SHIFT as u8..16,
            "type",
            group_type.to_string(),
            FieldKind::GroupType,
        ),
        FieldSegment::new(
            1,
            TRAFFIC_PROGRAM_SHIFT as u8..TRAFFIC_PROGRAM_SHIFT as u8 + 1,
            "tp",
            on_off(group.traffic_program()),
            FieldKind::Flag,
        ),
        FieldSegment::new(
            1,
            PROGRAM_TYPE_SHIFT as u8..PROGRAM_TYPE_SHIFT as u8 + 5,
            "pty",
            format!("{} {}", pty, ProgramTypeCatalog::lookup(pty as i32).name),
            FieldKind::ProgramType,
        ),
    ];

    let mut summary = format!("{} PI={:04X} PTY={}", group_type, group.pi(), pty);

    match (group_type.number, group_type.version) {
        (0, GroupVersion::A) => {
            let (offset, feature) = station_name_segment(block_b);
            let chars = block_chars(group.block_d());
            let text = printable(&chars);
            segments.extend([
                FieldSegment::new(
                    1,
                    TRAFFIC_ANNOUNCEMENT_SHIFT as u8..TRAFFIC_ANNOUNCEMENT_SHIFT as u8 + 1,
                    "ta",
                    on_off(flag(block_b, TRAFFIC_ANNOUNCEMENT_SHIFT)),
                    FieldKind::Flag,
                ),
                FieldSegment::new(
                    1,
                    MUSIC_SPEECH_SHIFT as u8..MUSIC_SPEECH_SHIFT as u8 + 1,
                    "ms",
                    if flag(block_b, MUSIC_SPEECH_SHIFT) {
                        "music"
                    } else {
                        "speech"
                    },
                    FieldKind::Data,
                ),
                FieldSegment::new(
                    1,
                    DECODER_ID_SHIFT as u8..DECODER_ID_SHIFT as u8 + 1,
                    "di",
                    format!("{} {}", feature.name(), on_off(flag(block_b, DECODER_ID_SHIFT))),
                    FieldKind::Flag,
                ),
                FieldSegment::new(1, 0..2, "seg", (offset / 2).to_string(), FieldKind::Segment),
                FieldSegment::new(2, 0..16, "af", format!("{:04X}", group.block_c()), FieldKind::Data),
                FieldSegment::new(3, 0..16, "ps", text.clone(), FieldKind::Text),
            ]);
            summary.push_str(&format!(" PS[{}..{}]=\"{}\"", offset, offset + 2, text));
        }
        (2, GroupVersion::A) => {
            let offset = radio_text_offset(block_b);
            let [c_hi, c_lo] = block_chars(group.block_c());
            let [d_hi, d_lo] = block_chars(group.block_d());
            let text = printable(&[c_hi, c_lo, d_hi, d_lo]);
            segments.extend([
                FieldSegment::new(1, 0..4, "seg", (offset / 4).to_string(), FieldKind::Segment),
                FieldSegment::new(2, 0..16, "rt", printable(&[c_hi, c_lo]), FieldKind::Text),
                FieldSegment::new(3, 0..16, "rt", printable(&[d_hi, d_lo]), FieldKind::Text),
            ]);
            summary.push_str(&format!(" RT[{}..{}]=\"{}\"", offset, offset + 4, text));
        }
        _ => {}
    }

    AnnotatedGroup {
        group_type,
        summary,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroupDecoder;

    #[test]
    fn test_printable() {
        assert_eq!(printable(b"AB\x00\x7F~ "), "AB..~ ");
    }

    #[test]
    fn test_radio_text_terminator() {
        let mut decoder = GroupDecoder::new();
        decoder.apply_group(0x6201, 0x2000, 0x4869, 0x2120);
        decoder.apply_group(0x6201, 0x2001, 0x0D20, 0x2020);
        assert_eq!(radio_text_text(decoder.state()), "Hi!");
    }

    #[test]
    fn test_render_station() {
        let mut decoder = GroupDecoder::new();
        // 0A, PTY 5, TP, DI set for segment 3
        decoder.apply_group(0x6201, 0x04A7, 0xE0CD, 0x4B58);
        let text = render_station(decoder.state());
        assert!(text.contains("PI:   6201"));
        assert!(text.contains("5 Rock"));
        assert!(text.contains("PS:   \"......KX\""));
        assert!(text.contains("DI:   Stereo"));
        assert!(text.contains("TP:   on"));
    }

    #[test]
    fn test_station_display() {
        let mut decoder = GroupDecoder::new();
        decoder.apply_group(0x6201, 0x0410, 0xE0CD, 0x4142);
        assert_eq!(
            decoder.state().to_string(),
            "PI=6201 PTY=0 (None) PS=\"AB......\" RT=\"\" TP TA"
        );

        // Segment 3 with DI set, then radio text
        decoder.apply_group(0x6201, 0x0007, 0xE0CD, 0x5758);
        decoder.apply_group(0x6201, 0x2000, 0x4869, 0x0D20);
        assert_eq!(
            decoder.state().to_string(),
            "PI=6201 PTY=0 (None) PS=\"AB....WX\" RT=\"Hi\" DI=Stereo"
        );
    }

    #[test]
    fn test_annotate_basic_tuning() {
        let group = Group::new(0x6201, 0x0043, 0xE0CD, 0x5758);
        let annotated = annotate_group(&group);
        assert_eq!(annotated.group_type, GroupType::BASIC_TUNING_A);
        assert_eq!(annotated.summary, "0A PI=6201 PTY=2 PS[6..8]=\"WX\"");
        let ps = annotated
            .segments
            .iter()
            .find(|s| s.label == "ps")
            .unwrap();
        assert_eq!(ps.block, 3);
        assert_eq!(ps.kind, FieldKind::Text);
        assert!(annotated
            .segments
            .iter()
            .any(|s| s.label == "di" && s.value.starts_with("Stereo")));
    }

    #[test]
    fn test_annotate_radio_text() {
        let group = Group::new(0x6201, 0x200F, 0x5960, 0x6162);
        let annotated = annotate_group(&group);
        assert_eq!(annotated.summary, "2A PI=6201 PTY=0 RT[60..64]=\"Y`ab\"");
        assert_eq!(
            annotated
                .segments
                .iter()
                .filter(|s| s.kind == FieldKind::Text)
                .count(),
            2
        );
    }

    #[test]
    fn test_annotate_unhandled_group() {
        let group = Group::new(0x1234, 0xF7E0, 0xFFFF, 0xFFFF);
        let annotated = annotate_group(&group);
        assert_eq!(annotated.summary, "15A PI=1234 PTY=31");
        assert_eq!(annotated.segments.len(), 4);
        assert!(annotated.segments.iter().all(|s| s.block < 2));
    }
}
