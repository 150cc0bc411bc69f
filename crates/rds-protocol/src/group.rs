//! RDS group model
//!
//! A group is four 16-bit blocks (A, B, C, D). Block A carries the PI code.
//! Block B carries the group type, the version flag, and the fields that are
//! common to every group type. The meaning of blocks C and D, and of the low
//! five bits of block B, depends on the group type and version.
//!
//! # Block B layout
//! ```text
//!  15 14 13 12 | 11 | 10 |  9  8  7  6  5 |  4  3  2  1  0
//!  group type  | B0 | TP |      PTY       |  type specific
//! ```
//!
//! # Text format
//! Groups are commonly exchanged as four hex words per line, one per block:
//! `6201 0408 E20D 4142`. Anything after `#` is a comment.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Group type number, bits [15:12] of block B
pub const GROUP_TYPE_SHIFT: u16 = 12;
pub const GROUP_TYPE_MASK: u16 = 0x0F;

/// Version flag (B0), bit 11 of block B
pub const VERSION_SHIFT: u16 = 11;

/// Traffic program (TP), bit 10 of block B
pub const TRAFFIC_PROGRAM_SHIFT: u16 = 10;

/// Program type (PTY), bits [9:5] of block B
pub const PROGRAM_TYPE_SHIFT: u16 = 5;
pub const PROGRAM_TYPE_MASK: u16 = 0x1F;

/// Group 0A: traffic announcement (TA), bit 4 of block B
pub const TRAFFIC_ANNOUNCEMENT_SHIFT: u16 = 4;

/// Group 0A: music/speech switch, bit 3 of block B
pub const MUSIC_SPEECH_SHIFT: u16 = 3;

/// Group 0A: decoder identification (DI), bit 2 of block B
pub const DECODER_ID_SHIFT: u16 = 2;

/// Group 0A: station name segment address, bits [1:0] of block B
pub const STATION_NAME_SEGMENT_MASK: u16 = 0x03;

/// Group 2A: radio text segment address, bits [3:0] of block B
pub const RADIO_TEXT_SEGMENT_MASK: u16 = 0x0F;

/// Extract a masked field starting at `shift`
#[inline]
pub(crate) const fn field(word: u16, shift: u16, mask: u16) -> u16 {
    (word >> shift) & mask
}

/// Extract a single flag bit
#[inline]
pub(crate) const fn flag(word: u16, shift: u16) -> bool {
    (word >> shift) & 1 == 1
}

/// Split a block into its two characters, high byte first
#[inline]
pub(crate) const fn block_chars(word: u16) -> [u8; 2] {
    word.to_be_bytes()
}

/// Group version, selected by the B0 bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupVersion {
    /// Version A: block C carries group data
    A,
    /// Version B: block C repeats the PI code
    B,
}

impl GroupVersion {
    /// Letter used when naming a group type ("0A", "2B")
    pub fn letter(&self) -> char {
        match self {
            GroupVersion::A => 'A',
            GroupVersion::B => 'B',
        }
    }
}

/// Group type number and version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupType {
    /// Group type number (0-15)
    pub number: u8,
    /// Group version
    pub version: GroupVersion,
}

impl GroupType {
    /// Group 0A: basic tuning and switching information
    pub const BASIC_TUNING_A: GroupType = GroupType::new(0, GroupVersion::A);
    /// Group 2A: 64-character radio text
    pub const RADIO_TEXT_A: GroupType = GroupType::new(2, GroupVersion::A);

    /// Create a group type, masking the number to 4 bits
    pub const fn new(number: u8, version: GroupVersion) -> Self {
        Self {
            number: number & GROUP_TYPE_MASK as u8,
            version,
        }
    }

    /// Decode group type and version from block B
    pub const fn from_block_b(block_b: u16) -> Self {
        let number = field(block_b, GROUP_TYPE_SHIFT, GROUP_TYPE_MASK) as u8;
        let version = if flag(block_b, VERSION_SHIFT) {
            GroupVersion::B
        } else {
            GroupVersion::A
        };
        Self { number, version }
    }

    /// Bits this group type occupies in block B
    pub const fn block_b_bits(&self) -> u16 {
        let version = match self.version {
            GroupVersion::A => 0,
            GroupVersion::B => 1,
        };
        ((self.number as u16 & GROUP_TYPE_MASK) << GROUP_TYPE_SHIFT) | (version << VERSION_SHIFT)
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.version.letter())
    }
}

/// Fields carried by every group regardless of type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonFields {
    /// Program identification code (block A)
    pub pi: u16,
    /// Program type code (0-31, masked when encoded)
    pub program_type_code: u8,
    /// Traffic program flag
    pub traffic_program: bool,
}

impl CommonFields {
    /// Assemble block B from the common fields, a group type and the
    /// type-specific low five bits
    fn block_b(&self, group_type: GroupType, type_bits: u16) -> u16 {
        group_type.block_b_bits()
            | ((self.traffic_program as u16) << TRAFFIC_PROGRAM_SHIFT)
            | ((self.program_type_code as u16 & PROGRAM_TYPE_MASK) << PROGRAM_TYPE_SHIFT)
            | (type_bits & 0x1F)
    }
}

/// One received RDS group: four 16-bit blocks, already error-corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Blocks A, B, C, D in transmission order
    pub blocks: [u16; 4],
}

impl Group {
    /// Create a group from its four blocks
    pub const fn new(block_a: u16, block_b: u16, block_c: u16, block_d: u16) -> Self {
        Self {
            blocks: [block_a, block_b, block_c, block_d],
        }
    }

    pub const fn block_a(&self) -> u16 {
        self.blocks[0]
    }

    pub const fn block_b(&self) -> u16 {
        self.blocks[1]
    }

    pub const fn block_c(&self) -> u16 {
        self.blocks[2]
    }

    pub const fn block_d(&self) -> u16 {
        self.blocks[3]
    }

    /// Program identification code (block A, verbatim)
    pub const fn pi(&self) -> u16 {
        self.block_a()
    }

    /// Group type and version
    pub const fn group_type(&self) -> GroupType {
        GroupType::from_block_b(self.block_b())
    }

    /// Program type code, always in 0..=31
    pub const fn program_type_code(&self) -> u8 {
        field(self.block_b(), PROGRAM_TYPE_SHIFT, PROGRAM_TYPE_MASK) as u8
    }

    /// Traffic program flag
    pub const fn traffic_program(&self) -> bool {
        flag(self.block_b(), TRAFFIC_PROGRAM_SHIFT)
    }

    /// The fields common to all group types
    pub const fn common(&self) -> CommonFields {
        CommonFields {
            pi: self.pi(),
            program_type_code: self.program_type_code(),
            traffic_program: self.traffic_program(),
        }
    }

    /// Build a group 0A carrying two station name characters
    ///
    /// `segment` is masked to 2 bits; `decoder_id` is the DI bit belonging
    /// to that segment.
    pub fn basic_tuning(
        common: CommonFields,
        traffic_announcement: bool,
        is_music: bool,
        decoder_id: bool,
        segment: u8,
        chars: [u8; 2],
    ) -> Self {
        let type_bits = ((traffic_announcement as u16) << TRAFFIC_ANNOUNCEMENT_SHIFT)
            | ((is_music as u16) << MUSIC_SPEECH_SHIFT)
            | ((decoder_id as u16) << DECODER_ID_SHIFT)
            | (segment as u16 & STATION_NAME_SEGMENT_MASK);
        Self::new(
            common.pi,
            common.block_b(GroupType::BASIC_TUNING_A, type_bits),
            // Alternative frequency pair: "no AF exists" filler codes
            0xE0CD,
            u16::from_be_bytes(chars),
        )
    }

    /// Build a group 2A carrying four radio text characters
    ///
    /// `segment` is masked to 4 bits.
    pub fn radio_text(common: CommonFields, segment: u8, chars: [u8; 4]) -> Self {
        let type_bits = segment as u16 & RADIO_TEXT_SEGMENT_MASK;
        Self::new(
            common.pi,
            common.block_b(GroupType::RADIO_TEXT_A, type_bits),
            u16::from_be_bytes([chars[0], chars[1]]),
            u16::from_be_bytes([chars[2], chars[3]]),
        )
    }
}

impl From<[u16; 4]> for Group {
    fn from(blocks: [u16; 4]) -> Self {
        Self { blocks }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.blocks;
        write!(f, "{:04X} {:04X} {:04X} {:04X}", a, b, c, d)
    }
}

impl FromStr for Group {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.split('#').next().unwrap_or_default();
        let words: Vec<&str> = data.split_whitespace().collect();
        if words.len() != 4 {
            return Err(ParseError::BlockCount(words.len()));
        }

        let mut blocks = [0u16; 4];
        for (index, word) in words.iter().enumerate() {
            blocks[index] = parse_block(word).ok_or_else(|| ParseError::InvalidBlock {
                index,
                word: (*word).to_string(),
            })?;
        }
        Ok(Self { blocks })
    }
}

fn parse_block(word: &str) -> Option<u16> {
    let digits = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_from_block_b() {
        assert_eq!(GroupType::from_block_b(0x0408), GroupType::BASIC_TUNING_A);
        assert_eq!(GroupType::from_block_b(0x2400), GroupType::RADIO_TEXT_A);
        assert_eq!(
            GroupType::from_block_b(0x0800),
            GroupType::new(0, GroupVersion::B)
        );
        assert_eq!(
            GroupType::from_block_b(0xF800),
            GroupType::new(15, GroupVersion::B)
        );
    }

    #[test]
    fn test_group_type_display() {
        assert_eq!(GroupType::BASIC_TUNING_A.to_string(), "0A");
        assert_eq!(GroupType::new(2, GroupVersion::B).to_string(), "2B");
        assert_eq!(GroupType::new(15, GroupVersion::A).to_string(), "15A");
    }

    #[test]
    fn test_common_fields() {
        // PTY bits 9:5 = 0b00010
        let group = Group::new(0x6201, 0b0000_0000_0100_0000, 0, 0);
        assert_eq!(group.program_type_code(), 2);
        assert!(!group.traffic_program());

        let group = Group::new(0x6201, 0x07E0, 0, 0);
        assert_eq!(group.program_type_code(), 31);
        assert!(group.traffic_program());
        assert_eq!(group.pi(), 0x6201);
    }

    #[test]
    fn test_basic_tuning_encoding() {
        let common = CommonFields {
            pi: 0x6201,
            program_type_code: 5,
            traffic_program: true,
        };
        let group = Group::basic_tuning(common, true, true, true, 3, *b"WX");
        assert_eq!(group.group_type(), GroupType::BASIC_TUNING_A);
        assert_eq!(group.common(), common);
        assert_eq!(group.block_b() & 0x1F, 0b1_1111);
        assert_eq!(group.block_d(), 0x5758);
    }

    #[test]
    fn test_radio_text_encoding() {
        let common = CommonFields {
            pi: 0x1234,
            program_type_code: 40,
            traffic_program: false,
        };
        let group = Group::radio_text(common, 0x1F, *b"ABCD");
        assert_eq!(group.group_type(), GroupType::RADIO_TEXT_A);
        // Both the PTY and the segment are masked to their field widths
        assert_eq!(group.program_type_code(), 40 & 0x1F);
        assert_eq!(group.block_b() & 0x1F, 0x0F);
        assert_eq!(group.block_c(), 0x4142);
        assert_eq!(group.block_d(), 0x4344);
    }

    #[test]
    fn test_parse_group() {
        let group: Group = "6201 0408 E20D 4142".parse().unwrap();
        assert_eq!(group, Group::new(0x6201, 0x0408, 0xE20D, 0x4142));

        let group: Group = "0x6201 0x0408 e20d 4142  # comment".parse().unwrap();
        assert_eq!(group, Group::new(0x6201, 0x0408, 0xE20D, 0x4142));
    }

    #[test]
    fn test_parse_group_errors() {
        assert_eq!(
            "6201 0408 E20D".parse::<Group>(),
            Err(ParseError::BlockCount(3))
        );
        assert_eq!("".parse::<Group>(), Err(ParseError::BlockCount(0)));
        assert_eq!(
            "6201 0408 ---- 4142".parse::<Group>(),
            Err(ParseError::InvalidBlock {
                index: 2,
                word: "----".into()
            })
        );
        assert!(matches!(
            "6201 10408 E20D 4142".parse::<Group>(),
            Err(ParseError::InvalidBlock { index: 1, .. })
        ));
        // Sign prefixes are not hex digits
        assert_eq!(
            "+620 0408 E20D 4142".parse::<Group>(),
            Err(ParseError::InvalidBlock {
                index: 0,
                word: "+620".into()
            })
        );
        assert!(matches!(
            "6201 0x-408 E20D 4142".parse::<Group>(),
            Err(ParseError::InvalidBlock { index: 1, .. })
        ));
    }

    #[test]
    fn test_display_matches_parse_format() {
        let group = Group::new(0x6201, 0x0408, 0xE20D, 0x4142);
        assert_eq!(group.to_string(), "6201 0408 E20D 4142");
    }
}
