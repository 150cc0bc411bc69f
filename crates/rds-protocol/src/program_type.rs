//! Program type catalog
//!
//! The 5-bit PTY code names the station's format. This module holds the
//! North American (RBDS) program type table: 32 entries, one per code, each
//! with an 8-character and a 16-character display label. Codes without an
//! assignment still have an entry, with empty labels.

/// Number of program type codes (5-bit field)
pub const PROGRAM_TYPE_COUNT: usize = 32;

/// Code used for out-of-range lookups: "No program type or undefined"
pub const UNDEFINED_PROGRAM_TYPE: u8 = 0;

/// A program type catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProgramType {
    /// PTY code (0-31)
    pub code: u8,
    /// Full name
    pub name: &'static str,
    /// Label for 8-character displays
    pub short_label: &'static str,
    /// Label for 16-character displays
    pub long_label: &'static str,
    /// Description of the format
    pub definition: &'static str,
}

impl ProgramType {
    /// Whether the code is assigned a format
    pub fn is_assigned(&self) -> bool {
        !self.short_label.is_empty()
    }
}

const fn entry(
    code: u8,
    name: &'static str,
    short_label: &'static str,
    long_label: &'static str,
    definition: &'static str,
) -> ProgramType {
    ProgramType {
        code,
        name,
        short_label,
        long_label,
        definition,
    }
}

static PROGRAM_TYPES: [ProgramType; PROGRAM_TYPE_COUNT] = [
    entry(0, "No program type or undefined", "None", "None", ""),
    entry(1, "News", "News", "News", "News reports, either local or network in origin"),
    entry(2, "Information", "Inform", "Information", "Programming that is intended to impart advice"),
    entry(3, "Sports", "Sports", "Sports", "Sports reporting, commentary, and/or live event coverage, either local or network in origin"),
    entry(4, "Talk", "Talk", "Talk", "Call-in and/or interview talk shows either local or national in origin"),
    entry(5, "Rock", "Rock", "Rock", "Album cuts"),
    entry(6, "Classic Rock", "Cls_Rock", "Classic_Rock", "Rock oriented oldies, often mixed with hit oldies, from a decade or more ago"),
    entry(7, "Adult Hits", "Adlt_Hit", "Adult_Hits", "An up-tempo contemporary hits format with no hard rock and no rap"),
    entry(8, "Soft Rock", "Soft_Rck", "Soft_Rock", "Album cuts with a generally soft tempo"),
    entry(9, "Top 40", "Top_40", "Top_ 40", "Current hits, often encompassing a variety of rock styles"),
    entry(10, "Country", "Country", "Country", "Country music, including contemporary and traditional styles"),
    entry(11, "Oldies", "Oldies", "Oldies", "Popular music, usually rock, with 80% or greater non-current music"),
    entry(12, "Soft", "Soft", "Soft", "A cross between adult hits and classical, primarily non-current soft-rock originals"),
    entry(13, "Nostalgia", "Nostalga", "Nostalgia", "Big-band music"),
    entry(14, "Jazz", "Jazz", "Jazz", "Mostly instrumental, includes both traditional jazz and more modern \"smooth jazz\""),
    entry(15, "Classical", "Classicl", "Classical", "Mostly instrumentals, usually orchestral or symphonic music"),
    entry(16, "Rhythm and Blues", "R_&_B", "Rhythm_and_Blues", "A wide range of musical styles, often called \"urban contemporary\""),
    entry(17, "Soft Rhythm and Blues", "Soft_R&B", "Soft_ R_&_B", "Rhythm and blues with a generally soft tempo"),
    entry(18, "Foreign Language", "Language", "Foreign_Language", "Any programming format in a language other than English"),
    entry(19, "Religious Music", "Rel_Musc", "Religious_Music", "Music programming with religious lyrics"),
    entry(20, "Religious Talk", "Rel_Talk", "Religious_Talk", "Call-in shows, interview programs, etc. with a religious theme"),
    entry(21, "Personality", "Persnlty", "Personality", "A radio show where the on-air personality is the main attraction"),
    entry(22, "Public", "Public", "Public", "Programming that is supported by listeners and/or corporate sponsors instead of advertising"),
    entry(23, "College", "College", "College", "Programming produced by a college or university radio station"),
    entry(24, "Spanish Talk", "Habl_Esp", "Hablar_Espanol", "Call-in shows, interview programs, etc. in the Spanish language"),
    entry(25, "Spanish Music", "Musc_Esp", "Musica _Espanol", "Music programming in the Spanish language"),
    entry(26, "Hip-Hop", "Hip hop", "Hip hop", "Popular music incorporating elements of rap, rhythm-and-blues, funk, and soul"),
    entry(27, "Unassigned", "", "", ""),
    entry(28, "Unassigned", "", "", ""),
    entry(29, "Weather", "Weather", "Weather", "Weather forecasts or bulletins that are nonemergency in nature"),
    entry(30, "Emergency Test", "Test", "Emergency_Test", "Broadcast when testing emergency broadcast equipment or receivers. Not intended for searching or dynamic switching for consumer receivers. Receivers may, if desired, display \u{201C}TEST\u{201D} or \u{201C}Emergency Test\u{201D}"),
    entry(31, "Emergency", "ALERT !", "ALERT!_ALERT!", "Emergency announcement made under exceptional circumstances to give warning of events causing danger of a general nature. Not to be used for searching - only used in a receiver for dynamic switching"),
];

/// The static program type table
pub struct ProgramTypeCatalog;

impl ProgramTypeCatalog {
    /// Look up a program type by code
    ///
    /// Codes outside 0..=31 resolve to the "No program type or undefined"
    /// entry.
    pub fn lookup(code: i32) -> ProgramType {
        let index = usize::try_from(code)
            .ok()
            .filter(|&i| i < PROGRAM_TYPE_COUNT)
            .unwrap_or(UNDEFINED_PROGRAM_TYPE as usize);
        PROGRAM_TYPES[index]
    }

    /// All entries in code order
    pub fn entries() -> impl Iterator<Item = ProgramType> {
        PROGRAM_TYPES.iter().copied()
    }
}
