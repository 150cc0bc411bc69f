//! Segmented text buffers
//!
//! Station name and radio text arrive a few characters per group. Each group
//! carries a segment address, and the characters are written at the offset
//! that address maps to. Characters from earlier groups stay in place until a
//! group for the same segment overwrites them.

/// Build the offset table for a buffer split into equal-width segments
pub const fn segment_offsets<const SEGMENTS: usize>(width: usize) -> [usize; SEGMENTS] {
    let mut offsets = [0; SEGMENTS];
    let mut i = 0;
    while i < SEGMENTS {
        offsets[i] = i * width;
        i += 1;
    }
    offsets
}

/// Fixed-size character buffer filled `WIDTH` bytes at a time
///
/// Tracks which segments have been written since the buffer was created or
/// cleared. No charset is applied; bytes are stored as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentedBuffer<const LEN: usize, const WIDTH: usize> {
    bytes: [u8; LEN],
    received: u32,
}

impl<const LEN: usize, const WIDTH: usize> SegmentedBuffer<LEN, WIDTH> {
    /// Number of segments covering the buffer
    pub const SEGMENTS: usize = LEN / WIDTH;

    /// Create an all-zero buffer with no segments received
    pub const fn new() -> Self {
        Self {
            bytes: [0; LEN],
            received: 0,
        }
    }

    /// Write one segment's characters at `offset`
    ///
    /// `offset` must come from a segment table for this buffer, so it is a
    /// multiple of `WIDTH` below `LEN`.
    pub(crate) fn write(&mut self, offset: usize, chars: [u8; WIDTH]) {
        self.bytes[offset..offset + WIDTH].copy_from_slice(&chars);
        self.received |= 1 << (offset / WIDTH);
    }

    /// Raw buffer contents
    pub fn as_bytes(&self) -> &[u8; LEN] {
        &self.bytes
    }

    /// Bitmask of received segments (bit n = segment n)
    pub fn received_segments(&self) -> u32 {
        self.received
    }

    /// Whether the given segment has been written
    pub fn has_segment(&self, segment: usize) -> bool {
        segment < Self::SEGMENTS && self.received & (1 << segment) != 0
    }

    /// Whether every segment has been written at least once
    pub fn is_complete(&self) -> bool {
        let all = if Self::SEGMENTS >= 32 {
            u32::MAX
        } else {
            (1u32 << Self::SEGMENTS) - 1
        };
        self.received & all == all
    }

    /// Zero the contents and forget received segments
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<const LEN: usize, const WIDTH: usize> Default for SegmentedBuffer<LEN, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "serde")]
impl<const LEN: usize, const WIDTH: usize> serde::Serialize for SegmentedBuffer<LEN, WIDTH> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("SegmentedBuffer", 2)?;
        s.serialize_field("bytes", &self.bytes[..])?;
        s.serialize_field("received", &self.received)?;
        s.end()
    }
}
