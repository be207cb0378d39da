//! Pre-encoded calibration burst templates and the embedded signalling
//! assembler.
//!
//! The calibration call uses three fixed, fully encoded DMR bursts: a voice
//! LC header, a voice burst carrying the 1031 Hz test pattern (vocoder data
//! plus FEC), and a voice terminator with LC. All three are encoded for
//! colour code 1, source ID 1, destination talkgroup 9, and are bit-exact
//! test vectors — nothing in this crate re-derives FEC or LC coding.
//!
//! A voice burst is only complete once the embedded signalling for its
//! position in the six-burst superframe has been spliced in. The fragments
//! live in [`SYNC_EMB_1K`], one row per audio sequence position, and
//! [`apply_embedded`] merges a row into a working frame:
//!
//! - fragment bytes 1..=5 replace frame bytes 15..=19 verbatim;
//! - the fragment's leading low nibble lands in the low nibble of frame
//!   byte 14, preserving the high nibble;
//! - the fragment's trailing high nibble lands in the high nibble of frame
//!   byte 20, preserving the low nibble.
//!
//! The frame format interleaves embedded signalling into residual bit slots
//! alongside other burst fields, which is why bytes 14 and 20 are shared and
//! only half-owned by the signalling region.

use crate::consts::{CAL_FRAME_LEN, EMB_FRAGMENT_LEN, EMB_REGION_END, EMB_REGION_START};

/// One frame as queued to the downstream transmitter: a one-byte control
/// marker followed by the 33-byte encoded burst.
pub type CalFrame = [u8; CAL_FRAME_LEN];

/// Voice coding data + FEC, 1031 Hz test pattern.
///
/// Seed for the sequencer's working voice frame; its embedded signalling
/// region (bytes 14..=20) is re-patched before every emission.
pub const VOICE_1K: CalFrame = [
    0x00, //
    0xCE, 0xA8, 0xFE, 0x83, 0xAC, 0xC4, 0x58, 0x20, 0x0A, 0xCE, 0xA8, //
    0xFE, 0x83, 0xA0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0xC4, 0x58, //
    0x20, 0x0A, 0xCE, 0xA8, 0xFE, 0x83, 0xAC, 0xC4, 0x58, 0x20, 0x0A,
];

/// Voice LC MS header, CC 1, source ID 1, destination TG 9.
pub const VH_DMO_1K: CalFrame = [
    0x00, //
    0x00, 0x20, 0x08, 0x08, 0x02, 0x38, 0x15, 0x00, 0x2C, 0xA0, 0x14, //
    0x60, 0x84, 0x6D, 0x5D, 0x7F, 0x77, 0xFD, 0x75, 0x7E, 0x30, 0x30, //
    0x01, 0x10, 0x01, 0x40, 0x03, 0xC0, 0x13, 0xC1, 0x1E, 0x80, 0x6F,
];

/// Voice terminator MS with LC, CC 1, source ID 1, destination TG 9.
pub const VT_DMO_1K: CalFrame = [
    0x00, //
    0x00, 0x4F, 0x08, 0xDC, 0x02, 0x88, 0x15, 0x78, 0x2C, 0xD0, 0x14, //
    0xC0, 0x84, 0xAD, 0x5D, 0x7F, 0x77, 0xFD, 0x75, 0x79, 0x65, 0x24, //
    0x02, 0x28, 0x06, 0x20, 0x0F, 0x80, 0x1B, 0xC1, 0x07, 0x80, 0x5C,
];

/// Embedded signalling fragments, MS, CC 1, source ID 1, destination TG 9.
///
/// One row per audio sequence position. Row 0 is the MS voice sync pattern;
/// rows 1..=4 carry EMB plus embedded LC fragments 1..=4; row 5 carries the
/// closing EMB field with a null fragment.
pub const SYNC_EMB_1K: [[u8; EMB_FRAGMENT_LEN]; 6] = [
    [0x07, 0xF7, 0xD5, 0xDD, 0x57, 0xDF, 0xD0], // MS voice sync   (audio seq 0)
    [0x01, 0x30, 0x00, 0x00, 0x90, 0x09, 0x10], // EMB + LC 1      (audio seq 1)
    [0x01, 0x70, 0x00, 0x90, 0x00, 0x07, 0x40], // EMB + LC 2      (audio seq 2)
    [0x01, 0x70, 0x00, 0x31, 0x40, 0x07, 0x40], // EMB + LC 3      (audio seq 3)
    [0x01, 0x50, 0xA1, 0x71, 0xD1, 0x70, 0x70], // EMB + LC 4      (audio seq 4)
    [0x01, 0x10, 0x00, 0x00, 0x00, 0x0E, 0x20], // EMB             (audio seq 5)
];

/// Splices the embedded signalling fragment for one superframe position into
/// a working voice frame.
///
/// Everything outside bytes 14..=20 is left untouched, as are the high
/// nibble of byte 14 and the low nibble of byte 20.
///
/// # Panics
/// Panics if `seq` is not a valid superframe position (0..=5). The sequencer
/// keeps its position in range by construction.
pub fn apply_embedded(frame: &mut CalFrame, seq: u8) {
    let frag = &SYNC_EMB_1K[seq as usize];

    frame[EMB_REGION_START + 1..EMB_REGION_END]
        .copy_from_slice(&frag[1..EMB_FRAGMENT_LEN - 1]);
    frame[EMB_REGION_START] = (frame[EMB_REGION_START] & 0xF0) | (frag[0] & 0x0F);
    frame[EMB_REGION_END] = (frame[EMB_REGION_END] & 0x0F) | (frag[EMB_FRAGMENT_LEN - 1] & 0xF0);
}
