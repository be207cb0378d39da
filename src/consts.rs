//! Constants shared across the calibration generator.
//!
//! This module defines the DMR frame geometry and the fixed parameters of the
//! calibration unit: the length of an encoded burst as handed to the
//! downstream transmitter, the embedded signalling superframe length, the
//! byte region inside a voice burst that carries embedded signalling, and the
//! reporting window of the interrupt diagnostic counter.
//!
//! ## Key Concepts
//!
//! - **Burst length**: a DMR burst is 264 bits (33 bytes) on the air. The
//!   transmitter additionally consumes a one-byte control marker in front of
//!   each burst, so every queued frame is 34 bytes long.
//! - **Superframe**: embedded link control is spread over six consecutive
//!   voice bursts; position 0 carries the voice sync pattern, positions 1..=4
//!   the LC fragments, and position 5 the closing EMB field.
//! - **Embedded signalling region**: inside a voice burst the signalling
//!   occupies bytes 15..=19 in full plus half of bytes 14 and 20; the other
//!   nibble of those two bytes belongs to the surrounding burst fields and
//!   must never be disturbed.

/// Length (in bytes) of one encoded DMR burst (264 bits on the air).
pub const DMR_FRAME_LENGTH_BYTES: usize = 33;

/// Length (in bytes) of a frame as queued to the downstream transmitter:
/// a one-byte control marker followed by the encoded burst.
pub const CAL_FRAME_LEN: usize = DMR_FRAME_LENGTH_BYTES + 1;

/// Number of voice bursts in one embedded signalling superframe.
pub const AUDIO_SEQ_LEN: u8 = 6;

/// Length (in bytes) of one embedded signalling fragment: a leading nibble
/// for frame byte 14, five whole bytes, and a trailing nibble for byte 20.
pub const EMB_FRAGMENT_LEN: usize = 7;

/// First frame byte touched by embedded signalling (low nibble only).
pub const EMB_REGION_START: usize = 14;

/// Last frame byte touched by embedded signalling (high nibble only).
pub const EMB_REGION_END: usize = 20;

/// Ticks per interrupt-diagnostic report window (a few seconds at the modem
/// interrupt cadence). Only scales the report rate; the counters themselves
/// accumulate in hardware.
pub const CAL_DLY_LOOP: u32 = 96_000;
