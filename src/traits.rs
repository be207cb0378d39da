//! Collaborator seams consumed by the calibration generator.
//!
//! The generator never touches hardware itself: assembled frames go to a
//! downstream direct-mode transmitter and RF switching goes through the
//! modem's I/O layer. Both collaborators sit behind traits so that firmware
//! can plug in its real transmitter and I/O block while host-side code and
//! tests use software stand-ins such as [`FrameFifo`](crate::fifo::FrameFifo).

use crate::frames::CalFrame;

/// RF interface configurations selectable through [`ModemIo::set_interface`].
///
/// Only the DMR transmit configuration is requested by this crate; the
/// enum is non-exhaustive because the I/O layer owns the full mode set.
#[non_exhaustive]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum InterfaceMode {
    /// DMR transmit configuration.
    Dmr,
}

/// Downstream direct-mode transmitter fed by the generator.
///
/// The transmitter owns a bounded frame buffer and performs the actual
/// modulation. The generator polls [`space`](DmoTransmitter::space) before
/// every emission and defers the whole tick when no slot is free; it never
/// blocks on the transmitter.
pub trait DmoTransmitter {
    /// Free frame slots in the transmit buffer.
    fn space(&self) -> u16;

    /// Queues one assembled frame for modulation.
    ///
    /// Only called when [`space`](DmoTransmitter::space) reported at least
    /// one free slot on the same tick.
    fn write_frame(&mut self, frame: &CalFrame);

    /// Switches the transmitter's continuous-carrier calibration output.
    fn set_cal(&mut self, enabled: bool);

    /// Runs one pass of the transmitter's own processing.
    fn process(&mut self);
}

/// Hardware I/O abstraction of the modem board.
pub trait ModemIo {
    /// Reconfigures the RF interface for the given mode.
    fn set_interface(&mut self, mode: InterfaceMode, enabled: bool);

    /// Reads the two hardware interrupt counters accumulated since the last
    /// read.
    fn int_counters(&mut self) -> (u16, u16);
}
