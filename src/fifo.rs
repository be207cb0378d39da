//! Bounded frame queue implementing the transmitter seam.
//!
//! [`FrameFifo`] mirrors the ring buffer of a real direct-mode transmitter:
//! a fixed number of frame slots, a free-space count the sequencer polls for
//! backpressure, and a continuous-carrier calibration flag. On hosts without
//! RF hardware it doubles as a capture sink — whatever the generator emits
//! can be drained with [`pop_frame`](FrameFifo::pop_frame) and inspected.
//!
//! The capacity `N` is the number of whole frames the queue can hold. A real
//! transmitter typically buffers only a handful of bursts, so small values
//! (2..=8) reproduce firmware backpressure behaviour faithfully.

use crate::frames::CalFrame;
use crate::traits::DmoTransmitter;
use heapless::Deque;

/// A bounded queue of assembled calibration frames.
#[derive(Debug, Default)]
pub struct FrameFifo<const N: usize> {
    frames: Deque<CalFrame, N>,
    cal: bool,
}

impl<const N: usize> FrameFifo<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            frames: Deque::new(),
            cal: false,
        }
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if no frames are queued.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Removes and returns the oldest queued frame.
    pub fn pop_frame(&mut self) -> Option<CalFrame> {
        self.frames.pop_front()
    }

    /// Whether continuous-carrier calibration output is currently requested.
    pub fn cal_enabled(&self) -> bool {
        self.cal
    }
}

impl<const N: usize> DmoTransmitter for FrameFifo<N> {
    fn space(&self) -> u16 {
        (N - self.frames.len()) as u16
    }

    fn write_frame(&mut self, frame: &CalFrame) {
        // Callers gate on space(), so a frame offered to a full queue is
        // dropped rather than overwriting queued data.
        let _ = self.frames.push_back(*frame);
    }

    fn set_cal(&mut self, enabled: bool) {
        self.cal = enabled;
    }

    fn process(&mut self) {}
}
