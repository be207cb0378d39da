//! DMR calibration driver: mode dispatch, command handling, and the DMO
//! 1031 Hz voice-burst sequencer.
//!
//! [`DmrCal`] generates deterministic, protocol-correct over-the-air burst
//! sequences so a technician can verify the RF transmit chain, timing, and
//! interrupt cadence without a live call. An armed test-tone session emits a
//! voice LC header, voice bursts carrying the 1031 Hz test pattern with
//! embedded signalling cycling through the six-burst superframe, and a voice
//! terminator once the operator disarms.
//!
//! The driver is tick-driven: the modem's scheduler calls
//! [`process`](DmrCal::process) once per fixed-period tick with the
//! calibration mode currently selected by the host control layer. Nothing
//! here blocks — when the downstream transmitter reports no free buffer
//! slot, the whole tick is a no-op and the pending step is retried on the
//! next one.
//!
//! ## Example
//!
//! ```rust
//! use dmrcal::cal::{CalMode, DmrCal};
//! use dmrcal::fifo::FrameFifo;
//! use dmrcal::traits::{InterfaceMode, ModemIo};
//!
//! #[derive(Debug)]
//! struct NullIo;
//!
//! impl ModemIo for NullIo {
//!     fn set_interface(&mut self, _mode: InterfaceMode, _enabled: bool) {}
//!     fn int_counters(&mut self) -> (u16, u16) {
//!         (0, 0)
//!     }
//! }
//!
//! let mut cal = DmrCal::new(FrameFifo::<8>::new(), NullIo);
//! cal.write(CalMode::Dmo1k, &[1]).unwrap();
//! loop {
//!     cal.process(CalMode::Dmo1k); // once per modem tick
//!     # break;
//! }
//! # assert_eq!(cal.tx.len(), 1); // the voice header went out
//! ```
//!
//! ## Concurrency
//!
//! All shared state (the transmit flag, the working voice frame, the
//! superframe position, the diagnostic counter) is touched only within the
//! single tick context; [`write`](DmrCal::write) must execute on the same
//! thread as the dispatcher or be otherwise serialized with it. For
//! interrupt-driven firmware, the `timer-isr` helpers in [`crate::timer`]
//! wrap the driver in a `critical_section` mutex.

use crate::consts::{AUDIO_SEQ_LEN, CAL_DLY_LOOP};
use crate::error::CommandError;
use crate::frames::{CalFrame, VH_DMO_1K, VOICE_1K, VT_DMO_1K, apply_embedded};
use crate::traits::{DmoTransmitter, InterfaceMode, ModemIo};
use core::convert::Infallible;

/// Externally selected calibration mode, chosen by the host control layer
/// and handed to [`DmrCal::process`] on every tick.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum CalMode {
    ///   No mode handled by this unit. Every tick is a no-op; mode selection
    ///   is validated upstream, so unknown modes are silently ignored.
    #[default]
    None,
    ///   Continuous-carrier DMR calibration: the transmit flag is forwarded
    ///   to the transmitter's carrier output every tick, and the transmitter
    ///   is pumped while armed.
    DmrCarrier,
    ///   DMO 1031 Hz test tone: the voice-burst sequencer runs once per
    ///   tick, emitting at most one frame.
    Dmo1k,
    ///   Interrupt cadence diagnostics: counts ticks and periodically logs
    ///   the two hardware interrupt counters. No RF activity. Intended for
    ///   board checks (TCXO, connections), not precise frequency
    ///   measurement.
    IntCounter,
}

/// Sequencer state for the DMO 1031 Hz voice run.
///
/// The lifecycle spans from arming (via [`DmrCal::write`]) to the automatic
/// return to [`Idle`](Dmo1kState::Idle) after the terminator, or an explicit
/// disarm honoured at the next superframe boundary.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum Dmo1kState {
    ///   No calibration call in flight.
    #[default]
    Idle,
    ///   Armed; the voice LC header goes out on the next serviced tick.
    VoiceHeader,
    ///   Voice bursts are being emitted, one superframe position per tick.
    Voice,
    ///   The superframe has completed after a disarm; the voice terminator
    ///   goes out on the next serviced tick.
    VoiceTerm,
}

/// The DMR calibration signal generator.
///
/// Owns its collaborator seams: `T` is the downstream direct-mode
/// transmitter that buffers and modulates frames, `I` the board I/O
/// abstraction used for RF switching and the interrupt counters. The seams
/// are public so firmware can reach its own transmitter between ticks and
/// tests can inspect captured output.
#[derive(Debug)]
pub struct DmrCal<T, I>
where
    T: DmoTransmitter,
    I: ModemIo,
{
    /// Downstream transmitter.
    pub tx: T,
    /// Board I/O abstraction.
    pub io: I,
    transmit: bool,
    state: Dmo1kState,
    /// Working voice frame, seeded from the test-tone template and
    /// re-patched in place before each emission. Never handed out by
    /// reference across the tick boundary.
    frame: CalFrame,
    audio_seq: u8,
    diag_count: u32,
}

impl<T, I> DmrCal<T, I>
where
    T: DmoTransmitter,
    I: ModemIo,
{
    /// Creates an idle, disarmed generator around the given collaborators.
    pub fn new(tx: T, io: I) -> Self {
        Self {
            tx,
            io,
            transmit: false,
            state: Dmo1kState::Idle,
            frame: VOICE_1K,
            audio_seq: 0,
            diag_count: 0,
        }
    }

    /// Current sequencer state.
    pub fn state(&self) -> Dmo1kState {
        self.state
    }

    /// Whether transmission is currently armed.
    pub fn is_transmitting(&self) -> bool {
        self.transmit
    }

    /// Current position in the embedded signalling superframe (0..=5).
    pub fn audio_seq(&self) -> u8 {
        self.audio_seq
    }

    /// Runs one dispatcher pass for the given calibration mode.
    ///
    /// Invoked once per scheduler tick. Emits at most one frame, and only in
    /// [`CalMode::Dmo1k`].
    pub fn process(&mut self, mode: CalMode) {
        match mode {
            CalMode::DmrCarrier => {
                if self.transmit {
                    self.tx.set_cal(true);
                    self.tx.process();
                } else {
                    self.tx.set_cal(false);
                }
            }
            CalMode::Dmo1k => self.dmo1k(),
            CalMode::IntCounter => {
                self.diag_count += 1;
                if self.diag_count >= CAL_DLY_LOOP {
                    self.diag_count = 0;
                    let (int1, int2) = self.io.int_counters();
                    // INT1 fires twice per sample, so halve it for the report.
                    #[cfg(feature = "log")]
                    log::debug!("INT1/INT2 counters: {} {}", int1 >> 1, int2);
                    #[cfg(feature = "defmt-0-3")]
                    defmt::debug!("INT1/INT2 counters: {=u16} {=u16}", int1 >> 1, int2);
                    #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
                    let _ = (int1, int2);
                }
            }
            CalMode::None => {}
        }
    }

    /// One step of the DMO 1031 Hz voice-burst sequencer.
    fn dmo1k(&mut self) {
        self.tx.process();

        if self.tx.space() < 1 {
            // Backpressure: defer the whole step to a later tick.
            return;
        }

        match self.state {
            Dmo1kState::VoiceHeader => {
                self.tx.write_frame(&VH_DMO_1K);
                self.state = Dmo1kState::Voice;
            }
            Dmo1kState::Voice => {
                apply_embedded(&mut self.frame, self.audio_seq);
                self.tx.write_frame(&self.frame);
                if self.audio_seq == AUDIO_SEQ_LEN - 1 {
                    self.audio_seq = 0;
                    // A disarm only takes effect here, at the superframe
                    // boundary, so the embedded LC group always goes out as
                    // a complete, protocol-valid run.
                    if !self.transmit {
                        self.state = Dmo1kState::VoiceTerm;
                    }
                } else {
                    self.audio_seq += 1;
                }
            }
            Dmo1kState::VoiceTerm => {
                self.tx.write_frame(&VT_DMO_1K);
                self.state = Dmo1kState::Idle;
            }
            Dmo1kState::Idle => {
                self.audio_seq = 0;
            }
        }
    }

    /// Handles the single-byte arm/disarm command.
    ///
    /// Byte value `1` arms transmission; any other value disarms. Arming
    /// while the sequencer is idle under [`CalMode::Dmo1k`] starts a new
    /// calibration call with the next tick's voice header, and arming under
    /// any mode switches the RF interface into the DMR transmit
    /// configuration.
    ///
    /// A payload that is not exactly one byte is rejected with
    /// [`CommandError::WrongLength`] and mutates nothing. Disarming is
    /// cooperative: an in-progress voice run finishes its superframe before
    /// the terminator is scheduled.
    pub fn write(&mut self, mode: CalMode, data: &[u8]) -> Result<(), CommandError> {
        if data.len() != 1 {
            return Err(CommandError::WrongLength(data.len()));
        }

        self.transmit = data[0] == 1;

        if self.transmit && self.state == Dmo1kState::Idle && mode == CalMode::Dmo1k {
            self.state = Dmo1kState::VoiceHeader;
        }

        if self.transmit {
            self.io.set_interface(InterfaceMode::Dmr, true);
        }

        Ok(())
    }

    /// Non-blocking poll for calibration-call completion.
    ///
    /// Returns [`nb::Error::WouldBlock`] while a voice run (including its
    /// terminator) is still in flight.
    pub fn wait_idle(&self) -> nb::Result<(), Infallible> {
        if self.state != Dmo1kState::Idle {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fifo::FrameFifo;
    use crate::frames::SYNC_EMB_1K;

    struct MockTx {
        space: u16,
        frames: Vec<CalFrame>,
        cal: Vec<bool>,
        processed: u32,
    }

    impl MockTx {
        fn new(space: u16) -> Self {
            Self {
                space,
                frames: Vec::new(),
                cal: Vec::new(),
                processed: 0,
            }
        }
    }

    impl DmoTransmitter for MockTx {
        fn space(&self) -> u16 {
            self.space
        }

        fn write_frame(&mut self, frame: &CalFrame) {
            self.frames.push(*frame);
        }

        fn set_cal(&mut self, enabled: bool) {
            self.cal.push(enabled);
        }

        fn process(&mut self) {
            self.processed += 1;
        }
    }

    #[derive(Default)]
    struct MockIo {
        interface: Vec<(InterfaceMode, bool)>,
        counters: (u16, u16),
        reads: u32,
    }

    impl ModemIo for MockIo {
        fn set_interface(&mut self, mode: InterfaceMode, enabled: bool) {
            self.interface.push((mode, enabled));
        }

        fn int_counters(&mut self) -> (u16, u16) {
            self.reads += 1;
            self.counters
        }
    }

    fn cal(space: u16) -> DmrCal<MockTx, MockIo> {
        DmrCal::new(MockTx::new(space), MockIo::default())
    }

    fn expected_voice(seq: u8) -> CalFrame {
        let mut frame = VOICE_1K;
        apply_embedded(&mut frame, seq);
        frame
    }

    #[test]
    fn arming_starts_header_and_switches_rf() {
        let mut cal = cal(8);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());

        assert!(cal.is_transmitting());
        assert_eq!(cal.state(), Dmo1kState::VoiceHeader);
        assert_eq!(cal.io.interface, vec![(InterfaceMode::Dmr, true)]);
    }

    #[test]
    fn arming_outside_test_tone_mode_leaves_sequencer_idle() {
        let mut cal = cal(8);
        assert!(cal.write(CalMode::DmrCarrier, &[1]).is_ok());

        assert!(cal.is_transmitting());
        assert_eq!(cal.state(), Dmo1kState::Idle);
        // The RF interface still switches to DMR transmit.
        assert_eq!(cal.io.interface, vec![(InterfaceMode::Dmr, true)]);
    }

    #[test]
    fn non_one_byte_disarms() {
        let mut cal = cal(8);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());
        assert!(cal.write(CalMode::Dmo1k, &[2]).is_ok());

        assert!(!cal.is_transmitting());
        assert!(cal.io.interface.len() == 1);
    }

    #[test]
    fn wrong_length_is_rejected_without_side_effects() {
        let mut cal = cal(8);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());

        let err = cal.write(CalMode::Dmo1k, &[0, 0]).unwrap_err();
        assert_eq!(err, CommandError::WrongLength(2));
        assert_eq!(err.code(), 4);
        // The prior arm is untouched.
        assert!(cal.is_transmitting());
        assert_eq!(cal.state(), Dmo1kState::VoiceHeader);

        let err = cal.write(CalMode::Dmo1k, &[]).unwrap_err();
        assert_eq!(err.code(), 4);
        assert!(cal.is_transmitting());
    }

    #[test]
    fn audio_sequence_cycles_through_superframe() {
        let mut cal = cal(100);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());
        cal.process(CalMode::Dmo1k); // header

        for expected in [1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5, 0, 1] {
            cal.process(CalMode::Dmo1k);
            assert_eq!(cal.audio_seq(), expected);
            assert_eq!(cal.state(), Dmo1kState::Voice);
        }
    }

    #[test]
    fn end_to_end_session_emits_header_voices_terminator() {
        let mut cal = DmrCal::new(FrameFifo::<16>::new(), MockIo::default());
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());

        cal.process(CalMode::Dmo1k); // header
        for _ in 0..5 {
            cal.process(CalMode::Dmo1k); // voice, audio seq 0..=4
        }
        // Disarm before the last voice burst of the superframe.
        assert!(cal.write(CalMode::Dmo1k, &[0]).is_ok());
        cal.process(CalMode::Dmo1k); // voice, audio seq 5 -> wrap, disarm honoured
        cal.process(CalMode::Dmo1k); // terminator
        cal.process(CalMode::Dmo1k); // idle, nothing more

        assert_eq!(cal.tx.len(), 8);
        assert_eq!(cal.tx.pop_frame(), Some(VH_DMO_1K));
        for seq in 0..6u8 {
            let frame = cal.tx.pop_frame().unwrap();
            assert_eq!(frame, expected_voice(seq), "audio seq {seq}");
            assert_eq!(&frame[15..20], &SYNC_EMB_1K[seq as usize][1..6]);
        }
        assert_eq!(cal.tx.pop_frame(), Some(VT_DMO_1K));
        assert_eq!(cal.state(), Dmo1kState::Idle);
        assert!(cal.wait_idle().is_ok());
    }

    #[test]
    fn disarm_mid_run_finishes_superframe_before_terminator() {
        let mut cal = cal(100);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());
        cal.process(CalMode::Dmo1k); // header
        cal.process(CalMode::Dmo1k); // voice 0
        cal.process(CalMode::Dmo1k); // voice 1
        assert!(cal.write(CalMode::Dmo1k, &[0]).is_ok());

        // The run drains to the superframe boundary before terminating.
        for _ in 0..4 {
            cal.process(CalMode::Dmo1k); // voice 2..=5
            assert!(matches!(cal.wait_idle(), Err(nb::Error::WouldBlock)));
        }
        assert_eq!(cal.state(), Dmo1kState::VoiceTerm);
        cal.process(CalMode::Dmo1k); // terminator
        assert_eq!(cal.state(), Dmo1kState::Idle);

        let terminators = cal
            .tx
            .frames
            .iter()
            .filter(|frame| **frame == VT_DMO_1K)
            .count();
        assert_eq!(terminators, 1);
        assert_eq!(cal.tx.frames.len(), 8);

        // Idle ticks emit nothing further.
        cal.process(CalMode::Dmo1k);
        cal.process(CalMode::Dmo1k);
        assert_eq!(cal.tx.frames.len(), 8);
    }

    #[test]
    fn rearm_during_drain_continues_voice_without_new_header() {
        let mut cal = cal(100);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());
        cal.process(CalMode::Dmo1k); // header
        cal.process(CalMode::Dmo1k); // voice 0
        assert!(cal.write(CalMode::Dmo1k, &[0]).is_ok());
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());

        // Re-armed before the wrap: the run never terminates and no second
        // header is produced.
        for _ in 0..12 {
            cal.process(CalMode::Dmo1k);
            assert_eq!(cal.state(), Dmo1kState::Voice);
        }
        let headers = cal
            .tx
            .frames
            .iter()
            .filter(|frame| **frame == VH_DMO_1K)
            .count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn zero_space_tick_is_an_idempotent_no_op() {
        let mut cal = cal(0);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());

        for _ in 0..10 {
            cal.process(CalMode::Dmo1k);
            assert_eq!(cal.state(), Dmo1kState::VoiceHeader);
            assert_eq!(cal.audio_seq(), 0);
            assert!(cal.tx.frames.is_empty());
        }
        // The transmitter is still pumped every tick while starved.
        assert_eq!(cal.tx.processed, 10);

        // Space frees up: the deferred step goes through unchanged.
        cal.tx.space = 1;
        cal.process(CalMode::Dmo1k);
        assert_eq!(cal.tx.frames, vec![VH_DMO_1K]);
        assert_eq!(cal.state(), Dmo1kState::Voice);
    }

    #[test]
    fn backpressure_mid_voice_preserves_sequence_position() {
        let mut cal = cal(100);
        assert!(cal.write(CalMode::Dmo1k, &[1]).is_ok());
        cal.process(CalMode::Dmo1k); // header
        cal.process(CalMode::Dmo1k); // voice 0
        cal.process(CalMode::Dmo1k); // voice 1

        cal.tx.space = 0;
        for _ in 0..5 {
            cal.process(CalMode::Dmo1k);
        }
        assert_eq!(cal.audio_seq(), 2);
        assert_eq!(cal.tx.frames.len(), 3);

        cal.tx.space = 100;
        cal.process(CalMode::Dmo1k);
        assert_eq!(*cal.tx.frames.last().unwrap(), expected_voice(2));
    }

    #[test]
    fn carrier_mode_forwards_transmit_flag() {
        let mut cal = cal(8);

        cal.process(CalMode::DmrCarrier);
        assert_eq!(cal.tx.cal, vec![false]);
        assert_eq!(cal.tx.processed, 0);

        assert!(cal.write(CalMode::DmrCarrier, &[1]).is_ok());
        cal.process(CalMode::DmrCarrier);
        cal.process(CalMode::DmrCarrier);
        assert_eq!(cal.tx.cal, vec![false, true, true]);
        assert_eq!(cal.tx.processed, 2);

        assert!(cal.write(CalMode::DmrCarrier, &[0]).is_ok());
        cal.process(CalMode::DmrCarrier);
        assert_eq!(cal.tx.cal, vec![false, true, true, false]);
        assert_eq!(cal.tx.processed, 2);
        assert!(cal.tx.frames.is_empty());
    }

    #[test]
    fn int_counter_mode_reports_once_per_window() {
        let mut cal = cal(8);
        cal.io.counters = (200, 100);

        for _ in 0..CAL_DLY_LOOP - 1 {
            cal.process(CalMode::IntCounter);
        }
        assert_eq!(cal.io.reads, 0);

        cal.process(CalMode::IntCounter);
        assert_eq!(cal.io.reads, 1);

        // The window counter resets deterministically.
        for _ in 0..CAL_DLY_LOOP {
            cal.process(CalMode::IntCounter);
        }
        assert_eq!(cal.io.reads, 2);
        // Diagnostics never touch the transmitter.
        assert!(cal.tx.frames.is_empty());
        assert_eq!(cal.tx.processed, 0);
    }

    #[test]
    fn unhandled_mode_is_a_no_op() {
        let mut cal = cal(8);
        assert!(cal.write(CalMode::None, &[1]).is_ok());

        for _ in 0..4 {
            cal.process(CalMode::None);
        }
        assert!(cal.tx.frames.is_empty());
        assert!(cal.tx.cal.is_empty());
        assert_eq!(cal.tx.processed, 0);
        assert_eq!(cal.state(), Dmo1kState::Idle);
    }
}
