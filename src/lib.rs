//! # dmrcal
//!
//! A portable, no_std DMR calibration burst generator for MMDVM-style modem
//! firmware.
//!
//! The crate produces deterministic, protocol-correct over-the-air burst
//! sequences — a voice LC header, voice bursts carrying a fixed 1031 Hz test
//! pattern with embedded signalling, and a voice terminator — so that a
//! technician can verify the RF transmit chain, timing, and interrupt
//! cadence without a live call. It implements:
//! - the DMO test-tone voice sequencer with its six-burst embedded
//!   signalling superframe
//! - a continuous-carrier calibration passthrough
//! - an interrupt-cadence diagnostic counter
//! - the single-byte arm/disarm command protocol
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support (host-side tools and tests) |
//! | `delay-loop`          | Blocking tick loops over `embedded_hal::delay::DelayNs` |
//! | `timer-isr` (default) | `critical_section` helpers for interrupt-driven ticking |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Design
//!
//! The generator never touches hardware: assembled frames go to a
//! [`DmoTransmitter`](crate::traits::DmoTransmitter) and RF switching goes
//! through a [`ModemIo`](crate::traits::ModemIo). Firmware plugs in its real
//! transmitter and I/O block; hosts and tests use the bundled
//! [`FrameFifo`](crate::fifo::FrameFifo). Everything is single-threaded and
//! tick-driven — backpressure from the transmitter defers work to a later
//! tick instead of blocking.
//!
//! ## Usage
//!
//! ```rust
//! use dmrcal::cal::{CalMode, DmrCal};
//! use dmrcal::fifo::FrameFifo;
//! use dmrcal::traits::{InterfaceMode, ModemIo};
//!
//! #[derive(Debug)]
//! struct BoardIo;
//!
//! impl ModemIo for BoardIo {
//!     fn set_interface(&mut self, _mode: InterfaceMode, _enabled: bool) {
//!         // switch the RF chip into the requested configuration
//!     }
//!     fn int_counters(&mut self) -> (u16, u16) {
//!         (0, 0)
//!     }
//! }
//!
//! let mut cal = DmrCal::new(FrameFifo::<8>::new(), BoardIo);
//!
//! // Host selects the test-tone mode and arms transmission.
//! cal.write(CalMode::Dmo1k, &[1]).unwrap();
//!
//! // Scheduler drives one dispatcher pass per modem tick.
//! for _ in 0..7 {
//!     cal.process(CalMode::Dmo1k);
//! }
//! assert_eq!(cal.tx.len(), 7); // header + six voice bursts
//! ```
//!
//! For tick scheduling helpers, see [`crate::timer`].
//!
//! ## Integration Notes
//!
//! - The dispatcher must be called once per fixed-period tick at the modem's
//!   frame cadence; the OCR helpers in [`crate::timer`] compute AVR timer
//!   settings for it.
//! - [`write`](crate::cal::DmrCal::write) must be serialized with the tick
//!   context; in interrupt-driven firmware use the `timer-isr` helpers,
//!   which wrap the driver in a `critical_section` mutex.
//! - Only calibration traffic is generated here; live call handling and RF
//!   parameter tuning live elsewhere in the modem.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

pub mod cal;
pub mod consts;
pub mod error;
pub mod fifo;
pub mod frames;
pub mod timer;
pub mod traits;
