//! Timer and tick-loop utilities for the calibration driver.
//!
//! The generator is advanced by [`DmrCal::process`](crate::cal::DmrCal::process)
//! once per fixed-period tick at the modem's frame cadence. This module
//! provides two ways to schedule those ticks: an interrupt service routine
//! using `critical_section::with` (`timer-isr` feature), or a busy-loop
//! delay timer (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_cal_tick_loop` / `run_cal_ticks`: blocking driver loops for
//!   `DelayNs` (feature `delay-loop`)
//! - `global_cal_tick` and `tick_dmr_cal!()`: interrupt-based tick callback
//!   wrappers (feature `timer-isr`)
//!
//! Common prescalers: (For use with `compute_ocr_value` and `const_ocr_value`)
//!
//! | PRESCALER | TIMER_COUNTS | Overflow Interval |
//! |-----------|--------------|-------------------|
//! |        64 |          250 |              1 ms |
//! |       256 |          125 |              2 ms |
//! |       256 |          250 |              4 ms |
//! |      1024 |          125 |              8 ms |
//! |      1024 |          250 |             16 ms |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use macros::*;

/// DMR 4FSK symbol rate: 4800 symbols / second.
pub const SYMBOLS_PER_SECOND: u16 = 4_800;
/// (4800 symbols / second)^-1 ≈ 0.000208 seconds / symbol
pub const SECONDS_PER_SYMBOL: f32 = 1.0 / 4_800.0;
/// (4800 symbols / second)^-1 ≈ 208,333,333 picoseconds / symbol
pub const PICOSECONDS_PER_SYMBOL: u64 = 208_333_333;
/// 1,000,000 picoseconds = 1 microsecond
pub const PICOSECONDS_PER_MICROSECOND: u32 = 1_000_000;
/// 10^12 picoseconds = 1 second
pub const PICOSECONDS_PER_SECOND: u64 = 1_000_000_000_000;
/// Bits in one encoded DMR burst.
pub const DMR_FRAME_LENGTH_BITS: u16 = 264;
/// Nominal on-air duration of one DMR burst slot, in milliseconds.
pub const DMR_SLOT_TIME_MS: u16 = 30;

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_us`: desired tick interval in microseconds
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer)
/// - Number of scheduler ticks per DMR symbol at that interval
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u8) {
    let timer_hz: f32 = f_cpu as f32 / prescaler as f32;
    let tick_seconds: f32 = tick_us / 1_000_000.0;
    let ticks_per_symbol: u8 = round((SECONDS_PER_SYMBOL / tick_seconds) as f64) as u8;
    (round((timer_hz * tick_seconds) as f64) as u16, ticks_per_symbol)
}

/// Compile-time OCR value calculator
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_us`: desired tick interval in microseconds
///
/// # Returns
/// - OCR value for OCRnA (truncates)
/// - Number of scheduler ticks per DMR symbol at that interval
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u8) {
    // Work in picoseconds to preserve precision without float rounding.
    let tick_ps = ((tick_us as f64) * (PICOSECONDS_PER_MICROSECOND as f64)) as u64;
    let ticks_per_symbol: u8 = (PICOSECONDS_PER_SYMBOL / tick_ps) as u8;
    let ocr = (f_cpu / prescaler) as u64 * tick_ps / PICOSECONDS_PER_SECOND;
    (ocr as u16, ticks_per_symbol)
}

/// Number of scheduler ticks per DMR symbol at the given tick interval.
///
/// # Arguments
/// - `tick_us`: tick interval in microseconds
pub const fn const_ticks_per_symbol(tick_us: f32) -> u8 {
    let tick_ps = ((tick_us as f64) * (PICOSECONDS_PER_MICROSECOND as f64)) as u64;
    (PICOSECONDS_PER_SYMBOL / tick_ps) as u8
}
