use crate::cal::{CalMode, DmrCal};
use crate::traits::{DmoTransmitter, ModemIo};
use embedded_hal::delay::DelayNs;

/// Runs a blocking loop that repeatedly calls `process()` on the calibration
/// driver.
///
/// This is a simple timing loop for use in environments where interrupts are
/// unavailable or undesired. It drives the dispatcher at the modem's tick
/// cadence using a delay provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `cal`: A mutable reference to a `DmrCal` instance.
/// - `mode`: The calibration mode selected by the host control layer.
/// - `delay`: A delay provider, typically from the HAL.
/// - `tick_us`: The delay between dispatcher passes, in microseconds
///   (e.g. 208 for one tick per DMR symbol).
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling
///   firmware. Commands cannot be serviced while it runs, so the transmit
///   flag must be armed beforehand.
/// - For anything that needs to keep servicing the host, prefer the
///   interrupt-driven helpers behind the `timer-isr` feature.
pub fn run_cal_tick_loop<D, T, I>(
    cal: &mut DmrCal<T, I>,
    mode: CalMode,
    delay: &mut D,
    tick_us: u32,
) where
    D: DelayNs,
    T: DmoTransmitter,
    I: ModemIo,
{
    loop {
        cal.process(mode);
        delay.delay_us(tick_us);
    }
}

/// Runs a fixed number of dispatcher passes at the given tick interval.
///
/// The bounded variant of [`run_cal_tick_loop`], for operator-bounded
/// calibration sessions driven from a host: run a batch of ticks, service
/// commands, repeat.
///
/// # Arguments
/// - `cal`: A mutable reference to a `DmrCal` instance.
/// - `mode`: The calibration mode selected by the host control layer.
/// - `delay`: A delay provider implementing `DelayNs`.
/// - `tick_us`: The delay between dispatcher passes, in microseconds.
/// - `ticks`: Number of passes to run before returning.
pub fn run_cal_ticks<D, T, I>(
    cal: &mut DmrCal<T, I>,
    mode: CalMode,
    delay: &mut D,
    tick_us: u32,
    ticks: u32,
) where
    D: DelayNs,
    T: DmoTransmitter,
    I: ModemIo,
{
    for _ in 0..ticks {
        cal.process(mode);
        delay.delay_us(tick_us);
    }
}
