/// Declares a static global `DMR_CAL` instance protected by a
/// `critical_section` mutex.
///
/// This macro creates a `static` singleton `DMR_CAL` suitable for use in
/// interrupt-based firmware, where both the main thread (command handling)
/// and the timer ISR need to safely access the shared driver state.
///
/// # Arguments
/// - `$tx`: The concrete type of the downstream transmitter (must implement
///   `DmoTransmitter`)
/// - `$io`: The concrete type of the board I/O layer (must implement
///   `ModemIo`)
///
/// # Example
/// ```ignore
/// init_dmr_cal!(MyDmoTx, MyBoardIo);
/// ```
#[macro_export]
macro_rules! init_dmr_cal {
    ( $tx:ty, $io:ty ) => {
        pub static DMR_CAL: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::cal::DmrCal<$tx, $io>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `DMR_CAL` singleton with a new driver instance.
///
/// Wraps construction of the `DmrCal` and stores it inside the globally
/// declared `DMR_CAL` created by `init_dmr_cal!`.
///
/// # Arguments
/// - `$tx`: The downstream transmitter value
/// - `$io`: The board I/O value
///
/// # Example
/// ```ignore
/// fn main() {
///     setup_dmr_cal!(dmo_tx, board_io);
/// }
/// ```
///
/// # Notes
/// - Must be called before interrupts are enabled (safe in `main()`).
/// - Requires `init_dmr_cal!` to have been used earlier.
#[macro_export]
macro_rules! setup_dmr_cal {
    ( $tx:expr, $io:expr ) => {
        $crate::critical_section::with(|cs| {
            let _ = DMR_CAL
                .borrow(cs)
                .replace(Some($crate::cal::DmrCal::new($tx, $io)));
        });
    };
}

/// Runs one dispatcher pass on the global `DMR_CAL` if it has been
/// initialized.
///
/// Intended to be invoked from a timer ISR or scheduler to advance the
/// calibration state machine once per tick, with the currently selected
/// calibration mode.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_dmr_cal!(current_mode());
/// }
/// ```
///
/// # Notes
/// - Assumes `DMR_CAL` was declared with `init_dmr_cal!` and initialized via
///   `setup_dmr_cal!`.
/// - Safe to call repeatedly — silently does nothing if the driver hasn't
///   been set up yet.
#[macro_export]
macro_rules! tick_dmr_cal {
    ( $mode:expr ) => {
        $crate::critical_section::with(|cs| {
            if let Some(cal) = DMR_CAL.borrow(cs).borrow_mut().as_mut() {
                cal.process($mode);
            }
        });
    };
}

#[cfg(test)]
mod tests {
    use crate::cal::CalMode;
    use crate::fifo::FrameFifo;
    use crate::traits::{InterfaceMode, ModemIo};

    #[derive(Debug)]
    struct NullIo;

    impl ModemIo for NullIo {
        fn set_interface(&mut self, _mode: InterfaceMode, _enabled: bool) {}

        fn int_counters(&mut self) -> (u16, u16) {
            (0, 0)
        }
    }

    init_dmr_cal!(FrameFifo<4>, NullIo);

    #[test]
    fn macro_declared_global_ticks() {
        setup_dmr_cal!(FrameFifo::new(), NullIo);
        tick_dmr_cal!(CalMode::Dmo1k); // idle, nothing queued

        critical_section::with(|cs| {
            let mut cal = DMR_CAL.borrow(cs).borrow_mut();
            let cal = cal.as_mut().unwrap();
            assert!(cal.tx.is_empty());
        });
    }
}
