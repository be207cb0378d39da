use crate::cal::{CalMode, DmrCal};
use crate::traits::{DmoTransmitter, ModemIo};
use core::cell::RefCell;
use critical_section::Mutex;

/// Used to initialize the global static `DmrCal` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use dmrcal::cal::DmrCal;
/// use dmrcal::fifo::FrameFifo;
/// use dmrcal::timer::global_cal_init;
/// # use dmrcal::traits::{InterfaceMode, ModemIo};
/// # #[derive(Debug)]
/// # struct BoardIo;
/// # impl ModemIo for BoardIo {
/// #     fn set_interface(&mut self, _mode: InterfaceMode, _enabled: bool) {}
/// #     fn int_counters(&mut self) -> (u16, u16) { (0, 0) }
/// # }
///
/// static DMR_CAL: Mutex<RefCell<Option<DmrCal<FrameFifo<4>, BoardIo>>>> =
///     global_cal_init::<FrameFifo<4>, BoardIo>();
/// ```
pub const fn global_cal_init<T: DmoTransmitter, I: ModemIo>()
-> Mutex<RefCell<Option<DmrCal<T, I>>>> {
    Mutex::new(RefCell::new(None))
}

/// Stores a driver built from the given collaborators into the global
/// static, from `main()` before interrupts are enabled.
///
/// # Arguments
/// * The global static `DmrCal`
/// * The downstream transmitter
/// * The board I/O abstraction
pub fn global_cal_setup<T: DmoTransmitter, I: ModemIo>(
    global_cal: &'static Mutex<RefCell<Option<DmrCal<T, I>>>>,
    tx: T,
    io: I,
) {
    critical_section::with(|cs| {
        let _ = global_cal.borrow(cs).replace(Some(DmrCal::new(tx, io)));
    });
}

/// Runs one dispatcher pass on the global driver at each interrupt.
///
/// # Arguments
/// * The global static `DmrCal`
/// * The calibration mode currently selected by the host control layer
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     global_cal_tick(&DMR_CAL, current_mode());
/// }
/// ```
pub fn global_cal_tick<T: DmoTransmitter, I: ModemIo>(
    global_cal: &'static Mutex<RefCell<Option<DmrCal<T, I>>>>,
    mode: CalMode,
) {
    critical_section::with(|cs| {
        if let Some(cal) = global_cal.borrow(cs).borrow_mut().as_mut() {
            cal.process(mode);
        }
    });
}

/// Forwards a host command byte to the global driver.
///
/// Runs inside a critical section, so it is safe to call from the serial
/// handler while the timer interrupt drives [`global_cal_tick`].
///
/// # Returns
/// * The single-byte wire status (`0` success), or `None` if the driver has
///   not been set up yet.
pub fn global_cal_write<T: DmoTransmitter, I: ModemIo>(
    global_cal: &'static Mutex<RefCell<Option<DmrCal<T, I>>>>,
    mode: CalMode,
    data: &[u8],
) -> Option<u8> {
    critical_section::with(|cs| {
        global_cal
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(|cal| match cal.write(mode, data) {
                Ok(()) => 0,
                Err(err) => err.code(),
            })
    })
}
