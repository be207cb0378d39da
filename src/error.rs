//! Command status reporting.
//!
//! The host control layer drives calibration through single-byte commands
//! and expects a single-byte status in return. On the Rust side the command
//! handler returns a `Result`; [`CommandError::code`] maps the error back to
//! the wire status when replying over the serial protocol. Status `0` is
//! success (the `Ok` side) and other values are reserved for sibling
//! calibration commands outside this crate.

use thiserror::Error;

/// Failure raised by [`DmrCal::write`](crate::cal::DmrCal::write).
///
/// A rejected command has no side effects: the transmit flag and the
/// sequencer state are left exactly as they were.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Error)]
pub enum CommandError {
    /// The command payload must be exactly one byte.
    #[error("expected a 1-byte command payload, got {0} bytes")]
    WrongLength(usize),
}

impl CommandError {
    /// Single-byte status code for the serial reply.
    pub const fn code(&self) -> u8 {
        match self {
            Self::WrongLength(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_length_maps_to_status_4() {
        assert_eq!(CommandError::WrongLength(2).code(), 4);
        assert_eq!(CommandError::WrongLength(0).code(), 4);
    }
}
