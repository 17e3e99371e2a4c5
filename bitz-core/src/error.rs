//! Unified error taxonomy
//!
//! Each driver reports its own narrow error type; [`Error`] collects all
//! of them for callers that drive several peripherals from one place.
//! Nothing here is retried internally and nothing is fatal: every
//! operation can simply be called again.

use core::fmt;

use crate::traits::{DisplayError, SensorError};

/// Any failure a Bit-Z driver can report
///
/// `E` is the I2C transport error of the display bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Sensor did not begin the handshake
    NoResponse,
    /// Frame received but the integrity check failed
    Checksum { received: u8, computed: u8 },
    /// A bounded wait expired mid-protocol
    Timeout,
    /// Address discovery exhausted both candidate ranges
    DisplayNotFound,
    /// Display used before `init`
    NotInitialized,
    /// I2C failure, propagated from the bus
    Transport(E),
}

impl<E> Error<E> {
    /// Whether re-running `init` on the display may clear the error
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::NotInitialized)
    }
}

impl<E> From<SensorError> for Error<E> {
    fn from(e: SensorError) -> Self {
        match e {
            SensorError::NoResponse => Error::NoResponse,
            SensorError::Checksum { received, computed } => Error::Checksum { received, computed },
            SensorError::Timeout => Error::Timeout,
        }
    }
}

impl<E> From<DisplayError<E>> for Error<E> {
    fn from(e: DisplayError<E>) -> Self {
        match e {
            DisplayError::NotFound => Error::DisplayNotFound,
            DisplayError::NotInitialized => Error::NotInitialized,
            DisplayError::Transport(inner) => Error::Transport(inner),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoResponse => fmt::Display::fmt(&SensorError::NoResponse, f),
            Error::Checksum { received, computed } => fmt::Display::fmt(
                &SensorError::Checksum {
                    received: *received,
                    computed: *computed,
                },
                f,
            ),
            Error::Timeout => fmt::Display::fmt(&SensorError::Timeout, f),
            Error::DisplayNotFound => fmt::Display::fmt(&DisplayError::<E>::NotFound, f),
            Error::NotInitialized => fmt::Display::fmt(&DisplayError::<E>::NotInitialized, f),
            Error::Transport(e) => write!(f, "display transport error: {:?}", e),
        }
    }
}
