#![no_std]

use core::convert::Infallible;
use core::fmt;

use embedded_time::duration::Milliseconds;
use embedded_time::{clock, ConversionError};
use log::{debug, trace};

pub mod clocked;
pub mod pin;

pub use clocked::ClockedDebouncer;
pub use pin::DebouncedPin;

// the debounce time; increase if the output flickers
pub const DEFAULT_DELAY_MS: u32 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Resting,
    Active,
}

#[derive(Debug)]
pub enum Error<E> {
    Clock(clock::Error),
    Conversion(ConversionError),
    Pin(E),
}

impl<E> From<clock::Error> for Error<E> {
    fn from(e: clock::Error) -> Self {
        Error::Clock(e)
    }
}

impl<E> From<ConversionError> for Error<E> {
    fn from(e: ConversionError) -> Self {
        Error::Conversion(e)
    }
}

impl Error<Infallible> {
    pub(crate) fn widen<E>(self) -> Error<E> {
        match self {
            Error::Clock(e) => Error::Clock(e),
            Error::Conversion(e) => Error::Conversion(e),
            Error::Pin(never) => match never {},
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Clock(e) => write!(f, "clock read failed: {:?}", e),
            Error::Conversion(e) => write!(f, "clock instant out of range: {:?}", e),
            Error::Pin(e) => write!(f, "pin read failed: {:?}", e),
        }
    }
}

/// Invokes a callback when a value remains in a new state longer than the delay
pub struct Debouncer<T, R, F> {
    callback: F,
    last_result: R,
    initial_state: T,
    state: T,
    last_change: u32,
    delay: u32,
}

impl<T, R, F> Debouncer<T, R, F>
where
    T: PartialEq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
{
    pub fn new(callback: F, initial_result: R, initial_state: T, now_ms: u32) -> Self {
        Debouncer {
            callback,
            last_result: initial_result,
            state: initial_state.clone(),
            initial_state,
            last_change: now_ms,
            delay: DEFAULT_DELAY_MS,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Milliseconds<u32>) -> Self {
        self.delay = delay.0;
        self
    }

    pub fn poll_at(&mut self, now_ms: u32, value: T) -> R {
        if value == self.state {
            return self.last_result.clone();
        }

        let elapsed = now_ms.wrapping_sub(self.last_change);
        if elapsed > self.delay {
            debug!("transition accepted after {} ms", elapsed);
            self.last_change = now_ms;
            self.state = value;
            self.last_result = (self.callback)(self.state.clone());
        } else {
            // bounce does not move last_change, the window stays anchored to the last accept
            trace!("bounce ignored, {}/{} ms", elapsed, self.delay);
        }

        self.last_result.clone()
    }
}

impl<T: PartialEq, R, F> Debouncer<T, R, F> {
    pub fn state(&self) -> &T {
        &self.state
    }

    pub fn initial_state(&self) -> &T {
        &self.initial_state
    }

    pub fn last_result(&self) -> &R {
        &self.last_result
    }

    pub fn delay(&self) -> Milliseconds<u32> {
        Milliseconds(self.delay)
    }

    pub fn last_change(&self) -> u32 {
        self.last_change
    }

    pub fn phase(&self) -> Phase {
        if self.state == self.initial_state {
            Phase::Resting
        } else {
            Phase::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Active
    }
}
