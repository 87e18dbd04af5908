use core::convert::Infallible;

use embedded_time::duration::{Fraction, Milliseconds};
use embedded_time::{Clock, ConversionError};

use crate::{Debouncer, Error};

/// Milliseconds since the clock's epoch, truncated to `u32`.
///
/// Only clocks ticking at 1 ms or finer are accepted; scaling coarser ticks up
/// to milliseconds overflows `C::T` long before the counter itself wraps.
pub fn now_millis<C, E>(clock: &C) -> Result<u32, Error<E>>
where
    C: Clock,
    C::T: Into<u64>,
{
    if C::SCALING_FACTOR > Fraction::new(1, 1_000) {
        return Err(Error::Conversion(ConversionError::Unspecified));
    }
    let since_epoch = clock.try_now()?.duration_since_epoch();
    let millis = Milliseconds::<C::T>::try_from(since_epoch)?;
    let wide: u64 = millis.0.into();
    Ok(wide as u32)
}

pub struct ClockedDebouncer<'a, C, T, R, F> {
    clock: &'a C,
    debouncer: Debouncer<T, R, F>,
}

impl<'a, C, T, R, F> ClockedDebouncer<'a, C, T, R, F>
where
    C: Clock,
    C::T: Into<u64>,
    T: PartialEq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
{
    pub fn new(
        clock: &'a C,
        callback: F,
        initial_result: R,
        initial_state: T,
    ) -> Result<Self, Error<Infallible>> {
        let now = now_millis(clock)?;
        Ok(Self {
            clock,
            debouncer: Debouncer::new(callback, initial_result, initial_state, now),
        })
    }

    #[must_use]
    pub fn with_delay(self, delay: Milliseconds<u32>) -> Self {
        Self {
            clock: self.clock,
            debouncer: self.debouncer.with_delay(delay),
        }
    }

    pub fn poll(&mut self, value: T) -> Result<R, Error<Infallible>> {
        let now = now_millis(self.clock)?;
        Ok(self.debouncer.poll_at(now, value))
    }
}

impl<'a, C, T, R, F> ClockedDebouncer<'a, C, T, R, F> {
    pub fn debouncer(&self) -> &Debouncer<T, R, F> {
        &self.debouncer
    }

    pub fn into_inner(self) -> Debouncer<T, R, F> {
        self.debouncer
    }
}
