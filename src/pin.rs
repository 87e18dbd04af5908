use embedded_hal::digital::v2::{InputPin, PinState};
use embedded_time::duration::Milliseconds;
use embedded_time::Clock;

use crate::{ClockedDebouncer, Error};

/// Requires `update()` to be called from the main loop.
pub struct DebouncedPin<'a, P, C, R, F> {
    pin: P,
    debouncer: ClockedDebouncer<'a, C, PinState, R, F>,
}

impl<'a, P, C, R, F> DebouncedPin<'a, P, C, R, F>
where
    P: InputPin,
    C: Clock,
    C::T: Into<u64>,
    R: Clone,
    F: FnMut(PinState) -> R,
{
    pub fn new(
        pin: P,
        clock: &'a C,
        callback: F,
        initial_result: R,
        rest: PinState,
    ) -> Result<Self, Error<P::Error>> {
        let debouncer = ClockedDebouncer::new(clock, callback, initial_result, rest)
            .map_err(|e| e.widen())?;
        Ok(Self { pin, debouncer })
    }

    #[must_use]
    pub fn with_delay(self, delay: Milliseconds<u32>) -> Self {
        Self {
            pin: self.pin,
            debouncer: self.debouncer.with_delay(delay),
        }
    }

    pub fn update(&mut self) -> Result<R, Error<P::Error>> {
        let level = PinState::from(self.pin.is_high().map_err(Error::Pin)?);
        self.debouncer.poll(level).map_err(|e| e.widen())
    }
}

impl<'a, P, C, R, F> DebouncedPin<'a, P, C, R, F> {
    pub fn level(&self) -> PinState {
        *self.debouncer.debouncer().state()
    }

    pub fn last_result(&self) -> &R {
        self.debouncer.debouncer().last_result()
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<'a, P, C, R, F> InputPin for DebouncedPin<'a, P, C, R, F>
where
    P: InputPin,
{
    type Error = P::Error;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level() == PinState::High)
    }
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.level() == PinState::Low)
    }
}
