//! Square-wave tones bit-banged on a plain output pin.
//!
//! The piezo only needs a toggling pin, so no timer is reserved for audio.
//! A tone blocks for its whole duration.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::Error;

/// A note frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch(pub u16);

impl Pitch {
    pub const C2: Pitch = Pitch(65);
    pub const G2: Pitch = Pitch(98);
    pub const G3: Pitch = Pitch(196);
    pub const A3: Pitch = Pitch(220);
    pub const B3: Pitch = Pitch(247);
    pub const C4: Pitch = Pitch(262);
    pub const E4: Pitch = Pitch(330);
    pub const G4: Pitch = Pitch(392);
    pub const A4: Pitch = Pitch(440);
    pub const B4: Pitch = Pitch(494);

    pub const fn hz(self) -> u16 {
        self.0
    }

    /// Half of one period, the time the pin stays at each level.
    pub const fn half_period_us(self) -> u32 {
        500_000 / self.0 as u32
    }
}

/// One note of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: Pitch,
    pub ms: u16,
}

impl Note {
    pub const fn new(pitch: Pitch, ms: u16) -> Self {
        Self { pitch, ms }
    }
}

pub struct Speaker<P> {
    pin: P,
}

impl<P: OutputPin> Speaker<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn play<D: DelayNs>(&mut self, delay: &mut D, pitch: Pitch, duration_ms: u32) -> Result<(), Error> {
        if pitch.hz() == 0 {
            delay.delay_ms(duration_ms);
            return Ok(());
        }

        let half = pitch.half_period_us();
        let cycles = duration_ms * pitch.hz() as u32 / 1000;

        for _ in 0..cycles {
            self.pin.set_high().map_err(Error::pin)?;
            delay.delay_us(half);
            self.pin.set_low().map_err(Error::pin)?;
            delay.delay_us(half);
        }

        // whatever the whole cycles did not cover
        let played_us = cycles * half * 2;
        let wanted_us = duration_ms * 1000;
        if wanted_us > played_us {
            delay.delay_us(wanted_us - played_us);
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), Error> {
        self.pin.set_low().map_err(Error::pin)
    }
}
