//! Simon Says for an Arduino Uno with four LED/button pairs, a piezo speaker
//! and a 128x64 SSD1306 OLED.
//!
//! The game logic only talks to the hardware through the [`Outputs`],
//! [`Inputs`] and [`ScoreStore`] traits, so the whole state machine runs on
//! the host as well as on the ATmega328P.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod game;
pub mod panel;
pub mod screens;
pub mod sequence;
pub mod store;
pub mod tone;

#[cfg(test)]
mod testing;

pub use config::{Config, DebouncePolicy, Timings};
pub use game::{Context, Game, State};
pub use panel::{Inputs, Outputs, Panel};
pub use sequence::{RandomSlots, Sequence, Slot, SlotSource};
pub use store::{EepromScore, Nvm, ScoreStore};
pub use tone::Pitch;

use embedded_hal::digital::{self, ErrorKind};

/// Hardware faults surfaced by the board wrappers.
///
/// A wrong button press is not an error, it is a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Pin(ErrorKind),
    Display,
}

impl Error {
    pub fn pin<E: digital::Error>(err: E) -> Self {
        Error::Pin(err.kind())
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Error::Pin(_) => "gpio fault",
            Error::Display => "display bus fault",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Pin(kind) => write!(f, "{}: {}", self.name(), kind),
            Error::Display => f.write_str(self.name()),
        }
    }
}

impl ufmt::uDisplay for Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}
