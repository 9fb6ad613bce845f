//! Device abstraction the game talks to, and its implementation on
//! `embedded-hal` pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::display::{PageSink, PagedDisplay, TextLine};
use crate::sequence::Slot;
use crate::tone::{Pitch, Speaker};
use crate::Error;

/// Everything the player sees and hears. Every call blocks until done.
pub trait Outputs {
    fn show_text(&mut self, lines: &[TextLine<'_>]) -> Result<(), Error>;

    fn set_led(&mut self, slot: Slot, on: bool) -> Result<(), Error>;

    fn set_all_leds(&mut self, on: bool) -> Result<(), Error> {
        for slot in Slot::ALL {
            self.set_led(slot, on)?;
        }
        Ok(())
    }

    fn play_tone(&mut self, pitch: Pitch, duration_ms: u32) -> Result<(), Error>;

    fn stop_tone(&mut self) -> Result<(), Error>;

    fn sleep_ms(&mut self, ms: u32);
}

pub trait Inputs {
    /// `true` while the button is held.
    fn read_button(&mut self, slot: Slot) -> Result<bool, Error>;

    fn any_pressed(&mut self) -> Result<bool, Error> {
        for slot in Slot::ALL {
            if self.read_button(slot)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The physical front panel: four LEDs, four pull-up buttons, the piezo and
/// the OLED, plus the delay that paces all of them.
///
/// LED `i`, button `i` and tone `i` belong to the same slot.
pub struct Panel<L, B, P, S, D> {
    leds: [L; 4],
    buttons: [B; 4],
    speaker: Speaker<P>,
    display: PagedDisplay<S>,
    delay: D,
}

impl<L, B, P, S, D> Panel<L, B, P, S, D>
where
    L: OutputPin,
    B: InputPin,
    P: OutputPin,
    S: PageSink,
    D: DelayNs,
{
    pub fn new(leds: [L; 4], buttons: [B; 4], speaker: P, display: S, delay: D) -> Self {
        Self {
            leds,
            buttons,
            speaker: Speaker::new(speaker),
            display: PagedDisplay::new(display),
            delay,
        }
    }
}

impl<L, B, P, S, D> Outputs for Panel<L, B, P, S, D>
where
    L: OutputPin,
    B: InputPin,
    P: OutputPin,
    S: PageSink,
    D: DelayNs,
{
    fn show_text(&mut self, lines: &[TextLine<'_>]) -> Result<(), Error> {
        self.display.show_text(lines)
    }

    fn set_led(&mut self, slot: Slot, on: bool) -> Result<(), Error> {
        let led = &mut self.leds[slot.index()];
        if on {
            led.set_high().map_err(Error::pin)
        } else {
            led.set_low().map_err(Error::pin)
        }
    }

    fn play_tone(&mut self, pitch: Pitch, duration_ms: u32) -> Result<(), Error> {
        self.speaker.play(&mut self.delay, pitch, duration_ms)
    }

    fn stop_tone(&mut self) -> Result<(), Error> {
        self.speaker.stop()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

impl<L, B, P, S, D> Inputs for Panel<L, B, P, S, D>
where
    L: OutputPin,
    B: InputPin,
    P: OutputPin,
    S: PageSink,
    D: DelayNs,
{
    fn read_button(&mut self, slot: Slot) -> Result<bool, Error> {
        // pull-up: pressed pulls the line low
        self.buttons[slot.index()].is_low().map_err(Error::pin)
    }
}
