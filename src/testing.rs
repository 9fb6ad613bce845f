//! Host-side stand-ins for the board: pins, delay, EEPROM, OLED and a
//! whole scripted board for driving the state machine.

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::display::{PAGE_COUNT, PageSink, TextLine, WIDTH};
use crate::panel::{Inputs, Outputs};
use crate::sequence::{Slot, SlotSource};
use crate::store::Nvm;
use crate::tone::Pitch;
use crate::Error;

#[derive(Default)]
struct PinState {
    high: bool,
    rising_edges: usize,
}

/// A GPIO line shared between the code under test and the test itself.
#[derive(Clone, Default)]
pub struct FakePin {
    state: Rc<RefCell<PinState>>,
}

impl FakePin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull-up button that is not pressed.
    pub fn released() -> Self {
        let pin = Self::new();
        pin.state.borrow_mut().high = true;
        pin
    }

    pub fn press(&self) {
        self.state.borrow_mut().high = false;
    }

    pub fn is_high(&self) -> bool {
        self.state.borrow().high
    }

    pub fn rising_edges(&self) -> usize {
        self.state.borrow().rising_edges
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if !state.high {
            state.rising_edges += 1;
        }
        state.high = true;
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state.borrow().high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state.borrow().high)
    }
}

/// Delay that only counts.
#[derive(Clone, Default)]
pub struct FakeClock {
    ns: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_us(&self) -> u64 {
        self.ns.get() / 1_000
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.ns.get() / 1_000_000
    }
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.ns.set(self.ns.get() + ns as u64);
    }
}

pub struct RamNvm {
    pub cells: [u8; 32],
    pub writes: usize,
}

impl RamNvm {
    pub fn erased() -> Self {
        Self {
            cells: [0xFF; 32],
            writes: 0,
        }
    }
}

impl Nvm for RamNvm {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, byte: u8) {
        self.writes += 1;
        self.cells[addr as usize] = byte;
    }
}

pub struct FrameSink {
    pub pages: [[u8; WIDTH]; PAGE_COUNT as usize],
    pub pages_written: usize,
}

impl FrameSink {
    pub fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGE_COUNT as usize],
            pages_written: 0,
        }
    }
}

impl PageSink for FrameSink {
    fn write_page(&mut self, page: u8, columns: &[u8; WIDTH]) -> Result<(), Error> {
        self.pages[page as usize] = *columns;
        self.pages_written += 1;
        Ok(())
    }
}

/// Hands out a fixed list of slots.
pub struct Scripted(pub VecDeque<Slot>);

impl Scripted {
    pub fn new(slots: &[u8]) -> Self {
        Self(slots.iter().map(|&i| slot(i)).collect())
    }
}

impl SlotSource for Scripted {
    fn next_slot(&mut self) -> Slot {
        self.0.pop_front().expect("script ran out of slots")
    }
}

pub fn slot(index: u8) -> Slot {
    Slot::new(index).expect("slot index")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Screen(Vec<String>),
    Led(Slot, bool),
    Tone(Pitch, u32),
    Stop,
    Sleep(u32),
}

const POLL_LIMIT: usize = 100_000;

/// Records every output call and replays scripted presses.
///
/// A scripted press is seen by exactly one button read, then released.
#[derive(Default)]
pub struct FakeBoard {
    pub events: Vec<Event>,
    pub leds: [bool; 4],
    pub presses: VecDeque<Slot>,
    pub elapsed_ms: u64,
    /// Button reads that see nothing before scripted presses show up.
    pub hold_off: usize,
    /// Returned by every LED and screen call while set.
    pub fault: Option<Error>,
    /// Returned once by the next read of that button.
    pub input_fault: Option<(Slot, Error)>,
    polls: usize,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, slots: &[u8]) {
        self.presses.extend(slots.iter().map(|&i| slot(i)));
    }

    pub fn screens(&self) -> Vec<Vec<String>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Screen(lines) => Some(lines.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_screen(&self) -> Vec<String> {
        self.screens().pop().unwrap_or_default()
    }

    pub fn tones(&self) -> Vec<(Pitch, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Tone(p, ms) => Some((*p, *ms)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.elapsed_ms = 0;
    }
}

impl Outputs for FakeBoard {
    fn show_text(&mut self, lines: &[TextLine<'_>]) -> Result<(), Error> {
        if let Some(err) = self.fault {
            return Err(err);
        }
        self.events
            .push(Event::Screen(lines.iter().map(|l| l.text.to_string()).collect()));
        Ok(())
    }

    fn set_led(&mut self, slot: Slot, on: bool) -> Result<(), Error> {
        if let Some(err) = self.fault {
            return Err(err);
        }
        self.leds[slot.index()] = on;
        self.events.push(Event::Led(slot, on));
        Ok(())
    }

    fn play_tone(&mut self, pitch: Pitch, duration_ms: u32) -> Result<(), Error> {
        self.elapsed_ms += duration_ms as u64;
        self.events.push(Event::Tone(pitch, duration_ms));
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Error> {
        self.events.push(Event::Stop);
        Ok(())
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.elapsed_ms += ms as u64;
        self.events.push(Event::Sleep(ms));
    }
}

impl Inputs for FakeBoard {
    fn read_button(&mut self, slot: Slot) -> Result<bool, Error> {
        self.polls += 1;
        assert!(self.polls < POLL_LIMIT, "board polled forever, no press scripted");
        if let Some((faulty, err)) = self.input_fault {
            if faulty == slot {
                self.input_fault = None;
                return Err(err);
            }
        }
        if self.hold_off > 0 {
            self.hold_off -= 1;
            return Ok(false);
        }
        if self.presses.front() == Some(&slot) {
            self.presses.pop_front();
            return Ok(true);
        }
        Ok(false)
    }
}

/// Log sink backed by a growable string.
#[derive(Default)]
pub struct LogBuf(pub String);

impl ufmt::uWrite for LogBuf {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}
