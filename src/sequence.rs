//! The growing light sequence and where its slots come from.

use heapless::Vec;
use rand::{Rng, RngCore};

use crate::config::SEQUENCE_CAPACITY;

/// One LED/button/tone triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot(u8);

impl Slot {
    pub const COUNT: usize = 4;
    pub const ALL: [Slot; 4] = [Slot(0), Slot(1), Slot(2), Slot(3)];

    pub const fn new(index: u8) -> Option<Slot> {
        if (index as usize) < Self::COUNT {
            Some(Slot(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl ufmt::uDisplay for Slot {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uDisplay::fmt(&self.0, f)
    }
}

pub trait SlotSource {
    fn next_slot(&mut self) -> Slot;
}

/// Uniform slots drawn from any RNG.
pub struct RandomSlots<R> {
    rng: R,
}

impl<R: RngCore> RandomSlots<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> SlotSource for RandomSlots<R> {
    fn next_slot(&mut self) -> Slot {
        Slot(self.rng.gen_range(0..Slot::COUNT as u8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// Buffer is full; the game has to end before another slot fits.
    Full,
    /// The index would leave a hole after the current end.
    Gap,
}

#[derive(Debug, Default)]
pub struct Sequence {
    slots: Vec<Slot, SEQUENCE_CAPACITY>,
}

impl Sequence {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Put `slot` at `index`, dropping anything from an earlier game at or
    /// past that index. Entries before `index` are left alone.
    pub fn record(&mut self, index: usize, slot: Slot) -> Result<(), RecordError> {
        if index >= SEQUENCE_CAPACITY {
            return Err(RecordError::Full);
        }
        if index > self.slots.len() {
            return Err(RecordError::Gap);
        }
        self.slots.truncate(index);
        self.slots.push(slot).map_err(|_| RecordError::Full)
    }

    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }
}
