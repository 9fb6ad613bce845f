//! Best score kept in EEPROM.
//!
//! Layout: one little-endian `u16` at byte offset 0. No header, no checksum.

/// Byte-addressed non-volatile memory, the shape of the AVR EEPROM.
pub trait Nvm {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, byte: u8);
}

pub trait ScoreStore {
    fn load(&mut self) -> u16;
    /// Fire-and-forget; a failed write is not reported.
    fn save(&mut self, score: u16);
}

pub const SCORE_ADDR: u16 = 0;
const ERASED: u16 = 0xFFFF;

pub struct EepromScore<N> {
    nvm: N,
}

impl<N: Nvm> EepromScore<N> {
    pub fn new(nvm: N) -> Self {
        Self { nvm }
    }

    pub fn nvm(&self) -> &N {
        &self.nvm
    }
}

impl<N: Nvm> ScoreStore for EepromScore<N> {
    fn load(&mut self) -> u16 {
        let lo = self.nvm.read_byte(SCORE_ADDR) as u16;
        let hi = self.nvm.read_byte(SCORE_ADDR + 1) as u16;
        match (hi << 8) | lo {
            // never written
            ERASED => 0,
            score => score,
        }
    }

    fn save(&mut self, score: u16) {
        for (offset, byte) in score.to_le_bytes().into_iter().enumerate() {
            let addr = SCORE_ADDR + offset as u16;
            // update, not write: untouched cells keep their erase count
            if self.nvm.read_byte(addr) != byte {
                self.nvm.write_byte(addr, byte);
            }
        }
    }
}
