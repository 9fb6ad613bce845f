//! Glue between the Uno peripherals and the game's device traits.

use simon_says::display::{PageSink, PAGE_ROWS, WIDTH};
use simon_says::{Error, Nvm};
use ssd1306::mode::BasicMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

pub type OledDriver = Ssd1306<I2CInterface<arduino_hal::I2c>, DisplaySize128x64, BasicMode>;

/// SSD1306 fed one 8-row page at a time.
pub struct Oled(pub OledDriver);

impl PageSink for Oled {
    fn write_page(&mut self, page: u8, columns: &[u8; WIDTH]) -> Result<(), Error> {
        let top = page * PAGE_ROWS as u8;
        self.0
            .set_draw_area((0, top), (WIDTH as u8, top + PAGE_ROWS as u8))
            .map_err(|_| Error::Display)?;
        self.0.draw(columns).map_err(|_| Error::Display)
    }
}

pub struct Eeprom(pub arduino_hal::Eeprom);

impl Nvm for Eeprom {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.0.read_byte(addr)
    }

    fn write_byte(&mut self, addr: u16, byte: u8) {
        self.0.write_byte(addr, byte);
    }
}
