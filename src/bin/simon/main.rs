#![cfg_attr(target_arch = "avr", no_std, no_main)]

// Pinout (Arduino Uno):
//   LEDs     D8 D9 D10 D11
//   Buttons  D2 D3 D4 D5   (internal pull-up, pressed = low)
//   Piezo    D12
//   OLED     A4 SDA, A5 SCL (SSD1306 128x64, I2C 0x3C)
//   Seed     A0 left floating

#[cfg(target_arch = "avr")]
mod hw;

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use simon_says::{EepromScore, Game, Panel, RandomSlots};
    use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
    use ufmt::uwriteln;

    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());
    let noise = pins.a0.into_analog_input(&mut adc);
    let mut seed: u64 = 0;
    for _ in 0..64 {
        seed = seed.rotate_left(5) ^ noise.analog_read(&mut adc) as u64;
    }
    uwriteln!(&mut serial, "seed {}", seed as u32).ok();

    let leds = [
        pins.d8.into_output().downgrade(),
        pins.d9.into_output().downgrade(),
        pins.d10.into_output().downgrade(),
        pins.d11.into_output().downgrade(),
    ];
    let buttons = [
        pins.d2.into_pull_up_input().downgrade(),
        pins.d3.into_pull_up_input().downgrade(),
        pins.d4.into_pull_up_input().downgrade(),
        pins.d5.into_pull_up_input().downgrade(),
    ];
    let speaker = pins.d12.into_output();

    let sda = pins.a4.into_pull_up_input();
    let scl = pins.a5.into_pull_up_input();
    let i2c = arduino_hal::I2c::new(dp.TWI, sda, scl, 400_000);
    let mut oled = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    );
    if oled.init().is_err() {
        uwriteln!(&mut serial, "oled init failed").ok();
    }

    let panel = Panel::new(leds, buttons, speaker, hw::Oled(oled), arduino_hal::Delay::new());
    let store = EepromScore::new(hw::Eeprom(arduino_hal::Eeprom::new(dp.EEPROM)));
    let slots = RandomSlots::new(SmallRng::seed_from_u64(seed));

    let mut game = Game::new(panel, slots, store, serial);

    loop {
        if let Err(err) = game.step() {
            uwriteln!(game.log_mut(), "fault: {}", err).ok();
            arduino_hal::delay_ms(1000);
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("simon-says is firmware for the ATmega328P; build it for the avr target");
}
