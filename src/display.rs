//! Page-at-a-time text rendering for the 128x64 SSD1306.
//!
//! Every frame is drawn eight times into a single 128-byte page and streamed
//! out page by page, so no full framebuffer lives in SRAM.
//! SSD1306 page layout: one byte per column, bit 0 is the top row of the page.

use core::convert::Infallible;

use embedded_graphics::{
    Drawable, Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_8X13, FONT_9X15_BOLD},
    },
    pixelcolor::BinaryColor,
    text::Text,
};

use crate::Error;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGE_ROWS: usize = 8;
pub const PAGE_COUNT: u8 = (HEIGHT / PAGE_ROWS) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Title,
    Body,
}

impl Font {
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::Title => &FONT_9X15_BOLD,
            Font::Body => &FONT_8X13,
        }
    }
}

/// A string drawn with its baseline starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub origin: Point,
    pub font: Font,
}

impl<'a> TextLine<'a> {
    pub const fn new(text: &'a str, x: i32, y: i32, font: Font) -> Self {
        Self {
            text,
            origin: Point::new(x, y),
            font,
        }
    }
}

/// Receives finished pages, top to bottom.
pub trait PageSink {
    fn write_page(&mut self, page: u8, columns: &[u8; WIDTH]) -> Result<(), Error>;
}

pub struct PageBuffer {
    columns: [u8; WIDTH],
    page: u8,
}

impl PageBuffer {
    pub const fn new() -> Self {
        Self {
            columns: [0; WIDTH],
            page: 0,
        }
    }

    pub fn begin_page(&mut self, page: u8) {
        self.page = page;
        self.columns.fill(0);
    }

    pub fn columns(&self) -> &[u8; WIDTH] {
        &self.columns
    }

    #[inline]
    fn set_pixel(&mut self, point: Point, on: bool) {
        if point.x < 0 || point.x >= WIDTH as i32 {
            return;
        }
        let top = self.page as i32 * PAGE_ROWS as i32;
        let row = point.y - top;
        if !(0..PAGE_ROWS as i32).contains(&row) {
            return;
        }

        let col = &mut self.columns[point.x as usize];
        if on {
            *col |= 1 << row;
        } else {
            *col &= !(1 << row);
        }
    }
}

impl OriginDimensions for PageBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for PageBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color.is_on());
        }
        Ok(())
    }
}

pub struct PagedDisplay<S> {
    sink: S,
    buf: PageBuffer,
}

impl<S: PageSink> PagedDisplay<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            buf: PageBuffer::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Replace the whole screen with `lines`. Returns once the last page is out.
    pub fn show_text(&mut self, lines: &[TextLine<'_>]) -> Result<(), Error> {
        for page in 0..PAGE_COUNT {
            self.buf.begin_page(page);
            for line in lines {
                let style = MonoTextStyle::new(line.font.mono(), BinaryColor::On);
                // drawing into the page buffer cannot fail
                let _ = Text::new(line.text, line.origin, style).draw(&mut self.buf);
            }
            self.sink.write_page(page, self.buf.columns())?;
        }
        Ok(())
    }
}
