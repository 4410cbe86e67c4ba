use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{PixelColor, raw::RawData, raw::RawU4},
};

use crate::{FrameBuffer, Rgb111, protocol};

impl PixelColor for Rgb111 {
    type Raw = RawU4;
}

impl From<RawU4> for Rgb111 {
    fn from(raw: RawU4) -> Self {
        Self::from_bits(raw.into_inner())
    }
}

impl From<Rgb111> for RawU4 {
    fn from(color: Rgb111) -> Self {
        Self::new(color.bits())
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb111;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let x = point.x as usize;
            let y = point.y as usize;
            let _ = self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        FrameBuffer::clear(self, color);
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(protocol::WIDTH as u32, protocol::HEIGHT as u32)
    }
}
