use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use lpm013m126::{
    FrameBuffer,
    protocol::{self, CMD_UPDATE_3BIT, HEIGHT, LINE_BYTES, VCOM_BIT},
};

// SCS is active high on this panel and wants generous setup/hold margins.
const SCS_SETUP_NS: u32 = 6_000;
const SCS_HOLD_NS: u32 = 2_000;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplayError<SpiErr, DispErr, CsErr> {
    Spi(SpiErr),
    Disp(DispErr),
    Cs(CsErr),
    Protocol,
}

pub type JdiDisplayResult<SpiErr, DispErr, CsErr> = Result<(), DisplayError<SpiErr, DispErr, CsErr>>;

/// Minimal board-level display adapter for LPM013M126.
///
/// COM inversion rides the VCOM bit of each command word, so no EXTCOMIN
/// wiring is required.
#[derive(Debug)]
pub struct JdiDisplay<SPI, DISP, CS> {
    spi: SPI,
    disp: DISP,
    cs: CS,
    vcom_high: bool,
}

impl<SPI, DISP, CS> JdiDisplay<SPI, DISP, CS>
where
    SPI: SpiBus<u8>,
    DISP: OutputPin,
    CS: OutputPin,
{
    pub fn new(spi: SPI, disp: DISP, cs: CS) -> Self {
        Self {
            spi,
            disp,
            cs,
            vcom_high: false,
        }
    }

    /// Enables display output.
    pub fn initialize<D>(&mut self, delay: &mut D) -> JdiDisplayResult<SPI::Error, DISP::Error, CS::Error>
    where
        D: DelayNs,
    {
        self.cs.set_low().map_err(DisplayError::Cs)?;
        self.disp.set_high().map_err(DisplayError::Disp)?;

        delay.delay_us(60);
        Ok(())
    }

    /// Sends the all-clear command and holds CS as required.
    pub fn clear_all<D>(&mut self, delay: &mut D) -> JdiDisplayResult<SPI::Error, DISP::Error, CS::Error>
    where
        D: DelayNs,
    {
        self.vcom_high = !self.vcom_high;

        self.cs.set_high().map_err(DisplayError::Cs)?;
        delay.delay_ns(SCS_SETUP_NS);

        let packet = protocol::build_clear_packet(self.vcom_high);
        self.spi.write(&packet).map_err(DisplayError::Spi)?;
        self.spi.flush().map_err(DisplayError::Spi)?;

        delay.delay_ns(SCS_HOLD_NS);
        self.cs.set_low().map_err(DisplayError::Cs)?;

        Ok(())
    }

    /// Flushes a full framebuffer in a single CS-high transaction.
    pub fn flush_frame<D>(
        &mut self,
        frame: &FrameBuffer,
        delay: &mut D,
    ) -> JdiDisplayResult<SPI::Error, DISP::Error, CS::Error>
    where
        D: DelayNs,
    {
        self.vcom_high = !self.vcom_high;

        self.cs.set_high().map_err(DisplayError::Cs)?;
        delay.delay_ns(SCS_SETUP_NS);

        let command = CMD_UPDATE_3BIT | if self.vcom_high { VCOM_BIT } else { 0x00 };
        self.spi.write(&[command]).map_err(DisplayError::Spi)?;

        // [address][66 data bytes][dummy]
        let mut packet = [0u8; LINE_BYTES + 2];
        packet[LINE_BYTES + 1] = 0x00;

        let bytes = frame.bytes();

        for line in 1..=HEIGHT as u16 {
            packet[0] = protocol::encode_line_address(line).ok_or(DisplayError::Protocol)?;

            let start = (line as usize - 1) * LINE_BYTES;
            let end = start + LINE_BYTES;
            packet[1..1 + LINE_BYTES].copy_from_slice(&bytes[start..end]);

            self.spi.write(&packet).map_err(DisplayError::Spi)?;
        }

        // Frame trailer byte.
        self.spi.write(&[0x00]).map_err(DisplayError::Spi)?;
        self.spi.flush().map_err(DisplayError::Spi)?;

        delay.delay_ns(SCS_HOLD_NS);
        self.cs.set_low().map_err(DisplayError::Cs)?;

        Ok(())
    }
}
