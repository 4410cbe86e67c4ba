//! Wire-level protocol helpers for LPM013M126.

/// Panel width in pixels.
pub const WIDTH: usize = 176;
/// Panel height in pixels.
pub const HEIGHT: usize = 176;
/// Bits per pixel in 3-bit data update mode.
pub const BITS_PER_PIXEL: usize = 3;
/// Number of bytes in one display line.
pub const LINE_BYTES: usize = WIDTH * BITS_PER_PIXEL / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

/// 3-bit data update mode (M0 high, 3bpp payload).
pub const CMD_UPDATE_3BIT: u8 = 0x80;
/// All-clear command.
pub const CMD_ALL_CLEAR: u8 = 0x20;
/// COM inversion flag embedded in command words.
pub const VCOM_BIT: u8 = 0x40;

/// Packet size for a one-line write command.
///
/// Layout:
/// - 1 byte mode
/// - 1 byte gate address
/// - 66 bytes pixel payload
/// - 2 bytes transfer dummy
pub const WRITE_LINE_PACKET_SIZE: usize = 1 + 1 + LINE_BYTES + 2;

/// Packet size for all-clear.
///
/// Layout:
/// - 1 byte mode
/// - 16 dummy clocks (sent as 2 bytes)
pub const CLEAR_PACKET_SIZE: usize = 3;

#[inline]
const fn mode_byte(command: u8, vcom_high: bool) -> u8 {
    command | if vcom_high { VCOM_BIT } else { 0x00 }
}

/// Builds a wire address byte (`AG0..AG7`) for line 1..=176.
///
/// Unlike the Sharp panels, the JDI gate address is plain binary.
/// Returns `None` for invalid line numbers.
#[inline]
pub fn encode_line_address(line: u16) -> Option<u8> {
    if !(1..=HEIGHT as u16).contains(&line) {
        return None;
    }

    Some(line as u8)
}

/// Builds the all-clear command packet.
#[inline]
pub fn build_clear_packet(vcom_high: bool) -> [u8; CLEAR_PACKET_SIZE] {
    [mode_byte(CMD_ALL_CLEAR, vcom_high), 0x00, 0x00]
}

/// Builds a one-line update command packet.
///
/// Returns `None` when `line` is out of range.
#[inline]
pub fn build_write_line_packet(
    line: u16,
    line_data: &[u8; LINE_BYTES],
    vcom_high: bool,
) -> Option<[u8; WRITE_LINE_PACKET_SIZE]> {
    let address = encode_line_address(line)?;

    let mut packet = [0u8; WRITE_LINE_PACKET_SIZE];
    packet[0] = mode_byte(CMD_UPDATE_3BIT, vcom_high);
    packet[1] = address;
    packet[2..2 + LINE_BYTES].copy_from_slice(line_data);

    Some(packet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_bits_match_expected_bytes() {
        assert_eq!(
            build_write_line_packet(1, &[0; LINE_BYTES], false).unwrap()[0],
            0x80
        );
        assert_eq!(
            build_write_line_packet(1, &[0; LINE_BYTES], true).unwrap()[0],
            0xC0
        );
        assert_eq!(build_clear_packet(false)[0], 0x20);
        assert_eq!(build_clear_packet(true)[0], 0x60);
    }

    #[test]
    fn line_address_is_plain_binary() {
        assert_eq!(encode_line_address(1), Some(1));
        assert_eq!(encode_line_address(88), Some(88));
        assert_eq!(encode_line_address(176), Some(176));
    }

    #[test]
    fn invalid_line_is_rejected() {
        assert_eq!(encode_line_address(0), None);
        assert_eq!(encode_line_address(177), None);
    }

    #[test]
    fn write_line_packet_shape_is_fixed() {
        let mut data = [0u8; LINE_BYTES];
        data[0] = 0xAA;
        data[LINE_BYTES - 1] = 0x55;

        let packet = build_write_line_packet(10, &data, false).unwrap();
        assert_eq!(packet.len(), WRITE_LINE_PACKET_SIZE);
        assert_eq!(packet[0], 0x80);
        assert_eq!(packet[1], 10);
        assert_eq!(packet[2], 0xAA);
        assert_eq!(packet[2 + LINE_BYTES - 1], 0x55);
        assert_eq!(packet[WRITE_LINE_PACKET_SIZE - 2], 0x00);
        assert_eq!(packet[WRITE_LINE_PACKET_SIZE - 1], 0x00);
    }
}
