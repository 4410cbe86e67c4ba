use embedded_graphics::{
    Drawable,
    geometry::{Point, Size},
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X13_BOLD},
    },
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    text::{Alignment, Text},
};
use horizon_core::{
    battery::{self, GaugeLevel},
    render::FaceView,
};
use lpm013m126::{FrameBuffer, Rgb111, protocol::WIDTH};
use profont::PROFONT_24_POINT;

const FACE_W: i32 = WIDTH as i32;
const CENTER_X: i32 = FACE_W / 2;

const HEADER_BASELINE_Y: i32 = 13;
const GLYPH_RIGHT_X: i32 = FACE_W - 4;

const GAUGE_Y: i32 = 23;
const GAUGE_H: u32 = 3;

const BAND_Y: i32 = 27;
const BAND_H: u32 = 43;

const TIME_BASELINE_Y: i32 = 59;
const DATE_BASELINE_Y: i32 = 86;
const TEMP_BASELINE_Y: i32 = 122;
const COND_BASELINE_Y: i32 = 146;
const SUN_BASELINE_Y: i32 = 168;

/// Paints one full face frame.
///
/// Every call redraws from scratch; the caller owns flushing to the panel.
pub fn draw_face(view: &FaceView<'_>, frame: &mut FrameBuffer) {
    frame.clear(Rgb111::BLACK);

    let small = MonoTextStyle::new(&FONT_6X10, Rgb111::WHITE);
    let small_bold = MonoTextStyle::new(&FONT_7X13_BOLD, Rgb111::WHITE);
    let large = MonoTextStyle::new(&PROFONT_24_POINT, Rgb111::WHITE);
    let large_on_band = MonoTextStyle::new(&PROFONT_24_POINT, Rgb111::BLACK);

    // Decorative band behind the time.
    Rectangle::new(Point::new(0, BAND_Y), Size::new(WIDTH as u32, BAND_H))
        .into_styled(PrimitiveStyle::with_fill(Rgb111::WHITE))
        .draw(frame)
        .unwrap();

    draw_battery_gauge(view, frame);

    Text::with_alignment(
        view.city,
        Point::new(CENTER_X, HEADER_BASELINE_Y),
        small,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.link_glyph,
        Point::new(GLYPH_RIGHT_X, HEADER_BASELINE_Y),
        small,
        Alignment::Right,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.time,
        Point::new(CENTER_X, TIME_BASELINE_Y),
        large_on_band,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.date,
        Point::new(CENTER_X, DATE_BASELINE_Y),
        small,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.temperature,
        Point::new(CENTER_X, TEMP_BASELINE_Y),
        large,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.condition,
        Point::new(CENTER_X, COND_BASELINE_Y),
        small_bold,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();

    Text::with_alignment(
        view.sun_window,
        Point::new(CENTER_X, SUN_BASELINE_Y),
        small,
        Alignment::Center,
    )
    .draw(frame)
    .unwrap();
}

fn draw_battery_gauge(view: &FaceView<'_>, frame: &mut FrameBuffer) {
    // Background track across the full width.
    Rectangle::new(Point::new(0, GAUGE_Y), Size::new(WIDTH as u32, GAUGE_H))
        .into_styled(PrimitiveStyle::with_fill(Rgb111::BLUE))
        .draw(frame)
        .unwrap();

    let (overlay_width, level) = battery::gauge_overlay(WIDTH as u32, view.battery);
    if overlay_width == 0 {
        return;
    }

    let color = match level {
        GaugeLevel::Normal => Rgb111::GREEN,
        GaugeLevel::Low => Rgb111::RED,
        GaugeLevel::Charging => Rgb111::YELLOW,
    };

    Rectangle::new(Point::new(0, GAUGE_Y), Size::new(overlay_width, GAUGE_H))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(frame)
        .unwrap();
}
