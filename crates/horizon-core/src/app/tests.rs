use super::*;
use std::string::String;
use crate::{
    battery::BatteryReading,
    clock::TickTime,
    events::{EventSource, HostEvent, mock::MockEvents},
    haptics,
    message::{TEXT_BYTES, WeatherUpdate},
};

struct ScriptedEvents<'a> {
    events: &'a [HostEvent],
    cursor: usize,
}

impl<'a> ScriptedEvents<'a> {
    const fn new(events: &'a [HostEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl EventSource for ScriptedEvents<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<HostEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).cloned() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

#[derive(Debug)]
struct FaceSnapshot {
    time: String,
    date: String,
    city: String,
    temperature: String,
    condition: String,
    sun_window: String,
    link_glyph: String,
    battery: BatteryReading,
}

fn snapshot<ES: EventSource>(app: &FaceApp<ES>) -> FaceSnapshot {
    let mut taken = None;
    app.with_face(|face| {
        taken = Some(FaceSnapshot {
            time: face.time.into(),
            date: face.date.into(),
            city: face.city.into(),
            temperature: face.temperature.into(),
            condition: face.condition.into(),
            sun_window: face.sun_window.into(),
            link_glyph: face.link_glyph.into(),
            battery: face.battery,
        });
    });
    taken.unwrap()
}

fn tick_at(hour: u8, minute: u8) -> HostEvent {
    HostEvent::Tick(TickTime {
        hour,
        minute,
        day: 24,
        month: 9,
        weekday: 0,
    })
}

fn field(text: &str) -> Option<heapless::String<TEXT_BYTES>> {
    let mut value = heapless::String::new();
    value.push_str(text).unwrap();
    Some(value)
}

fn marker() -> Option<heapless::String<4>> {
    let mut value = heapless::String::new();
    value.push_str("1").unwrap();
    Some(value)
}

fn ticked(events: &[HostEvent]) -> (FaceApp<ScriptedEvents<'_>>, TickResult) {
    let mut app = FaceApp::new(ScriptedEvents::new(events), FaceConfig::default());
    let result = app.tick();
    (app, result)
}

#[test]
fn first_tick_renders_then_settles() {
    let mut app = FaceApp::new(MockEvents::new(), FaceConfig::default());
    assert_eq!(app.tick(), TickResult::RenderRequested);
    assert_eq!(app.tick(), TickResult::NoRender);
    assert_eq!(app.pop_command(), None);
}

#[test]
fn minute_tick_formats_time_and_date() {
    let events = [tick_at(9, 5)];
    let (app, result) = ticked(&events);

    assert_eq!(result, TickResult::RenderRequested);
    let face = snapshot(&app);
    assert_eq!(face.time, "09:05");
    assert_eq!(face.date, "Sun, 24 September");
}

#[test]
fn mid_hour_tick_issues_no_commands() {
    let events = [tick_at(9, 30)];
    let (mut app, _) = ticked(&events);
    assert_eq!(app.pop_command(), None);
}

#[test]
fn top_of_hour_after_eight_requests_weather_and_chimes() {
    let events = [tick_at(9, 0)];
    let (mut app, _) = ticked(&events);

    assert_eq!(app.pop_command(), Some(Command::RequestWeather));
    assert_eq!(
        app.pop_command(),
        Some(Command::Vibrate(haptics::HOURLY_CHIME))
    );
    assert_eq!(app.pop_command(), None);
}

#[test]
fn top_of_hour_at_eight_skips_the_chime() {
    let events = [tick_at(8, 0)];
    let (mut app, _) = ticked(&events);

    assert_eq!(app.pop_command(), Some(Command::RequestWeather));
    assert_eq!(app.pop_command(), None);
}

#[test]
fn placeholders_show_before_first_reply() {
    let (app, _) = ticked(&[]);
    let face = snapshot(&app);

    assert_eq!(face.city, "Loading...");
    assert_eq!(face.temperature, "0.0");
    assert_eq!(face.condition, "Not good");
    assert_eq!(face.sun_window, "unavailable");
}

#[test]
fn full_reply_updates_exactly_the_weather_fields() {
    let events = [
        tick_at(10, 15),
        HostEvent::Weather(WeatherUpdate {
            reply: marker(),
            temperature: field("21"),
            condition: field("Clear"),
            city: field("Springfield"),
            sun_window: field("06:00-18:00"),
        }),
    ];
    let (app, result) = ticked(&events);

    assert_eq!(result, TickResult::RenderRequested);
    let face = snapshot(&app);
    assert_eq!(face.temperature, "21");
    assert_eq!(face.condition, "Clear");
    assert_eq!(face.city, "Springfield");
    assert_eq!(face.sun_window, "06:00-18:00");

    // Nothing outside the weather block moved.
    assert_eq!(face.time, "10:15");
    assert_eq!(face.date, "Sun, 24 September");
    assert_eq!(face.link_glyph, "X");
    assert_eq!(face.battery, BatteryReading::default());
}

#[test]
fn partial_reply_touches_only_present_fields() {
    let events = [
        HostEvent::Weather(WeatherUpdate {
            reply: marker(),
            temperature: field("21"),
            condition: field("Clear"),
            city: field("Springfield"),
            sun_window: field("06:00-18:00"),
        }),
        HostEvent::Weather(WeatherUpdate {
            reply: marker(),
            temperature: field("-3"),
            ..WeatherUpdate::default()
        }),
    ];
    let (app, _) = ticked(&events);

    let face = snapshot(&app);
    assert_eq!(face.temperature, "-3");
    assert_eq!(face.condition, "Clear");
    assert_eq!(face.city, "Springfield");
    assert_eq!(face.sun_window, "06:00-18:00");
}

#[test]
fn reply_without_marker_is_ignored() {
    let events = [HostEvent::Weather(WeatherUpdate {
        reply: None,
        temperature: field("99"),
        ..WeatherUpdate::default()
    })];
    let (app, _) = ticked(&events);

    assert_eq!(snapshot(&app).temperature, "0.0");
}

#[test]
fn link_transitions_update_glyph_and_patterns() {
    let events = [HostEvent::Link(true)];
    let (mut app, _) = ticked(&events);

    assert_eq!(snapshot(&app).link_glyph, "");
    assert_eq!(
        app.pop_command(),
        Some(Command::Vibrate(haptics::LINK_CONNECT))
    );

    let events = [HostEvent::Link(true), HostEvent::Link(false)];
    let (mut app, _) = ticked(&events);

    assert_eq!(snapshot(&app).link_glyph, "X");
    let _ = app.pop_command();
    assert_eq!(
        app.pop_command(),
        Some(Command::Vibrate(haptics::LINK_DISCONNECT))
    );
}

#[test]
fn battery_event_replaces_the_reading() {
    let reading = BatteryReading {
        percent: 64,
        charging: true,
    };
    let events = [HostEvent::Battery(reading)];
    let (app, result) = ticked(&events);

    assert_eq!(result, TickResult::RenderRequested);
    assert_eq!(snapshot(&app).battery, reading);
}
