#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use core::net::Ipv4Addr;

use chrono::{DateTime, Datelike, Timelike};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_net::{
    IpAddress, IpEndpoint, Stack,
    udp::{PacketMetadata, UdpSocket},
};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration as EmbassyDuration, Instant, Ticker, Timer, WithTimeout};
use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    peripherals::{ADC1, GPIO4},
    spi::master::Spi,
    time::Rate,
    timer::timg::TimerGroup,
};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController};
use horizon_core::{
    app::{Command, FaceApp, FaceConfig, TickResult},
    clock::TickTime,
    events::{EventSource, HostEvent},
    haptics::HapticPattern,
};
use horizon_hal_esp32s3::{
    battery::{BatteryTracker, millivolts_from_raw},
    companion::{LinkHandle, codec},
    haptics::VibrationMotor,
    platform::display::JdiDisplay,
    render,
};
use log::{LevelFilter, error, info, warn};
use lpm013m126::FrameBuffer;
use static_cell::StaticCell;

// Build-time UTC epoch; wall time is epoch + uptime.
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE_OFFSET_SECS: i64 = 1 * 3_600;

const TITLE: &str = "Horizon";
const DISPLAY_SPI_HZ: u32 = 2_000_000;
const UI_POLL_MS: u64 = 20;
const BATTERY_POLL_SECS: u64 = 5;

/// Grace period before the first weather request; a heuristic wait for the
/// companion to come up, not a handshake.
const STARTUP_WEATHER_DELAY_MS: u64 = 3_000;

// Fixed message queue capacities, configured once at startup.
const INBOX_BYTES: usize = 2_026;
const OUTBOX_BYTES: usize = 656;

const LOCAL_PORT: u16 = 9_015;
const COMPANION_PORT: u16 = 9_016;
const COMPANION_ADDR_STR: &str = match option_env!("HORIZON_COMPANION_ADDR") {
    Some(addr) => addr,
    None => "192.168.4.2",
};

const WIFI_RETRY_BACKOFF_MIN_SECS: u64 = 2;
const WIFI_RETRY_BACKOFF_MAX_SECS: u64 = 120;
const NETWORK_POLL_INTERVAL_MS: u64 = 500;
const DHCP_TIMEOUT_SECS: u64 = 15;

const WIFI_SSID: &str = env!(
    "HORIZON_WIFI_SSID",
    "Set HORIZON_WIFI_SSID in your environment before building/flashing."
);
const WIFI_PASSWORD: &str = env!(
    "HORIZON_WIFI_PASSWORD",
    "Set HORIZON_WIFI_PASSWORD in your environment before building/flashing."
);

static LINK: LinkHandle = LinkHandle::new();
static EVENTS: Channel<CriticalSectionRawMutex, HostEvent, 16> = Channel::new();
static HAPTICS: Channel<CriticalSectionRawMutex, HapticPattern, 4> = Channel::new();
static REQUEST_WEATHER: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static NET_RESOURCES: StaticCell<embassy_net::StackResources<4>> = StaticCell::new();

/// Feeds the app from the shared event channel, one event per poll.
struct ChannelEvents;

impl EventSource for ChannelEvents {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<HostEvent>, Self::Error> {
        Ok(EVENTS.try_receive().ok())
    }
}

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

fn wifi_retry_backoff_secs(consecutive_failures: u32) -> u64 {
    // 2, 4, 8, 16, 32, 64, 120, 120, ...
    let shift = consecutive_failures.min(6);
    WIFI_RETRY_BACKOFF_MIN_SECS
        .saturating_mul(1u64 << shift)
        .min(WIFI_RETRY_BACKOFF_MAX_SECS)
}

async fn wait_before_wifi_retry(consecutive_failures: &mut u32) {
    let delay_secs = wifi_retry_backoff_secs(*consecutive_failures);
    *consecutive_failures = consecutive_failures.saturating_add(1);
    info!(
        "wifi retrying in {}s (consecutive_failures={})",
        delay_secs, *consecutive_failures
    );
    Timer::after_secs(delay_secs).await;
}

async fn wifi_connection_loop(
    wifi_controller: &mut WifiController<'_>,
    stack: Stack<'_>,
    link: &'static LinkHandle,
) -> ! {
    let mut consecutive_failures = 0u32;

    loop {
        link.mark_connecting();

        if !wifi_controller.is_started().unwrap_or(false) {
            if let Err(err) = wifi_controller.start_async().await {
                info!("wifi start failed: {:?}", err);
                link.mark_disconnected();
                wait_before_wifi_retry(&mut consecutive_failures).await;
                continue;
            }
        }

        if let Err(err) = wifi_controller.connect_async().await {
            info!("wifi connect failed: {:?}", err);
            link.mark_disconnected();
            let _ = wifi_controller.disconnect_async().await;
            wait_before_wifi_retry(&mut consecutive_failures).await;
            continue;
        }

        match stack
            .wait_config_up()
            .with_timeout(EmbassyDuration::from_secs(DHCP_TIMEOUT_SECS))
            .await
        {
            Ok(()) => {
                link.mark_connected();
                info!("wifi connected and dhcp ready");
            }
            Err(_) => {
                info!("dhcp timeout; forcing reconnect");
                let _ = wifi_controller.disconnect_async().await;
                wait_before_wifi_retry(&mut consecutive_failures).await;
                continue;
            }
        }

        consecutive_failures = 0;

        loop {
            let link_up = stack.is_link_up();
            let has_ipv4 = stack.config_v4().is_some();
            let is_connected = matches!(wifi_controller.is_connected(), Ok(true));

            if !(link_up && has_ipv4 && is_connected) {
                info!(
                    "wifi state lost (link_up={} has_ipv4={} connected={}); reconnecting",
                    link_up, has_ipv4, is_connected
                );
                break;
            }

            Timer::after_millis(NETWORK_POLL_INTERVAL_MS).await;
        }

        link.mark_disconnected();
        let _ = wifi_controller.disconnect_async().await;
        wait_before_wifi_retry(&mut consecutive_failures).await;
    }
}

/// Fire-and-forget outbound request: failure is logged and abandoned.
async fn send_weather_request(socket: &mut UdpSocket<'_>, target: IpEndpoint) {
    let Some(payload) = codec::encode_weather_request() else {
        return;
    };

    match socket.send_to(&payload, target).await {
        Ok(()) => info!("weather request sent"),
        Err(err) => error!("failed to send weather request: {:?}", err),
    }
}

/// Owns the companion socket: issues the startup-delayed first request, then
/// serves inbound replies and outbound request signals.
async fn companion_exchange_loop(stack: Stack<'_>, target: IpEndpoint) -> ! {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; INBOX_BYTES];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; OUTBOX_BYTES];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    if let Err(err) = socket.bind(LOCAL_PORT) {
        error!("companion socket bind failed: {:?}", err);
        loop {
            Timer::after_secs(1).await;
        }
    }

    Timer::after_millis(STARTUP_WEATHER_DELAY_MS).await;
    send_weather_request(&mut socket, target).await;

    let mut inbound = [0u8; INBOX_BYTES];
    loop {
        // Bind before matching so the receive future releases the socket.
        let outcome = select(socket.recv_from(&mut inbound), REQUEST_WEATHER.wait()).await;
        match outcome {
            Either::First(Ok((len, _peer))) => {
                if let Some(update) = codec::decode_inbound(&inbound[..len])
                    && EVENTS.try_send(HostEvent::Weather(update)).is_err()
                {
                    warn!("event queue full; weather reply dropped");
                }
            }
            Either::First(Err(err)) => warn!("inbound receive failed: {:?}", err),
            Either::Second(()) => send_weather_request(&mut socket, target).await,
        }
    }
}

async fn battery_watch_loop(
    mut adc: Adc<'static, ADC1<'static>, Blocking>,
    mut vbat: AdcPin<GPIO4<'static>, ADC1<'static>>,
    charge_pin: Input<'static>,
) -> ! {
    let mut tracker = BatteryTracker::new();

    loop {
        match nb::block!(adc.read_oneshot(&mut vbat)) {
            Ok(raw) => {
                // Charge indication is active low.
                let charging = charge_pin.is_low();
                if let Some(reading) = tracker.update(millivolts_from_raw(raw), charging) {
                    info!(
                        "battery now {}% ({})",
                        reading.percent,
                        if reading.charging {
                            "charging"
                        } else {
                            "discharging"
                        }
                    );
                    if EVENTS.try_send(HostEvent::Battery(reading)).is_err() {
                        warn!("event queue full; battery update dropped");
                    }
                }
            }
            Err(_) => warn!("battery sample failed"),
        }

        Timer::after_secs(BATTERY_POLL_SECS).await;
    }
}

/// Emits one tick per wall-clock minute, plus one immediately at boot so the
/// face never shows an empty time.
async fn minute_tick_loop() -> ! {
    let mut ticker = Ticker::every(EmbassyDuration::from_secs(1));
    let mut last_minute = None;

    loop {
        let now_secs = UTC_EPOCH + TIMEZONE_OFFSET_SECS + Instant::now().as_secs() as i64;
        if let Some(stamp) = DateTime::from_timestamp(now_secs, 0) {
            let now = stamp.naive_utc();
            let minute_of_day = (now.hour(), now.minute());

            if last_minute != Some(minute_of_day) {
                last_minute = Some(minute_of_day);

                let tick = TickTime {
                    hour: now.hour() as u8,
                    minute: now.minute() as u8,
                    day: now.day() as u8,
                    month: now.month() as u8,
                    weekday: now.weekday().num_days_from_sunday() as u8,
                };
                if EVENTS.try_send(HostEvent::Tick(tick)).is_err() {
                    warn!("event queue full; minute tick dropped");
                }
            }
        }

        ticker.next().await;
    }
}

async fn haptics_loop(mut motor: VibrationMotor<'static>) -> ! {
    loop {
        let pattern = HAPTICS.receive().await;
        motor.play(pattern).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: {} starting", TITLE);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // esp-radio requires an allocator.
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Display wiring used by this board:
    // SCLK=GPIO12, MOSI=GPIO11, SCS=GPIO10, DISP=GPIO9
    let disp = Output::new(peripherals.GPIO9, Level::Low, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO10, Level::Low, OutputConfig::default());

    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // LPM013M126 latches on the rising edge of SCLK idle-low.
        .with_mode(esp_hal::spi::Mode::_0);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);

    let mut delay = Delay::new();

    let mut display = JdiDisplay::new(spi, disp, cs);
    let mut display_fault_logged = false;
    if let Err(err) = display.initialize(&mut delay) {
        info!("display initialize failed: {:?}", err);
        display_fault_logged = true;
    }
    if let Err(err) = display.clear_all(&mut delay) {
        info!("display clear failed: {:?}", err);
        display_fault_logged = true;
    }

    // Vibration motor wiring: GPIO18, high = on.
    let motor = VibrationMotor::new(Output::new(
        peripherals.GPIO18,
        Level::Low,
        OutputConfig::default(),
    ));

    // Battery sense: VBAT/2 divider on GPIO4, charge-stat (active low) on GPIO5.
    let mut adc_config = AdcConfig::new();
    let vbat_pin = adc_config.enable_pin(peripherals.GPIO4, Attenuation::_11dB);
    let adc = Adc::new(peripherals.ADC1, adc_config);
    let charge_pin = Input::new(
        peripherals.GPIO5,
        InputConfig::default().with_pull(Pull::Up),
    );

    let radio = match esp_radio::init() {
        Ok(radio) => radio,
        Err(err) => {
            info!("esp-radio init failed: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let (mut wifi_controller, interfaces) =
        match esp_radio::wifi::new(&radio, peripherals.WIFI, esp_radio::wifi::Config::default()) {
            Ok(parts) => parts,
            Err(err) => {
                info!("wifi peripheral init failed: {:?}", err);
                loop {
                    Timer::after_secs(1).await;
                }
            }
        };

    let client_config = ClientConfig::default()
        .with_ssid(WIFI_SSID.into())
        .with_password(WIFI_PASSWORD.into());
    let wifi_mode = ModeConfig::Client(client_config);
    if let Err(err) = wifi_controller.set_config(&wifi_mode) {
        info!("wifi mode config failed: {:?}", err);
        loop {
            Timer::after_secs(1).await;
        }
    }

    let stack_config = embassy_net::Config::dhcpv4(Default::default());
    let (stack, mut net_runner) = embassy_net::new(
        interfaces.sta,
        stack_config,
        NET_RESOURCES.init(embassy_net::StackResources::<4>::new()),
        0x48_0F_2A_91_C6_5D_33_07,
    );

    let companion_addr: Ipv4Addr = COMPANION_ADDR_STR.parse().unwrap_or_else(|_| {
        warn!("unparsable companion address {:?}; using default", COMPANION_ADDR_STR);
        Ipv4Addr::new(192, 168, 4, 2)
    });
    let companion = IpEndpoint::new(IpAddress::Ipv4(companion_addr), COMPANION_PORT);

    info!(
        "{} started: companion={}:{} startup_delay_ms={} inbox={}B outbox={}B",
        TITLE, companion_addr, COMPANION_PORT, STARTUP_WEATHER_DELAY_MS, INBOX_BYTES, OUTBOX_BYTES
    );
    info!("Display pins: SCLK=GPIO12 MOSI=GPIO11 SCS=GPIO10 DISP=GPIO9");
    info!("Motor pin: GPIO18; battery sense: GPIO4, charge-stat: GPIO5");

    let net_future = net_runner.run();
    let wifi_future = wifi_connection_loop(&mut wifi_controller, stack, &LINK);
    let companion_future = companion_exchange_loop(stack, companion);
    let battery_future = battery_watch_loop(adc, vbat_pin, charge_pin);
    let tick_future = minute_tick_loop();
    let haptics_future = haptics_loop(motor);

    let ui_future = async {
        let mut app = FaceApp::new(ChannelEvents, FaceConfig::default());
        let mut frame = FrameBuffer::new();
        let mut last_link_revision = u32::MAX;
        let mut last_link_connected = None;

        loop {
            // Fold link transitions into the event stream exactly once each.
            let snapshot = LINK.snapshot();
            if snapshot.revision != last_link_revision {
                last_link_revision = snapshot.revision;
                let connected = snapshot.is_connected();
                if last_link_connected != Some(connected) {
                    last_link_connected = Some(connected);
                    if EVENTS.try_send(HostEvent::Link(connected)).is_err() {
                        warn!("event queue full; link transition dropped");
                    }
                }
            }

            let render_due = app.tick() == TickResult::RenderRequested;

            while let Some(command) = app.pop_command() {
                match command {
                    Command::RequestWeather => REQUEST_WEATHER.signal(()),
                    Command::Vibrate(pattern) => {
                        if HAPTICS.try_send(pattern).is_err() {
                            warn!("haptic queue full; pattern dropped");
                        }
                    }
                }
            }

            if render_due {
                app.with_face(|face| render::draw_face(&face, &mut frame));
                if let Err(err) = display.flush_frame(&frame, &mut delay) {
                    if !display_fault_logged {
                        info!("display flush failed: {:?}", err);
                        display_fault_logged = true;
                    }
                }
            }

            Timer::after_millis(UI_POLL_MS).await;
        }
    };

    let _ = embassy_futures::join::join4(
        net_future,
        wifi_future,
        embassy_futures::join::join3(companion_future, battery_future, tick_future),
        embassy_futures::join::join(haptics_future, ui_future),
    )
    .await;
    unreachable!()
}
