impl<ES> FaceApp<ES>
where
    ES: EventSource,
{
    fn process_events(&mut self) {
        loop {
            match self.events.poll_event() {
                Ok(Some(event)) => self.apply_event(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("event source poll failed; retrying next tick");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Tick(time) => self.apply_tick(time),
            HostEvent::Battery(reading) => self.apply_battery(reading),
            HostEvent::Link(connected) => self.apply_link(connected),
            HostEvent::Weather(update) => self.apply_weather(update),
        }
    }

    fn apply_tick(&mut self, time: TickTime) {
        self.time_text = time.clock_text();
        self.date_text = time.date_text();
        self.pending_redraw = true;

        if time.minute == 0 {
            self.request_weather();

            if time.hour > self.config.chime_after_hour {
                self.push_command(Command::Vibrate(haptics::HOURLY_CHIME));
            }
        }
    }

    fn apply_battery(&mut self, reading: BatteryReading) {
        self.battery = reading;
        self.pending_redraw = true;
    }

    fn apply_link(&mut self, connected: bool) {
        info!(
            "companion link {}",
            if connected { "up" } else { "down" }
        );

        self.link_connected = connected;
        self.push_command(Command::Vibrate(if connected {
            haptics::LINK_CONNECT
        } else {
            haptics::LINK_DISCONNECT
        }));
        self.pending_redraw = true;
    }

    fn apply_weather(&mut self, update: WeatherUpdate) {
        if !update.has_reply_marker() {
            debug!("inbound message without reply marker; ignored");
            return;
        }

        if self.weather.apply(&update) {
            self.pending_redraw = true;
        }
    }
}
