impl<ES> FaceApp<ES>
where
    ES: EventSource,
{
    pub fn new(events: ES, config: FaceConfig) -> Self {
        Self {
            events,
            config,
            time_text: String::new(),
            date_text: String::new(),
            weather: WeatherText::default(),
            battery: BatteryReading::default(),
            link_connected: false,
            commands: Deque::new(),
            pending_redraw: true,
        }
    }

    /// Drains pending host events and reports whether the face changed.
    pub fn tick(&mut self) -> TickResult {
        self.process_events();

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Next side effect for the board loop, FIFO order.
    pub fn pop_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    /// Queues an outbound weather request.
    pub fn request_weather(&mut self) {
        self.push_command(Command::RequestWeather);
    }

    fn push_command(&mut self, command: Command) {
        if let Err(command) = self.commands.push_back(command) {
            warn!("command queue full; dropping {:?}", command);
        }
    }
}
