impl<ES> FaceApp<ES>
where
    ES: EventSource,
{
    /// Hands a borrowed view of the current face to the renderer.
    pub fn with_face<F>(&self, f: F)
    where
        F: FnOnce(FaceView<'_>),
    {
        f(FaceView {
            time: &self.time_text,
            date: &self.date_text,
            city: &self.weather.city,
            temperature: &self.weather.temperature,
            condition: &self.weather.condition,
            sun_window: &self.weather.sun_window,
            link_glyph: if self.link_connected {
                LINK_OK_GLYPH
            } else {
                LINK_LOST_GLYPH
            },
            battery: self.battery,
        });
    }
}
