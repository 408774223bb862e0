use super::radar::RADAR_INTERVAL;
use super::state::{App, NOTICE_TTL, REFRESH_MIN_SPIN};

// Implementation block for tick-related logic in the App.
impl App {
    /// Called on every tick of the application loop.
    ///
    /// Drains completed backend events, keeps the radar poll schedule, and
    /// expires transient UI state (notifications, the refresh spinner).
    pub fn on_tick(&mut self) {
        while let Some(event) = self.api.poll_event() {
            self.apply_backend_event(event);
        }

        // First cycle fires immediately; afterwards every RADAR_INTERVAL.
        // Overlap with a slow predecessor is allowed.
        let radar_due = self
            .last_radar_poll
            .map(|last| last.elapsed() >= RADAR_INTERVAL)
            .unwrap_or(true);
        if radar_due {
            self.poll_radar_now();
        }

        if let Some(notice) = self.notice.as_ref() {
            if notice.shown_at.elapsed() >= NOTICE_TTL {
                self.notice = None;
            }
        }

        if let Some(started) = self.refresh_started {
            if !self.endpoint_loading && started.elapsed() >= REFRESH_MIN_SPIN {
                self.refresh_started = None;
            }
        }
    }
}
