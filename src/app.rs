use std::time::{Duration, Instant};

use log::debug;

use crate::background::{BackgroundId, LoopingVideoPlayer};
use crate::config::ClockConfig;
use crate::display::{ClockFace, DisplayTarget, DisplayUpdater};
use crate::error::ClockError;
use crate::fullscreen::{FullscreenHost, FullscreenInactivityTracker};
use crate::menu::{MenuView, SelectionState, StyleId, ViewStateController};
use crate::region::{RegionId, RegionSelector};
use crate::settings::ClockSettings;
use crate::time_format::HourFormat;
use crate::time_source::TimeSource;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Fixed-period tick schedule. Late ticks are coalesced rather than replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_tick: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_tick: now + period,
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        while self.next_tick <= now {
            self.next_tick += self.period;
        }
        true
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }
}

/// All session state of the clock. Every user action goes through one of
/// these methods; settings changes re-render before returning.
pub struct ClockApp {
    source: Box<dyn TimeSource>,
    settings: ClockSettings,
    regions: RegionSelector,
    updater: DisplayUpdater,
    face: ClockFace,
    view: ViewStateController,
    video: LoopingVideoPlayer,
    fullscreen: FullscreenInactivityTracker,
    style_tag: &'static str,
}

impl ClockApp {
    pub fn new(config: &ClockConfig, source: Box<dyn TimeSource>) -> Self {
        let settings = ClockSettings {
            region: config.region.clone(),
            hour_format: config.hour_format,
            dark_mode: config.dark_mode,
        };
        let mut app = Self {
            source,
            regions: RegionSelector::new(config.region.clone()),
            settings,
            updater: DisplayUpdater::new(),
            face: ClockFace::default(),
            view: ViewStateController::new(SelectionState {
                active_style: config.style,
                active_background: BackgroundId::Gradient,
            }),
            video: LoopingVideoPlayer::ready(),
            fullscreen: FullscreenInactivityTracker::new(config.controls_idle),
            style_tag: config.style.tag(),
        };
        app.select_background(config.background);
        app.refresh();
        app
    }

    pub fn tick(&mut self) {
        self.refresh();
    }

    /// Renders into an arbitrary target with the current settings.
    pub fn render_into(&mut self, target: &mut dyn DisplayTarget) -> Result<(), ClockError> {
        let now = self.source.now();
        self.updater.refresh(target, &now, &self.settings)
    }

    fn refresh(&mut self) {
        let now = self.source.now();
        if let Err(err) = self.updater.refresh(&mut self.face, &now, &self.settings) {
            // Already warned by the updater; the face keeps its last frame.
            debug!("refresh skipped: {err}");
        }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn has_rendered(&self) -> bool {
        self.updater.last_good().is_some()
    }

    pub fn is_live(&self) -> bool {
        self.source.is_live()
    }

    pub fn regions(&self) -> &RegionSelector {
        &self.regions
    }

    pub fn region_label(&self) -> &str {
        self.regions.label()
    }

    pub fn set_region(&mut self, id: RegionId) -> String {
        let label = self.regions.set_region(id.clone()).to_string();
        self.settings.region = id;
        self.refresh();
        label
    }

    pub fn set_hour_format(&mut self, hour_format: HourFormat) {
        if self.settings.hour_format != hour_format {
            self.settings.hour_format = hour_format;
            self.refresh();
        }
    }

    pub fn toggle_hour_format(&mut self) {
        self.set_hour_format(self.settings.hour_format.toggled());
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        debug!("dark mode {}", self.settings.dark_mode);
        self.refresh();
    }

    pub fn view(&self) -> &ViewStateController {
        &self.view
    }

    pub fn toggle_menu(&mut self) {
        self.view.toggle_menu();
    }

    pub fn open_menu(&mut self) {
        self.view.open_menu();
    }

    pub fn close_menu(&mut self) {
        self.view.close_menu();
    }

    pub fn navigate(&mut self, target: MenuView) {
        self.view.navigate(target);
    }

    pub fn back(&mut self, target: MenuView) {
        self.view.back(target);
    }

    pub fn click_overlay(&mut self, inside_content: bool) {
        self.view.click_overlay(inside_content);
    }

    pub fn style_tag(&self) -> &'static str {
        self.style_tag
    }

    pub fn select_style(&mut self, style: StyleId) {
        self.style_tag = self.view.select_style(style);
    }

    pub fn select_background(&mut self, background: BackgroundId) {
        self.view.select_background(background, &mut self.video);
    }

    pub fn video(&self) -> &LoopingVideoPlayer {
        &self.video
    }

    pub fn video_ended(&mut self) {
        self.video.on_ended();
    }

    pub fn fullscreen(&self) -> &FullscreenInactivityTracker {
        &self.fullscreen
    }

    pub fn request_fullscreen_toggle(&mut self, host: &mut dyn FullscreenHost) {
        self.fullscreen.request_toggle(host);
    }

    pub fn fullscreen_changed(&mut self, is_fullscreen: bool, now: Instant) {
        self.fullscreen.on_fullscreen_changed(is_fullscreen, now);
    }

    pub fn user_activity(&mut self, now: Instant) {
        self.fullscreen.activity(now);
    }

    pub fn poll_inactivity(&mut self, now: Instant) -> bool {
        self.fullscreen.poll(now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::background::BackgroundVideo;
    use crate::display::LineTarget;
    use crate::time_source::FixedTimeSource;

    fn fixed_app(config: ClockConfig) -> ClockApp {
        let instant = Utc
            .with_ymd_and_hms(2026, 1, 5, 3, 35, 3)
            .single()
            .expect("valid");
        ClockApp::new(&config, Box::new(FixedTimeSource::new(instant)))
    }

    #[test]
    fn renders_immediately_on_construction() {
        let app = fixed_app(ClockConfig::default());
        assert!(app.has_rendered());
        assert_eq!(app.face().time.hour, "09");
        assert_eq!(app.region_label(), "India Standard Time");
    }

    #[test]
    fn format_toggle_re_renders_synchronously() {
        let mut app = fixed_app(ClockConfig::default());
        assert_eq!(app.face().time.meridiem.as_deref(), Some("AM"));
        app.toggle_hour_format();
        assert_eq!(app.settings().hour_format, HourFormat::Hour24);
        assert_eq!(app.face().time.meridiem, None);
    }

    #[test]
    fn region_change_re_renders_and_relabels() {
        let mut app = fixed_app(ClockConfig::default());
        let label = app.set_region(RegionId::new("Europe/London"));
        assert_eq!(label, "London (GMT)");
        assert_eq!(app.face().time.hour, "03");
        assert_eq!(app.face().time.minute, "35");
    }

    #[test]
    fn bad_region_keeps_previous_frame() {
        let mut app = fixed_app(ClockConfig::default());
        app.set_region(RegionId::new("Nowhere/Special"));
        assert_eq!(app.face().time.hour, "09");
        assert_eq!(app.region_label(), "Nowhere/Special");

        let mut line = LineTarget::default();
        assert!(app.render_into(&mut line).is_err());
        assert!(line.time_line.is_empty());
    }

    #[test]
    fn configured_background_starts_playing() {
        let app = fixed_app(ClockConfig {
            background: BackgroundId::Forest,
            style: StyleId::Retro,
            ..ClockConfig::default()
        });
        assert_eq!(app.video().current(), Some("hMxlDbv-rec"));
        assert_eq!(app.style_tag(), "style-retro");
        assert!(app.view().is_background_active(BackgroundId::Forest));
    }

    #[test]
    fn menu_and_selection_round() {
        let mut app = fixed_app(ClockConfig::default());
        app.open_menu();
        app.navigate(MenuView::Styles);
        app.select_style(StyleId::Elegant);
        app.back(MenuView::Main);
        app.navigate(MenuView::Backgrounds);
        app.select_background(BackgroundId::London);
        app.click_overlay(false);

        assert!(!app.view().is_open());
        assert_eq!(app.style_tag(), "style-elegant");
        assert_eq!(app.video().current(), Some("sXJLT3kYdhk"));

        app.open_menu();
        assert_eq!(app.view().visible_view(), Some(MenuView::Main));
    }

    #[test]
    fn menu_button_toggles_open_and_closed() {
        let mut app = fixed_app(ClockConfig::default());
        app.toggle_menu();
        assert_eq!(app.view().visible_view(), Some(MenuView::Main));
        app.navigate(MenuView::Backgrounds);
        app.toggle_menu();
        assert!(!app.view().is_open());
        app.toggle_menu();
        assert_eq!(app.view().visible_view(), Some(MenuView::Main));
    }

    #[test]
    fn ticker_coalesces_missed_ticks() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK_PERIOD, start);
        assert!(!ticker.due(start + Duration::from_millis(999)));
        assert!(ticker.due(start + Duration::from_millis(3_500)));
        assert!(!ticker.due(start + Duration::from_millis(3_600)));
        assert_eq!(
            ticker.until_next(start + Duration::from_millis(3_600)),
            Duration::from_millis(400)
        );
    }
}
