use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{self, Align2, Color32, RichText, Ui};

use crate::app::{ClockApp, TICK_PERIOD, Ticker};
use crate::background::{BackgroundId, BackgroundVideo, LoopTimer};
use crate::error::ClockError;
use crate::fullscreen::FullscreenHost;
use crate::menu::{MenuView, StyleId};
use crate::region::RegionId;
use crate::ui::render::{configure_theme, paint_background, paint_clock, video_caption};

const VIDEO_LOOP_LENGTH: Duration = Duration::from_secs(24);

pub fn run_gui(clock: ClockApp) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("zoneclock")
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let dark = clock.settings().dark_mode;
    let app = ZoneClockApp::new(clock);

    eframe::run_native(
        "zoneclock",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx, dark);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch zoneclock window: {err}"))?;

    Ok(())
}

/// Viewport-backed fullscreen. The change itself arrives later through
/// `ViewportInfo::fullscreen`.
struct ViewportFullscreen<'a> {
    ctx: &'a egui::Context,
}

impl FullscreenHost for ViewportFullscreen<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen)
            .unwrap_or(false)
    }

    fn request_fullscreen(&mut self) -> Result<(), ClockError> {
        if self.ctx.input(|i| i.viewport().fullscreen).is_none() {
            return Err(ClockError::FullscreenDenied(
                "window system does not report fullscreen support".to_string(),
            ));
        }
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), ClockError> {
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Actions {
    toggle_fullscreen: bool,
    toggle_format: bool,
    toggle_dark: bool,
    open_menu: bool,
    toggle_menu: bool,
    region: Option<&'static str>,
}

struct ZoneClockApp {
    clock: ClockApp,
    ticker: Ticker,
    applied_dark: bool,
    video_loop: LoopTimer,
}

impl ZoneClockApp {
    fn new(clock: ClockApp) -> Self {
        let now = Instant::now();
        let applied_dark = clock.settings().dark_mode;
        Self {
            clock,
            ticker: Ticker::new(TICK_PERIOD, now),
            applied_dark,
            video_loop: LoopTimer::new(VIDEO_LOOP_LENGTH),
        }
    }

    fn track_input(&mut self, ctx: &egui::Context, now: Instant) {
        if let Some(is_fullscreen) = ctx.input(|i| i.viewport().fullscreen) {
            self.clock.fullscreen_changed(is_fullscreen, now);
        }

        // Activity is only listened for while the tracker is armed.
        if self.clock.fullscreen().is_tracking() {
            let active = ctx.input(|i| {
                i.pointer.is_moving()
                    || i.pointer.any_click()
                    || i.events
                        .iter()
                        .any(|event| matches!(event, egui::Event::Key { pressed: true, .. }))
            });
            if active {
                self.clock.user_activity(now);
            }
        }
        self.clock.poll_inactivity(now);
    }

    fn shortcuts(&self, ctx: &egui::Context) -> Actions {
        if self.clock.view().is_open() {
            return Actions::default();
        }
        ctx.input(|i| Actions {
            toggle_fullscreen: i.key_pressed(egui::Key::F),
            toggle_format: i.key_pressed(egui::Key::T),
            toggle_dark: i.key_pressed(egui::Key::D),
            open_menu: i.key_pressed(egui::Key::M),
            toggle_menu: false,
            region: None,
        })
    }

    fn advance_video(&mut self, now: Instant) -> f32 {
        let (phase, ended) = self.video_loop.advance(self.clock.video().current(), now);
        for _ in 0..ended {
            self.clock.video_ended();
        }
        phase
    }

    fn show_controls(&self, ui: &mut Ui, actions: &mut Actions) {
        let settings = self.clock.settings();
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("region_select")
                .selected_text(self.clock.region_label())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for option in self.clock.regions().options() {
                        let selected = self.clock.regions().active().as_str() == option.id;
                        if ui.selectable_label(selected, option.display_text).clicked() {
                            actions.region = Some(option.id);
                        }
                    }
                });
            ui.separator();

            let format_text = RichText::new(settings.hour_format.label()).strong();
            if ui
                .button(format_text)
                .on_hover_text("Switch 12/24 hour (T)")
                .clicked()
            {
                actions.toggle_format = true;
            }
            let theme_text = if settings.dark_mode { "Light" } else { "Dark" };
            if ui.button(theme_text).on_hover_text("Dark mode (D)").clicked() {
                actions.toggle_dark = true;
            }
            let fullscreen_text = if self.clock.fullscreen().is_fullscreen() {
                "Exit fullscreen"
            } else {
                "Fullscreen"
            };
            if ui
                .button(fullscreen_text)
                .on_hover_text("Fullscreen (F)")
                .clicked()
            {
                actions.toggle_fullscreen = true;
            }
            if ui
                .button("Menu")
                .on_hover_text("Styles and backgrounds (M)")
                .clicked()
            {
                actions.toggle_menu = true;
            }
        });
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        let Some(view) = self.clock.view().visible_view() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("menu_overlay")).show(ctx, |ui| {
            ui.set_width(420.0);
            match view {
                MenuView::Main => self.show_menu_main(ui),
                MenuView::Styles => self.show_menu_styles(ui),
                MenuView::Backgrounds => self.show_menu_backgrounds(ui),
            }
        });
        if modal.should_close() {
            self.clock.click_overlay(false);
        }
    }

    fn menu_header(&mut self, ui: &mut Ui, title: &str, back: Option<MenuView>) {
        ui.horizontal(|ui| {
            if let Some(target) = back
                && ui.button("< Back").clicked()
            {
                self.clock.back(target);
            }
            ui.heading(RichText::new(title).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    self.clock.close_menu();
                }
            });
        });
        ui.separator();
    }

    fn show_menu_main(&mut self, ui: &mut Ui) {
        self.menu_header(ui, "Menu", None);
        let entries = [
            ("Clock Styles", MenuView::Styles),
            ("Backgrounds", MenuView::Backgrounds),
        ];
        for (label, target) in entries {
            if ui
                .add_sized([ui.available_width(), 36.0], egui::Button::new(label))
                .clicked()
            {
                self.clock.navigate(target);
            }
        }
    }

    fn show_menu_styles(&mut self, ui: &mut Ui) {
        self.menu_header(ui, "Clock Styles", Some(MenuView::Main));
        egui::Grid::new("style_options")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (index, style) in StyleId::ALL.into_iter().enumerate() {
                    let active = self.clock.view().is_style_active(style);
                    let card = egui::SelectableLabel::new(active, capitalize(style.name()));
                    if ui.add_sized([200.0, 40.0], card).clicked() {
                        self.clock.select_style(style);
                    }
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_menu_backgrounds(&mut self, ui: &mut Ui) {
        self.menu_header(ui, "Backgrounds", Some(MenuView::Main));
        egui::Grid::new("background_options")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (index, background) in BackgroundId::ALL.into_iter().enumerate() {
                    let active = self.clock.view().is_background_active(background);
                    let card = egui::SelectableLabel::new(active, background.title());
                    if ui.add_sized([200.0, 40.0], card).clicked() {
                        self.clock.select_background(background);
                    }
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn apply(&mut self, ctx: &egui::Context, actions: Actions) {
        if let Some(id) = actions.region {
            self.clock.set_region(RegionId::new(id));
        }
        if actions.toggle_format {
            self.clock.toggle_hour_format();
        }
        if actions.toggle_dark {
            self.clock.toggle_dark_mode();
        }
        if actions.open_menu {
            self.clock.open_menu();
        }
        if actions.toggle_menu {
            self.clock.toggle_menu();
        }
        if actions.toggle_fullscreen {
            self.clock
                .request_fullscreen_toggle(&mut ViewportFullscreen { ctx });
        }

        let dark = self.clock.settings().dark_mode;
        if dark != self.applied_dark {
            configure_theme(ctx, dark);
            self.applied_dark = dark;
        }
    }
}

impl eframe::App for ZoneClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.track_input(ctx, now);
        if self.ticker.due(now) {
            self.clock.tick();
        }
        let mut actions = self.shortcuts(ctx);
        let phase = self.advance_video(now);
        let dark = self.clock.settings().dark_mode;
        let playing = self
            .clock
            .video()
            .is_visible()
            .then(|| self.clock.view().selection().active_background);

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter();
                paint_background(painter, rect, dark, playing, phase);
                if self.clock.has_rendered() {
                    paint_clock(
                        painter,
                        rect,
                        self.clock.face(),
                        self.clock.style_tag(),
                        dark || playing.is_some(),
                        self.clock.region_label(),
                    );
                } else {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        format!("no time for {}", self.clock.region_label()),
                        egui::FontId::proportional(24.0),
                        Color32::from_rgb(255, 187, 99),
                    );
                }
                if let Some(background) = playing {
                    painter.text(
                        rect.left_bottom() + egui::vec2(16.0, -16.0),
                        Align2::LEFT_BOTTOM,
                        video_caption(
                            background,
                            self.clock.video().loops(),
                            self.clock.video().is_muted(),
                        ),
                        egui::FontId::proportional(14.0),
                        Color32::from_white_alpha(160),
                    );
                }
                if !self.clock.is_live() {
                    painter.text(
                        rect.left_top() + egui::vec2(16.0, 16.0),
                        Align2::LEFT_TOP,
                        "fixed time",
                        egui::FontId::monospace(13.0),
                        Color32::from_rgb(255, 187, 99),
                    );
                }
            });

        if !self.clock.fullscreen().controls_hidden() {
            egui::Area::new(egui::Id::new("controls"))
                .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        self.show_controls(ui, &mut actions);
                    });
                });
        }

        self.show_menu(ctx);
        self.apply(ctx, actions);

        if self.clock.fullscreen().cursor_hidden() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        let mut wait = self.ticker.until_next(Instant::now());
        if let Some(deadline) = self.clock.fullscreen().countdown_deadline() {
            wait = wait.min(deadline.saturating_duration_since(Instant::now()));
        }
        if playing.is_some() {
            wait = wait.min(Duration::from_millis(50));
        }
        ctx.request_repaint_after(wait);
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_empty_and_words() {
        assert_eq!(capitalize("neon"), "Neon");
        assert_eq!(capitalize(""), "");
    }
}
