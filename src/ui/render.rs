use eframe::egui::{
    self, Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, pos2, vec2,
};

use crate::background::BackgroundId;
use crate::display::ClockFace;

const LIGHT_TOP: Color32 = Color32::from_rgb(224, 234, 252);
const LIGHT_BOTTOM: Color32 = Color32::from_rgb(246, 214, 228);
const DARK_TOP: Color32 = Color32::from_rgb(10, 16, 30);
const DARK_BOTTOM: Color32 = Color32::from_rgb(34, 20, 48);
const INK_LIGHT: Color32 = Color32::from_rgb(28, 34, 52);
const INK_DARK: Color32 = Color32::from_rgb(226, 234, 246);
const MUTED_LIGHT: Color32 = Color32::from_rgb(92, 104, 128);
const MUTED_DARK: Color32 = Color32::from_rgb(150, 171, 191);
const NEON: Color32 = Color32::from_rgb(89, 244, 214);
const RETRO: Color32 = Color32::from_rgb(255, 176, 64);
const ELEGANT: Color32 = Color32::from_rgb(212, 184, 128);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum FaceLayout {
    Row,
    Stack,
}

#[derive(Debug, Clone, Copy)]
struct FaceStyle {
    layout: FaceLayout,
    monospace: bool,
    digit_size: f32,
    date_size: f32,
    ink: Option<Color32>,
    glow: bool,
    separator: &'static str,
    uppercase_date: bool,
}

impl FaceStyle {
    fn for_tag(tag: &str) -> Self {
        let base = FaceStyle {
            layout: FaceLayout::Row,
            monospace: false,
            digit_size: 120.0,
            date_size: 26.0,
            ink: None,
            glow: false,
            separator: ":",
            uppercase_date: false,
        };
        match tag {
            "style-neon" => FaceStyle {
                ink: Some(NEON),
                glow: true,
                ..base
            },
            "style-classic" => FaceStyle {
                digit_size: 104.0,
                ..base
            },
            "style-retro" => FaceStyle {
                monospace: true,
                ink: Some(RETRO),
                uppercase_date: true,
                ..base
            },
            "style-bold" => FaceStyle {
                digit_size: 160.0,
                date_size: 30.0,
                ..base
            },
            "style-vertical" => FaceStyle {
                layout: FaceLayout::Stack,
                digit_size: 110.0,
                ..base
            },
            "style-elegant" => FaceStyle {
                digit_size: 96.0,
                date_size: 22.0,
                ink: Some(ELEGANT),
                separator: " · ",
                ..base
            },
            "style-typo" => FaceStyle {
                digit_size: 136.0,
                separator: " ",
                uppercase_date: true,
                ..base
            },
            _ => base,
        }
    }

    fn font(&self, size: f32) -> FontId {
        if self.monospace {
            FontId::monospace(size)
        } else {
            FontId::proportional(size)
        }
    }
}

pub fn paint_background(
    painter: &Painter,
    rect: Rect,
    dark: bool,
    playing: Option<BackgroundId>,
    phase: f32,
) {
    let (top, bottom) = match playing {
        Some(background) => video_palette(background, phase),
        None if dark => (DARK_TOP, DARK_BOTTOM),
        None => (LIGHT_TOP, LIGHT_BOTTOM),
    };
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 2, 3);
    painter.add(Shape::mesh(mesh));

    if playing.is_some() {
        // Dim the loop so the digits stay readable.
        painter.rect_filled(rect, 0.0, Color32::from_black_alpha(if dark { 120 } else { 70 }));
    }
}

fn video_palette(background: BackgroundId, phase: f32) -> (Color32, Color32) {
    let (a, b) = match background {
        BackgroundId::Gradient => (LIGHT_TOP, LIGHT_BOTTOM),
        BackgroundId::NewYork => (Color32::from_rgb(40, 56, 96), Color32::from_rgb(236, 150, 72)),
        BackgroundId::Forest => (Color32::from_rgb(22, 70, 44), Color32::from_rgb(120, 168, 92)),
        BackgroundId::London => (Color32::from_rgb(70, 78, 92), Color32::from_rgb(150, 160, 176)),
        BackgroundId::Tokyo => (Color32::from_rgb(36, 18, 72), Color32::from_rgb(236, 72, 150)),
        BackgroundId::LosAngeles => {
            (Color32::from_rgb(248, 148, 88), Color32::from_rgb(92, 56, 140))
        }
        BackgroundId::MonteCarlo => {
            (Color32::from_rgb(20, 92, 140), Color32::from_rgb(236, 214, 170))
        }
    };
    let swing = (phase * std::f32::consts::TAU).sin() * 0.5 + 0.5;
    (lerp(a, b, swing * 0.3), lerp(b, a, swing * 0.3))
}

fn lerp(from: Color32, to: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Color32::from_rgb(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
    )
}

pub fn paint_clock(
    painter: &Painter,
    rect: Rect,
    face: &ClockFace,
    style_tag: &str,
    dark: bool,
    region_label: &str,
) {
    let style = FaceStyle::for_tag(style_tag);
    let ink = style.ink.unwrap_or(if dark { INK_DARK } else { INK_LIGHT });
    let muted = if dark { MUTED_DARK } else { MUTED_LIGHT };
    let center = rect.center();

    let digits_bottom = match style.layout {
        FaceLayout::Row => paint_row(painter, center, face, &style, ink, muted),
        FaceLayout::Stack => paint_stack(painter, center, face, &style, ink, muted),
    };

    let date = &face.date;
    let mut date_line = [date.weekday.as_str(), date.day_month.as_str(), date.year.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if style.uppercase_date {
        date_line = date_line.to_uppercase();
    }
    let date_pos = pos2(center.x, digits_bottom + style.date_size);
    painter.text(
        date_pos,
        Align2::CENTER_CENTER,
        date_line,
        style.font(style.date_size),
        muted,
    );
    painter.text(
        date_pos + vec2(0.0, style.date_size * 1.4),
        Align2::CENTER_CENTER,
        region_label,
        FontId::proportional(18.0),
        muted,
    );
}

fn paint_row(
    painter: &Painter,
    center: Pos2,
    face: &ClockFace,
    style: &FaceStyle,
    ink: Color32,
    muted: Color32,
) -> f32 {
    let time = &face.time;
    let text = [time.hour.as_str(), time.minute.as_str(), time.second.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(style.separator);
    let font = style.font(style.digit_size);
    if style.glow {
        for offset in [vec2(-2.0, 0.0), vec2(2.0, 0.0), vec2(0.0, -2.0), vec2(0.0, 2.0)] {
            painter.text(
                center + offset,
                Align2::CENTER_CENTER,
                &text,
                font.clone(),
                ink.gamma_multiply(0.25),
            );
        }
    }
    let digits = painter.text(center, Align2::CENTER_CENTER, &text, font, ink);
    if let Some(tag) = &time.meridiem {
        painter.text(
            pos2(digits.right() + 12.0, digits.top() + style.digit_size * 0.25),
            Align2::LEFT_CENTER,
            tag,
            style.font(style.digit_size * 0.25),
            muted,
        );
    }
    digits.bottom()
}

fn paint_stack(
    painter: &Painter,
    center: Pos2,
    face: &ClockFace,
    style: &FaceStyle,
    ink: Color32,
    muted: Color32,
) -> f32 {
    let time = &face.time;
    let line_height = style.digit_size * 0.95;
    let parts = [time.hour.as_str(), time.minute.as_str(), time.second.as_str()];
    let top = center.y - line_height;
    let mut bottom = top;
    for (index, part) in parts.iter().enumerate() {
        let color = if index == 2 { muted } else { ink };
        let rect = painter.text(
            pos2(center.x, top + line_height * index as f32),
            Align2::CENTER_CENTER,
            *part,
            style.font(style.digit_size),
            color,
        );
        bottom = rect.bottom();
    }
    if let Some(tag) = &time.meridiem {
        let rect = painter.text(
            pos2(center.x, bottom + 18.0),
            Align2::CENTER_CENTER,
            tag,
            style.font(28.0),
            muted,
        );
        bottom = rect.bottom();
    }
    painter.line_segment(
        [pos2(center.x - 60.0, bottom + 8.0), pos2(center.x + 60.0, bottom + 8.0)],
        Stroke::new(1.0, muted),
    );
    bottom + 8.0
}

pub fn video_caption(background: BackgroundId, loops: u32, muted: bool) -> String {
    let kind = if muted { "muted loop" } else { "loop" };
    match loops {
        0 => format!("{} ({kind})", background.title()),
        n => format!("{} ({kind} #{})", background.title(), n + 1),
    }
}

pub fn window_background(dark: bool) -> Color32 {
    if dark { DARK_TOP } else { LIGHT_TOP }
}

pub fn configure_theme(ctx: &egui::Context, dark: bool) {
    let mut visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    if dark {
        visuals.override_text_color = Some(INK_DARK);
        visuals.window_fill = Color32::from_rgb(12, 20, 32);
        visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
        visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
        visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
        visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
    } else {
        visuals.override_text_color = Some(INK_LIGHT);
        visuals.window_fill = Color32::from_rgb(250, 250, 254);
        visuals.selection.bg_fill = Color32::from_rgb(120, 150, 232);
    }
    visuals.panel_fill = window_background(dark);
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_uses_default_face() {
        let style = FaceStyle::for_tag("style-unheard-of");
        assert_eq!(style.layout, FaceLayout::Row);
        assert_eq!(style.separator, ":");
        assert!(style.ink.is_none());
    }

    #[test]
    fn vertical_tag_stacks_digits() {
        assert_eq!(
            FaceStyle::for_tag("style-vertical").layout,
            FaceLayout::Stack
        );
    }

    #[test]
    fn caption_counts_loops_after_first_play() {
        assert_eq!(
            video_caption(BackgroundId::Tokyo, 0, true),
            "Tokyo (muted loop)"
        );
        assert_eq!(
            video_caption(BackgroundId::Tokyo, 2, true),
            "Tokyo (muted loop #3)"
        );
    }
}
