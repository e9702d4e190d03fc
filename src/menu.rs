use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::background::{BackgroundId, BackgroundVideo};
use crate::error::ClockError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum StyleId {
    #[default]
    Default,
    Neon,
    Classic,
    Retro,
    Bold,
    Vertical,
    Elegant,
    Typo,
}

impl StyleId {
    pub const ALL: [StyleId; 8] = [
        StyleId::Default,
        StyleId::Neon,
        StyleId::Classic,
        StyleId::Retro,
        StyleId::Bold,
        StyleId::Vertical,
        StyleId::Elegant,
        StyleId::Typo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleId::Default => "default",
            StyleId::Neon => "neon",
            StyleId::Classic => "classic",
            StyleId::Retro => "retro",
            StyleId::Bold => "bold",
            StyleId::Vertical => "vertical",
            StyleId::Elegant => "elegant",
            StyleId::Typo => "typo",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            StyleId::Default => "style-default",
            StyleId::Neon => "style-neon",
            StyleId::Classic => "style-classic",
            StyleId::Retro => "style-retro",
            StyleId::Bold => "style-bold",
            StyleId::Vertical => "style-vertical",
            StyleId::Elegant => "style-elegant",
            StyleId::Typo => "style-typo",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleId {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("style-").unwrap_or(&wanted);
        StyleId::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ClockError::UnknownStyle(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MenuView {
    #[default]
    Main,
    Styles,
    Backgrounds,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MenuState {
    pub is_open: bool,
    pub active_view: MenuView,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SelectionState {
    pub active_style: StyleId,
    pub active_background: BackgroundId,
}

#[derive(Debug, Clone, Default)]
pub struct ViewStateController {
    menu: MenuState,
    selection: SelectionState,
}

impl ViewStateController {
    pub fn new(selection: SelectionState) -> Self {
        Self {
            menu: MenuState::default(),
            selection,
        }
    }

    #[cfg(test)]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open
    }

    /// The view to draw, or `None` while closed.
    pub fn visible_view(&self) -> Option<MenuView> {
        self.menu.is_open.then_some(self.menu.active_view)
    }

    pub fn open_menu(&mut self) {
        self.menu = MenuState {
            is_open: true,
            active_view: MenuView::Main,
        };
    }

    pub fn close_menu(&mut self) {
        self.menu.is_open = false;
    }

    pub fn toggle_menu(&mut self) {
        if self.menu.is_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    pub fn navigate(&mut self, target: MenuView) {
        if !self.menu.is_open {
            return;
        }
        self.menu.active_view = target;
    }

    pub fn back(&mut self, target: MenuView) {
        self.navigate(target);
    }

    /// A click on the overlay closes the menu unless it landed on the content.
    pub fn click_overlay(&mut self, inside_content: bool) {
        if self.menu.is_open && !inside_content {
            self.close_menu();
        }
    }

    pub fn is_style_active(&self, style: StyleId) -> bool {
        self.selection.active_style == style
    }

    pub fn is_background_active(&self, background: BackgroundId) -> bool {
        self.selection.active_background == background
    }

    /// Returns the single style tag the clock container should carry.
    pub fn select_style(&mut self, style: StyleId) -> &'static str {
        debug!(
            "style {} -> {}",
            self.selection.active_style.tag(),
            style.tag()
        );
        self.selection.active_style = style;
        style.tag()
    }

    pub fn select_background(
        &mut self,
        background: BackgroundId,
        video: &mut dyn BackgroundVideo,
    ) {
        self.selection.active_background = background;
        match background.video_key() {
            Some(key) if !background.is_neutral() => video.play(key),
            _ => video.stop(),
        }
    }
}
