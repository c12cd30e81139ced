use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub label: Style,
    pub focused_label: Style,
    pub placeholder: Style,
    pub item: Style,
    pub active_item: Style,
    pub match_highlight: Style,
    pub live_region: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            label: Style::new(),
            focused_label: Style::new().color(Color::Cyan).bold(),
            placeholder: Style::new().color(Color::DarkGrey),
            item: Style::new(),
            active_item: Style::new().color(Color::Black).background(Color::Cyan),
            match_highlight: Style::new().bold().underline(),
            live_region: Style::new().color(Color::DarkGrey),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
