use ratatui::style::{Color, Modifier, Style};

pub struct LyricStyles {
    pub before: Style,
    pub current: Style,
    pub after: Style,
    pub header: Style,
    pub dim: Style,
}

impl Default for LyricStyles {
    fn default() -> Self {
        Self {
            before: Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            current: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            after: Style::default(),
            header: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            dim: Style::default().add_modifier(Modifier::DIM),
        }
    }
}
