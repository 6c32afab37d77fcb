use ratatui::style::Color;
use sibling_core::config::{NamedColor, ThemeColor, ThemeConfig};

pub struct Theme {
    pub accent: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub title: Color,
    pub hint: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: color(&config.accent),
            error: color(&config.error),
            warning: color(&config.warning),
            muted: color(&config.muted),
            border: color(&config.border),
            title: color(&config.title),
            hint: color(&config.hint),
            highlight_fg: color(&config.highlight_fg),
        }
    }
}

fn color(value: &ThemeColor) -> Color {
    let named = match *value {
        ThemeColor::Rgb(r, g, b) => return Color::Rgb(r, g, b),
        ThemeColor::Named(named) => named,
    };
    match named {
        NamedColor::Black => Color::Black,
        NamedColor::Red => Color::Red,
        NamedColor::Green => Color::Green,
        NamedColor::Yellow => Color::Yellow,
        NamedColor::Blue => Color::Blue,
        NamedColor::Magenta => Color::Magenta,
        NamedColor::Cyan => Color::Cyan,
        NamedColor::White => Color::White,
        NamedColor::Gray => Color::Gray,
    }
}
