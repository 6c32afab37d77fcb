pub mod keys;

use crate::chord::ChordBindings;
use crate::editor::SplitOrientation;
use crate::keyboard::KeyEvent;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use keys::{Command, KeysConfig};

pub const APP_NAME: &str = "sibling";

fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How files are opened.
    #[serde(default)]
    pub editor: EditorConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration.
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,

    /// The split chord. For example, to use tmux-style keys:
    /// ```toml
    /// [chord]
    /// prefix = "C-b"
    /// horizontal = "minus"
    /// vertical = "|"
    /// ```
    #[serde(default)]
    pub chord: ChordBindings,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Command used to open a file, with the path appended as the last argument.
    /// Falls back to `$VISUAL`, then `$EDITOR`, then `vi`.
    /// ```toml
    /// [editor]
    /// command = "hx"
    /// ```
    pub command: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChordConfigRaw {
    #[serde(default = "ChordConfigRaw::default_prefix")]
    prefix: String,
    #[serde(default = "ChordConfigRaw::default_horizontal")]
    horizontal: String,
    #[serde(default = "ChordConfigRaw::default_vertical")]
    vertical: String,
}

impl ChordConfigRaw {
    fn default_prefix() -> String {
        "C-w".to_string()
    }
    fn default_horizontal() -> String {
        "s".to_string()
    }
    fn default_vertical() -> String {
        "v".to_string()
    }

    fn into_bindings(self) -> Result<ChordBindings, String> {
        let parse = |field: &str, value: &str| {
            KeyEvent::from_str(value).map_err(|e| format!("Invalid chord {field} '{value}': {e}"))
        };
        let prefix = parse("prefix", &self.prefix)?;
        let horizontal = parse("horizontal", &self.horizontal)?;
        let vertical = parse("vertical", &self.vertical)?;

        if horizontal == vertical {
            return Err(format!(
                "chord horizontal and vertical keys must differ (both are '{horizontal}')"
            ));
        }
        if prefix == horizontal || prefix == vertical {
            return Err(format!(
                "chord prefix '{prefix}' cannot also complete the chord"
            ));
        }

        Ok(ChordBindings {
            prefix,
            completions: HashMap::from([
                (horizontal, SplitOrientation::Horizontal),
                (vertical, SplitOrientation::Vertical),
            ]),
        })
    }
}

impl<'de> Deserialize<'de> for ChordBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ChordConfigRaw::deserialize(deserializer)?
            .into_bindings()
            .map_err(serde::de::Error::custom)
    }
}

/// Picker colors. Each accepts a color name (`grey` is an alias for `gray`) or `#rrggbb`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Selected row background (default: "magenta").
    pub accent: ThemeColor,
    /// Error bar (default: "red").
    pub error: ThemeColor,
    /// Armed chord indicator and border (default: "yellow").
    pub warning: ThemeColor,
    /// Placeholder, counts and hint labels (default: "gray").
    pub muted: ThemeColor,
    pub border: ThemeColor,
    pub title: ThemeColor,
    /// Key names in the footer (default: "blue").
    pub hint: ThemeColor,
    /// Selected row text (default: "white").
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        use NamedColor::{Blue, Gray, Magenta, Red, White, Yellow};
        Self {
            accent: ThemeColor::Named(Magenta),
            error: ThemeColor::Named(Red),
            warning: ThemeColor::Named(Yellow),
            muted: ThemeColor::Named(Gray),
            border: ThemeColor::Named(Gray),
            title: ThemeColor::Named(Blue),
            hint: ThemeColor::Named(Blue),
            highlight_fg: ThemeColor::Named(White),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

const NAMED_COLORS: &[(&str, NamedColor)] = &[
    ("black", NamedColor::Black),
    ("red", NamedColor::Red),
    ("green", NamedColor::Green),
    ("yellow", NamedColor::Yellow),
    ("blue", NamedColor::Blue),
    ("magenta", NamedColor::Magenta),
    ("cyan", NamedColor::Cyan),
    ("white", NamedColor::White),
    ("gray", NamedColor::Gray),
];

impl NamedColor {
    pub fn as_str(self) -> &'static str {
        NAMED_COLORS
            .iter()
            .find(|(_, color)| *color == self)
            .map_or("gray", |(name, _)| *name)
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let name = s.to_ascii_lowercase();
        let name = if name == "grey" { "gray" } else { name.as_str() };
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| Self::Named(*color))
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| {
            let names: Vec<&str> = NAMED_COLORS.iter().map(|(name, _)| *name).collect();
            serde::de::Error::custom(format!(
                "invalid color '{s}': expected one of {} or #rrggbb",
                names.join(", ")
            ))
        })
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. An explicit path must exist; the default location may be absent.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => match config_file() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    let config = load_config_from_str(&contents)
        .with_context(|| format!("Invalid config at {}", config_file.display()))?;
    log::debug!("loaded config from {}", config_file.display());
    Ok(config)
}
