use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,

    // General commands
    Quit,

    // Picker commands
    Open,
    Cancel,

    // List movement commands
    MoveUp,
    MoveDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    MoveTop,
    MoveBottom,

    // Text-edit commands
    DeleteBackwardChar,
    DeleteForwardChar,
    DeleteBackwardWord,
    DeleteForwardWord,
    DeleteToStart,
    DeleteToEnd,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,
}

/// Config name and footer label for every command.
const COMMANDS: &[(Command, &str, &str)] = &[
    (Command::Noop, "noop", "Unbound"),
    (Command::Quit, "quit", "Quit"),
    (Command::Open, "open", "Open"),
    (Command::Cancel, "cancel", "Cancel"),
    (Command::MoveUp, "move_up", "Move up"),
    (Command::MoveDown, "move_down", "Move down"),
    (Command::HalfPageUp, "half_page_up", "Half page up"),
    (Command::HalfPageDown, "half_page_down", "Half page down"),
    (Command::PageUp, "page_up", "Page up"),
    (Command::PageDown, "page_down", "Page down"),
    (Command::MoveTop, "move_top", "Move to top"),
    (Command::MoveBottom, "move_bottom", "Move to bottom"),
    (Command::DeleteBackwardChar, "delete_backward_char", "Delete backward char"),
    (Command::DeleteForwardChar, "delete_forward_char", "Delete forward char"),
    (Command::DeleteBackwardWord, "delete_backward_word", "Delete backward word"),
    (Command::DeleteForwardWord, "delete_forward_word", "Delete forward word"),
    (Command::DeleteToStart, "delete_to_start", "Delete to start"),
    (Command::DeleteToEnd, "delete_to_end", "Delete to end"),
    (Command::MoveCursorLeft, "move_cursor_left", "Cursor left"),
    (Command::MoveCursorRight, "move_cursor_right", "Cursor right"),
    (Command::MoveCursorStart, "move_cursor_start", "Cursor to start"),
    (Command::MoveCursorEnd, "move_cursor_end", "Cursor to end"),
    (Command::MoveCursorWordLeft, "move_cursor_word_left", "Cursor word left"),
    (Command::MoveCursorWordRight, "move_cursor_word_right", "Cursor word right"),
];

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if matches!(s, "none" | "unbound") {
            return Ok(Command::Noop);
        }
        COMMANDS
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(command, _, _)| *command)
            .ok_or_else(|| format!("Unknown command: {s}"))
    }
}

impl Command {
    fn entry(self) -> (&'static str, &'static str) {
        COMMANDS
            .iter()
            .find(|(command, _, _)| *command == self)
            .map_or(("noop", "Unbound"), |(_, name, label)| (*name, *label))
    }

    /// Short label for the footer hints
    pub fn description(self) -> &'static str {
        self.entry().1
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.entry().0)
    }
}

/// Key bindings for a specific layer
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Complete key binding configuration, composed from reusable layers.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub text_edit: KeyMap,
    pub list_navigation: KeyMap,
    pub picker: KeyMap,
}

/// Intermediate structure for deserializing key bindings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    text_edit: HashMap<String, String>,
    #[serde(default)]
    list_navigation: HashMap<String, String>,
    #[serde(default)]
    picker: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn bind(map: &mut KeyMap, code: KeyCode, modifiers: KeyModifiers, command: Command) {
    map.insert(KeyEvent::new(code, modifiers), command);
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            text_edit: Self::default_text_edit(),
            list_navigation: Self::default_list_navigation(),
            picker: Self::default_picker(),
        }
    }

    /// Build the effective picker keymap using precedence:
    /// general < text_edit < list_navigation < picker
    pub fn keymap(&self) -> KeyMap {
        let mut combined = KeyMap::new();
        Self::apply_layer(&mut combined, &self.general);
        Self::apply_layer(&mut combined, &self.text_edit);
        Self::apply_layer(&mut combined, &self.list_navigation);
        Self::apply_layer(&mut combined, &self.picker);
        combined
    }

    /// Find the first key bound to a given command in a keymap.
    pub fn find_key(keymap: &KeyMap, command: Command) -> Option<KeyEvent> {
        // Prefer shorter/simpler key representations
        let mut found: Vec<_> = keymap
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| *key)
            .collect();
        found.sort();
        found.into_iter().next()
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, *command);
            }
        }
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyCode::Char('c'), KeyModifiers::CONTROL, Command::Quit);
        map
    }

    fn default_text_edit() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyCode::Backspace, KeyModifiers::NONE, Command::DeleteBackwardChar);
        bind(&mut map, KeyCode::Delete, KeyModifiers::NONE, Command::DeleteForwardChar);
        bind(&mut map, KeyCode::Backspace, KeyModifiers::ALT, Command::DeleteBackwardWord);
        bind(&mut map, KeyCode::Char('d'), KeyModifiers::ALT, Command::DeleteForwardWord);
        bind(&mut map, KeyCode::Char('u'), KeyModifiers::CONTROL, Command::DeleteToStart);
        bind(&mut map, KeyCode::Char('k'), KeyModifiers::CONTROL, Command::DeleteToEnd);
        bind(&mut map, KeyCode::Left, KeyModifiers::NONE, Command::MoveCursorLeft);
        bind(&mut map, KeyCode::Right, KeyModifiers::NONE, Command::MoveCursorRight);
        bind(&mut map, KeyCode::Home, KeyModifiers::NONE, Command::MoveCursorStart);
        bind(&mut map, KeyCode::End, KeyModifiers::NONE, Command::MoveCursorEnd);
        bind(&mut map, KeyCode::Char('a'), KeyModifiers::CONTROL, Command::MoveCursorStart);
        bind(&mut map, KeyCode::Char('e'), KeyModifiers::CONTROL, Command::MoveCursorEnd);
        bind(&mut map, KeyCode::Char('b'), KeyModifiers::ALT, Command::MoveCursorWordLeft);
        bind(&mut map, KeyCode::Char('f'), KeyModifiers::ALT, Command::MoveCursorWordRight);
        map
    }

    fn default_list_navigation() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyCode::Up, KeyModifiers::NONE, Command::MoveUp);
        bind(&mut map, KeyCode::Down, KeyModifiers::NONE, Command::MoveDown);
        bind(&mut map, KeyCode::Char('p'), KeyModifiers::CONTROL, Command::MoveUp);
        bind(&mut map, KeyCode::Char('n'), KeyModifiers::CONTROL, Command::MoveDown);
        bind(&mut map, KeyCode::Char('b'), KeyModifiers::CONTROL, Command::HalfPageUp);
        bind(&mut map, KeyCode::Char('f'), KeyModifiers::CONTROL, Command::HalfPageDown);
        bind(&mut map, KeyCode::PageUp, KeyModifiers::NONE, Command::PageUp);
        bind(&mut map, KeyCode::PageDown, KeyModifiers::NONE, Command::PageDown);
        bind(&mut map, KeyCode::Char('g'), KeyModifiers::ALT, Command::MoveTop);
        bind(&mut map, KeyCode::Char('G'), KeyModifiers::ALT, Command::MoveBottom);
        map
    }

    fn default_picker() -> KeyMap {
        let mut map = KeyMap::new();
        bind(&mut map, KeyCode::Enter, KeyModifiers::NONE, Command::Open);
        bind(&mut map, KeyCode::Esc, KeyModifiers::NONE, Command::Cancel);
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();

        config.general.extend(Self::parse_keymap(&raw.general)?);
        config.text_edit.extend(Self::parse_keymap(&raw.text_edit)?);
        config
            .list_navigation
            .extend(Self::parse_keymap(&raw.list_navigation)?);
        config.picker.extend(Self::parse_keymap(&raw.picker)?);

        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
