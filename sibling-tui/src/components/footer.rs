use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use sibling_core::{
    SplitOrientation,
    chord::ChordBindings,
    config::{Command, KeysConfig, keys::KeyMap},
};

/// (key, label) pairs for the hint line. Commands with no key bound are left out.
fn hints(keymap: &KeyMap, chord: &ChordBindings) -> Vec<(String, &'static str)> {
    let mut hints: Vec<(String, &'static str)> = [Command::Open, Command::Cancel]
        .into_iter()
        .filter_map(|command| {
            KeysConfig::find_key(keymap, command).map(|key| (key.to_string(), command.description()))
        })
        .collect();

    for (orientation, label) in [
        (SplitOrientation::Horizontal, "Split below"),
        (SplitOrientation::Vertical, "Split beside"),
    ] {
        let mut keys: Vec<_> = chord
            .completions
            .iter()
            .filter(|(_, o)| **o == orientation)
            .map(|(key, _)| *key)
            .collect();
        keys.sort();
        if let Some(key) = keys.first() {
            hints.push((format!("{} {key}", chord.prefix), label));
        }
    }

    hints
}

/// Pending chord indicator, e.g. `C-w  s: below  v: beside`.
fn armed_line(chord: &ChordBindings) -> String {
    let mut completions: Vec<_> = chord.completions.iter().collect();
    completions.sort_by_key(|(key, _)| **key);
    let parts: Vec<String> = completions
        .into_iter()
        .map(|(key, orientation)| match orientation {
            SplitOrientation::Horizontal => format!("{key}: below"),
            SplitOrientation::Vertical => format!("{key}: beside"),
        })
        .collect();
    format!("{}  {}", chord.prefix, parts.join("  "))
}

pub fn draw(
    f: &mut Frame,
    area: Rect,
    keymap: &KeyMap,
    chord: &ChordBindings,
    armed: bool,
    theme: &Theme,
) {
    let line = if armed {
        Line::from(Span::styled(
            armed_line(chord),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = Vec::new();
        for (key, label) in hints(keymap, chord) {
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default().fg(theme.hint).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {label}  "),
                Style::default().fg(theme.muted),
            ));
        }
        Line::from(spans)
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hints() {
        let keymap = KeysConfig::default().keymap();
        let hints = hints(&keymap, &ChordBindings::default());
        let keys: Vec<&str> = hints.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["enter", "esc", "C-w s", "C-w v"]);
    }

    #[test]
    fn test_unbound_command_has_no_hint() {
        let mut keymap = KeysConfig::default().keymap();
        keymap.retain(|_, command| *command != Command::Cancel);
        let hints = hints(&keymap, &ChordBindings::default());
        assert!(hints.iter().all(|(_, label)| *label != "Cancel"));
    }

    #[test]
    fn test_armed_line_lists_completions() {
        assert_eq!(
            armed_line(&ChordBindings::default()),
            "C-w  s: below  v: beside"
        );
    }
}
