use sibling_core::{
    action::Action,
    chord::{ChordBindings, ChordOutcome, ChordState},
    config::{Command, keys::KeyMap},
    keyboard::KeyEvent,
};

/// Resolve a key-down event into an Action.
///
/// The chord machine sees every key first. Keys it passes through go to the
/// keymap, and unbound printable keys become query input.
pub fn resolve_action(
    key: KeyEvent,
    chord_state: &mut ChordState,
    chord: &ChordBindings,
    keymap: &KeyMap,
) -> Option<Action> {
    match chord_state.feed(key, chord) {
        ChordOutcome::Consumed => return Some(Action::ChordArmed),
        ChordOutcome::Split(orientation) => return Some(Action::OpenInSplit(orientation)),
        ChordOutcome::PassThrough => {}
    }

    if let Some(command) = keymap.get(&key) {
        return command_to_action(*command);
    }

    key.text_input().map(Action::SearchPush)
}

fn command_to_action(command: Command) -> Option<Action> {
    let action = match command {
        Command::Noop => return None,
        Command::Quit => Action::Quit,
        Command::Open => Action::Open,
        Command::Cancel => Action::Cancel,
        Command::MoveUp => Action::MoveSelection(-1),
        Command::MoveDown => Action::MoveSelection(1),
        Command::HalfPageUp => Action::HalfPageUp,
        Command::HalfPageDown => Action::HalfPageDown,
        Command::PageUp => Action::PageUp,
        Command::PageDown => Action::PageDown,
        Command::MoveTop => Action::MoveTop,
        Command::MoveBottom => Action::MoveBottom,
        Command::DeleteBackwardChar => Action::SearchPop,
        Command::DeleteForwardChar => Action::SearchDeleteForward,
        Command::DeleteBackwardWord => Action::SearchDeleteWord,
        Command::DeleteForwardWord => Action::SearchDeleteWordForward,
        Command::DeleteToStart => Action::SearchDeleteToStart,
        Command::DeleteToEnd => Action::SearchDeleteToEnd,
        Command::MoveCursorLeft => Action::CursorLeft,
        Command::MoveCursorRight => Action::CursorRight,
        Command::MoveCursorStart => Action::CursorStart,
        Command::MoveCursorEnd => Action::CursorEnd,
        Command::MoveCursorWordLeft => Action::CursorWordLeft,
        Command::MoveCursorWordRight => Action::CursorWordRight,
    };
    Some(action)
}
