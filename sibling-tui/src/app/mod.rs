mod actions;

use crate::{
    components::{self, search_bar::SearchBarStyle},
    keymap,
    theme::Theme,
};
use actions::{
    handle_open, handle_open_in_split, handle_search_delete_forward, handle_search_delete_to_end,
    handle_search_delete_to_start, handle_search_delete_word, handle_search_delete_word_forward,
    handle_search_pop, handle_search_push,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};
use sibling_core::{
    SplitOrientation,
    action::Action,
    chord::ChordBindings,
    config::{KeysConfig, keys::KeyMap},
    keyboard::KeyEvent,
    siblings::Direction,
    state::AppState,
};
use std::path::PathBuf;

/// What the caller should do once the picker closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Open(PathBuf),
    OpenInSplit(PathBuf, SplitOrientation),
    Dismissed,
}

/// Drive the picker until the user commits a file or dismisses it.
pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    theme: &Theme,
    keys: &KeysConfig,
    chord: &ChordBindings,
) -> anyhow::Result<PickerOutcome> {
    let keymap = keys.keymap();

    loop {
        terminal.draw(|f| draw(f, state, theme, &keymap, chord))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(key) = KeyEvent::from_crossterm(key) else {
            continue;
        };

        // Clear error on any keypress
        state.error = None;

        if let Some(action) = keymap::resolve_action(key, &mut state.chord, chord, &keymap)
            && let Some(outcome) = process_action(action, state)
        {
            return Ok(outcome);
        }
    }
}

fn draw(
    f: &mut Frame,
    state: &mut AppState,
    theme: &Theme,
    keymap: &KeyMap,
    chord: &ChordBindings,
) {
    let [search_area, list_area, footer_area, error_area] =
        picker_layout(f.area(), state.error.is_some());

    let page_rows = list_rows_from_list_area(list_area);
    state.set_active_list_page_rows(page_rows);
    state.session.update_scroll_offset_for_selection(page_rows);

    let title = state.current_file.file_name().map_or_else(
        || "siblings".to_string(),
        |name| format!("siblings of {}", name.to_string_lossy()),
    );
    components::search_bar::draw(
        f,
        search_area,
        &SearchBarStyle {
            title: &title,
            placeholder: "Type to filter...",
            border_color: if state.chord.is_armed() {
                theme.warning
            } else {
                theme.accent
            },
            title_color: theme.title,
            muted_color: theme.muted,
        },
        &state.session.query,
    );
    components::sibling_list::draw(f, list_area, &state.session, theme);
    components::footer::draw(
        f,
        footer_area,
        keymap,
        chord,
        state.chord.is_armed(),
        theme,
    );

    if let Some(error) = &state.error {
        components::error_bar::draw(f, error_area, error, theme);
    }
}

/// Search bar, candidate list, hint line, and an error line when there is something to report.
fn picker_layout(area: Rect, has_error: bool) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(u16::from(has_error)),
    ])
    .areas(area)
}

fn list_rows_from_list_area(list_area: Rect) -> usize {
    usize::from(list_area.height.saturating_sub(2)).max(1)
}

fn handle_movement_actions(action: Action, state: &mut AppState) -> bool {
    let page_rows: i32 = state.active_list_page_rows().try_into().unwrap_or(i32::MAX);
    let list_len: i32 = state
        .session
        .candidate_count()
        .try_into()
        .unwrap_or(i32::MAX);
    let page_step = page_rows.max(1).min(list_len.max(1));
    let half_page_step = (page_step / 2).max(1);

    let session = &mut state.session;
    match action {
        Action::MoveSelection(delta) if delta < 0 => session.move_cursor(Direction::Previous),
        Action::MoveSelection(_) => session.move_cursor(Direction::Next),
        Action::HalfPageUp => session.move_by(-half_page_step),
        Action::HalfPageDown => session.move_by(half_page_step),
        Action::PageUp => session.move_by(-page_step),
        Action::PageDown => session.move_by(page_step),
        Action::MoveTop => session.move_to_top(),
        Action::MoveBottom => session.move_to_bottom(),
        _ => return false,
    }
    true
}

/// Caret motion inside the query; never re-filters.
fn handle_caret_actions(action: Action, state: &mut AppState) -> bool {
    let query = &mut state.session.query;
    match action {
        Action::CursorLeft => query.caret_left(),
        Action::CursorRight => query.caret_right(),
        Action::CursorWordLeft => query.caret_word_left(),
        Action::CursorWordRight => query.caret_word_right(),
        Action::CursorStart => query.caret_start(),
        Action::CursorEnd => query.caret_end(),
        _ => return false,
    }
    true
}

fn process_action(action: Action, state: &mut AppState) -> Option<PickerOutcome> {
    if handle_movement_actions(action, state) || handle_caret_actions(action, state) {
        return None;
    }

    match action {
        Action::Quit | Action::Cancel => return Some(PickerOutcome::Dismissed),
        Action::Open => return handle_open(state),
        Action::OpenInSplit(orientation) => return handle_open_in_split(state, orientation),

        Action::SearchPush(c) => handle_search_push(state, c),
        Action::SearchPop => handle_search_pop(state),
        Action::SearchDeleteForward => handle_search_delete_forward(state),
        Action::SearchDeleteWord => handle_search_delete_word(state),
        Action::SearchDeleteWordForward => handle_search_delete_word_forward(state),
        Action::SearchDeleteToStart => handle_search_delete_to_start(state),
        Action::SearchDeleteToEnd => handle_search_delete_to_end(state),

        // Armed chord only changes what is drawn.
        Action::ChordArmed => {}

        // Handled by the helpers above.
        Action::MoveSelection(_)
        | Action::HalfPageUp
        | Action::HalfPageDown
        | Action::PageUp
        | Action::PageDown
        | Action::MoveTop
        | Action::MoveBottom
        | Action::CursorLeft
        | Action::CursorRight
        | Action::CursorWordLeft
        | Action::CursorWordRight
        | Action::CursorStart
        | Action::CursorEnd => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use sibling_core::{fs::mock::MockFsProvider, siblings::picker_siblings};
    use std::{path::Path, str::FromStr};

    fn picker_state(names: &[&str], current: &str) -> AppState {
        let dir = Path::new("/d");
        let fs = MockFsProvider::with_files(dir, names);
        let current = dir.join(current);
        let set = picker_siblings(&fs, &current).unwrap();
        AppState::new(current, set)
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            process_action(Action::SearchPush(c), state);
        }
    }

    fn query_of(state: &AppState) -> &str {
        state.session.query.as_str()
    }

    fn candidate_names(state: &AppState) -> Vec<String> {
        state.session.candidates().map(|e| e.name.clone()).collect()
    }

    /// Feed key strings through the real chord machine and keymap.
    fn press_keys(state: &mut AppState, keys: &[&str]) -> Option<PickerOutcome> {
        let keymap = KeysConfig::default().keymap();
        let chord = ChordBindings::default();
        let mut outcome = None;
        for key in keys {
            let key = KeyEvent::from_str(key).unwrap();
            if let Some(action) = keymap::resolve_action(key, &mut state.chord, &chord, &keymap) {
                outcome = process_action(action, state);
            }
        }
        outcome
    }

    fn render(state: &mut AppState, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let keymap = KeysConfig::default().keymap();
        let chord = ChordBindings::default();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, state, &theme, &keymap, &chord))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut output = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    #[test]
    fn test_picker_opens_without_current_file() {
        let state = picker_state(&["a.txt", "b.txt", "c.txt"], "b.txt");
        assert_eq!(candidate_names(&state), vec!["a.txt", "c.txt"]);
        assert_eq!(state.session.selected, Some(0));
    }

    #[test]
    fn test_type_then_open() {
        let mut state = picker_state(&["a.txt", "b.txt", "c.txt"], "b.txt");
        type_str(&mut state, "c");
        assert_eq!(candidate_names(&state), vec!["c.txt"]);

        let outcome = process_action(Action::Open, &mut state);
        assert_eq!(outcome, Some(PickerOutcome::Open(PathBuf::from("/d/c.txt"))));
    }

    #[test]
    fn test_backspace_restores_candidates() {
        let mut state = picker_state(&["alpha.rs", "beta.rs", "cur.rs"], "cur.rs");
        type_str(&mut state, "alp");
        assert_eq!(candidate_names(&state), vec!["alpha.rs"]);
        process_action(Action::SearchDeleteToStart, &mut state);
        assert_eq!(query_of(&state), "");
        assert_eq!(candidate_names(&state), vec!["alpha.rs", "beta.rs"]);
    }

    #[test]
    fn test_single_step_wraps() {
        let mut state = picker_state(&["a", "b", "c", "cur"], "cur");
        process_action(Action::MoveSelection(-1), &mut state);
        assert_eq!(state.session.selected, Some(2));
        process_action(Action::MoveSelection(1), &mut state);
        assert_eq!(state.session.selected, Some(0));
    }

    #[test]
    fn test_page_movement_uses_active_list_page_rows() {
        let names: Vec<String> = (0..20).map(|i| format!("file-{i:02}")).collect();
        let mut refs: Vec<&str> = names.iter().map(String::as_str).collect();
        refs.push("zz-current");
        let mut state = picker_state(&refs, "zz-current");
        state.set_active_list_page_rows(8);

        process_action(Action::HalfPageDown, &mut state);
        assert_eq!(state.session.selected, Some(4));
        process_action(Action::PageDown, &mut state);
        assert_eq!(state.session.selected, Some(12));
        process_action(Action::PageUp, &mut state);
        assert_eq!(state.session.selected, Some(4));
    }

    #[test]
    fn test_page_movement_clamps_to_bounds() {
        let mut state = picker_state(&["a", "b", "c", "d", "e", "f", "cur"], "cur");
        state.set_active_list_page_rows(20);

        process_action(Action::PageDown, &mut state);
        assert_eq!(state.session.selected, Some(5));
        process_action(Action::HalfPageDown, &mut state);
        assert_eq!(state.session.selected, Some(5));
        process_action(Action::PageUp, &mut state);
        assert_eq!(state.session.selected, Some(0));
        process_action(Action::MoveBottom, &mut state);
        assert_eq!(state.session.selected, Some(5));
        process_action(Action::MoveTop, &mut state);
        assert_eq!(state.session.selected, Some(0));
    }

    #[test]
    fn test_open_with_no_match_stays_open() {
        let mut state = picker_state(&["a.txt", "b.txt"], "a.txt");
        type_str(&mut state, "zzz");
        assert_eq!(process_action(Action::Open, &mut state), None);
        assert_eq!(state.error.as_deref(), Some("No file matches the query"));
        assert_eq!(
            process_action(Action::OpenInSplit(SplitOrientation::Vertical), &mut state),
            None
        );
    }

    #[test]
    fn test_lone_file_picker_is_empty() {
        let mut state = picker_state(&["only.txt"], "only.txt");
        assert!(candidate_names(&state).is_empty());
        process_action(Action::MoveSelection(1), &mut state);
        assert_eq!(state.session.selected, None);
        assert_eq!(process_action(Action::Open, &mut state), None);
        assert_eq!(
            state.error.as_deref(),
            Some("No sibling files in this directory")
        );
    }

    #[test]
    fn test_cancel_and_quit_dismiss() {
        let mut state = picker_state(&["a", "b"], "a");
        assert_eq!(
            process_action(Action::Cancel, &mut state),
            Some(PickerOutcome::Dismissed)
        );
        assert_eq!(
            process_action(Action::Quit, &mut state),
            Some(PickerOutcome::Dismissed)
        );
    }

    #[test]
    fn test_chord_opens_selection_in_split() {
        let mut state = picker_state(&["a.txt", "b.txt", "c.txt"], "a.txt");
        let outcome = press_keys(&mut state, &["down", "C-w", "s"]);
        assert_eq!(
            outcome,
            Some(PickerOutcome::OpenInSplit(
                PathBuf::from("/d/c.txt"),
                SplitOrientation::Horizontal
            ))
        );
    }

    #[test]
    fn test_chord_prefix_does_not_edit_query() {
        let mut state = picker_state(&["a.txt", "b.txt"], "a.txt");
        press_keys(&mut state, &["C-w"]);
        assert!(state.chord.is_armed());
        assert_eq!(query_of(&state), "");
    }

    #[test]
    fn test_cancelled_chord_key_lands_in_query() {
        let mut state = picker_state(&["x.rs", "y.rs", "cur.rs"], "cur.rs");
        let outcome = press_keys(&mut state, &["C-w", "x"]);
        assert_eq!(outcome, None);
        assert_eq!(query_of(&state), "x");
        assert_eq!(candidate_names(&state), vec!["x.rs"]);
        assert!(!state.chord.is_armed());
    }

    #[test]
    fn test_caret_motion_edits_in_middle() {
        let mut state = picker_state(&["main.rs", "mod.rs", "cur"], "cur");
        type_str(&mut state, "mn");
        process_action(Action::CursorLeft, &mut state);
        type_str(&mut state, "ai");
        assert_eq!(query_of(&state), "main");
        assert_eq!(candidate_names(&state), vec!["main.rs"]);
        process_action(Action::CursorStart, &mut state);
        process_action(Action::SearchDeleteForward, &mut state);
        assert_eq!(query_of(&state), "ain");
    }

    #[test]
    fn test_multibyte_query_editing() {
        let mut state = picker_state(&["café.md", "cafe.md", "cur"], "cur");
        type_str(&mut state, "café");
        assert_eq!(candidate_names(&state), vec!["café.md"]);
        process_action(Action::SearchPop, &mut state);
        assert_eq!(query_of(&state), "caf");
        assert_eq!(candidate_names(&state), vec!["cafe.md", "café.md"]);
    }

    #[test]
    fn test_list_rows_from_list_area() {
        assert_eq!(list_rows_from_list_area(Rect::new(0, 0, 10, 12)), 10);
        assert_eq!(list_rows_from_list_area(Rect::new(0, 0, 10, 1)), 1);
    }

    #[test]
    fn test_draw_shows_candidates_and_hints() {
        let mut state = picker_state(&["a.txt", "b.txt", "c.txt"], "b.txt");
        let output = render(&mut state, 100, 12);
        assert!(output.contains("siblings of b.txt"), "{output}");
        assert!(output.contains("a.txt"));
        assert!(output.contains("c.txt"));
        assert!(output.contains("[enter]"));
        assert!(!output.contains("No file matches"));
        assert_eq!(state.active_list_page_rows(), 12 - 3 - 1 - 2);
    }

    #[test]
    fn test_draw_shows_error_and_armed_chord() {
        let mut state = picker_state(&["a.txt", "b.txt"], "b.txt");
        state.error = Some("No file matches the query".to_string());
        press_keys(&mut state, &["C-w"]);
        let output = render(&mut state, 100, 12);
        assert!(output.contains("! No file matches the query"), "{output}");
        assert!(output.contains("s: below"), "{output}");
    }

    #[test]
    fn test_draw_empty_picker() {
        let mut state = picker_state(&["only.txt"], "only.txt");
        let output = render(&mut state, 100, 10);
        assert!(output.contains("No sibling files"), "{output}");
    }
}
