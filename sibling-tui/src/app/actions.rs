use sibling_core::{SplitOrientation, state::AppState};

use super::PickerOutcome;

pub(super) fn handle_search_push(state: &mut AppState, c: char) {
    state.session.edit_query(|q| q.insert_char(c));
}

pub(super) fn handle_search_pop(state: &mut AppState) {
    state.session.edit_query(|q| {
        q.backspace();
    });
}

pub(super) fn handle_search_delete_forward(state: &mut AppState) {
    state.session.edit_query(|q| {
        q.delete_forward_char();
    });
}

pub(super) fn handle_search_delete_word(state: &mut AppState) {
    state.session.edit_query(|q| q.delete_word());
}

pub(super) fn handle_search_delete_word_forward(state: &mut AppState) {
    state.session.edit_query(|q| q.delete_word_forward());
}

pub(super) fn handle_search_delete_to_start(state: &mut AppState) {
    state.session.edit_query(|q| q.delete_to_start());
}

pub(super) fn handle_search_delete_to_end(state: &mut AppState) {
    state.session.edit_query(|q| q.delete_to_end());
}

/// Nothing selected leaves the picker open with a hint.
fn report_empty_commit(state: &mut AppState) {
    let message = if state.session.pool().is_empty() {
        "No sibling files in this directory"
    } else {
        "No file matches the query"
    };
    state.error = Some(message.to_string());
}

pub(super) fn handle_open(state: &mut AppState) -> Option<PickerOutcome> {
    if let Some(entry) = state.session.commit() {
        log::debug!("picker committed {}", entry.path.display());
        return Some(PickerOutcome::Open(entry.path.clone()));
    }
    report_empty_commit(state);
    None
}

pub(super) fn handle_open_in_split(
    state: &mut AppState,
    orientation: SplitOrientation,
) -> Option<PickerOutcome> {
    if let Some((entry, orientation)) = state.session.commit_in_split(orientation) {
        log::debug!(
            "picker committed {} in {orientation} split",
            entry.path.display()
        );
        return Some(PickerOutcome::OpenInSplit(entry.path.clone(), orientation));
    }
    report_empty_commit(state);
    None
}
