use crate::{
    chord::ChordState,
    editor::SplitOrientation,
    query::QueryInput,
    siblings::{Direction, Entry, SiblingSet},
};
use std::path::PathBuf;

/// Transient state of one picker: the full pool, the live query, and the filtered view of it.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    pool: Vec<Entry>,
    pub query: QueryInput,
    /// Indices into the pool, in pool order.
    pub filtered: Vec<usize>,
    pub selected: Option<usize>,
    pub scroll_offset: usize,
}

impl SelectionSession {
    /// Start a session over a sibling set built without the current file.
    pub fn open(siblings: SiblingSet) -> Self {
        let pool = siblings.ordered;
        let filtered: Vec<usize> = (0..pool.len()).collect();
        let selected = if filtered.is_empty() { None } else { Some(0) };
        Self {
            pool,
            query: QueryInput::new(),
            filtered,
            selected,
            scroll_offset: 0,
        }
    }

    pub fn pool(&self) -> &[Entry] {
        &self.pool
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.filtered.iter().map(|&idx| &self.pool[idx])
    }

    pub fn candidate_count(&self) -> usize {
        self.filtered.len()
    }

    /// Replace the query and re-filter.
    pub fn set_query(&mut self, query: &str) {
        self.query.set(query);
        self.apply_filter();
    }

    /// Run a text edit against the query, re-filtering if the text changed.
    pub fn edit_query(&mut self, edit: impl FnOnce(&mut QueryInput)) {
        let before = self.query.text.clone();
        edit(&mut self.query);
        if self.query.text != before {
            self.apply_filter();
        }
    }

    /// Filter the whole pool, never the previous result, so shortening the query brings entries back.
    fn apply_filter(&mut self) {
        let needle = self.query.as_str().to_lowercase();
        self.filtered = self
            .pool
            .iter()
            .enumerate()
            .filter(|(_, entry)| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        self.selected = if self.filtered.is_empty() {
            None
        } else {
            Some(0)
        };
        self.scroll_offset = 0;
    }

    /// Move one row, wrapping past either end.
    pub fn move_cursor(&mut self, direction: Direction) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0).min(len - 1);
        self.selected = Some(match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        });
    }

    /// Move by `delta` rows, clamping to the list bounds.
    pub fn move_by(&mut self, delta: i32) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        let step = delta.unsigned_abs() as usize;
        self.selected = Some(if delta > 0 {
            current.saturating_add(step).min(len - 1)
        } else {
            current.saturating_sub(step)
        });
    }

    pub fn move_to_top(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn move_to_bottom(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = Some(self.filtered.len() - 1);
        }
    }

    /// The highlighted candidate, if any.
    pub fn commit(&self) -> Option<&Entry> {
        let sel = self.selected?;
        let &idx = self.filtered.get(sel)?;
        self.pool.get(idx)
    }

    pub fn commit_in_split(&self, orientation: SplitOrientation) -> Option<(&Entry, SplitOrientation)> {
        self.commit().map(|entry| (entry, orientation))
    }

    /// Keep the selection inside the viewport, one row away from either edge when there is room.
    pub fn update_scroll_offset_for_selection(&mut self, viewport_rows: usize) {
        let len = self.filtered.len();
        if len == 0 {
            self.scroll_offset = 0;
            return;
        }

        let viewport_rows = viewport_rows.max(1);
        let max_offset = len.saturating_sub(viewport_rows);
        let selected = self.selected.unwrap_or(0).min(len - 1);
        let anchor_top = usize::from(viewport_rows > 2);
        let anchor_bottom = viewport_rows.saturating_sub(2);

        let top_bound = self.scroll_offset.saturating_add(anchor_top);
        let bottom_bound = self.scroll_offset.saturating_add(anchor_bottom);

        if selected < top_bound {
            self.scroll_offset = selected.saturating_sub(anchor_top);
        } else if selected > bottom_bound {
            self.scroll_offset = selected.saturating_sub(anchor_bottom);
        }

        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Everything the picker loop reads and mutates. Owned by the loop, never global.
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_file: PathBuf,
    pub session: SelectionSession,
    pub chord: ChordState,
    pub error: Option<String>,
    active_list_page_rows: usize,
}

impl AppState {
    pub fn new(current_file: PathBuf, siblings: SiblingSet) -> Self {
        Self {
            current_file,
            session: SelectionSession::open(siblings),
            chord: ChordState::Idle,
            error: None,
            active_list_page_rows: 10,
        }
    }

    pub fn set_active_list_page_rows(&mut self, rows: usize) {
        self.active_list_page_rows = rows.max(1);
    }

    pub fn active_list_page_rows(&self) -> usize {
        self.active_list_page_rows
    }
}
