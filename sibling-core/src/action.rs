use crate::editor::SplitOrientation;

/// Every picker interaction produces an Action. The UI never opens files directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Outcome
    Open,
    OpenInSplit(SplitOrientation),
    Cancel,
    Quit,

    // Search
    SearchPush(char),
    SearchPop,
    SearchDeleteForward,
    SearchDeleteWord,
    SearchDeleteWordForward,
    SearchDeleteToStart,
    SearchDeleteToEnd,

    // Movement
    MoveSelection(i32),
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    MoveTop,
    MoveBottom,

    // Cursor movement (for search input)
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    CursorWordLeft,
    CursorWordRight,

    /// The chord prefix was pressed; nothing else happens yet.
    ChordArmed,
}
