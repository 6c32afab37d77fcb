use crate::editor::SplitOrientation;
use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// The two-key split chord: a prefix key followed by one completing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordBindings {
    pub prefix: KeyEvent,
    pub completions: HashMap<KeyEvent, SplitOrientation>,
}

impl Default for ChordBindings {
    fn default() -> Self {
        Self {
            prefix: KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
            completions: HashMap::from([
                (
                    KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE),
                    SplitOrientation::Horizontal,
                ),
                (
                    KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE),
                    SplitOrientation::Vertical,
                ),
            ]),
        }
    }
}

impl ChordBindings {
    /// Completion for `key`, tolerating Control still held and Shift-uppercased letters.
    pub fn completion(&self, key: KeyEvent) -> Option<SplitOrientation> {
        let relaxed = key.without_control();
        let lowered = match relaxed.code {
            KeyCode::Char(c) if c.is_uppercase() => {
                let lower = c.to_lowercase().next().unwrap_or(c);
                Some(KeyEvent::new(KeyCode::Char(lower), relaxed.modifiers))
            }
            _ => None,
        };

        [Some(key), Some(relaxed), lowered]
            .into_iter()
            .flatten()
            .find_map(|candidate| self.completions.get(&candidate).copied())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChordState {
    #[default]
    Idle,
    Armed,
}

/// What the picker should do with a key after the chord machine has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordOutcome {
    /// The key armed the chord and must not reach the search field.
    Consumed,
    /// The chord completed.
    Split(SplitOrientation),
    /// Not part of a chord; handle it as a regular key.
    PassThrough,
}

impl ChordState {
    /// Feed one key-down event.
    ///
    /// A key that cancels an armed chord is passed through rather than swallowed,
    /// so typing `C-w x` still adds `x` to the query.
    pub fn feed(&mut self, key: KeyEvent, bindings: &ChordBindings) -> ChordOutcome {
        match self {
            ChordState::Armed => {
                *self = ChordState::Idle;
                if let Some(orientation) = bindings.completion(key) {
                    return ChordOutcome::Split(orientation);
                }
                log::debug!("chord cancelled by {key}");
                self.feed(key, bindings)
            }
            ChordState::Idle if key == bindings.prefix => {
                *self = ChordState::Armed;
                ChordOutcome::Consumed
            }
            ChordState::Idle => ChordOutcome::PassThrough,
        }
    }

    pub fn is_armed(self) -> bool {
        self == ChordState::Armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_prefix_arms_and_is_consumed() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        assert_eq!(state.feed(ctrl('w'), &bindings), ChordOutcome::Consumed);
        assert!(state.is_armed());
    }

    #[test]
    fn test_completion_fires_split() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        state.feed(ctrl('w'), &bindings);
        assert_eq!(
            state.feed(key('v'), &bindings),
            ChordOutcome::Split(SplitOrientation::Vertical)
        );
        assert_eq!(state, ChordState::Idle);

        state.feed(ctrl('w'), &bindings);
        assert_eq!(
            state.feed(key('s'), &bindings),
            ChordOutcome::Split(SplitOrientation::Horizontal)
        );
    }

    #[test]
    fn test_completion_with_control_held() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        state.feed(ctrl('w'), &bindings);
        assert_eq!(
            state.feed(ctrl('s'), &bindings),
            ChordOutcome::Split(SplitOrientation::Horizontal)
        );
    }

    #[test]
    fn test_completion_with_shift_held() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        state.feed(ctrl('w'), &bindings);
        assert_eq!(
            state.feed(key('V'), &bindings),
            ChordOutcome::Split(SplitOrientation::Vertical)
        );
    }

    #[test]
    fn test_other_key_cancels_and_passes_through() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        state.feed(ctrl('w'), &bindings);
        assert_eq!(state.feed(key('x'), &bindings), ChordOutcome::PassThrough);
        assert_eq!(state, ChordState::Idle);
    }

    #[test]
    fn test_completing_key_without_prefix_is_plain_input() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        assert_eq!(state.feed(key('v'), &bindings), ChordOutcome::PassThrough);
        assert_eq!(state, ChordState::Idle);
    }

    #[test]
    fn test_prefix_twice_stays_armed() {
        let bindings = ChordBindings::default();
        let mut state = ChordState::Idle;
        state.feed(ctrl('w'), &bindings);
        assert_eq!(state.feed(ctrl('w'), &bindings), ChordOutcome::Consumed);
        assert!(state.is_armed());
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = ChordBindings {
            prefix: ctrl('x'),
            completions: HashMap::from([(key('2'), SplitOrientation::Horizontal)]),
        };
        let mut state = ChordState::Idle;
        assert_eq!(state.feed(ctrl('w'), &bindings), ChordOutcome::PassThrough);
        assert_eq!(state.feed(ctrl('x'), &bindings), ChordOutcome::Consumed);
        assert_eq!(
            state.feed(key('2'), &bindings),
            ChordOutcome::Split(SplitOrientation::Horizontal)
        );
    }
}
