pub mod action;
pub mod chord;
pub mod config;
pub mod editor;
pub mod fs;
pub mod keyboard;
pub mod query;
pub mod siblings;
pub mod state;

// Re-export commonly used types at crate root
pub use action::Action;
pub use chord::{ChordBindings, ChordOutcome, ChordState};
pub use config::Config;
pub use editor::{EditorProvider, SplitOrientation};
pub use fs::FsProvider;
pub use keyboard::KeyEvent;
pub use siblings::{Direction, Entry, Inclusion, SiblingSet};
pub use state::{AppState, SelectionSession};
