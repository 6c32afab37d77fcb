pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliEditorProvider;
pub use provider::{EditorProvider, SplitOrientation};
