pub mod local;
pub mod mock;
pub mod provider;

pub use local::LocalFsProvider;
pub use provider::FsProvider;
