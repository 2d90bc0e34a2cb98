// Adapters layer: concrete implementations for external systems.

pub mod host;
pub mod storage;

pub use host::StdoutHost;
pub use storage::LocalStorage;
