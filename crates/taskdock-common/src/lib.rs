pub mod errors;
pub mod types;

pub use errors::{ConfigError, DirectoryError, ProviderError, TaskdockError};
pub use types::{MonitorId, Timestamp, WindowHandle, WindowState, WorkspaceId};

pub type Result<T> = std::result::Result<T, TaskdockError>;
