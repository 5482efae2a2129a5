pub mod apps;
pub mod commands;
pub mod dock;
pub mod group;
pub mod provider;
pub mod store;
pub mod window;

pub use apps::{
    AppKey, AppResolver, Application, ApplicationDirectory, LauncherOverride, MemoryDirectory,
};
pub use commands::{ClickButton, CycleDirection, DockCommand};
pub use dock::{
    Dock, DockObserver, DockOptions, DockSettings, DockStore, MiddleClick, NullObserver, NullStore,
};
pub use group::Group;
pub use provider::{
    MemoryProvider, NoopProvider, WindowIdentity, WindowSpec, WindowingEvent, WindowingProvider,
};
pub use store::{OrderedKeyStore, StoreError};
pub use window::{VisibilityFilter, WindowBinding};
