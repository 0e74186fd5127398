pub mod builder;
pub mod network;
pub mod spec;

pub use builder::LayerItem;
pub use network::{CacheGuard, LoggingLevel, Network};
pub use spec::{LayerEntry, NetworkSpec};
