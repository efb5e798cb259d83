pub mod application;
pub mod dom;
pub mod error;
pub mod history;
pub mod loader;
pub mod notify;
pub mod query;
pub mod router;
pub mod view;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{Action, Application, ApplicationConfig};
pub use dom::{Anchor, Container, Document, HeaderBar, MountPoint};
pub use history::{History, HistoryState, MemoryHistory, PopStateEvent};
pub use notify::{AlertQueue, Notifier};
pub use query::QueryMap;
pub use router::Router;
pub use view::{View, ViewFactory};
