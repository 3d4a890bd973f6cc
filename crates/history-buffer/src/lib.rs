/// Linear undo/redo history over arbitrary items.
///
/// Provides a `HistoryBuffer` that remembers items in order, tracks a
/// current position for undo/redo navigation, and optionally evicts the
/// oldest entries once a configured capacity is exceeded. Every state
/// transition is reported synchronously to registered observers.
pub mod buffer;
pub mod config;
pub mod error;
pub mod event;
pub mod observer;

pub use buffer::HistoryBuffer;
pub use config::HistoryConfig;
pub use error::HistoryError;
pub use event::{HistoryEvent, HistoryEventKind};
pub use observer::SubscriptionId;
