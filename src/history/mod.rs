pub mod index;
pub mod listener;
pub mod store;

pub use index::resolve;
pub use listener::{Direction, FnListener, HistoryListener};
pub use store::HistoryStore;
