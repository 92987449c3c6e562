pub mod app;
pub mod history;
pub mod input;

pub use app::browser::Browser;
pub use history::{Direction, HistoryListener, HistoryStore};
