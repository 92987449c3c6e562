pub mod browser;
pub mod listener;
pub mod settings;
pub mod tab;

pub use browser::{Browser, BrowserError, Outcome};
pub use listener::TabListener;
pub use settings::NavigationSettings;
pub use tab::{HistorySnapshot, Tab, TabError};
