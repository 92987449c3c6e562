use super::settings::NavigationSettings;
use crate::history::{Direction, HistoryListener};
use std::cell::Cell;
use std::rc::Rc;
use url::Url;

/// Connects a tab's history to its settings and its redraw flag.
pub struct TabListener {
    tab_id: usize,
    record_history: bool,
    fold_current: bool,
    redraw: Rc<Cell<bool>>,
}

impl TabListener {
    pub fn new(tab_id: usize, settings: &NavigationSettings, redraw: Rc<Cell<bool>>) -> Self {
        Self {
            tab_id,
            record_history: settings.record_history,
            fold_current: settings.fold_current,
            redraw,
        }
    }
}

impl HistoryListener<Url> for TabListener {
    fn accept(&mut self, direction: Direction, value: &Url) -> bool {
        if !self.record_history {
            log::debug!("tab {}: not recording {} into {} history", self.tab_id, value, direction);
        }
        self.record_history
    }

    fn change_current(&mut self, before: Option<&Url>, after: Option<&Url>) {
        log::info!(
            "tab {}: {} -> {}",
            self.tab_id,
            before.map_or("(none)", Url::as_str),
            after.map_or("(none)", Url::as_str)
        );
        self.redraw.set(true);
    }

    fn clear(&mut self, direction: Direction) {
        log::debug!("tab {}: cleared {} history", self.tab_id, direction);
        self.redraw.set(true);
    }

    fn add(&mut self, direction: Direction, value: &Url) {
        log::debug!("tab {}: {} history += {}", self.tab_id, direction, value);
    }

    fn accept_current_to_list(&mut self, _direction: Direction, _before: &Url) -> bool {
        self.fold_current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_private_settings_reject_pushes() {
        let settings = NavigationSettings {
            record_history: false,
            ..NavigationSettings::default()
        };
        let mut listener = TabListener::new(0, &settings, Rc::new(Cell::new(false)));
        assert!(!listener.accept(Direction::Back, &url("https://example.com")));
        assert!(listener.accept_current_to_list(Direction::Back, &url("https://example.com")));
    }

    #[test]
    fn test_change_current_requests_redraw() {
        let redraw = Rc::new(Cell::new(false));
        let mut listener = TabListener::new(0, &NavigationSettings::default(), redraw.clone());
        listener.change_current(None, Some(&url("https://example.com")));
        assert!(redraw.get());
    }
}
