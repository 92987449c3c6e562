use super::listener::TabListener;
use super::settings::NavigationSettings;
use crate::history::{Direction, HistoryStore};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Cannot resolve relative URL '{0}' without a current page")]
    NoBase(String),
}

/// A point-in-time copy of a tab's history, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    /// Oldest first.
    pub back: Vec<Url>,
    pub current: Option<Url>,
    /// In `go_forward` distance order.
    pub forward: Vec<Url>,
}

impl fmt::Display for HistorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.back.len();
        for (i, url) in self.back.iter().enumerate() {
            writeln!(f, "  <- {} ({})", url, depth - i)?;
        }
        match &self.current {
            Some(url) => writeln!(f, "  *  {}", url)?,
            None => writeln!(f, "  *  (none)")?,
        }
        for (i, url) in self.forward.iter().enumerate() {
            writeln!(f, "  -> {} ({})", url, i + 1)?;
        }
        Ok(())
    }
}

pub struct Tab {
    pub id: usize,
    pub title: String,
    history: HistoryStore<Url>,
    redraw: Rc<Cell<bool>>,
    reloads: usize,
}

impl Tab {
    pub fn new(id: usize, settings: &NavigationSettings) -> Self {
        let redraw = Rc::new(Cell::new(false));
        let listener = TabListener::new(id, settings, redraw.clone());
        Self {
            id,
            title: String::from("New Tab"),
            history: HistoryStore::with_listener(listener),
            redraw,
            reloads: 0,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryStore<Url> {
        &self.history
    }

    /// Opens `input`, discarding any forward history.
    ///
    /// Input without a scheme is treated as an https host; input starting
    /// with `/`, `.`, `?` or `#` is resolved against the current page.
    pub fn navigate(&mut self, input: &str) -> Result<(), TabError> {
        let url = self.resolve_url(input)?;
        self.history.set_current(url);
        self.update_title();
        Ok(())
    }

    pub fn go_back(&mut self, distance: usize) -> bool {
        let moved = self.history.go_back(distance).is_some();
        if moved {
            self.update_title();
        }
        moved
    }

    pub fn go_forward(&mut self, distance: usize) -> bool {
        let moved = self.history.go_forward(distance).is_some();
        if moved {
            self.update_title();
        }
        moved
    }

    pub fn peek(&self, direction: Direction, distance: usize) -> Option<&Url> {
        match direction {
            Direction::Back => self.history.get_back(distance),
            Direction::Forward => self.history.get_forward(distance),
        }
    }

    pub fn clear_history(&mut self, direction: Direction) {
        match direction {
            Direction::Back => self.history.clear_back(),
            Direction::Forward => self.history.clear_forward(),
        };
    }

    /// Reloads the current page without touching history.
    pub fn reload(&mut self) -> bool {
        if self.history.current().is_none() {
            return false;
        }
        self.reloads += 1;
        self.redraw.set(true);
        true
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.get()
    }

    /// Returns and resets the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.replace(false)
    }

    /// Entries for a back-button menu; entry `i` is what `go_back(i + 1)` reaches.
    pub fn back_list(&self) -> Vec<&Url> {
        self.history.back_entries().iter().rev().collect()
    }

    /// Entries for a forward-button menu; entry `i` is what `go_forward(i + 1)`
    /// reaches.
    pub fn forward_list(&self) -> Vec<&Url> {
        self.history.forward_entries().iter().rev().collect()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            back: self.history.back_entries().to_vec(),
            current: self.history.current().cloned(),
            forward: self.forward_list().into_iter().cloned().collect(),
        }
    }

    fn resolve_url(&self, input: &str) -> Result<Url, TabError> {
        let input = input.trim();
        if input.starts_with(['/', '.', '?', '#']) {
            let base = self
                .history
                .current()
                .ok_or_else(|| TabError::NoBase(input.to_string()))?;
            return Ok(base.join(input)?);
        }

        let url_str = if !input.contains("://") {
            format!("https://{}", input)
        } else {
            input.to_string()
        };
        Ok(Url::parse(&url_str)?)
    }

    fn update_title(&mut self) {
        self.title = match self.history.current() {
            Some(url) => url.host_str().unwrap_or("Unknown").to_string(),
            None => String::from("New Tab"),
        };
    }
}
