use super::settings::NavigationSettings;
use super::tab::{HistorySnapshot, Tab, TabError};
use crate::history::Direction;
use crate::input::Action;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error(transparent)]
    Tab(#[from] TabError),
    #[error("no tab at index {0}")]
    NoSuchTab(usize),
    #[error("cannot close the last tab")]
    LastTab,
}

/// Result of a dispatched [`Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Navigated(Url),
    /// Navigation was not possible; nothing changed.
    Stayed,
    Peeked(Option<Url>),
    Cleared(Direction),
    Reloaded(Option<Url>),
    TabOpened(usize),
    TabClosed(usize),
    TabSwitched(usize),
    History(HistorySnapshot),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Navigated(url) => write!(f, "at {}", url),
            Outcome::Stayed => write!(f, "no history in that direction"),
            Outcome::Peeked(Some(url)) => write!(f, "peek: {}", url),
            Outcome::Peeked(None) => write!(f, "peek: nothing there"),
            Outcome::Cleared(direction) => write!(f, "cleared {} history", direction),
            Outcome::Reloaded(Some(url)) => write!(f, "reloaded {}", url),
            Outcome::Reloaded(None) => write!(f, "nothing to reload"),
            Outcome::TabOpened(index) => write!(f, "opened tab {}", index),
            Outcome::TabClosed(index) => write!(f, "closed tab {}", index),
            Outcome::TabSwitched(index) => write!(f, "switched to tab {}", index),
            Outcome::History(snapshot) => write!(f, "{}", snapshot.to_string().trim_end()),
        }
    }
}

pub struct Browser {
    pub tabs: Vec<Tab>,
    pub active_tab: usize,
    pub settings: NavigationSettings,
    next_tab_id: usize,
}

impl Browser {
    pub fn new(settings: NavigationSettings) -> Self {
        let mut browser = Self {
            tabs: Vec::new(),
            active_tab: 0,
            settings,
            next_tab_id: 0,
        };
        let mut tab = browser.create_tab();
        browser.open_home(&mut tab);
        browser.tabs.push(tab);
        browser
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    pub fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    /// Opens a tab on `url` (or the home page) and makes it active.
    pub fn new_tab(&mut self, url: Option<&str>) -> Result<usize, BrowserError> {
        let mut tab = self.create_tab();
        match url {
            Some(url) => tab.navigate(url)?,
            None => self.open_home(&mut tab),
        }
        self.tabs.push(tab);
        self.active_tab = self.tabs.len() - 1;
        log::info!("opened tab {} of {}", self.active_tab, self.tabs.len());
        Ok(self.active_tab)
    }

    pub fn close_tab(&mut self) -> Result<usize, BrowserError> {
        if self.tabs.len() == 1 {
            return Err(BrowserError::LastTab);
        }
        let closed = self.active_tab;
        self.tabs.remove(closed);
        if self.active_tab >= self.tabs.len() {
            self.active_tab = self.tabs.len() - 1;
        }
        Ok(closed)
    }

    pub fn switch_to(&mut self, index: usize) -> Result<(), BrowserError> {
        if index >= self.tabs.len() {
            return Err(BrowserError::NoSuchTab(index));
        }
        self.active_tab = index;
        Ok(())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, BrowserError> {
        log::debug!("dispatch {:?} on tab {}", action, self.active_tab);
        let outcome = match action {
            Action::Open(url) => {
                let tab = self.active_tab_mut();
                tab.navigate(&url)?;
                current_outcome(tab)
            }
            Action::Back(distance) => {
                let tab = self.active_tab_mut();
                if tab.go_back(distance) {
                    current_outcome(tab)
                } else {
                    Outcome::Stayed
                }
            }
            Action::Forward(distance) => {
                let tab = self.active_tab_mut();
                if tab.go_forward(distance) {
                    current_outcome(tab)
                } else {
                    Outcome::Stayed
                }
            }
            Action::Peek(direction, distance) => {
                Outcome::Peeked(self.active_tab().peek(direction, distance).cloned())
            }
            Action::Clear(direction) => {
                self.active_tab_mut().clear_history(direction);
                Outcome::Cleared(direction)
            }
            Action::Reload => {
                let tab = self.active_tab_mut();
                tab.reload();
                Outcome::Reloaded(tab.url().cloned())
            }
            Action::NewTab(url) => Outcome::TabOpened(self.new_tab(url.as_deref())?),
            Action::CloseTab => Outcome::TabClosed(self.close_tab()?),
            Action::SwitchTab(index) => {
                self.switch_to(index)?;
                Outcome::TabSwitched(index)
            }
            Action::Show => Outcome::History(self.active_tab().snapshot()),
        };
        Ok(outcome)
    }

    fn create_tab(&mut self) -> Tab {
        let tab = Tab::new(self.next_tab_id, &self.settings);
        self.next_tab_id += 1;
        tab
    }

    fn open_home(&self, tab: &mut Tab) {
        if let Some(home) = &self.settings.home {
            if let Err(e) = tab.navigate(home) {
                log::warn!("Failed to open home page {}: {}", home, e);
            }
        }
    }
}

fn current_outcome(tab: &Tab) -> Outcome {
    match tab.url() {
        Some(url) => Outcome::Navigated(url.clone()),
        None => Outcome::Stayed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_line;

    fn run(browser: &mut Browser, script: &str) -> Vec<Outcome> {
        script
            .lines()
            .filter_map(|line| parse_line(line).unwrap())
            .map(|action| browser.dispatch(action).unwrap())
            .collect()
    }

    fn paths(urls: &[Url]) -> Vec<&str> {
        urls.iter().map(|u| u.path()).collect()
    }

    #[test]
    fn test_scripted_session() {
        let mut browser = Browser::new(NavigationSettings::default());
        let outcomes = run(
            &mut browser,
            "open example.com/a\nopen /b\nopen /c\nopen /d\nback 2\npeek forward 2\nforward 5",
        );

        assert_eq!(outcomes[4], Outcome::Navigated(Url::parse("https://example.com/b").unwrap()));
        assert_eq!(
            outcomes[5],
            Outcome::Peeked(Some(Url::parse("https://example.com/c").unwrap()))
        );
        assert_eq!(outcomes[6], Outcome::Stayed);

        let Outcome::History(snapshot) = browser.dispatch(Action::Show).unwrap() else {
            panic!("expected a history snapshot");
        };
        assert_eq!(paths(&snapshot.back), vec!["/a"]);
        assert_eq!(snapshot.current.unwrap().path(), "/b");
        assert_eq!(paths(&snapshot.forward), vec!["/d", "/c"]);
    }

    #[test]
    fn test_open_after_back_drops_forward() {
        let mut browser = Browser::new(NavigationSettings::default());
        run(&mut browser, "open example.com/a\nopen /b\nback\nopen /x");

        let tab = browser.active_tab();
        assert!(tab.history().is_empty_forward());
        assert_eq!(tab.back_list().len(), 1);
    }

    #[test]
    fn test_tabs_keep_separate_history() {
        let mut browser = Browser::new(NavigationSettings::default());
        run(&mut browser, "open example.com/a\nopen /b\ntab new example.org\nopen /y");

        assert_eq!(browser.tabs.len(), 2);
        assert_eq!(browser.active_tab().history().size_back(), 1);

        assert_eq!(browser.dispatch(Action::SwitchTab(0)).unwrap(), Outcome::TabSwitched(0));
        assert_eq!(browser.active_tab().url().unwrap().path(), "/b");

        assert_eq!(browser.dispatch(Action::CloseTab).unwrap(), Outcome::TabClosed(0));
        assert_eq!(browser.active_tab().title, "example.org");
        assert!(matches!(browser.close_tab(), Err(BrowserError::LastTab)));
        assert!(matches!(browser.switch_to(4), Err(BrowserError::NoSuchTab(4))));
    }

    #[test]
    fn test_home_page_for_new_tabs() {
        let settings = NavigationSettings {
            home: Some("start.example".to_string()),
            ..NavigationSettings::default()
        };
        let mut browser = Browser::new(settings);
        assert_eq!(browser.active_tab().url().unwrap().host_str(), Some("start.example"));

        browser.new_tab(None).unwrap();
        assert_eq!(browser.active_tab, 1);
        assert_eq!(browser.active_tab().title, "start.example");
    }

    #[test]
    fn test_new_tab_with_url_skips_home_page() {
        let settings = NavigationSettings {
            home: Some("start.example".to_string()),
            ..NavigationSettings::default()
        };
        let mut browser = Browser::new(settings);
        browser.new_tab(Some("example.org/docs")).unwrap();

        let tab = browser.active_tab();
        assert_eq!(tab.url().unwrap().as_str(), "https://example.org/docs");
        assert!(tab.history().is_empty_back());
    }

    #[test]
    fn test_no_fold_jump_skips_page_left() {
        let settings = NavigationSettings {
            fold_current: false,
            ..NavigationSettings::default()
        };
        let mut browser = Browser::new(settings);
        run(&mut browser, "open example.com/a\nopen /b\nopen /c\nback 2");

        let forward = browser.active_tab().snapshot().forward;
        assert_eq!(paths(&forward), vec!["/b"]);
    }

    #[test]
    fn test_relative_open_in_empty_tab_fails() {
        let mut browser = Browser::new(NavigationSettings::default());
        let err = browser.dispatch(Action::Open("/nowhere".to_string())).unwrap_err();
        assert!(matches!(err, BrowserError::Tab(TabError::NoBase(_))));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Stayed.to_string(), "no history in that direction");
        assert_eq!(Outcome::Cleared(Direction::Forward).to_string(), "cleared forward history");
    }
}
