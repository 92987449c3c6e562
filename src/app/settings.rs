#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// Record visited pages in the back stack. Off behaves like a private
    /// window: pages still load, but nothing accumulates.
    pub record_history: bool,
    /// Keep the page being left reachable from the opposite direction when
    /// jumping back or forward.
    pub fold_current: bool,
    /// Page opened by new tabs, if any.
    pub home: Option<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            record_history: true,
            fold_current: true,
            home: None,
        }
    }
}
