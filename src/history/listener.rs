use std::fmt;

/// Which of the two history stacks an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Back => Direction::Forward,
            Direction::Forward => Direction::Back,
        }
    }

    pub fn is_back(self) -> bool {
        self == Direction::Back
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Back => f.write_str("back"),
            Direction::Forward => f.write_str("forward"),
        }
    }
}

/// Hooks a [`HistoryStore`](super::HistoryStore) calls around its mutations.
///
/// Every hook has a default, so an implementation only overrides what it
/// cares about. The defaults accept everything and observe nothing, which is
/// exactly how a store without a listener behaves.
///
/// Hooks run synchronously inside the triggering call and must not reach back
/// into the store that invoked them.
pub trait HistoryListener<T> {
    /// Gate on `add_back` / `add_forward`, including the push of the old
    /// current value performed by `set_current`.
    fn accept(&mut self, _direction: Direction, _value: &T) -> bool {
        true
    }

    /// Fired after every replacement of the current value.
    fn change_current(&mut self, _before: Option<&T>, _after: Option<&T>) {}

    /// Fired after a stack was emptied.
    fn clear(&mut self, _direction: Direction) {}

    /// Fired after a value was accepted and pushed.
    fn add(&mut self, _direction: Direction, _value: &T) {}

    /// Decides whether the value being navigated away from is folded into
    /// the opposite stack. `direction` is the direction of travel.
    fn accept_current_to_list(&mut self, _direction: Direction, _before: &T) -> bool {
        true
    }
}

type AcceptFn<T> = Box<dyn FnMut(Direction, &T) -> bool>;
type ChangeFn<T> = Box<dyn FnMut(Option<&T>, Option<&T>)>;
type ClearFn = Box<dyn FnMut(Direction)>;
type AddFn<T> = Box<dyn FnMut(Direction, &T)>;

/// A listener assembled from closures. Unset hooks keep the trait defaults.
pub struct FnListener<T> {
    accept: Option<AcceptFn<T>>,
    change_current: Option<ChangeFn<T>>,
    clear: Option<ClearFn>,
    add: Option<AddFn<T>>,
    accept_current_to_list: Option<AcceptFn<T>>,
}

impl<T> Default for FnListener<T> {
    fn default() -> Self {
        Self {
            accept: None,
            change_current: None,
            clear: None,
            add: None,
            accept_current_to_list: None,
        }
    }
}

impl<T> FnListener<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_accept(mut self, f: impl FnMut(Direction, &T) -> bool + 'static) -> Self {
        self.accept = Some(Box::new(f));
        self
    }

    pub fn on_change_current(mut self, f: impl FnMut(Option<&T>, Option<&T>) + 'static) -> Self {
        self.change_current = Some(Box::new(f));
        self
    }

    pub fn on_clear(mut self, f: impl FnMut(Direction) + 'static) -> Self {
        self.clear = Some(Box::new(f));
        self
    }

    pub fn on_add(mut self, f: impl FnMut(Direction, &T) + 'static) -> Self {
        self.add = Some(Box::new(f));
        self
    }

    pub fn on_accept_current_to_list(
        mut self,
        f: impl FnMut(Direction, &T) -> bool + 'static,
    ) -> Self {
        self.accept_current_to_list = Some(Box::new(f));
        self
    }
}

impl<T> HistoryListener<T> for FnListener<T> {
    fn accept(&mut self, direction: Direction, value: &T) -> bool {
        self.accept.as_mut().map_or(true, |f| f(direction, value))
    }

    fn change_current(&mut self, before: Option<&T>, after: Option<&T>) {
        if let Some(f) = self.change_current.as_mut() {
            f(before, after);
        }
    }

    fn clear(&mut self, direction: Direction) {
        if let Some(f) = self.clear.as_mut() {
            f(direction);
        }
    }

    fn add(&mut self, direction: Direction, value: &T) {
        if let Some(f) = self.add.as_mut() {
            f(direction, value);
        }
    }

    fn accept_current_to_list(&mut self, direction: Direction, before: &T) -> bool {
        self.accept_current_to_list
            .as_mut()
            .map_or(true, |f| f(direction, before))
    }
}
