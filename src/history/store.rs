use super::index::resolve;
use super::listener::{Direction, HistoryListener};
use std::fmt;

/// Where the previous current value ended up after `set_current`.
enum Displaced<T> {
    Unset,
    Pushed,
    Rejected(T),
}

/// Browser-style back/forward history over arbitrary values.
///
/// Both stacks are read from their last slot, so a single [`resolve`]
/// computation serves both directions. `back` is in chronological order.
/// `forward` is filled in reverse chronological order by `go_back`, with the
/// value that was current before the jump pushed last, so `go_forward(1)`
/// always returns to where `go_back` started.
pub struct HistoryStore<T> {
    current: Option<T>,
    back: Vec<T>,
    forward: Vec<T>,
    listener: Option<Box<dyn HistoryListener<T>>>,
}

impl<T> Default for HistoryStore<T> {
    fn default() -> Self {
        Self {
            current: None,
            back: Vec::new(),
            forward: Vec::new(),
            listener: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HistoryStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("current", &self.current)
            .field("back", &self.back)
            .field("forward", &self.forward)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl<T> HistoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: impl HistoryListener<T> + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
            ..Self::default()
        }
    }

    /// Installs `listener`, dropping the previous one.
    pub fn set_listener(&mut self, listener: impl HistoryListener<T> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn listener(&self) -> Option<&dyn HistoryListener<T>> {
        self.listener.as_deref()
    }

    pub fn listener_mut(&mut self) -> Option<&mut (dyn HistoryListener<T> + 'static)> {
        self.listener.as_deref_mut()
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn HistoryListener<T>>> {
        self.listener.take()
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Makes `value` the current entry.
    ///
    /// The forward stack is always discarded. The old current value is offered
    /// to the back stack through the listener's `accept` gate, but `value`
    /// becomes current whether or not that push was accepted.
    ///
    /// When there is no current value yet, nothing is pushed: the stacks hold
    /// plain `T` values and never an absent marker.
    pub fn set_current(&mut self, value: T) -> &mut Self {
        self.clear_forward();

        let displaced = match self.current.take() {
            Some(old) => match self.push(Direction::Back, old) {
                Ok(()) => Displaced::Pushed,
                Err(old) => Displaced::Rejected(old),
            },
            None => Displaced::Unset,
        };
        self.current = Some(value);

        if let Some(listener) = self.listener.as_mut() {
            let before = match &displaced {
                Displaced::Unset => None,
                Displaced::Pushed => self.back.last(),
                Displaced::Rejected(old) => Some(old),
            };
            listener.change_current(before, self.current.as_ref());
        }
        self
    }

    pub fn add_back(&mut self, value: T) -> bool {
        self.push(Direction::Back, value).is_ok()
    }

    pub fn add_forward(&mut self, value: T) -> bool {
        self.push(Direction::Forward, value).is_ok()
    }

    pub fn clear_back(&mut self) -> &mut Self {
        self.clear(Direction::Back)
    }

    pub fn clear_forward(&mut self) -> &mut Self {
        self.clear(Direction::Forward)
    }

    pub fn size_back(&self) -> usize {
        self.back.len()
    }

    pub fn size_forward(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty_back(&self) -> bool {
        self.back.is_empty()
    }

    pub fn is_empty_forward(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn can_go_back(&self, distance: usize) -> bool {
        resolve(self.back.len(), distance).is_some()
    }

    pub fn can_go_forward(&self, distance: usize) -> bool {
        resolve(self.forward.len(), distance).is_some()
    }

    /// The entry `distance` steps back, without moving.
    pub fn get_back(&self, distance: usize) -> Option<&T> {
        resolve(self.back.len(), distance).and_then(|slot| self.back.get(slot))
    }

    /// The entry `distance` steps forward, without moving.
    pub fn get_forward(&self, distance: usize) -> Option<&T> {
        resolve(self.forward.len(), distance).and_then(|slot| self.forward.get(slot))
    }

    /// Back stack, oldest entry first.
    pub fn back_entries(&self) -> &[T] {
        &self.back
    }

    /// Forward stack in storage order; the last slot is what `go_forward(1)`
    /// returns.
    pub fn forward_entries(&self) -> &[T] {
        &self.forward
    }

    /// Moves `distance` steps back and returns the new current value.
    ///
    /// Returns `None` and leaves the store untouched if there is not enough
    /// back history.
    pub fn go_back(&mut self, distance: usize) -> Option<&T> {
        self.navigate(Direction::Back, distance)
    }

    /// Moves `distance` steps forward and returns the new current value.
    ///
    /// Returns `None` and leaves the store untouched if there is not enough
    /// forward history.
    pub fn go_forward(&mut self, distance: usize) -> Option<&T> {
        self.navigate(Direction::Forward, distance)
    }

    fn push(&mut self, direction: Direction, value: T) -> Result<(), T> {
        if let Some(listener) = self.listener.as_mut() {
            if !listener.accept(direction, &value) {
                log::debug!("listener rejected push onto {} stack", direction);
                return Err(value);
            }
        }

        let stack = match direction {
            Direction::Back => &mut self.back,
            Direction::Forward => &mut self.forward,
        };
        stack.push(value);

        if let (Some(listener), Some(added)) = (self.listener.as_mut(), stack.last()) {
            listener.add(direction, added);
        }
        Ok(())
    }

    fn clear(&mut self, direction: Direction) -> &mut Self {
        match direction {
            Direction::Back => self.back.clear(),
            Direction::Forward => self.forward.clear(),
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.clear(direction);
        }
        self
    }

    // Travelling `direction` pops the target out of the source stack. The
    // entries stepped over are reversed onto the opposite stack, then the
    // value being left is pushed on top of them. Going back also drops the
    // old forward stack first; going forward keeps the back stack below.
    fn navigate(&mut self, direction: Direction, distance: usize) -> Option<&T> {
        let (source, target) = match direction {
            Direction::Back => (&mut self.back, &mut self.forward),
            Direction::Forward => (&mut self.forward, &mut self.back),
        };
        let slot = resolve(source.len(), distance)?;

        let destination = source.remove(slot);
        let skipped = source.split_off(slot);
        let before = self.current.replace(destination);

        let fold = match self.listener.as_mut() {
            Some(listener) => {
                listener.change_current(before.as_ref(), self.current.as_ref());
                before
                    .as_ref()
                    .is_some_and(|value| listener.accept_current_to_list(direction, value))
            }
            None => before.is_some(),
        };

        log::debug!(
            "went {} {} (slot {}), moved {} skipped entries{}",
            direction,
            distance,
            slot,
            skipped.len(),
            if fold { " and the previous current" } else { "" }
        );

        if direction.is_back() {
            target.clear();
        }
        target.extend(skipped.into_iter().rev());
        if fold {
            target.extend(before);
        }

        self.current.as_ref()
    }
}
