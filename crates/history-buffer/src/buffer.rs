/// Linear undo/redo history with an optional capacity bound.
///
/// Items are kept oldest first together with a cursor pointing at the
/// current item. Remembering while the cursor is not at the end discards
/// the redo branch before appending. When a capacity is set, the oldest
/// items are evicted as soon as a remember pushes the length past it.
use std::fmt;
use std::num::NonZeroUsize;

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::event::{HistoryEvent, HistoryEventKind};
use crate::observer::{Observers, SubscriptionId};

/// In-memory history of remembered items.
///
/// Not internally synchronized: callers sharing a buffer across threads
/// must serialize every call themselves. Observers run synchronously
/// inside the mutating call that triggered them and only see the event;
/// reaching back into the buffer from a callback (e.g. through a
/// `RefCell`) is the caller's responsibility.
pub struct HistoryBuffer<T> {
    /// Remembered items, oldest first.
    items: Vec<T>,
    /// Index of the current item. `None` when there is no current item.
    cursor: Option<usize>,
    /// Maximum number of items. `None` = unbounded.
    capacity: Option<NonZeroUsize>,
    /// Callbacks notified on every transition.
    observers: Observers<T>,
}

impl<T> fmt::Debug for HistoryBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("len", &self.items.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .field("observers", &self.observers)
            .finish()
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> HistoryBuffer<T> {
    /// Creates an empty history, bounded when `capacity` is given.
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            capacity,
            observers: Observers::new(),
        }
    }

    /// Creates an empty history that never evicts.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Creates an empty history holding at most `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidCapacity` if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, HistoryError> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(HistoryError::InvalidCapacity(capacity))?;
        Ok(Self::new(Some(capacity)))
    }

    /// Creates an empty history bounded by `config.capacity`.
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Maximum number of items kept. `None` = unbounded.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Number of remembered items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are remembered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether there is a current item, i.e. `current_item` would succeed.
    pub fn has_current(&self) -> bool {
        self.cursor.is_some()
    }

    /// Position of the current item, oldest item being 0.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// The item at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::EmptyHistory` if there is no current item.
    pub fn current_item(&self) -> Result<&T, HistoryError> {
        self.cursor
            .map(|index| &self.items[index])
            .ok_or(HistoryError::EmptyHistory)
    }

    /// Whether `undo` would move the cursor.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    /// Whether `repeat` would move the cursor.
    pub fn can_repeat(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.items.len())
    }

    /// Iterates the remembered items, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Registers `callback` for transitions of `kind`.
    pub fn subscribe<F>(&mut self, kind: HistoryEventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&HistoryEvent<T>) + 'static,
    {
        self.observers.subscribe(kind, callback)
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of callbacks registered for `kind`.
    pub fn subscriber_count(&self, kind: HistoryEventKind) -> usize {
        self.observers.subscriber_count(kind)
    }
}

impl<T: Clone> HistoryBuffer<T> {
    /// Remembers `item` as the new current item.
    ///
    /// Everything after the cursor is discarded first. Emits `Remembered`,
    /// followed by `Overflowed` if the capacity was exceeded.
    pub fn remember_new(&mut self, item: T) {
        let event = match self.current_item() {
            Ok(previous) => {
                HistoryEvent::both(HistoryEventKind::Remembered, item.clone(), previous.clone())
            }
            Err(_) => HistoryEvent::only_current(HistoryEventKind::Remembered, item.clone()),
        };

        let keep = self.cursor.map_or(0, |index| index + 1);
        let discarded = self.items.len() - keep;
        self.items.truncate(keep);
        self.items.push(item);
        self.cursor = Some(self.items.len() - 1);
        tracing::trace!(discarded, len = self.items.len(), "remembered new item");

        self.observers.notify(&event);
        self.overflow_if_necessary(&event);
    }

    /// Evicts the oldest item once the length exceeds the capacity.
    ///
    /// Only called right after an append. The length never exceeded the
    /// capacity before it, so a single eviction restores the bound, and the
    /// cursor sits on the last item and survives it.
    fn overflow_if_necessary(&mut self, remembered: &HistoryEvent<T>) {
        let Some(capacity) = self.capacity else {
            return;
        };
        if self.items.len() <= capacity.get() {
            return;
        }

        self.items.remove(0);
        self.cursor = self.cursor.and_then(|index| index.checked_sub(1));
        tracing::debug!(capacity = capacity.get(), "history overflowed");

        self.observers
            .notify(&remembered.with_kind(HistoryEventKind::Overflowed));
    }

    /// Changes the capacity bound, evicting the oldest items right away
    /// if the history is longer than the new bound.
    ///
    /// When items are evicted an `Overflowed` event is emitted carrying the
    /// current item after the trim and the one before it. If the current
    /// item itself was evicted, the oldest kept item becomes current.
    pub fn set_capacity(&mut self, capacity: Option<NonZeroUsize>) {
        tracing::debug!(?capacity, len = self.items.len(), "history capacity changed");
        self.capacity = capacity;

        let Some(capacity) = capacity else {
            return;
        };
        let excess = self.items.len().saturating_sub(capacity.get());
        if excess == 0 {
            return;
        }

        let previous = self.current_item().ok().cloned();
        self.items.drain(..excess);
        self.cursor = self.cursor.map(|index| index.saturating_sub(excess));
        tracing::debug!(excess, capacity = capacity.get(), "history trimmed to new capacity");

        // The cursor only moves within the kept items, so a current item
        // exists after the trim iff one existed before it.
        let (Some(previous), Ok(current)) = (previous, self.current_item()) else {
            return;
        };
        let event = HistoryEvent::both(HistoryEventKind::Overflowed, current.clone(), previous);
        self.observers.notify(&event);
    }

    /// Removes the current item and steps the cursor back by one.
    ///
    /// No-op when there is no current item. Forgetting the oldest item
    /// leaves no current item even if newer items remain; those are
    /// discarded by the next `remember_new`.
    pub fn forget_current(&mut self) {
        let Some(index) = self.cursor else {
            return;
        };

        let forgotten = self.items.remove(index);
        self.cursor = index.checked_sub(1);
        let event = match self.cursor {
            Some(current) => HistoryEvent::both(
                HistoryEventKind::Forgotten,
                self.items[current].clone(),
                forgotten,
            ),
            None => HistoryEvent::only_previous(HistoryEventKind::Forgotten, forgotten),
        };
        tracing::trace!(cursor = ?self.cursor, len = self.items.len(), "forgot current item");

        self.observers.notify(&event);
    }

    /// Moves the cursor one step toward older items.
    pub fn undo(&mut self) {
        let Some(index) = self.cursor.filter(|&index| index > 0) else {
            return;
        };

        let event = HistoryEvent::both(
            HistoryEventKind::Undid,
            self.items[index - 1].clone(),
            self.items[index].clone(),
        );
        self.cursor = Some(index - 1);
        tracing::trace!(cursor = index - 1, "undid");

        self.observers.notify(&event);
    }

    /// Moves the cursor one step toward newer items (redo).
    pub fn repeat(&mut self) {
        let Some(index) = self.cursor.filter(|&index| index + 1 < self.items.len()) else {
            return;
        };

        let event = HistoryEvent::both(
            HistoryEventKind::Repeated,
            self.items[index + 1].clone(),
            self.items[index].clone(),
        );
        self.cursor = Some(index + 1);
        tracing::trace!(cursor = index + 1, "repeated");

        self.observers.notify(&event);
    }

    /// Snapshot of all items, oldest first.
    ///
    /// The returned `Vec` is independent of the buffer.
    pub fn get_all(&self) -> Vec<T> {
        self.items.clone()
    }
}
