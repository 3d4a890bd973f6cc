/// Synchronous observer list used to deliver `HistoryEvent`s.
use std::fmt;

use crate::event::{HistoryEvent, HistoryEventKind};

/// Handle returned by `Observers::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&HistoryEvent<T>)>;

struct Subscription<T> {
    id: SubscriptionId,
    kind: HistoryEventKind,
    callback: Callback<T>,
}

/// Callbacks registered per event kind.
///
/// Callbacks run in-line with `notify`, in the order they were
/// registered. There is no queueing and no internal synchronization.
pub struct Observers<T> {
    subscriptions: Vec<Subscription<T>>,
    next_id: u64,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscriptions", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: HistoryEventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&HistoryEvent<T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            callback: Box::new(callback),
        });
        tracing::trace!(?id, %kind, "observer subscribed");
        id
    }

    /// Removes a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            tracing::trace!(?id, "observer unsubscribed");
        }
        removed
    }

    /// Number of callbacks registered for `kind`.
    pub fn subscriber_count(&self, kind: HistoryEventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Delivers `event` to every callback registered for its kind.
    pub(crate) fn notify(&mut self, event: &HistoryEvent<T>) {
        let kind = event.kind();
        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (subscription.callback)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn tagged(log: &Log, tag: &str) -> impl FnMut(&HistoryEvent<&'static str>) + 'static {
        let log = Rc::clone(log);
        let tag = tag.to_string();
        move |e: &HistoryEvent<&'static str>| {
            let current = e.current().copied().unwrap_or("-");
            log.borrow_mut().push(format!("{tag}:{current}"));
        }
    }

    #[test]
    fn test_notify_only_matching_kind() {
        let log = Log::default();
        let mut observers: Observers<&'static str> = Observers::new();
        observers.subscribe(HistoryEventKind::Undid, tagged(&log, "undo"));
        observers.subscribe(HistoryEventKind::Repeated, tagged(&log, "redo"));

        observers.notify(&HistoryEvent::both(HistoryEventKind::Undid, "a", "b"));

        assert_eq!(*log.borrow(), vec!["undo:a".to_string()]);
    }

    #[test]
    fn test_notify_in_registration_order() {
        let log = Log::default();
        let mut observers: Observers<&'static str> = Observers::new();
        observers.subscribe(HistoryEventKind::Remembered, tagged(&log, "first"));
        observers.subscribe(HistoryEventKind::Remembered, tagged(&log, "second"));
        observers.subscribe(HistoryEventKind::Remembered, tagged(&log, "third"));

        observers.notify(&HistoryEvent::only_current(HistoryEventKind::Remembered, "x"));

        assert_eq!(*log.borrow(), vec!["first:x", "second:x", "third:x"]);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Log::default();
        let mut observers: Observers<&'static str> = Observers::new();
        let id = observers.subscribe(HistoryEventKind::Forgotten, tagged(&log, "gone"));
        observers.subscribe(HistoryEventKind::Forgotten, tagged(&log, "kept"));
        assert_eq!(observers.subscriber_count(HistoryEventKind::Forgotten), 2);

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert_eq!(observers.subscriber_count(HistoryEventKind::Forgotten), 1);

        observers.notify(&HistoryEvent::only_previous(HistoryEventKind::Forgotten, "p"));
        assert_eq!(*log.borrow(), vec!["kept:-"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut observers: Observers<u32> = Observers::new();
        let a = observers.subscribe(HistoryEventKind::Undid, |_| {});
        let b = observers.subscribe(HistoryEventKind::Undid, |_| {});
        assert_ne!(a, b);
        observers.unsubscribe(a);
        let c = observers.subscribe(HistoryEventKind::Undid, |_| {});
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_empty_notify_is_noop() {
        let mut observers: Observers<u32> = Observers::new();
        assert!(observers.is_empty());
        observers.notify(&HistoryEvent::only_current(HistoryEventKind::Remembered, 1));
    }
}
