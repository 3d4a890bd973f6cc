/// Notification payloads emitted by `HistoryBuffer` on every transition.
use std::fmt;

/// The kind of transition a `HistoryEvent` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryEventKind {
    /// A new item was remembered and became the current item.
    Remembered,
    /// The capacity was exceeded and the oldest item(s) were evicted.
    Overflowed,
    /// The current item was removed from the history.
    Forgotten,
    /// The cursor moved one step toward older items.
    Undid,
    /// The cursor moved one step toward newer items.
    Repeated,
}

impl HistoryEventKind {
    /// All kinds, in declaration order.
    pub const ALL: [HistoryEventKind; 5] = [
        HistoryEventKind::Remembered,
        HistoryEventKind::Overflowed,
        HistoryEventKind::Forgotten,
        HistoryEventKind::Undid,
        HistoryEventKind::Repeated,
    ];
}

impl fmt::Display for HistoryEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HistoryEventKind::Remembered => "remembered",
            HistoryEventKind::Overflowed => "overflowed",
            HistoryEventKind::Forgotten => "forgotten",
            HistoryEventKind::Undid => "undid",
            HistoryEventKind::Repeated => "repeated",
        };
        f.write_str(name)
    }
}

/// A single transition of the history.
///
/// `current` is the item at the cursor after the transition and
/// `previous` is the one it replaced. Either may be absent: the first
/// remember has no previous item, and forgetting the last reachable item
/// leaves no current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent<T> {
    kind: HistoryEventKind,
    current: Option<T>,
    previous: Option<T>,
}

impl<T> HistoryEvent<T> {
    pub fn only_current(kind: HistoryEventKind, current: T) -> Self {
        Self {
            kind,
            current: Some(current),
            previous: None,
        }
    }

    pub fn only_previous(kind: HistoryEventKind, previous: T) -> Self {
        Self {
            kind,
            current: None,
            previous: Some(previous),
        }
    }

    pub fn both(kind: HistoryEventKind, current: T, previous: T) -> Self {
        Self {
            kind,
            current: Some(current),
            previous: Some(previous),
        }
    }

    pub fn kind(&self) -> HistoryEventKind {
        self.kind
    }

    /// The item at the cursor after the transition, if any.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// The item the cursor pointed at before the transition, if any.
    pub fn previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Same payload, reported under a different kind.
    ///
    /// An overflow carries the pair of the remember that caused it.
    pub(crate) fn with_kind(&self, kind: HistoryEventKind) -> Self
    where
        T: Clone,
    {
        Self {
            kind,
            current: self.current.clone(),
            previous: self.previous.clone(),
        }
    }

    /// Splits the event into its `(current, previous)` pair.
    pub fn into_items(self) -> (Option<T>, Option<T>) {
        (self.current, self.previous)
    }
}
