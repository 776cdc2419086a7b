//! Change notifications and the typed publish/subscribe bus.
//!
//! The core keeps no rendering state.  Instead every structural change is
//! described by an [`Event`] and queued; at the end of each tick the owner
//! calls [`EventBus::deliver`], which copies each queued event into the
//! mailbox of every subscriber registered for its [`EventKind`].
//! Subscribers are plain integer handles, so the bus holds no references to
//! its consumers.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::{BuildingId, Rail, SignalId, StationId, TrainId};

// ── SignalColor ───────────────────────────────────────────────────────────────

/// Aspect shown by a signal.  Green means the block it guards is free.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalColor {
    #[default]
    Green,
    Red,
}

impl SignalColor {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalColor::Green => "green",
            SignalColor::Red   => "red",
        }
    }
}

impl std::fmt::Display for SignalColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A structural change observers may want to mirror.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    RailCreated(Rail),
    RailDestroyed(Rail),
    StationCreated(StationId),
    StationDestroyed(StationId),
    SignalCreated(SignalId),
    SignalDestroyed(SignalId),
    SignalColorChanged { signal: SignalId, color: SignalColor },
    TrainCreated(TrainId),
    TrainDestroyed(TrainId),
    BuildingCreated(BuildingId),
    /// The set of rails shown as a placement preview changed.
    PreviewChanged(Vec<Rail>),
    LevelUp { level: u32 },
}

/// Discriminant of [`Event`], used as the subscription key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    RailCreated,
    RailDestroyed,
    StationCreated,
    StationDestroyed,
    SignalCreated,
    SignalDestroyed,
    SignalColorChanged,
    TrainCreated,
    TrainDestroyed,
    BuildingCreated,
    PreviewChanged,
    LevelUp,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::RailCreated,
        EventKind::RailDestroyed,
        EventKind::StationCreated,
        EventKind::StationDestroyed,
        EventKind::SignalCreated,
        EventKind::SignalDestroyed,
        EventKind::SignalColorChanged,
        EventKind::TrainCreated,
        EventKind::TrainDestroyed,
        EventKind::BuildingCreated,
        EventKind::PreviewChanged,
        EventKind::LevelUp,
    ];
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::RailCreated(_)               => EventKind::RailCreated,
            Event::RailDestroyed(_)             => EventKind::RailDestroyed,
            Event::StationCreated(_)            => EventKind::StationCreated,
            Event::StationDestroyed(_)          => EventKind::StationDestroyed,
            Event::SignalCreated(_)             => EventKind::SignalCreated,
            Event::SignalDestroyed(_)           => EventKind::SignalDestroyed,
            Event::SignalColorChanged { .. }    => EventKind::SignalColorChanged,
            Event::TrainCreated(_)              => EventKind::TrainCreated,
            Event::TrainDestroyed(_)            => EventKind::TrainDestroyed,
            Event::BuildingCreated(_)           => EventKind::BuildingCreated,
            Event::PreviewChanged(_)            => EventKind::PreviewChanged,
            Event::LevelUp { .. }               => EventKind::LevelUp,
        }
    }
}

// ── EventBus ──────────────────────────────────────────────────────────────────

/// Handle returned by [`EventBus::subscribe`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriberId(u32);

/// Queue of pending events plus per-subscriber mailboxes.
#[derive(Default)]
pub struct EventBus {
    pending:   Vec<Event>,
    routes:    FxHashMap<EventKind, Vec<SubscriberId>>,
    /// Indexed by `SubscriberId`; `None` once unsubscribed.
    mailboxes: Vec<Option<VecDeque<Event>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kinds`.  Events of other kinds never reach the
    /// returned subscriber's mailbox.
    pub fn subscribe(&mut self, kinds: &[EventKind]) -> SubscriberId {
        let id = SubscriberId(self.mailboxes.len() as u32);
        self.mailboxes.push(Some(VecDeque::new()));
        for &kind in kinds {
            let subs = self.routes.entry(kind).or_default();
            if !subs.contains(&id) {
                subs.push(id);
            }
        }
        id
    }

    /// Register interest in every kind of event.
    pub fn subscribe_all(&mut self) -> SubscriberId {
        self.subscribe(&EventKind::ALL)
    }

    /// Drop a subscriber and anything still in its mailbox.  Unknown or
    /// already-removed handles are ignored.
    pub fn unsubscribe(&mut self, sub: SubscriberId) {
        if let Some(slot) = self.mailboxes.get_mut(sub.0 as usize) {
            *slot = None;
        }
        for subs in self.routes.values_mut() {
            subs.retain(|&s| s != sub);
        }
    }

    /// Queue an event for the next [`deliver`](Self::deliver).
    pub fn publish(&mut self, event: Event) {
        self.pending.push(event);
    }

    pub fn publish_all(&mut self, events: impl IntoIterator<Item = Event>) {
        self.pending.extend(events);
    }

    /// Number of events queued but not yet delivered.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Fan every queued event out to the mailboxes of its subscribers, in
    /// publication order.  Returns the number of events delivered.
    pub fn deliver(&mut self) -> usize {
        let events = std::mem::take(&mut self.pending);
        let count = events.len();
        for event in events {
            let Some(subs) = self.routes.get(&event.kind()) else {
                continue;
            };
            for sub in subs {
                if let Some(Some(mailbox)) = self.mailboxes.get_mut(sub.0 as usize) {
                    mailbox.push_back(event.clone());
                }
            }
        }
        count
    }

    /// Take everything delivered to `sub` so far, oldest first.
    pub fn drain(&mut self, sub: SubscriberId) -> Vec<Event> {
        match self.mailboxes.get_mut(sub.0 as usize) {
            Some(Some(mailbox)) => mailbox.drain(..).collect(),
            _ => Vec::new(),
        }
    }
}
