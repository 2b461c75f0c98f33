//! Named-event registration and synchronous dispatch.
//!
//! Multiple registrations per event kind are retained and invoked in
//! registration order; raising an event with no handlers is a no-op.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ContainerSize;

/// Lifecycle and animation-phase event kinds raised by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Open,
    Error,
    Ignore,
    Resize,
    AnimationStart,
    Animation,
    AnimationFinish,
}

/// Event payload delivered to handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewerEvent {
    Open,
    Error { message: String },
    Ignore,
    Resize { size: ContainerSize },
    AnimationStart,
    Animation,
    AnimationFinish,
}

impl ViewerEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Open => EventKind::Open,
            Self::Error { .. } => EventKind::Error,
            Self::Ignore => EventKind::Ignore,
            Self::Resize { .. } => EventKind::Resize,
            Self::AnimationStart => EventKind::AnimationStart,
            Self::Animation => EventKind::Animation,
            Self::AnimationFinish => EventKind::AnimationFinish,
        }
    }
}

/// Identity of one handler registration, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Handler = Box<dyn FnMut(&ViewerEvent)>;

struct Registration {
    id: HandlerId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&ViewerEvent) + 'static,
    ) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.registrations.push(Registration {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Removes one specific registration. Returns `true` when found.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        if let Some(position) = self
            .registrations
            .iter()
            .position(|registration| registration.id == id)
        {
            self.registrations.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .count()
    }

    /// Invokes every handler registered for the event's kind, in
    /// registration order, on the caller's thread of control.
    pub fn raise(&mut self, event: &ViewerEvent) {
        let kind = event.kind();
        let matching: SmallVec<[usize; 4]> = self
            .registrations
            .iter()
            .enumerate()
            .filter(|(_, registration)| registration.kind == kind)
            .map(|(index, _)| index)
            .collect();

        for index in matching {
            if let Some(registration) = self.registrations.get_mut(index) {
                (registration.handler)(event);
            }
        }
    }
}
