//! Per-collider Enter/Stay/Exit tracking and listener notification.
//!
//! Each collider keeps its own contact set. For a pair (A, B) the pass calls
//! [`advance`] once for A and once for B with the same overlap result, so the
//! two sets stay symmetric while each side fires its own notifications.

use std::collections::BTreeSet;

use tracing::debug;

use crate::ecs::components::physics::{Collider, Contact};

/// Whether a contact is a trigger overlap or a physical collision.
/// A pair is a trigger pair when either side is a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    Collision,
    Trigger,
}

impl ContactKind {
    pub fn of(this_trigger: bool, other_trigger: bool) -> Self {
        if this_trigger || other_trigger {
            ContactKind::Trigger
        } else {
            ContactKind::Collision
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Enter,
    Stay,
    Exit,
}

impl Transition {
    /// `None` means the pair was apart and still is.
    pub fn from_states(was_touching: bool, touching: bool) -> Option<Self> {
        match (was_touching, touching) {
            (false, true) => Some(Transition::Enter),
            (true, true) => Some(Transition::Stay),
            (true, false) => Some(Transition::Exit),
            (false, false) => None,
        }
    }
}

/// One notification, seen from `collider`'s side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub phase: Transition,
    pub kind: ContactKind,
    pub collider: hecs::Entity,
    pub owner: hecs::Entity,
    pub other: hecs::Entity,
    pub other_owner: hecs::Entity,
}

/// Receives notifications synchronously during a collision pass.
///
/// All methods default to doing nothing; implement the ones you care about.
pub trait CollisionListener {
    fn on_collision_enter(&mut self, _event: &CollisionEvent) {}
    fn on_collision_stay(&mut self, _event: &CollisionEvent) {}
    fn on_collision_exit(&mut self, _event: &CollisionEvent) {}
    fn on_trigger_enter(&mut self, _event: &CollisionEvent) {}
    fn on_trigger_stay(&mut self, _event: &CollisionEvent) {}
    fn on_trigger_exit(&mut self, _event: &CollisionEvent) {}

    /// Route an event to the matching `on_*` method.
    fn notify(&mut self, event: &CollisionEvent) {
        match (event.kind, event.phase) {
            (ContactKind::Collision, Transition::Enter) => self.on_collision_enter(event),
            (ContactKind::Collision, Transition::Stay) => self.on_collision_stay(event),
            (ContactKind::Collision, Transition::Exit) => self.on_collision_exit(event),
            (ContactKind::Trigger, Transition::Enter) => self.on_trigger_enter(event),
            (ContactKind::Trigger, Transition::Stay) => self.on_trigger_stay(event),
            (ContactKind::Trigger, Transition::Exit) => self.on_trigger_exit(event),
        }
    }
}

impl CollisionListener for () {}

/// Listener that records every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<CollisionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, CollisionEvent> {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, phase: Transition, kind: ContactKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.phase == phase && e.kind == kind)
            .count()
    }

    /// Events fired on `collider`'s side.
    pub fn for_collider(&self, collider: hecs::Entity) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter().filter(move |e| e.collider == collider)
    }
}

impl CollisionListener for EventLog {
    fn notify(&mut self, event: &CollisionEvent) {
        self.events.push(*event);
    }
}

/// Update `this` collider's contact with `other` for one overlap result and
/// notify the listener. Returns the transition and the contact kind used.
///
/// Skips silently (returns `None`) if either collider component is missing.
pub(crate) fn advance<L: CollisionListener + ?Sized>(
    world: &hecs::World,
    this: hecs::Entity,
    other: hecs::Entity,
    touching: bool,
    listener: &mut L,
) -> Option<(Transition, ContactKind)> {
    let (other_owner, other_trigger) = {
        let c = world.get::<&Collider>(other).ok()?;
        (c.owner(), c.is_trigger)
    };
    let mut collider = world.get::<&mut Collider>(this).ok()?;
    let owner = collider.owner();

    let phase = Transition::from_states(collider.is_touching(other), touching)?;
    let kind = match phase {
        Transition::Exit => collider.remove_contact(other)?.kind,
        Transition::Enter | Transition::Stay => {
            let kind = ContactKind::of(collider.is_trigger, other_trigger);
            collider.insert_contact(other, Contact { other_owner, kind });
            kind
        }
    };
    drop(collider);

    if phase != Transition::Stay {
        debug!(collider = ?this, other = ?other, ?phase, ?kind, "contact transition");
    }
    listener.notify(&CollisionEvent {
        phase,
        kind,
        collider: this,
        owner,
        other,
        other_owner,
    });
    Some((phase, kind))
}

/// Drop contacts whose partner left the enabled set since the last pass.
///
/// A collider that is itself still enabled receives an Exit for each dropped
/// partner. Colliders outside `enabled` lose their contacts without notification.
pub(crate) fn prune_stale_contacts<L: CollisionListener + ?Sized>(
    world: &mut hecs::World,
    enabled: &[hecs::Entity],
    listener: &mut L,
) {
    let active: BTreeSet<hecs::Entity> = enabled.iter().copied().collect();
    let mut pending = Vec::new();

    for (entity, collider) in world.query_mut::<&mut Collider>() {
        if !collider.is_colliding() {
            continue;
        }
        if !active.contains(&entity) {
            let dropped = collider.take_contacts();
            debug!(collider = ?entity, dropped = dropped.len(), "cleared disabled collider");
            continue;
        }
        let stale: Vec<hecs::Entity> = collider
            .other_colliders()
            .filter(|other| !active.contains(other))
            .collect();
        for other in stale {
            if let Some(contact) = collider.remove_contact(other) {
                pending.push(CollisionEvent {
                    phase: Transition::Exit,
                    kind: contact.kind,
                    collider: entity,
                    owner: collider.owner(),
                    other,
                    other_owner: contact.other_owner,
                });
            }
        }
    }

    pending.sort_by_key(|e| (e.collider, e.other));
    for event in &pending {
        debug!(collider = ?event.collider, other = ?event.other, "partner left, firing exit");
        listener.notify(event);
    }
}
