//! Object pools for short-lived entities
//!
//! Slots are toggled active/inactive instead of being created and destroyed.
//! A slot is never removed from the backing store; reuse overwrites every
//! field, so stale data in an inactive slot is harmless.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one activation of a pool slot
///
/// The serial is unique over the pool's lifetime, so an id held after its
/// entity was deactivated never matches the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntityId {
    pub slot: u32,
    pub serial: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.slot, self.serial)
    }
}

/// An entity that lives in an [`EntityPool`]
pub trait Poolable: Default {
    /// Everything needed to bring a slot to life
    type Spawn;

    fn id(&self) -> EntityId;
    fn is_active(&self) -> bool;
    /// Overwrite the slot with fresh data and mark it active
    fn activate(&mut self, id: EntityId, spawn: Self::Spawn);
    /// Mark inactive, leaving the other fields as they are
    fn deactivate(&mut self);
}

/// Growth policy when every slot is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolCapacity {
    /// Pre-allocated; activation fails when full
    Fixed(usize),
    /// Starts empty and appends one slot per saturated activation
    Growable,
}

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    entries: Vec<T>,
    capacity: PoolCapacity,
    next_serial: u32,
}

impl<T: Poolable> EntityPool<T> {
    /// Pool with `size` inactive slots that never grows
    pub fn fixed(size: usize) -> Self {
        Self {
            entries: (0..size).map(|_| T::default()).collect(),
            capacity: PoolCapacity::Fixed(size),
            next_serial: 1,
        }
    }

    /// Empty pool that grows on demand
    pub fn growable() -> Self {
        Self {
            entries: Vec::new(),
            capacity: PoolCapacity::Growable,
            next_serial: 1,
        }
    }

    /// Activate the first free slot
    ///
    /// Returns `None` when a fixed pool is saturated; the pool is untouched.
    pub fn activate(&mut self, spawn: T::Spawn) -> Option<EntityId> {
        let slot = match self.entries.iter().position(|e| !e.is_active()) {
            Some(slot) => slot,
            None => match self.capacity {
                PoolCapacity::Fixed(_) => return None,
                PoolCapacity::Growable => {
                    self.entries.push(T::default());
                    self.entries.len() - 1
                }
            },
        };

        let id = EntityId {
            slot: slot as u32,
            serial: self.next_serial,
        };
        self.next_serial = self.next_serial.wrapping_add(1);
        self.entries[slot].activate(id, spawn);
        Some(id)
    }

    /// Deactivate the entity with `id`. Stale or unknown ids are ignored.
    ///
    /// Returns true if an active entity was deactivated.
    pub fn deactivate(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.deactivate();
                true
            }
            None => false,
        }
    }

    /// Deactivate every slot without shrinking the store
    pub fn reset(&mut self) {
        for entity in &mut self.entries {
            entity.deactivate();
        }
    }

    /// The active entity with `id`, if it is still alive
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries
            .get(id.slot as usize)
            .filter(|e| e.is_active() && e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entries
            .get_mut(id.slot as usize)
            .filter(|e| e.is_active() && e.id() == id)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|e| e.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_active()).count()
    }

    /// Number of slots in the backing store, active or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
