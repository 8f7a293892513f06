use crate::entity::handle::*;
use crate::error::{ConfigError, PoolError};

/// An entity type that lives in a [`Pool`].
///
/// Entities are created once, when the pool grows, and are then recycled
/// through `on_acquire`/`on_release` for the rest of the session.
pub trait Poolable {
    /// Shared construction parameters for every entity of the pool.
    type Template: Clone;

    const KIND: EntityKind;

    fn create(index: SlotIndex, template: &Self::Template) -> Self;

    /// Re-enable simulation and reset per-spawn sub-state.
    fn on_acquire(&mut self);

    /// Disable simulation; the entity stays allocated but inert.
    fn on_release(&mut self);
}

pub struct Pool<E: Poolable> {
    slots: Vec<PoolSlot<E>>,
    template: E::Template,
    max_slots: usize,
}

impl<E: Poolable> Pool<E> {
    /// Create a pool pre-warmed with `initial_size` free entities.
    pub fn new(initial_size: usize, template: E::Template) -> Result<Self, ConfigError> {
        Self::with_max_slots(initial_size, template, MAX_SLOT_INDEX as usize + 1)
    }

    pub(crate) fn with_max_slots(initial_size: usize, template: E::Template, max_slots: usize) -> Result<Self, ConfigError> {
        if initial_size == 0 {
            return Err(ConfigError::EmptyPool { kind: E::KIND });
        }
        if initial_size > max_slots {
            return Err(ConfigError::PoolTooLarge { kind: E::KIND, requested: initial_size, max: max_slots });
        }
        let mut pool = Self{
            slots: Vec::with_capacity(initial_size),
            template,
            max_slots,
        };
        for _ in 0..initial_size {
            pool.grow()?;
        }
        Ok(pool)
    }

    fn grow(&mut self) -> Result<SlotIndex, PoolError> {
        if self.slots.len() >= self.max_slots {
            return Err(PoolError::IndexSpaceExhausted { kind: E::KIND });
        }
        let index = self.slots.len() as SlotIndex;
        let entity = E::create(index, &self.template);
        self.slots.push(PoolSlot::new(index, entity));
        Ok(index)
    }

    /// Hand out the lowest free slot, growing the pool when every slot is active.
    pub fn acquire(&mut self) -> Result<SlotIndex, PoolError> {
        let index = match self.slots.iter().position(|slot| slot.state == SlotState::Free) {
            Some(position) => position as SlotIndex,
            None => {
                let index = self.grow()?;
                log::debug!("{} pool grew to {} slots", E::KIND, self.slots.len());
                index
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.state = SlotState::Active;
        slot.entity.on_acquire();
        Ok(index)
    }

    /// Return a slot to the pool. Out-of-range or already free indices are ignored.
    pub fn release(&mut self, index: SlotIndex) -> bool {
        match self.slots.get_mut(index as usize) {
            Some(slot) if slot.state == SlotState::Active => {
                slot.state = SlotState::Free;
                slot.entity.on_release();
                true
            }
            Some(_) => false,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    pub fn free_count(&self) -> usize {
        self.slots.len() - self.active_count()
    }

    pub fn state_of(&self, index: SlotIndex) -> Option<SlotState> {
        self.slots.get(index as usize).map(|slot| slot.state)
    }

    pub fn get(&self, index: SlotIndex) -> Option<&E> {
        self.slots.get(index as usize).map(|slot| &slot.entity)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut E> {
        self.slots.get_mut(index as usize).map(|slot| &mut slot.entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolSlot<E>> {
        self.slots.iter()
    }

    /// Active entities together with their slot index.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut E)> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.state == SlotState::Active)
            .map(|slot| (slot.index, &mut slot.entity))
    }
}
