use std::fmt;

pub type SlotIndex = u32;

/// Largest index a pool will hand out. The slot count itself must stay
/// representable as a `SlotIndex`.
pub const MAX_SLOT_INDEX: SlotIndex = SlotIndex::MAX - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Alien,
    Pickup,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alien => write!(f, "alien"),
            Self::Pickup => write!(f, "pickup"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Active,
}

#[derive(Clone, Debug)]
pub struct PoolSlot<E> {
    pub(crate) index: SlotIndex,
    pub(crate) entity: E,
    pub(crate) state: SlotState,
}

impl<E> PoolSlot<E> {
    pub(crate) fn new(index: SlotIndex, entity: E) -> Self {
        Self{
            index,
            entity,
            state: SlotState::Free,
        }
    }

    pub fn index(&self) -> SlotIndex {
        self.index
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn is_active(&self) -> bool {
        self.state == SlotState::Active
    }
}
