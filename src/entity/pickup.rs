use cgmath::prelude::*;
use cgmath::Point3;

use crate::entity::handle::*;
use crate::entity::pool::Poolable;

/// What the weapon gains when the player collects the pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeEffect {
    FireRateBoost { multiplier: f32 },
}

impl Default for UpgradeEffect {
    fn default() -> Self {
        Self::FireRateBoost { multiplier: 2.0 }
    }
}

#[derive(Clone, Debug)]
pub struct PickupEntity {
    pub(crate) index: SlotIndex,
    pub position: Point3<f32>,
    pub effect: UpgradeEffect,
    pub visible: bool,
}

impl PickupEntity {
    pub fn index(&self) -> SlotIndex {
        self.index
    }
}

impl Poolable for PickupEntity {
    type Template = UpgradeEffect;
    const KIND: EntityKind = EntityKind::Pickup;

    fn create(index: SlotIndex, effect: &UpgradeEffect) -> Self {
        Self{
            index,
            position: Point3::origin(),
            effect: *effect,
            visible: false,
        }
    }

    fn on_acquire(&mut self) {
        self.visible = true;
    }

    fn on_release(&mut self) {
        self.visible = false;
    }
}
