pub mod handle;
pub mod pool;
pub mod alien;
pub mod pickup;

pub use handle::{EntityKind, PoolSlot, SlotIndex, SlotState};
pub use pool::{Pool, Poolable};
pub use alien::{AlienEntity, AlienLifecycle, AlienTemplate, Head};
pub use pickup::{PickupEntity, UpgradeEffect};
