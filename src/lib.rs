pub mod sync;
pub mod entity;
pub mod spawn;
pub mod coordinator;
pub mod config;
pub mod error;
pub mod util;

pub use config::ArenaConfig;
pub use coordinator::{ChannelNotifier, CollisionEvent, Coordinator, FixedStepRunner, GameEvent, LogNotifier, Notifier};
pub use entity::{AlienLifecycle, EntityKind, SlotIndex, SlotState, UpgradeEffect};
pub use error::{ConfigError, PoolError};
pub use spawn::{ClampMode, SpawnPointRange};
