pub mod sampling;
pub mod wave;
pub mod pickup;

pub use sampling::{SpawnPointRange, SpawnPointSampler, MAX_SPAWN_POINT_RETRIES};
pub use wave::{AlienCounters, ClampMode, WaveSettings, WaveSpawner};
pub use pickup::PickupSpawner;
