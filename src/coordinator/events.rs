use crate::entity::{EntityKind, SlotIndex};

/// Inbound message from the collision layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionEvent {
    AlienHit(SlotIndex),
    PickupTouched(SlotIndex),
    /// The detached head of a dying alien finished its self-destruct.
    AlienRemnantExpired(SlotIndex),
}

/// Outbound notification, one per observable state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AlienAppeared(SlotIndex),
    AlienDied(SlotIndex),
    PickupAppeared(SlotIndex),
    PickupCollected(SlotIndex),
    /// Every alien of the arena is dead; the elevator platform opens.
    ArenaCleared,
}

impl GameEvent {
    pub fn entity(&self) -> Option<(EntityKind, SlotIndex)> {
        match *self {
            Self::AlienAppeared(index) | Self::AlienDied(index) => Some((EntityKind::Alien, index)),
            Self::PickupAppeared(index) | Self::PickupCollected(index) => Some((EntityKind::Pickup, index)),
            Self::ArenaCleared => None,
        }
    }

    /// Name of the sound effect the audio collaborator plays for this event.
    pub fn cue(&self) -> &'static str {
        match self {
            Self::AlienAppeared(_) => "alien_appeared",
            Self::AlienDied(_) => "alien_died",
            Self::PickupAppeared(_) => "pickup_appeared",
            Self::PickupCollected(_) => "pickup_collected",
            Self::ArenaCleared => "elevator_arrived",
        }
    }
}

/// Outbound event sink. Alien events are delivered while the coordinator
/// holds its alien pool lock, so implementations must not call back into it.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: GameEvent);
}

/// Writes every event to the log.
#[derive(Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: GameEvent) {
        match event.entity() {
            Some((kind, index)) => log::info!("{} ({} #{})", event.cue(), kind, index),
            None => log::info!("{}", event.cue()),
        }
    }
}

/// Forwards events into a channel, for collaborators living on other threads.
pub struct ChannelNotifier {
    snd: crossbeam_channel::Sender<GameEvent>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, crossbeam_channel::Receiver<GameEvent>) {
        let (snd, rcv) = crossbeam_channel::unbounded();
        (Self{ snd }, rcv)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: GameEvent) {
        // receiver gone means nobody listens anymore
        let _ = self.snd.send(event);
    }
}
