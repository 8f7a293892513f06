use cgmath::prelude::*;
use cgmath::{Point3, Quaternion, Vector3};
use rand::Rng;

use crate::entity::handle::*;
use crate::entity::pool::Poolable;

const HEAD_LOCAL_POSITION: Vector3<f32> = Vector3{ x: 0.0, y: 1.6, z: 0.0 };

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlienTemplate {
    /// Seconds between two navigation retargets.
    pub nav_update_interval: f32,
    /// Seconds a detached head keeps simulating before the alien returns to its pool.
    pub head_destruct_time: f32,
    pub detach_impulse: f32,
}

impl Default for AlienTemplate {
    fn default() -> Self {
        Self{
            nav_update_interval: 0.5,
            head_destruct_time: 3.0,
            detach_impulse: 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienLifecycle {
    Pooled,
    Alive,
    Dying,
}

/// The detachable part of an alien.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Head {
    pub local_position: Vector3<f32>,
    pub local_rotation: Quaternion<f32>,
    /// Driven by the body while attached, free falling once detached.
    pub kinematic: bool,
    pub velocity: Vector3<f32>,
    pub destruct_timer: Option<f32>,
}

impl Default for Head {
    fn default() -> Self {
        Self{
            local_position: HEAD_LOCAL_POSITION,
            local_rotation: Quaternion::one(),
            kinematic: true,
            velocity: Vector3::zero(),
            destruct_timer: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AlienEntity {
    pub(crate) index: SlotIndex,
    pub position: Point3<f32>,
    pub orientation: Quaternion<f32>,
    pub target_position: Point3<f32>,
    pub nav_update_interval: f32,
    pub nav_timer: f32,
    pub is_alive: bool,
    pub navigation_enabled: bool,
    pub collider_enabled: bool,
    pub head: Head,
    head_destruct_time: f32,
    detach_impulse: f32,
    lifecycle: AlienLifecycle,
}

impl AlienEntity {
    pub fn index(&self) -> SlotIndex {
        self.index
    }

    pub fn lifecycle(&self) -> AlienLifecycle {
        self.lifecycle
    }

    pub fn place(&mut self, position: Point3<f32>, orientation: Quaternion<f32>) {
        self.position = position;
        self.orientation = orientation;
        self.target_position = position;
    }

    /// Apply a lethal hit. Returns `false` when the alien was not alive, so
    /// overlapping collisions in one frame only count once.
    pub fn kill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.is_alive || self.lifecycle != AlienLifecycle::Alive {
            return false;
        }
        self.is_alive = false;
        self.navigation_enabled = false;
        self.collider_enabled = false;
        self.lifecycle = AlienLifecycle::Dying;

        let outward = Vector3::new(
            rng.gen_range(-1.0f32..=1.0),
            rng.gen_range(0.5f32..=1.0),
            rng.gen_range(-1.0f32..=1.0),
        );
        self.head.kinematic = false;
        self.head.velocity = outward.normalize() * self.detach_impulse;
        self.head.destruct_timer = Some(self.head_destruct_time);
        true
    }

    /// Advance navigation or the detached head's self-destruct countdown.
    /// Returns `true` on the frame the head finishes self-destructing.
    pub fn tick(&mut self, dt: f32, player_position: Point3<f32>) -> bool {
        match self.lifecycle {
            AlienLifecycle::Alive => {
                if self.navigation_enabled {
                    self.nav_timer += dt;
                    if self.nav_timer > self.nav_update_interval {
                        self.target_position = player_position;
                        self.nav_timer = 0.0;
                    }
                }
                false
            }
            AlienLifecycle::Dying => match self.head.destruct_timer.as_mut() {
                Some(remaining) => {
                    *remaining -= dt;
                    if *remaining <= 0.0 {
                        self.head.destruct_timer = None;
                        true
                    } else {
                        false
                    }
                }
                None => false,
            },
            AlienLifecycle::Pooled => false,
        }
    }
}

impl Poolable for AlienEntity {
    type Template = AlienTemplate;
    const KIND: EntityKind = EntityKind::Alien;

    fn create(index: SlotIndex, template: &AlienTemplate) -> Self {
        Self{
            index,
            position: Point3::origin(),
            orientation: Quaternion::one(),
            target_position: Point3::origin(),
            nav_update_interval: template.nav_update_interval,
            nav_timer: 0.0,
            is_alive: false,
            navigation_enabled: false,
            collider_enabled: false,
            head: Head::default(),
            head_destruct_time: template.head_destruct_time,
            detach_impulse: template.detach_impulse,
            lifecycle: AlienLifecycle::Pooled,
        }
    }

    fn on_acquire(&mut self) {
        self.lifecycle = AlienLifecycle::Alive;
        self.is_alive = true;
        self.navigation_enabled = true;
        self.collider_enabled = true;
        self.nav_timer = 0.0;
        self.head = Head::default();
    }

    fn on_release(&mut self) {
        self.lifecycle = AlienLifecycle::Pooled;
        self.is_alive = false;
        self.navigation_enabled = false;
        self.collider_enabled = false;
        self.head.destruct_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn spawned() -> AlienEntity {
        let mut alien = AlienEntity::create(4, &AlienTemplate::default());
        alien.on_acquire();
        alien
    }

    #[test]
    fn acquire_resets_the_head() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut alien = spawned();
        assert!(alien.kill(&mut rng));
        assert!(!alien.head.kinematic);

        alien.on_release();
        alien.on_acquire();
        assert_eq!(alien.lifecycle(), AlienLifecycle::Alive);
        assert_eq!(alien.head, Head::default());
        assert!(alien.is_alive && alien.navigation_enabled && alien.collider_enabled);
    }

    #[test]
    fn kill_detaches_the_head_once() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut alien = spawned();

        assert!(alien.kill(&mut rng));
        assert_eq!(alien.lifecycle(), AlienLifecycle::Dying);
        assert!(!alien.navigation_enabled);
        assert!(!alien.collider_enabled);
        assert!(alien.head.velocity.y > 0.0);
        assert!((alien.head.velocity.magnitude() - 4.0).abs() < 1e-4);
        assert_eq!(alien.head.destruct_timer, Some(3.0));

        let velocity = alien.head.velocity;
        assert!(!alien.kill(&mut rng));
        assert_eq!(alien.head.velocity, velocity);
    }

    #[test]
    fn pooled_alien_cannot_be_killed() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut alien = AlienEntity::create(0, &AlienTemplate::default());
        assert!(!alien.kill(&mut rng));
        assert_eq!(alien.lifecycle(), AlienLifecycle::Pooled);
    }

    #[test]
    fn navigation_retargets_on_interval() {
        let mut alien = spawned();
        let player = Point3::new(10.0, 0.0, -3.0);

        assert!(!alien.tick(0.3, player));
        assert_eq!(alien.target_position, Point3::origin());
        assert!(!alien.tick(0.3, player));
        assert_eq!(alien.target_position, player);
        assert_eq!(alien.nav_timer, 0.0);
    }

    #[test]
    fn head_self_destructs_after_its_timer() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut alien = spawned();
        alien.kill(&mut rng);

        let player = Point3::origin();
        assert!(!alien.tick(1.0, player));
        assert!(!alien.tick(1.0, player));
        assert!(alien.tick(1.5, player));
        // fires exactly once
        assert!(!alien.tick(1.0, player));
        assert_eq!(alien.lifecycle(), AlienLifecycle::Dying);
    }
}
