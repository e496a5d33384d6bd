//! CPU collision engine for axis-aligned rectangles, circles and convex
//! polygon sets.
//!
//! # Architecture
//!
//! Each fixed step runs:
//!
//! 1. Integrate opt-in [`PhysicsBody`](crate::ecs::components::physics::PhysicsBody)
//!    velocities (gravity, damping, position)
//! 2. Snapshot the enabled colliders, sorted by entity
//! 3. Drop contacts whose partner left the snapshot (Exit)
//! 4. For every pair i < j: candidate filter, bounds test, exact narrowphase test
//! 5. Advance both sides' Enter/Stay/Exit state and notify the listener
//! 6. Resolve colliding non-trigger pairs by their minimum translation vector
//!
//! Positions are re-read pair by pair, so later pairs see corrections applied
//! by earlier ones. The pass is single-threaded and deterministic for a given
//! world.

pub mod broadphase;
pub mod collider;
pub mod geometry;
pub mod lifecycle;
pub mod narrowphase;
pub mod resolution;
pub mod rigid_body;
pub mod shape_math;

use glam::Vec2;
use tracing::trace;

use self::collider::ColliderView;
use self::geometry::BoundingRect;
use self::lifecycle::{CollisionListener, ContactKind, Transition};

/// How often a colliding non-trigger pair is resolved within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// The first non-static side resolves; the other side only notifies.
    #[default]
    OncePerPair,
    /// Every non-static side resolves on its own, the second seeing the
    /// positions already corrected by the first.
    EachSide,
}

/// Configuration for the collision engine.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector, y grows downward. Default: (0, 9.82).
    pub gravity: Vec2,
    /// Fixed timestep in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
    /// Default: [`ResolutionPolicy::OncePerPair`].
    pub resolution: ResolutionPolicy,
    /// Vertices used when a circle stands in as a polygon for SAT. Default: 16.
    pub circle_segments: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.82),
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            resolution: ResolutionPolicy::OncePerPair,
            circle_segments: 16,
        }
    }
}

/// Counters from one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub colliders: usize,
    pub candidate_pairs: usize,
    pub narrow_tests: usize,
    pub contacts: usize,
    /// Times a side ran resolution, including runs that found nothing to move.
    pub resolutions: usize,
    /// Resolutions that actually moved an owner.
    pub corrections: usize,
}

/// Drives integration and collision passes over a `hecs::World`.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    /// Advance by `delta_time` seconds in fixed steps. Returns the number of
    /// steps run.
    pub fn step<L: CollisionListener + ?Sized>(
        &mut self,
        world: &mut hecs::World,
        delta_time: f64,
        listener: &mut L,
    ) -> u32 {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.fixed_step(world, self.config.fixed_timestep as f32, listener);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            self.accumulator = 0.0;
        }
        substeps
    }

    fn fixed_step<L: CollisionListener + ?Sized>(
        &mut self,
        world: &mut hecs::World,
        dt: f32,
        listener: &mut L,
    ) {
        self.integrate(world, dt);
        self.collision_pass(world, listener);
    }

    /// Velocity integration only, using the configured gravity.
    pub fn integrate(&self, world: &mut hecs::World, dt: f32) {
        rigid_body::integrate(world, self.config.gravity, dt);
    }

    /// Run exactly one collision pass, for callers that own their timing.
    pub fn collision_pass<L: CollisionListener + ?Sized>(
        &mut self,
        world: &mut hecs::World,
        listener: &mut L,
    ) -> PassStats {
        let snapshot = broadphase::enabled_colliders(world);
        lifecycle::prune_stale_contacts(world, &snapshot, listener);

        let mut stats = PassStats {
            colliders: snapshot.len(),
            ..PassStats::default()
        };

        for i in 0..snapshot.len() {
            for j in (i + 1)..snapshot.len() {
                let (Some(a), Some(b)) = (
                    ColliderView::read(world, snapshot[i]),
                    ColliderView::read(world, snapshot[j]),
                ) else {
                    trace!(a = ?snapshot[i], b = ?snapshot[j], "owner gone, skipping pair");
                    continue;
                };

                let touching = if broadphase::is_candidate(&a, &b) {
                    stats.candidate_pairs += 1;
                    self.test_pair(world, &a, &b, &mut stats)
                } else {
                    false
                };

                self.update_pair(world, &a, &b, touching, listener, &mut stats);
            }
        }

        stats
    }

    fn test_pair(
        &self,
        world: &hecs::World,
        a: &ColliderView,
        b: &ColliderView,
        stats: &mut PassStats,
    ) -> bool {
        if !broadphase::bounds_overlap(a, b) {
            return false;
        }
        stats.narrow_tests += 1;
        let touching = match (a.world_shape(world), b.world_shape(world)) {
            (Some(sa), Some(sb)) => narrowphase::test_shapes(&sa, &sb),
            _ => false,
        };
        trace!(a = ?a.entity, b = ?b.entity, touching, "narrowphase");
        if touching {
            stats.contacts += 1;
        }
        touching
    }

    /// Advance A's side then B's side with the same overlap result.
    fn update_pair<L: CollisionListener + ?Sized>(
        &self,
        world: &mut hecs::World,
        a: &ColliderView,
        b: &ColliderView,
        touching: bool,
        listener: &mut L,
        stats: &mut PassStats,
    ) {
        let mut resolved = false;
        for (this, other) in [(a, b), (b, a)] {
            let Some((phase, kind)) =
                lifecycle::advance(world, this.entity, other.entity, touching, listener)
            else {
                continue;
            };

            let wants = kind == ContactKind::Collision
                && phase != Transition::Exit
                && !this.is_static;
            let allowed = match self.config.resolution {
                ResolutionPolicy::OncePerPair => !resolved,
                ResolutionPolicy::EachSide => true,
            };
            if !(wants && allowed) {
                continue;
            }
            let moved = resolution::resolve_pair(
                world,
                this.entity,
                other.entity,
                self.config.circle_segments,
            );
            if let Some(mv) = moved {
                resolved = true;
                stats.resolutions += 1;
                if mv != Vec2::ZERO {
                    stats.corrections += 1;
                }
            }
        }
    }

    /// Every enabled collider whose bounding box touches `area`.
    pub fn colliders_in_area(
        &self,
        world: &hecs::World,
        area: &BoundingRect,
    ) -> Vec<hecs::Entity> {
        broadphase::colliders_in_area(world, area)
    }
}
