//! Rein 2D collision engine
//!
//! Discrete-step 2D collision for axis-aligned rectangles, circles and convex
//! polygon sets, driven over a `hecs::World`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **physics::geometry / shape_math** - Shape primitives and helper math
//! 2. **physics::broadphase** - Enabled-collider snapshot and bounds pruning
//! 3. **physics::narrowphase** - Exact overlap tests per shape-kind pair
//! 4. **physics::resolution** - Minimum translation vectors and correction
//! 5. **physics::lifecycle** - Enter/Stay/Exit tracking and listeners
//! 6. **physics** - `PhysicsWorld` step loop and configuration
//! 7. **ecs** - Components (`Transform`, `Collider`, `PhysicsBody`) and spawn helpers
//!
//! # Example
//!
//! ```
//! use rein2d::glam::Vec2;
//! use rein2d::physics::lifecycle::EventLog;
//! use rein2d::{attach_collider, ColliderShape, PhysicsWorld, Transform};
//!
//! let mut world = rein2d::hecs::World::new();
//! let owner = world.spawn((Transform::from_position(Vec2::ZERO),));
//! attach_collider(&mut world, owner, ColliderShape::sized_box(Vec2::splat(10.0))?);
//!
//! let mut physics = PhysicsWorld::default();
//! let mut events = EventLog::new();
//! physics.step(&mut world, 1.0 / 60.0, &mut events);
//! # Ok::<(), rein2d::ColliderError>(())
//! ```

pub mod ecs;
pub mod error;
pub mod physics;

// Re-export commonly used types
pub use ecs::prelude::*;
pub use error::ColliderError;
pub use physics::lifecycle::{CollisionEvent, CollisionListener, ContactKind, EventLog, Transition};
pub use physics::{PassStats, PhysicsConfig, PhysicsWorld, ResolutionPolicy};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
