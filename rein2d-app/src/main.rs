//! Headless demo: a few bodies fall onto static ground through a trigger zone.
//!
//! Run with `RUST_LOG=rein2d=debug` to see contact transitions from the engine.

use anyhow::{Context, Result};
use glam::Vec2;
use rein2d::ecs::bridge::{attach_collider, spawn_collider};
use rein2d::physics::geometry::BoundingRect;
use rein2d::{
    Collider, ColliderShape, CollisionEvent, CollisionListener, PhysicsBody, PhysicsConfig,
    PhysicsWorld, Transform,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs the transitions a gameplay layer would react to.
#[derive(Default)]
struct Reporter {
    landed: usize,
    zone_entries: usize,
}

impl CollisionListener for Reporter {
    fn on_collision_enter(&mut self, event: &CollisionEvent) {
        self.landed += 1;
        info!(owner = ?event.owner, other = ?event.other_owner, "collision enter");
    }

    fn on_collision_exit(&mut self, event: &CollisionEvent) {
        info!(owner = ?event.owner, other = ?event.other_owner, "collision exit");
    }

    fn on_trigger_enter(&mut self, event: &CollisionEvent) {
        self.zone_entries += 1;
        info!(owner = ?event.owner, zone = ?event.other_owner, "entered zone");
    }

    fn on_trigger_exit(&mut self, event: &CollisionEvent) {
        info!(owner = ?event.owner, zone = ?event.other_owner, "left zone");
    }
}

fn build_scene(world: &mut hecs::World) -> Result<Vec<hecs::Entity>> {
    let ground = world.spawn((Transform::from_position(Vec2::new(0.0, 200.0)),));
    spawn_collider(
        world,
        Collider::new(ground, ColliderShape::sized_box(Vec2::new(400.0, 20.0))?).fixed(),
    );

    let zone = world.spawn((Transform::from_position(Vec2::new(0.0, 100.0)),));
    spawn_collider(
        world,
        Collider::new(zone, ColliderShape::sized_box(Vec2::new(400.0, 30.0))?).trigger(),
    );

    let shapes = [
        ColliderShape::sized_box(Vec2::splat(16.0))?,
        ColliderShape::circle(Vec2::splat(8.0), 8.0)?,
        ColliderShape::convex(
            &[Vec2::ZERO, Vec2::new(16.0, 0.0), Vec2::new(8.0, 16.0)],
            Vec2::ZERO,
        )?,
    ];

    let mut bodies = Vec::new();
    for (i, shape) in shapes.into_iter().enumerate() {
        let position = Vec2::new(60.0 + i as f32 * 100.0, i as f32 * -20.0);
        let body = world.spawn((Transform::from_position(position), PhysicsBody::new(1.0)));
        attach_collider(world, body, shape);
        bodies.push(body);
    }
    Ok(bodies)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut world = hecs::World::new();
    let bodies = build_scene(&mut world).context("building demo scene")?;

    // Pixels per second squared; the default config uses metres.
    let mut physics = PhysicsWorld::new(PhysicsConfig {
        gravity: Vec2::new(0.0, 400.0),
        ..PhysicsConfig::default()
    });
    let mut reporter = Reporter::default();

    let frame = 1.0 / 60.0;
    for _ in 0..(60 * 5) {
        physics.step(&mut world, frame, &mut reporter);
    }

    for body in &bodies {
        let transform = world
            .get::<&Transform>(*body)
            .with_context(|| format!("body {body:?} lost its transform"))?;
        info!(body = ?body, position = ?transform.position, "final position");
    }

    let resting = physics.colliders_in_area(&world, &BoundingRect::new(0.0, 150.0, 400.0, 50.0));
    info!(
        landed = reporter.landed,
        zone_entries = reporter.zone_entries,
        resting = resting.len(),
        "simulation finished"
    );
    Ok(())
}
