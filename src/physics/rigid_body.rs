//! Linear velocity integration for owners carrying a [`PhysicsBody`].

use glam::Vec2;

use crate::ecs::components::physics::PhysicsBody;
use crate::ecs::components::transform::{Disabled, Transform};

/// Apply gravity to every body that uses it: v += g * gravity_scale * dt.
pub fn apply_gravity(world: &mut hecs::World, gravity: Vec2, dt: f32) {
    for (_, (body, disabled)) in world.query_mut::<(&mut PhysicsBody, Option<&Disabled>)>() {
        if disabled.is_some() || !body.use_gravity || body.mass <= 0.0 {
            continue;
        }
        body.velocity += gravity * body.gravity_scale * dt;
    }
}

/// Damp velocities and advance positions: v *= 1 - damping, p += v * dt.
pub fn integrate_positions(world: &mut hecs::World, dt: f32) {
    for (_, (body, transform, disabled)) in
        world.query_mut::<(&mut PhysicsBody, &mut Transform, Option<&Disabled>)>()
    {
        if disabled.is_some() {
            continue;
        }
        body.velocity *= (1.0 - body.linear_damping).max(0.0);
        transform.position += body.velocity * dt;
    }
}

/// One integration step: gravity, damping, then position.
pub fn integrate(world: &mut hecs::World, gravity: Vec2, dt: f32) {
    apply_gravity(world, gravity, dt);
    integrate_positions(world, dt);
}
