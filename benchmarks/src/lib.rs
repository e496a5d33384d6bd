//! Scene builders shared by the collision benchmarks.

use glam::Vec2;
use rein2d::ecs::bridge::spawn_collider;
use rein2d::ecs::components::physics::{Collider, ColliderShape};
use rein2d::ecs::components::transform::Transform;
use rein2d::physics::geometry::{BoundingRect, WorldPolygons};

/// Deterministic pseudo-random value in [0, 1), so runs are comparable.
pub fn hash01(i: usize, salt: u32) -> f32 {
    let mut x = (i as u32).wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    (x & 0x00FF_FFFF) as f32 / 16_777_216.0
}

fn spawn_shape(world: &mut hecs::World, pos: Vec2, shape: ColliderShape, is_static: bool) {
    let owner = world.spawn((Transform::from_position(pos),));
    let mut collider = Collider::new(owner, shape);
    collider.is_static = is_static;
    spawn_collider(world, collider);
}

fn triangle() -> ColliderShape {
    ColliderShape::convex(
        &[Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(1.0, 2.0)],
        Vec2::ZERO,
    )
    .expect("triangle is valid")
}

/// `n` boxes packed into a square of side `extent`; a tenth of them static.
pub fn setup_box_world(n: usize, extent: f32) -> hecs::World {
    let mut world = hecs::World::new();
    for i in 0..n {
        let pos = Vec2::new(hash01(i, 1), hash01(i, 2)) * extent;
        let shape = ColliderShape::sized_box(Vec2::splat(2.0)).expect("box is valid");
        spawn_shape(&mut world, pos, shape, i % 10 == 0);
    }
    world
}

/// Dense mix of rectangles, circles and triangles.
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let extent = (n as f32).sqrt() * 3.0;
    for i in 0..n {
        let pos = Vec2::new(hash01(i, 3), hash01(i, 4)) * extent;
        let shape = match i % 3 {
            0 => ColliderShape::sized_box(Vec2::splat(2.0)).expect("box is valid"),
            1 => ColliderShape::circle(Vec2::ZERO, 1.0).expect("circle is valid"),
            _ => triangle(),
        };
        spawn_shape(&mut world, pos, shape, i % 10 == 0);
    }
    world
}

/// Two unit squares as polygon sets, overlapping by `overlap` on x.
pub fn square_pair(overlap: f32) -> (WorldPolygons, WorldPolygons) {
    (
        WorldPolygons::from_rect(&BoundingRect::new(0.0, 0.0, 1.0, 1.0)),
        WorldPolygons::from_rect(&BoundingRect::new(1.0 - overlap, 0.0, 1.0, 1.0)),
    )
}
