//! Helpers for attaching colliders to owner entities.

use crate::ecs::components::physics::{Collider, ColliderShape};

/// Spawn `collider` on its own entity. The collider's owner must already exist.
pub fn spawn_collider(world: &mut hecs::World, collider: Collider) -> hecs::Entity {
    world.spawn((collider,))
}

/// Attach a plain (dynamic, non-trigger) collider to `owner`.
pub fn attach_collider(
    world: &mut hecs::World,
    owner: hecs::Entity,
    shape: ColliderShape,
) -> hecs::Entity {
    spawn_collider(world, Collider::new(owner, shape))
}

/// Every collider entity whose owner is `owner`, in entity order.
pub fn colliders_of(world: &hecs::World, owner: hecs::Entity) -> Vec<hecs::Entity> {
    let mut found: Vec<hecs::Entity> = world
        .query::<&Collider>()
        .iter()
        .filter(|(_, c)| c.owner() == owner)
        .map(|(e, _)| e)
        .collect();
    found.sort();
    found
}

/// Despawn `owner` together with its colliders, so no collider outlives it.
/// Partners still touching a removed collider receive an Exit on the next pass.
pub fn despawn_with_colliders(
    world: &mut hecs::World,
    owner: hecs::Entity,
) -> Result<(), hecs::NoSuchEntity> {
    for collider in colliders_of(world, owner) {
        world.despawn(collider)?;
    }
    world.despawn(owner)
}
