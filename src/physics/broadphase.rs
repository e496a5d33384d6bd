//! Broadphase: enabled-collider snapshot, candidate filtering and bounding-box
//! pruning.
//!
//! The scan is O(n^2) pair-wise over the snapshot. That is a known scaling
//! limit for large scenes.

use crate::ecs::components::physics::Collider;

use super::collider::{owner_enabled, ColliderView};
use super::geometry::BoundingRect;

/// Colliders taking part in this step, sorted by entity.
///
/// A collider is enabled when its own flag is set and its owner exists, has a
/// transform and is not disabled. Both are read live on every call.
pub fn enabled_colliders(world: &hecs::World) -> Vec<hecs::Entity> {
    let mut enabled: Vec<hecs::Entity> = world
        .query::<&Collider>()
        .iter()
        .filter(|(_, c)| c.enabled && owner_enabled(world, c.owner()))
        .map(|(e, _)| e)
        .collect();
    enabled.sort();
    enabled
}

/// Pairs sharing an owner, and static-static pairs, are never tested.
#[inline]
pub fn is_candidate(a: &ColliderView, b: &ColliderView) -> bool {
    a.owner != b.owner && !(a.is_static && b.is_static)
}

/// Cheap bounds test run before the narrow phase.
#[inline]
pub fn bounds_overlap(a: &ColliderView, b: &ColliderView) -> bool {
    a.bounds.intersects(&b.bounds)
}

/// Every candidate pair (i < j over the snapshot) whose bounds overlap right now.
///
/// The collision pass does not use this list: it re-reads positions pair by
/// pair, since resolution moves owners mid-pass.
pub fn find_pairs(world: &hecs::World) -> Vec<(hecs::Entity, hecs::Entity)> {
    let views: Vec<ColliderView> = enabled_colliders(world)
        .into_iter()
        .filter_map(|e| ColliderView::read(world, e))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..views.len() {
        for j in (i + 1)..views.len() {
            let (a, b) = (&views[i], &views[j]);
            if is_candidate(a, b) && bounds_overlap(a, b) {
                pairs.push((a.entity, b.entity));
            }
        }
    }
    pairs
}

/// Every enabled collider whose bounding box touches `area`. O(n).
pub fn colliders_in_area(world: &hecs::World, area: &BoundingRect) -> Vec<hecs::Entity> {
    enabled_colliders(world)
        .into_iter()
        .filter(|&e| {
            ColliderView::read(world, e)
                .map(|view| view.bounds.intersects(area))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::bridge::{attach_collider, spawn_collider};
    use crate::ecs::components::physics::ColliderShape;
    use crate::ecs::components::transform::{Disabled, Transform};
    use glam::Vec2;

    fn boxed(world: &mut hecs::World, pos: Vec2, size: f32) -> (hecs::Entity, hecs::Entity) {
        let owner = world.spawn((Transform::from_position(pos),));
        let collider = attach_collider(
            world,
            owner,
            ColliderShape::sized_box(Vec2::splat(size)).unwrap(),
        );
        (owner, collider)
    }

    #[test]
    fn test_enabled_colliders_respects_flags() {
        let mut world = hecs::World::new();
        let (_, a) = boxed(&mut world, Vec2::ZERO, 1.0);
        let (owner_b, b) = boxed(&mut world, Vec2::ZERO, 1.0);
        let (_, c) = boxed(&mut world, Vec2::ZERO, 1.0);

        assert_eq!(enabled_colliders(&world).len(), 3);

        world.insert_one(owner_b, Disabled).unwrap();
        world.get::<&mut Collider>(c).unwrap().enabled = false;
        assert_eq!(enabled_colliders(&world), vec![a]);

        world.remove_one::<Disabled>(owner_b).unwrap();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(enabled_colliders(&world), expected);
    }

    #[test]
    fn test_find_pairs_overlapping() {
        let mut world = hecs::World::new();
        let (_, a) = boxed(&mut world, Vec2::ZERO, 2.0);
        let (_, b) = boxed(&mut world, Vec2::new(1.0, 0.0), 2.0);
        let _far = boxed(&mut world, Vec2::new(100.0, 0.0), 2.0);

        let pairs = find_pairs(&world);
        assert_eq!(pairs.len(), 1);
        let (x, y) = pairs[0];
        assert!((x, y) == (a, b) || (x, y) == (b, a));
    }

    #[test]
    fn test_find_pairs_skips_same_owner_and_static_pairs() {
        let mut world = hecs::World::new();
        let (owner, _) = boxed(&mut world, Vec2::ZERO, 2.0);
        attach_collider(
            &mut world,
            owner,
            ColliderShape::circle(Vec2::ZERO, 1.0).unwrap(),
        );
        assert!(find_pairs(&world).is_empty(), "same-owner pair must be skipped");

        let mut world = hecs::World::new();
        for _ in 0..2 {
            let owner = world.spawn((Transform::identity(),));
            spawn_collider(
                &mut world,
                Collider::new(owner, ColliderShape::sized_box(Vec2::ONE).unwrap()).fixed(),
            );
        }
        assert!(find_pairs(&world).is_empty(), "static-static pair must be skipped");
    }

    #[test]
    fn test_area_query() {
        let mut world = hecs::World::new();
        let (_, collider) = boxed(&mut world, Vec2::ZERO, 10.0);

        let hits = colliders_in_area(&world, &BoundingRect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(hits, vec![collider]);

        let misses = colliders_in_area(&world, &BoundingRect::new(50.0, 50.0, 5.0, 5.0));
        assert!(misses.is_empty());
    }

    #[test]
    fn test_area_query_ignores_disabled() {
        let mut world = hecs::World::new();
        let (owner, _) = boxed(&mut world, Vec2::ZERO, 10.0);
        world.insert_one(owner, Disabled).unwrap();
        let hits = colliders_in_area(&world, &BoundingRect::new(0.0, 0.0, 10.0, 10.0));
        assert!(hits.is_empty());
    }
}
