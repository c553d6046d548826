//! First-match collision sweep
//!
//! Every live sprite A, in insertion order, scans the other live sprites B.
//! The first B whose bounding box overlaps A's is handed to the reaction
//! callback and A's scan stops there. B is not excluded from being matched
//! again later as an A, so the policy is asymmetric and order dependent.
//! Each sprite reacts at most once per sweep in the A role.

use crate::world::World;

/// Indices of two overlapping sprites, `a` being the scanning sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Sprite whose scan found the overlap
    pub a: usize,
    /// Sprite it overlapped
    pub b: usize,
}

/// Run one sweep over the world, calling `on_collision` for each match
///
/// The callback may mutate the world, including pushing new sprites.
/// Those are visited by the same sweep since the loop bound is re-read on
/// every iteration. Returns the number of reactions dispatched.
pub fn detect_collisions<K, F>(world: &mut World<K>, mut on_collision: F) -> usize
where
    K: Copy,
    F: FnMut(&mut World<K>, CollisionPair),
{
    let mut reactions = 0;
    let mut a = 0;
    while a < world.len() {
        if !is_alive(world, a) {
            a += 1;
            continue;
        }

        let mut b = 0;
        while b < world.len() {
            if b != a && is_alive(world, b) {
                if overlaps(world, a, b) {
                    if let Some(sprite) = world.get_mut(a) {
                        sprite.set_collided(true);
                    }
                    on_collision(world, CollisionPair { a, b });
                    reactions += 1;
                    break;
                }
                if let Some(sprite) = world.get_mut(a) {
                    sprite.set_collided(false);
                }
            }
            b += 1;
        }
        a += 1;
    }

    log::trace!("Collision sweep dispatched {} reactions", reactions);
    reactions
}

fn is_alive<K: Copy>(world: &World<K>, index: usize) -> bool {
    world.get(index).is_some_and(|sprite| sprite.is_alive())
}

fn overlaps<K: Copy>(world: &World<K>, a: usize, b: usize) -> bool {
    match (world.get(a), world.get(b)) {
        (Some(first), Some(second)) => first.collides_with(second),
        _ => false,
    }
}
