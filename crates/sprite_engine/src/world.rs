//! Live sprite collection
//!
//! The [`World`] owns every sprite in insertion order, which is also the
//! update, collision and draw order. Dead sprites stay in place until the
//! engine purges them, so indices handed out during a tick stay valid for
//! the rest of that tick.

use crate::sprite::Sprite;

/// Sprites, pause gate and tick clock shared by the engine and the game
#[derive(Debug, Clone)]
pub struct World<K> {
    sprites: Vec<Sprite<K>>,
    paused: bool,
    now_millis: u64,
}

impl<K: Copy> World<K> {
    /// Create an empty, running world
    pub fn new() -> Self {
        Self {
            sprites: Vec::new(),
            paused: false,
            now_millis: 0,
        }
    }

    /// Append a sprite and return its index
    pub fn add(&mut self, sprite: Sprite<K>) -> usize {
        self.sprites.push(sprite);
        self.sprites.len() - 1
    }

    /// Sprite at `index`
    pub fn get(&self, index: usize) -> Option<&Sprite<K>> {
        self.sprites.get(index)
    }

    /// Mutable sprite at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite<K>> {
        self.sprites.get_mut(index)
    }

    /// Two distinct sprites borrowed mutably at once
    ///
    /// Returns `None` when the indices are equal or out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Sprite<K>, &mut Sprite<K>)> {
        if a == b || a >= self.sprites.len() || b >= self.sprites.len() {
            return None;
        }
        if a < b {
            let (head, tail) = self.sprites.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.sprites.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    /// All sprites, dead ones included, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Sprite<K>> {
        self.sprites.iter()
    }

    /// Mutable iteration in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite<K>> {
        self.sprites.iter_mut()
    }

    /// Live sprites only
    pub fn alive(&self) -> impl Iterator<Item = &Sprite<K>> {
        self.sprites.iter().filter(|sprite| sprite.is_alive())
    }

    /// Number of stored sprites, dead ones included
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprite is stored
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Number of live sprites
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Drop every sprite
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Remove every dead sprite, keeping the order of the rest
    ///
    /// Returns how many were removed.
    pub fn purge(&mut self) -> usize {
        let before = self.sprites.len();
        self.sprites.retain(Sprite::is_alive);
        before - self.sprites.len()
    }

    /// Freeze sprite updates and collisions
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unfreeze sprite updates and collisions
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the world is frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Milliseconds since the engine started, as of the current tick
    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    /// Set the tick clock; the engine does this at the start of each tick
    pub fn set_now_millis(&mut self, now: u64) {
        self.now_millis = now;
    }
}

impl<K: Copy + PartialEq> World<K> {
    /// Index of the first live sprite of the given kind
    pub fn find(&self, kind: K) -> Option<usize> {
        self.sprites
            .iter()
            .position(|sprite| sprite.is_alive() && sprite.kind() == kind)
    }

    /// Number of live sprites of the given kind
    pub fn count_kind(&self, kind: K) -> usize {
        self.alive().filter(|sprite| sprite.kind() == kind).count()
    }
}

impl<K: Copy> Default for World<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Rock,
        Ship,
    }

    #[test]
    fn test_purge_keeps_order() {
        let mut world = World::new();
        for i in 0..6 {
            let mut sprite = Sprite::new(Kind::Rock).with_position(Vec2::new(f64::from(i), 0.0));
            // two consecutive dead sprites in the middle
            sprite.set_alive(!(i == 2 || i == 3));
            world.add(sprite);
        }

        assert_eq!(world.purge(), 2);
        let xs: Vec<f64> = world.iter().map(|s| s.position().x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 4.0, 5.0]);
        assert_eq!(world.purge(), 0);
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut world = World::new();
        world.add(Sprite::new(Kind::Rock));
        world.add(Sprite::new(Kind::Ship));

        let (a, b) = world.pair_mut(1, 0).expect("distinct indices");
        assert_eq!(a.kind(), Kind::Ship);
        assert_eq!(b.kind(), Kind::Rock);
        a.set_alive(false);

        assert!(!world.get(1).expect("present").is_alive());
        assert!(world.pair_mut(0, 0).is_none());
        assert!(world.pair_mut(0, 7).is_none());
    }

    #[test]
    fn test_find_skips_dead() {
        let mut world = World::new();
        let mut old_ship = Sprite::new(Kind::Ship);
        old_ship.set_alive(false);
        world.add(old_ship);
        world.add(Sprite::new(Kind::Rock));
        let ship = world.add(Sprite::new(Kind::Ship));

        assert_eq!(world.find(Kind::Ship), Some(ship));
        assert_eq!(world.count_kind(Kind::Ship), 1);
        assert_eq!(world.alive_count(), 2);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_pause_gate() {
        let mut world: World<Kind> = World::new();
        assert!(!world.is_paused());
        world.pause();
        assert!(world.is_paused());
        world.resume();
        assert!(!world.is_paused());
    }
}
