//! Fixed-capacity entity pools.
//!
//! Slots never move, so indices held across ticks stay meaningful. Each slot
//! carries an active flag and a generation counter; freeing a slot bumps its
//! generation, which invalidates every outstanding [`Handle`] to it.
//!
//! `live` is adjusted exactly at allocate/free, so it always equals the number
//! of active flags without a reconciliation pass.

use serde::{Deserialize, Serialize};

use starhaul_core::components::Particle;
use starhaul_core::types::Handle;

/// Structure-of-arrays pool: payloads, active flags and generations are
/// stored side by side and indexed by slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    items: Vec<T>,
    active: Vec<bool>,
    generations: Vec<u32>,
    /// Inactive slots that `allocate` must skip (a downed Mothership).
    reserved: Vec<bool>,
    #[serde(skip)]
    live: usize,
}

impl<T: Default + Clone> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![T::default(); capacity],
            active: vec![false; capacity],
            generations: vec![0; capacity],
            reserved: vec![false; capacity],
            live: 0,
        }
    }
}

impl<T> Pool<T> {
    /// Place `item` in the first free slot. `None` when the pool is full;
    /// callers skip silently.
    pub fn allocate(&mut self, item: T) -> Option<Handle<T>> {
        let index = (0..self.items.len()).find(|&i| !self.active[i] && !self.reserved[i])?;
        self.items[index] = item;
        self.active[index] = true;
        self.live += 1;
        Some(Handle::new(index as u32, self.generations[index]))
    }

    /// Deactivate a slot. Returns false if it was not active.
    pub fn free(&mut self, index: usize) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.active[index] = false;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.live -= 1;
        true
    }

    /// Free a slot but keep it out of circulation until [`Pool::restore`].
    pub fn free_reserved(&mut self, index: usize) -> bool {
        if !self.free(index) {
            return false;
        }
        self.reserved[index] = true;
        true
    }

    /// Reactivate a reserved slot with a new payload.
    pub fn restore(&mut self, index: usize, item: T) -> Option<Handle<T>> {
        if !self.reserved.get(index).copied().unwrap_or(false) {
            return None;
        }
        self.reserved[index] = false;
        self.items[index] = item;
        self.active[index] = true;
        self.live += 1;
        Some(Handle::new(index as u32, self.generations[index]))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn is_reserved(&self, index: usize) -> bool {
        self.reserved.get(index).copied().unwrap_or(false)
    }

    /// Slot index for a handle that still refers to a live entity.
    pub fn resolve(&self, handle: Handle<T>) -> Option<usize> {
        let index = handle.slot();
        (self.is_active(index) && self.generations[index] == handle.generation).then_some(index)
    }

    pub fn is_live(&self, handle: Handle<T>) -> bool {
        self.resolve(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.resolve(handle).map(|i| &self.items[i])
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.resolve(handle).map(move |i| &mut self.items[i])
    }

    /// Handle to an active slot.
    pub fn handle(&self, index: usize) -> Option<Handle<T>> {
        self.is_active(index)
            .then(|| Handle::new(index as u32, self.generations[index]))
    }

    /// Payload of a slot, active or not.
    pub fn slot(&self, index: usize) -> &T {
        &self.items[index]
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }

    /// Active slot indices, ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, &active)| active.then_some(i))
            .collect()
    }

    /// Handles to every active slot, ascending by index.
    pub fn active_handles(&self) -> Vec<Handle<T>> {
        self.active_indices()
            .into_iter()
            .map(|i| Handle::new(i as u32, self.generations[i]))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| self.active[*i])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.items
            .iter_mut()
            .zip(self.active.iter())
            .enumerate()
            .filter_map(|(i, (item, &active))| active.then_some((i, item)))
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Count active flags directly. Only used to check the live counter.
    pub fn count_active(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Re-derive the live counter after deserialization.
    pub(crate) fn recount(&mut self) {
        self.live = self.count_active();
    }

    /// Structural consistency of a deserialized pool.
    pub(crate) fn is_well_formed(&self) -> bool {
        let n = self.items.len();
        self.active.len() == n && self.generations.len() == n && self.reserved.len() == n
    }
}

/// Ring buffer of particles with a single advancing write cursor.
///
/// When every slot is busy the oldest particle is overwritten. This bounds
/// memory; under pressure old particles just die early.
#[derive(Debug, Clone)]
pub struct ParticleRing {
    particles: Vec<Particle>,
    active: Vec<bool>,
    cursor: usize,
    live: usize,
}

impl ParticleRing {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            active: vec![false; capacity],
            cursor: 0,
            live: 0,
        }
    }

    pub fn spawn(&mut self, particle: Particle) {
        if self.particles.is_empty() {
            return;
        }
        let index = self.cursor;
        if !self.active[index] {
            self.live += 1;
        }
        self.particles[index] = particle;
        self.active[index] = true;
        self.cursor = (self.cursor + 1) % self.particles.len();
    }

    /// Run `update` on every live particle; those for which it returns false die.
    pub fn update(&mut self, mut update: impl FnMut(&mut Particle) -> bool) {
        for (particle, active) in self.particles.iter_mut().zip(self.active.iter_mut()) {
            if *active && !update(particle) {
                *active = false;
                self.live -= 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles
            .iter()
            .zip(self.active.iter())
            .filter_map(|(p, &active)| active.then_some(p))
    }

    pub fn clear(&mut self) {
        self.active.iter_mut().for_each(|a| *a = false);
        self.cursor = 0;
        self.live = 0;
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn count_active(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starhaul_core::components::Asteroid;

    #[test]
    fn allocate_and_free() {
        let mut pool: Pool<Asteroid> = Pool::with_capacity(4);
        let h = pool.allocate(Asteroid::default()).unwrap();
        assert!(pool.is_live(h));
        assert_eq!(pool.live_count(), 1);

        assert!(pool.free(h.slot()));
        assert!(!pool.is_live(h));
        assert_eq!(pool.live_count(), 0);
        assert!(!pool.free(h.slot()), "Double free is a no-op");
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn reuse_bumps_generation() {
        let mut pool: Pool<Asteroid> = Pool::with_capacity(2);
        let first = pool.allocate(Asteroid::default()).unwrap();
        pool.free(first.slot());
        let second = pool.allocate(Asteroid::default()).unwrap();
        assert_eq!(first.index, second.index);
        assert_ne!(first.generation, second.generation);
        assert!(pool.get(first).is_none(), "Stale handle must not resolve");
        assert!(pool.get(second).is_some());
    }

    #[test]
    fn full_pool_returns_none() {
        let mut pool: Pool<Asteroid> = Pool::with_capacity(2);
        assert!(pool.allocate(Asteroid::default()).is_some());
        assert!(pool.allocate(Asteroid::default()).is_some());
        assert!(pool.allocate(Asteroid::default()).is_none());
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn reserved_slot_skipped_until_restored() {
        let mut pool: Pool<Asteroid> = Pool::with_capacity(2);
        let a = pool.allocate(Asteroid::default()).unwrap();
        assert!(pool.free_reserved(a.slot()));
        let b = pool.allocate(Asteroid::default()).unwrap();
        assert_ne!(a.index, b.index);
        assert!(pool.allocate(Asteroid::default()).is_none());

        let restored = pool.restore(a.slot(), Asteroid::default()).unwrap();
        assert_eq!(restored.index, a.index);
        assert_eq!(pool.live_count(), 2);
        assert_eq!(pool.live_count(), pool.count_active());
    }

    #[test]
    fn ring_overwrites_oldest() {
        let mut ring = ParticleRing::with_capacity(3);
        for i in 0..5 {
            ring.spawn(Particle {
                life: 1.0,
                size: i as f32,
                ..Default::default()
            });
        }
        assert_eq!(ring.live_count(), 3);
        assert_eq!(ring.count_active(), 3);
        let sizes: Vec<f32> = ring.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![3.0, 4.0, 2.0]);
        assert_eq!(ring.cursor(), 2);
    }

    #[test]
    fn ring_update_kills_expired() {
        let mut ring = ParticleRing::with_capacity(4);
        ring.spawn(Particle {
            life: 0.05,
            ..Default::default()
        });
        ring.spawn(Particle {
            life: 1.0,
            ..Default::default()
        });
        ring.update(|p| {
            p.life -= 0.1;
            p.life > 0.0
        });
        assert_eq!(ring.live_count(), 1);
        assert_eq!(ring.count_active(), 1);
    }
}
