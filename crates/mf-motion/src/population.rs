//! `Population<E>` — every entity of a run, ordered by scheduled start.
//!
//! The only constructors sort, so holding a `Population` is proof of the
//! ordering.  Nothing afterwards can reorder it: entities are reachable by
//! index for mutation, but the backing `Vec` is never exposed mutably.

use crate::Traveller;

#[derive(Clone, Debug)]
pub struct Population<E> {
    entities: Vec<E>,
}

impl<E> Default for Population<E> {
    fn default() -> Self {
        Self { entities: Vec::new() }
    }
}

impl<E: Traveller> Population<E> {
    /// Sort `entities` ascending by start instant.
    ///
    /// The sort is stable: entities with equal start instants keep their
    /// input order, which keeps activation order deterministic.
    pub fn from_unsorted(mut entities: Vec<E>) -> Self {
        entities.sort_by_key(|e| e.start_time());
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.entities.get(index)
    }

    /// Mutable access to one entity.  Ordering cannot change through this:
    /// `Traveller::start_time` is fixed per entity.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entities
    }

    /// `true` if every adjacent pair is in start order.
    pub fn is_sorted(&self) -> bool {
        self.entities
            .windows(2)
            .all(|w| w[0].start_time() <= w[1].start_time())
    }

    /// Earliest scheduled start, `None` if empty.
    pub fn first_start(&self) -> Option<mf_core::SimTime> {
        self.entities.first().map(Traveller::start_time)
    }

    pub fn into_vec(self) -> Vec<E> {
        self.entities
    }
}

impl<E: Traveller> FromIterator<E> for Population<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for &'a Population<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
