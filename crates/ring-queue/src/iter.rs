use std::iter::FusedIterator;

use crate::RingBuffer;

/// Borrowing iterator over the live elements of a [`RingBuffer`], oldest first.
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    idx: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) const fn new(ring: &'a RingBuffer<T>) -> Self {
        Self {
            ring,
            idx: ring.front,
            remaining: ring.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` counts the slots between `idx` and `rear`, all of which are live
        let item = unsafe { self.ring.slots[self.idx].assume_init_ref() };

        self.idx = self.ring.advance(self.idx);
        self.remaining -= 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
