#![doc = include_str!("../README.md")]
//!
//! Only two cursors are tracked: `front` (oldest live element) and `rear` (next slot to write).
//! The buffer is empty when they are equal and full when advancing `rear` would land on
//! `front`. Telling the two states apart this way costs one slot, so a buffer with
//! `capacity` slots holds at most `capacity - 1` elements.
//!
//! The other well-known layout keeps a live-count next to the cursors: empty is `count == 0`,
//! full is `count == capacity`, and every slot is usable. It is not used here.

use std::{alloc::Layout, fmt, mem::MaybeUninit};

use itertools::Itertools;
use tracing::{debug, trace};

mod error;
mod iter;

pub use error::{Error, InvalidCapacity, QueueEmpty, QueueFull};
pub use iter::Iter;

/// A bounded, non-blocking FIFO queue.
///
/// Not synchronized. Mutation takes `&mut self`, so sharing across threads needs an outer lock
/// or a single owning thread.
pub struct RingBuffer<T> {
    slots: Box<[MaybeUninit<T>]>,
    capacity: usize,
    front: usize,
    rear: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with `capacity` slots, of which `capacity - 1` are usable.
    ///
    /// Capacities whose slots would not fit in a single allocation are rejected with
    /// [`InvalidCapacity::TooLarge`].
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        if capacity == 0 {
            return Err(InvalidCapacity::NotPositive(0));
        }

        Layout::array::<T>(capacity).map_err(|_| InvalidCapacity::TooLarge)?;

        debug!(capacity, usable = capacity - 1, "allocating ring buffer");

        Ok(Self {
            slots: Box::new_uninit_slice(capacity),
            capacity,
            front: 0,
            rear: 0,
        })
    }

    /// Like [`Self::new`] for callers holding a signed capacity; zero and negative values are rejected.
    pub fn from_signed_capacity(capacity: i64) -> Result<Self, InvalidCapacity> {
        if capacity <= 0 {
            return Err(InvalidCapacity::NotPositive(capacity));
        }

        let capacity = usize::try_from(capacity).map_err(|_| InvalidCapacity::TooLarge)?;
        Self::new(capacity)
    }

    /// Creates a buffer that can hold exactly `usable` elements.
    pub fn with_usable_capacity(usable: usize) -> Result<Self, InvalidCapacity> {
        let capacity = usable.checked_add(1).ok_or(InvalidCapacity::TooLarge)?;
        Self::new(capacity)
    }

    /// The index following `idx` on the ring. Indices past the end are reduced modulo the
    /// capacity first, so this never overflows.
    #[must_use]
    pub const fn advance(&self, idx: usize) -> usize {
        (idx % self.capacity + 1) % self.capacity
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.front == self.rear
    }

    /// With a capacity of 1 this is true from construction on, since no slot is usable.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.advance(self.rear) == self.front
    }

    /// Number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.rear >= self.front {
            self.rear - self.front
        } else {
            self.capacity - self.front + self.rear
        }
    }

    /// Total number of slots, including the one that is never filled.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn usable_capacity(&self) -> usize {
        self.capacity - 1
    }

    #[must_use]
    pub const fn front(&self) -> usize {
        self.front
    }

    #[must_use]
    pub const fn rear(&self) -> usize {
        self.rear
    }

    /// Appends `item` at the tail. On a full buffer the item is handed back and nothing changes.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueFull<T>> {
        if self.is_full() {
            trace!(
                front = self.front,
                rear = self.rear,
                "rejecting enqueue, ring buffer is full"
            );
            return Err(QueueFull(item));
        }

        // the slot is either unset or holds a value that was already moved out by `dequeue`
        self.slots[self.rear].write(item);
        self.rear = self.advance(self.rear);

        Ok(())
    }

    /// Removes and returns the oldest element.
    pub fn dequeue(&mut self) -> Result<T, QueueEmpty> {
        if self.is_empty() {
            trace!(
                front = self.front,
                rear = self.rear,
                "rejecting dequeue, ring buffer is empty"
            );
            return Err(QueueEmpty);
        }

        // SAFETY: the buffer is not empty, so `front` was written by `enqueue`. Advancing `front`
        // right after makes the slot unreachable, so the value is read out exactly once.
        let item = unsafe { self.slots[self.front].assume_init_read() };
        self.front = self.advance(self.front);

        Ok(item)
    }

    /// The oldest element, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        // SAFETY: the buffer is not empty, so `front` is live
        Some(unsafe { self.slots[self.front].assume_init_ref() })
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Dequeues until the buffer is empty.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        std::iter::from_fn(move || {
            if self.is_empty() {
                return None;
            }
            self.dequeue().ok()
        })
    }

    /// Drops every live element and rewinds both cursors to 0.
    pub fn clear(&mut self) {
        while !self.is_empty() {
            let idx = self.front;

            // advance first so a panicking destructor cannot lead to a second drop of this slot
            self.front = self.advance(idx);

            // SAFETY: `idx` was `front` of a non-empty buffer and is now unreachable
            unsafe { self.slots[idx].assume_init_drop() };
        }

        self.front = 0;
        self.rear = 0;
    }

    /// Space separated rendering of the live elements, oldest first. For diagnostics only.
    #[must_use]
    pub fn show_items(&self) -> String
    where
        T: fmt::Debug,
    {
        self.iter().map(|item| format!("{item:?}")).join(" ")
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut slots: Box<[MaybeUninit<T>]> = Box::new_uninit_slice(self.capacity);

        let mut idx = self.front;
        for item in self {
            slots[idx].write(item.clone());
            idx = self.advance(idx);
        }

        Self {
            slots,
            capacity: self.capacity,
            front: self.front,
            rear: self.rear,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("front", &self.front)
            .field("rear", &self.rear)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
