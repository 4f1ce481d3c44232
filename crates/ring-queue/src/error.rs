use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidCapacity {
    #[error("invalid value {0} as the capacity of a ring buffer, capacity must be positive")]
    NotPositive(i64),
    #[error("capacity does not fit in the address space")]
    TooLarge,
}

/// Returned by [`RingBuffer::enqueue`](crate::RingBuffer::enqueue) when no usable slot is free.
///
/// Carries the rejected item so the caller can retry later or drop it.
#[derive(Error, Clone, PartialEq, Eq)]
#[error("the ring buffer is full, cannot enqueue")]
pub struct QueueFull<T>(pub T);

impl<T> QueueFull<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

// does not require `T: Debug`, same as `std::sync::mpsc::SendError`
impl<T> fmt::Debug for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueFull").finish_non_exhaustive()
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[error("the ring buffer is empty, cannot dequeue")]
pub struct QueueEmpty;

/// Every failure a ring buffer can report, for callers that propagate with `?`.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    InvalidCapacity(#[from] InvalidCapacity),
    #[error("the ring buffer is full, cannot enqueue")]
    QueueFull,
    #[error(transparent)]
    QueueEmpty(#[from] QueueEmpty),
}

impl<T> From<QueueFull<T>> for Error {
    fn from(_: QueueFull<T>) -> Self {
        Self::QueueFull
    }
}
