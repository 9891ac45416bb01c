//! Fixed-capacity circular store of pending characters with one mark slot.
//!
//! # Invariants
//! - `count <= capacity` and `head, tail < capacity`.
//! - `tail == (head + count) % capacity`.
//! - While marked, `mark == (head - rewind) % capacity` and
//!   `rewind + count <= capacity`: every character consumed since the mark is
//!   still physically present between `mark` and `head`.
//!
//! A write into the marked slot (possible only once `rewind + count`
//! reaches the capacity) invalidates the mark. Resetting moves `head`
//! back to the mark and adds the consumed characters back to `count`, so the
//! count always equals the number of replayable characters.

use alloc::{boxed::Box, vec};

use crate::error::BufferError;

/// Fixed-capacity ring of characters.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Box<[char]>,
    head: usize,
    tail: usize,
    count: usize,
    mark: Option<usize>,
    /// Characters consumed since the mark was set.
    rewind: usize,
}

impl RingBuffer {
    /// Creates an empty ring holding at most `capacity` characters.
    ///
    /// # Errors
    ///
    /// [`BufferError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self::with_capacity(capacity))
    }

    /// `capacity` must be non-zero.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec!['\0'; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
            mark: None,
            rewind: 0,
        }
    }

    /// The fixed number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of unconsumed characters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no unconsumed characters are buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if every slot holds an unconsumed character.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Returns `true` while a valid mark is set.
    #[inline]
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.mark.is_some()
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index % self.capacity()
    }

    /// Appends `c` after the last unconsumed character.
    ///
    /// # Errors
    ///
    /// [`BufferError::Full`] if every slot holds unconsumed input.
    pub fn add(&mut self, c: char) -> Result<(), BufferError> {
        if self.is_full() {
            return Err(BufferError::Full);
        }
        // The marked region already spans every slot, so `tail` is the mark.
        if self.mark.is_some() && self.rewind + self.count == self.capacity() {
            tracing::debug!(slot = self.tail, "mark overwritten, invalidating");
            self.clear_mark();
        }
        self.slots[self.tail] = c;
        self.tail = self.wrap(self.tail + 1);
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the oldest unconsumed character.
    ///
    /// # Errors
    ///
    /// [`BufferError::Empty`] if nothing is buffered.
    pub fn remove(&mut self) -> Result<char, BufferError> {
        if self.is_empty() {
            return Err(BufferError::Empty);
        }
        let c = self.slots[self.head];
        self.consume(1);
        Ok(c)
    }

    /// Discards the `n` oldest unconsumed characters.
    ///
    /// # Errors
    ///
    /// [`BufferError::Empty`] if fewer than `n` characters are buffered; the
    /// buffer is left untouched.
    pub fn advance(&mut self, n: usize) -> Result<(), BufferError> {
        if n > self.count {
            return Err(BufferError::Empty);
        }
        self.consume(n);
        Ok(())
    }

    fn consume(&mut self, n: usize) {
        self.head = self.wrap(self.head + n);
        self.count -= n;
        if self.mark.is_some() {
            self.rewind += n;
        }
    }

    /// Returns the character `n` positions after the head without removing
    /// it, or `None` if fewer than `n + 1` characters are buffered.
    #[inline]
    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<char> {
        (n < self.count).then(|| self.slots[self.wrap(self.head + n)])
    }

    /// Moves as many buffered characters as fit into `dst`, oldest first, and
    /// returns how many were moved.
    pub fn drain_into(&mut self, dst: &mut [char]) -> usize {
        let n = dst.len().min(self.count);
        let first = n.min(self.capacity() - self.head);
        dst[..first].copy_from_slice(&self.slots[self.head..self.head + first]);
        dst[first..n].copy_from_slice(&self.slots[..n - first]);
        self.consume(n);
        n
    }

    /// Records the current head as the mark, replacing any earlier mark.
    ///
    /// `limit` is the number of characters the caller intends to read before
    /// resetting; it may not exceed the capacity.
    ///
    /// # Errors
    ///
    /// [`BufferError::MarkLimitExceedsCapacity`] if `limit > capacity`.
    pub fn set_mark(&mut self, limit: usize) -> Result<(), BufferError> {
        if limit > self.capacity() {
            return Err(BufferError::MarkLimitExceedsCapacity {
                limit,
                capacity: self.capacity(),
            });
        }
        self.mark = Some(self.head);
        self.rewind = 0;
        Ok(())
    }

    /// Moves the head back to the mark so the characters consumed since then
    /// are read again. The mark stays set.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidMark`] if no mark is set or it was overwritten.
    pub fn reset_to_mark(&mut self) -> Result<(), BufferError> {
        let mark = self.mark.ok_or(BufferError::InvalidMark)?;
        self.head = mark;
        self.count += self.rewind;
        self.rewind = 0;
        debug_assert_eq!(self.tail, self.wrap(self.head + self.count));
        Ok(())
    }

    /// Forgets the mark.
    pub fn clear_mark(&mut self) {
        self.mark = None;
        self.rewind = 0;
    }

    /// Discards all buffered characters and the mark.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.clear_mark();
    }
}
