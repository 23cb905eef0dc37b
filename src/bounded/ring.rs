use super::storage::SlotStorage;

/// Slot storage plus the `head`/`tail`/`count` triple describing which
/// slots are live.
///
/// # Wrap-around logic
///
/// `head` and `tail` cycle through `0..capacity`. Instead of `% capacity`,
/// the incremented index is multiplied by the boolean `(index + 1) < capacity`:
///
/// ```text
/// let next = (index + 1) * ((index + 1) < capacity) as usize;
/// ```
///
/// which yields `index + 1`, or zero once the end of the ring is reached.
///
/// # Full and empty
///
/// `count` is kept explicitly, so every slot is usable and the full and empty
/// tests are a single comparison each. The live slots are the `count` slots
/// starting at `head`, walking forward cyclically.
///
/// `RingState` has no synchronization; it is only ever reached through the
/// channel's mutex.
pub(crate) struct RingState {
    storage: SlotStorage,
    capacity: usize,
    head: usize,
    tail: usize,
    count: usize,
}

impl RingState {
    pub(crate) fn new(storage: SlotStorage, capacity: usize) -> Self {
        Self {
            storage,
            capacity,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[inline(always)]
    fn advance(&self, index: usize) -> usize {
        let is_less = ((index + 1) < self.capacity) as usize;
        (index + 1) * is_less
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub(crate) fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Writes `data` at `tail`. The caller has checked that the ring is not
    /// full and that `data` is one block long.
    #[inline]
    pub(crate) fn push(&mut self, data: &[u8]) {
        debug_assert!(!self.is_full());
        self.storage.write(self.tail, data);
        self.tail = self.advance(self.tail);
        self.count += 1;
    }

    /// Copies the block at `head` into `buf` and frees its slot. The caller
    /// has checked that the ring is not empty.
    #[inline]
    pub(crate) fn pop(&mut self, buf: &mut [u8]) {
        debug_assert!(!self.is_empty());
        self.storage.read(self.head, buf);
        self.head = self.advance(self.head);
        self.count -= 1;
    }

    /// Copies the block at `head` into `buf` without freeing it.
    #[inline]
    pub(crate) fn peek(&self, buf: &mut [u8]) {
        debug_assert!(!self.is_empty());
        self.storage.read(self.head, buf);
    }

    /// Forgets every live block. Slot bytes are left in place; with
    /// `count == 0` they are unreachable.
    pub(crate) fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    #[cfg(test)]
    fn indices(&self) -> (usize, usize, usize) {
        (self.head, self.tail, self.count)
    }
}
