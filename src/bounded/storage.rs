use crate::error::CreateError;

/// Flat storage for `capacity` slots of `block_size` bytes each.
///
/// Slot `i` occupies bytes `i * block_size .. (i + 1) * block_size`. This is
/// the only place that knows the layout; callers address slots by index.
///
/// # Safety of access
///
/// `SlotStorage` is plain owned memory with no synchronization of its own.
/// [`BlockChannel`](super::BlockChannel) keeps it inside the state mutex, so
/// every read and write happens under the lock and no borrow of a slot can
/// outlive the guard.
pub(crate) struct SlotStorage {
    bytes: Box<[u8]>,
    block_size: usize,
}

impl SlotStorage {
    /// Allocates zeroed storage. Allocation failure is reported instead of
    /// aborting the process.
    pub(crate) fn new(block_size: usize, capacity: usize) -> Result<Self, CreateError> {
        let len = block_size
            .checked_mul(capacity)
            .ok_or(CreateError::Overflow {
                block_size,
                capacity,
            })?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| CreateError::Allocation { bytes: len })?;
        bytes.resize(len, 0);

        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            block_size,
        })
    }

    /// Copies `data` into slot `index`. `data` must be exactly one block long.
    #[inline]
    pub(crate) fn write(&mut self, index: usize, data: &[u8]) {
        debug_assert_eq!(data.len(), self.block_size);
        let start = index * self.block_size;
        self.bytes[start..start + self.block_size].copy_from_slice(data);
    }

    /// Copies slot `index` into the first `block_size` bytes of `buf`.
    #[inline]
    pub(crate) fn read(&self, index: usize, buf: &mut [u8]) {
        debug_assert!(buf.len() >= self.block_size);
        let start = index * self.block_size;
        buf[..self.block_size].copy_from_slice(&self.bytes[start..start + self.block_size]);
    }
}
