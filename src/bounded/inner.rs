use super::ring::RingState;
use super::storage::SlotStorage;
use crate::config::ChannelConfig;
use crate::deadline::Deadline;
use crate::error::{CreateError, Result, TransferError};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// A bounded, multi-producer multi-consumer channel of fixed-size byte blocks.
///
/// # Overview
///
/// `BlockChannel` holds up to `capacity` blocks of exactly `block_size` bytes
/// in one pre-allocated ring. Producers [`put`](Self::put) blocks at the tail,
/// consumers [`get`](Self::get) them from the head in FIFO order.
///
/// Every operation comes in a non-blocking form, which fails immediately with
/// [`TransferError::Full`] or [`TransferError::Empty`], and a blocking form
/// that waits for room or data, optionally bounded by a timeout.
///
/// # Locking
///
/// The ring storage and the `head`/`tail`/`count` triple live in one
/// ring state behind a single [`Mutex`]. There is no lock-free fast path:
/// even [`peek`](Self::peek) and the status queries take the lock. Two
/// condition variables park blocked callers:
///
/// - `data_available`: signaled once per successful put.
/// - `space_available`: signaled once per successful get.
///
/// [`clear`](Self::clear) signals every waiter on both.
///
/// Waits re-check their condition after every wakeup and measure the
/// remaining time against a deadline fixed at entry, so spurious wakeups and
/// lost races with other threads neither lose data nor stretch the timeout.
///
/// # Sharing and teardown
///
/// Share a channel with `Arc<BlockChannel>`, a scoped borrow, or the
/// [`Producer`](super::Producer)/[`Consumer`](super::Consumer) pair from
/// [`BlockChannel::split`]. A thread blocked inside a call holds a borrow of
/// the channel, so the channel cannot be dropped while anyone waits in it;
/// the storage is released only after the last waiter has returned. There is
/// no closed state. To stop blocked callers, signal them out of band and
/// call [`clear`](Self::clear), or use short timeouts and retry.
///
/// # Example
///
/// ```
/// use blockring::{BlockChannel, TransferError};
///
/// let channel = BlockChannel::new(4, 2).unwrap();
/// channel.put(&[1, 2, 3, 4]).unwrap();
/// channel.put(&[5, 6, 7, 8]).unwrap();
/// assert_eq!(channel.put(&[9, 9, 9, 9]), Err(TransferError::Full));
///
/// let mut buf = [0u8; 4];
/// channel.get(&mut buf).unwrap();
/// assert_eq!(buf, [1, 2, 3, 4]);
/// ```
pub struct BlockChannel {
    block_size: usize,
    capacity: usize,
    state: Mutex<RingState>,
    data_available: Condvar,
    space_available: Condvar,
}

impl BlockChannel {
    /// Creates a channel of `capacity` blocks of `block_size` bytes.
    ///
    /// Fails if either parameter is zero, if the total size overflows, or if
    /// the storage cannot be allocated.
    pub fn new(block_size: usize, capacity: usize) -> std::result::Result<Self, CreateError> {
        Self::with_config(&ChannelConfig::new(block_size, capacity))
    }

    /// Creates a channel from a [`ChannelConfig`].
    pub fn with_config(config: &ChannelConfig) -> std::result::Result<Self, CreateError> {
        config.validate()?;
        let storage = SlotStorage::new(config.block_size, config.capacity)?;
        log::debug!(
            "created block channel: block_size={} capacity={}",
            config.block_size,
            config.capacity
        );
        Ok(Self {
            block_size: config.block_size,
            capacity: config.capacity,
            state: Mutex::new(RingState::new(storage, config.capacity)),
            data_available: Condvar::new(),
            space_available: Condvar::new(),
        })
    }

    /// Copies one block into the channel without waiting.
    ///
    /// `data` must be exactly `block_size` bytes. Returns
    /// [`TransferError::Full`] if no slot is free.
    pub fn put(&self, data: &[u8]) -> Result<()> {
        self.put_until(data, Deadline::Immediate)
    }

    /// Copies one block into the channel, waiting for a free slot.
    ///
    /// A negative `timeout_ms` waits indefinitely, zero behaves like
    /// [`put`](Self::put), and a positive value bounds the wait; on expiry
    /// the call returns [`TransferError::Timeout`].
    pub fn put_blocking(&self, data: &[u8], timeout_ms: i64) -> Result<()> {
        self.put_until(data, Deadline::from_millis(timeout_ms))
    }

    /// Like [`put_blocking`](Self::put_blocking) with a [`Duration`] budget.
    pub fn put_timeout(&self, data: &[u8], timeout: Duration) -> Result<()> {
        self.put_until(data, Deadline::after(timeout))
    }

    /// Copies one block into the channel, waiting at most until `deadline`.
    pub fn put_until(&self, data: &[u8], deadline: Deadline) -> Result<()> {
        if data.len() != self.block_size {
            return Err(self.size_mismatch("put", data.len()));
        }

        let mut state = self.state.lock();
        Self::wait_while(
            &mut state,
            &self.space_available,
            RingState::is_full,
            deadline,
            TransferError::Full,
        )?;
        state.push(data);
        drop(state);

        self.data_available.notify_one();
        Ok(())
    }

    /// Moves the oldest block into `buf` without waiting.
    ///
    /// `buf` must hold at least `block_size` bytes; only the first
    /// `block_size` are written. Returns [`TransferError::Empty`] if the
    /// channel holds no block.
    pub fn get(&self, buf: &mut [u8]) -> Result<()> {
        self.get_until(buf, Deadline::Immediate)
    }

    /// Moves the oldest block into `buf`, waiting for one to arrive.
    ///
    /// Timeout semantics match [`put_blocking`](Self::put_blocking).
    pub fn get_blocking(&self, buf: &mut [u8], timeout_ms: i64) -> Result<()> {
        self.get_until(buf, Deadline::from_millis(timeout_ms))
    }

    /// Like [`get_blocking`](Self::get_blocking) with a [`Duration`] budget.
    pub fn get_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        self.get_until(buf, Deadline::after(timeout))
    }

    /// Moves the oldest block into `buf`, waiting at most until `deadline`.
    pub fn get_until(&self, buf: &mut [u8], deadline: Deadline) -> Result<()> {
        if buf.len() < self.block_size {
            return Err(self.size_mismatch("get", buf.len()));
        }

        let mut state = self.state.lock();
        Self::wait_while(
            &mut state,
            &self.data_available,
            RingState::is_empty,
            deadline,
            TransferError::Empty,
        )?;
        state.pop(buf);
        drop(state);

        self.space_available.notify_one();
        Ok(())
    }

    /// Copies the oldest block into `buf` without removing it.
    ///
    /// This is a snapshot, not a reservation: another consumer may take the
    /// block before this caller calls [`get`](Self::get).
    pub fn peek(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < self.block_size {
            return Err(self.size_mismatch("peek", buf.len()));
        }

        let state = self.state.lock();
        if state.is_empty() {
            return Err(TransferError::Empty);
        }
        state.peek(buf);
        Ok(())
    }

    /// Drops every queued block and wakes all blocked callers so they
    /// re-evaluate against the empty channel.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.len();
        state.reset();
        drop(state);

        log::trace!("cleared block channel, {dropped} blocks dropped");
        self.space_available.notify_all();
        self.data_available.notify_all();
    }

    /// Returns `true` if the channel holds no block. Advisory only.
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Returns `true` if every slot is occupied. Advisory only.
    pub fn is_full(&self) -> bool {
        self.state.lock().is_full()
    }

    /// Number of queued blocks. Advisory only.
    pub fn size(&self) -> usize {
        self.state.lock().len()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Parks on `condvar` while `blocked` holds, re-checking after every
    /// wakeup. With [`Deadline::Immediate`] returns `would_block` instead of
    /// parking.
    fn wait_while(
        state: &mut MutexGuard<'_, RingState>,
        condvar: &Condvar,
        blocked: fn(&RingState) -> bool,
        deadline: Deadline,
        would_block: TransferError,
    ) -> Result<()> {
        while blocked(state) {
            match deadline {
                Deadline::Immediate => return Err(would_block),
                Deadline::Never => condvar.wait(state),
                Deadline::At(at) => {
                    if condvar.wait_until(state, at).timed_out() && blocked(state) {
                        return Err(TransferError::Timeout);
                    }
                }
            }
        }
        Ok(())
    }

    #[cold]
    fn size_mismatch(&self, op: &str, actual: usize) -> TransferError {
        log::debug!(
            "{op} rejected: buffer of {actual} bytes, block size is {}",
            self.block_size
        );
        TransferError::SizeMismatch {
            expected: self.block_size,
            actual,
        }
    }
}

impl std::fmt::Debug for BlockChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockChannel")
            .field("block_size", &self.block_size)
            .field("capacity", &self.capacity)
            .field("size", &self.size())
            .finish()
    }
}
