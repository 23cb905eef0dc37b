//! Producer and consumer handles over a shared [`BlockChannel`].
//!
//! # Overview
//! [`BlockChannel::split`] creates a channel and returns a [`Producer`] and a
//! [`Consumer`] that share it through an `Arc`. Both handles are cloneable,
//! so any number of threads may produce and consume concurrently.
//!
//! A producer only sees the operations that add blocks and a consumer only
//! the ones that take them, which keeps call sites such as a worker pool
//! (consumer side, [`Consumer::get_blocking`]) or a transport adapter
//! (producer side, [`Producer::put`]) honest about their role.
//!
//! # Example
//! ```
//! use blockring::BlockChannel;
//!
//! let (tx, rx) = BlockChannel::split(8, 32).unwrap();
//!
//! let worker = std::thread::spawn(move || {
//!     let mut buf = [0u8; 8];
//!     rx.get_blocking(&mut buf, -1).unwrap();
//!     u64::from_le_bytes(buf)
//! });
//!
//! tx.put(&42u64.to_le_bytes()).unwrap();
//! assert_eq!(worker.join().unwrap(), 42);
//! ```
//!
//! # Teardown
//! The channel's storage lives as long as the last handle. A thread blocked
//! in [`Consumer::get_blocking`] owns a handle, so dropping every other
//! handle never frees memory under a waiter.

use super::inner::BlockChannel;
use crate::error::{CreateError, Result};
use std::sync::Arc;
use std::time::Duration;

impl BlockChannel {
    /// Creates a channel and splits it into its producer and consumer halves.
    pub fn split(
        block_size: usize,
        capacity: usize,
    ) -> std::result::Result<(Producer, Consumer), CreateError> {
        let inner = Arc::new(BlockChannel::new(block_size, capacity)?);
        Ok(Self::share(inner))
    }

    /// Wraps an already shared channel in a producer/consumer pair.
    pub fn share(inner: Arc<BlockChannel>) -> (Producer, Consumer) {
        let producer = Producer {
            inner: Arc::clone(&inner),
        };
        (producer, Consumer { inner })
    }
}

/// The sending half of a [`BlockChannel`].
#[derive(Clone, Debug)]
pub struct Producer {
    inner: Arc<BlockChannel>,
}

impl Producer {
    /// See [`BlockChannel::put`].
    #[inline]
    pub fn put(&self, data: &[u8]) -> Result<()> {
        self.inner.put(data)
    }

    /// See [`BlockChannel::put_blocking`].
    #[inline]
    pub fn put_blocking(&self, data: &[u8], timeout_ms: i64) -> Result<()> {
        self.inner.put_blocking(data, timeout_ms)
    }

    /// See [`BlockChannel::put_timeout`].
    #[inline]
    pub fn put_timeout(&self, data: &[u8], timeout: Duration) -> Result<()> {
        self.inner.put_timeout(data, timeout)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// The channel behind this handle.
    pub fn channel(&self) -> &Arc<BlockChannel> {
        &self.inner
    }
}

/// The receiving half of a [`BlockChannel`].
#[derive(Clone, Debug)]
pub struct Consumer {
    inner: Arc<BlockChannel>,
}

impl Consumer {
    /// See [`BlockChannel::get`].
    #[inline]
    pub fn get(&self, buf: &mut [u8]) -> Result<()> {
        self.inner.get(buf)
    }

    /// See [`BlockChannel::get_blocking`].
    #[inline]
    pub fn get_blocking(&self, buf: &mut [u8], timeout_ms: i64) -> Result<()> {
        self.inner.get_blocking(buf, timeout_ms)
    }

    /// See [`BlockChannel::get_timeout`].
    #[inline]
    pub fn get_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<()> {
        self.inner.get_timeout(buf, timeout)
    }

    /// See [`BlockChannel::peek`].
    #[inline]
    pub fn peek(&self, buf: &mut [u8]) -> Result<()> {
        self.inner.peek(buf)
    }

    /// Drops every queued block. See [`BlockChannel::clear`].
    #[inline]
    pub fn clear(&self) {
        self.inner.clear()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// The channel behind this handle.
    pub fn channel(&self) -> &Arc<BlockChannel> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;
    use std::thread;

    #[test]
    fn split_shares_one_channel() {
        let (tx, rx) = BlockChannel::split(2, 2).unwrap();
        assert!(Arc::ptr_eq(tx.channel(), rx.channel()));
        assert_eq!(tx.capacity(), 2);
        assert_eq!(rx.block_size(), 2);

        tx.put(&[1, 2]).unwrap();
        assert_eq!(rx.size(), 1);
        let mut buf = [0u8; 2];
        rx.get(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert!(rx.is_empty());
    }

    #[test]
    fn split_reports_create_errors() {
        assert_eq!(
            BlockChannel::split(0, 1).unwrap_err(),
            CreateError::ZeroBlockSize
        );
    }

    #[test]
    fn threaded_stream() {
        const COUNT: u32 = 50_000;
        let (tx, rx) = BlockChannel::split(4, 16).unwrap();

        let producer = thread::spawn(move || {
            for i in 0..COUNT {
                tx.put_blocking(&i.to_le_bytes(), -1).unwrap();
            }
        });

        let mut buf = [0u8; 4];
        for i in 0..COUNT {
            rx.get_blocking(&mut buf, -1).unwrap();
            assert_eq!(u32::from_le_bytes(buf), i);
        }
        producer.join().unwrap();
        assert_eq!(rx.get(&mut buf), Err(TransferError::Empty));
    }

    #[test]
    fn waiter_keeps_channel_alive() {
        let (tx, rx) = BlockChannel::split(1, 1).unwrap();
        let channel = Arc::clone(rx.channel());

        let waiter = thread::spawn(move || {
            let mut buf = [0u8; 1];
            rx.get_timeout(&mut buf, Duration::from_millis(100))
        });

        // Every handle outside the waiter goes away while it is parked.
        thread::sleep(Duration::from_millis(20));
        drop(tx);
        assert!(Arc::strong_count(&channel) >= 2);
        let weak = Arc::downgrade(&channel);
        drop(channel);

        assert_eq!(waiter.join().unwrap(), Err(TransferError::Timeout));
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn clear_from_consumer_side_unblocks_producer() {
        let (tx, rx) = BlockChannel::split(1, 1).unwrap();
        tx.put(&[1]).unwrap();

        let blocked = {
            let tx = tx.clone();
            thread::spawn(move || tx.put_blocking(&[2], 5_000))
        };

        thread::sleep(Duration::from_millis(20));
        rx.clear();
        assert_eq!(blocked.join().unwrap(), Ok(()));

        let mut buf = [0u8; 1];
        rx.peek(&mut buf).unwrap();
        assert_eq!(buf, [2]);
        assert!(tx.is_full());
    }
}
