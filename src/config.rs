//! Construction parameters for a [`BlockChannel`](crate::BlockChannel).
//!
//! `ChannelConfig` derives `serde` traits so an application can embed it in
//! its own configuration file:
//!
//! ```toml
//! [frames]
//! block_size = 256
//! capacity = 32
//! ```

use crate::error::CreateError;
use serde::{Deserialize, Serialize};

const DEFAULT_BLOCK_SIZE: usize = 64;
const DEFAULT_CAPACITY: usize = 16;

/// Block size and slot count of a bounded channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Size in bytes of every block.
    pub block_size: usize,
    /// Number of blocks the channel holds at once.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ChannelConfig {
    pub fn new(block_size: usize, capacity: usize) -> Self {
        Self {
            block_size,
            capacity,
        }
    }

    /// Checks the parameters and returns the total storage size in bytes.
    pub fn validate(&self) -> Result<usize, CreateError> {
        if self.block_size == 0 {
            return Err(CreateError::ZeroBlockSize);
        }
        if self.capacity == 0 {
            return Err(CreateError::ZeroCapacity);
        }
        self.block_size
            .checked_mul(self.capacity)
            .ok_or(CreateError::Overflow {
                block_size: self.block_size,
                capacity: self.capacity,
            })
    }
}
