//! Bounded and unbounded in-process channels for byte blocks.
//!
//! The centerpiece is [`BlockChannel`]: a fixed number of fixed-size byte
//! slots in one ring, shared by any number of producer and consumer
//! threads. Puts and gets come in non-blocking and blocking (optionally
//! timed) forms; a full or empty channel is reported as a normal
//! [`TransferError`], distinct from a buffer of the wrong size.
//!
//! [`UnboundedQueue`] and [`BytePipe`] are the simpler siblings for when no
//! capacity limit and no blocking are needed.

pub mod bounded;
pub mod config;
pub mod deadline;
pub mod error;
pub mod unbounded;

pub use bounded::{BlockChannel, Consumer, Producer};
pub use config::ChannelConfig;
pub use deadline::Deadline;
pub use error::{CreateError, Result, TransferError};
pub use unbounded::{BytePipe, UnboundedQueue};
