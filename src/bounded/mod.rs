mod channel;
mod inner;
mod ring;
mod storage;

pub use channel::{Consumer, Producer};
pub use inner::BlockChannel;
