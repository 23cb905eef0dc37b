mod pipe;
mod queue;

pub use pipe::BytePipe;
pub use queue::UnboundedQueue;
