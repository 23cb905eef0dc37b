use parking_lot::Mutex;
use std::collections::VecDeque;

/// An unbounded byte stream.
///
/// Writers append any number of bytes; readers take up to as many bytes as
/// their buffer holds. There are no block boundaries: two writes of three
/// bytes can come back as one read of six. Like
/// [`UnboundedQueue`](super::UnboundedQueue) it never blocks.
pub struct BytePipe {
    bytes: Mutex<VecDeque<u8>>,
}

impl BytePipe {
    pub fn new() -> Self {
        Self {
            bytes: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends all of `data` and returns its length.
    pub fn write(&self, data: &[u8]) -> usize {
        self.bytes.lock().extend(data);
        data.len()
    }

    /// Moves up to `buf.len()` bytes into `buf` and returns how many were
    /// copied; zero when the pipe is empty.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        let mut bytes = self.bytes.lock();
        let n = copy_front(&bytes, buf);
        bytes.drain(..n);
        n
    }

    /// Like [`read`](Self::read) but leaves the bytes in the pipe.
    pub fn peek(&self, buf: &mut [u8]) -> usize {
        copy_front(&self.bytes.lock(), buf)
    }

    /// Discards every buffered byte.
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }
}

fn copy_front(bytes: &VecDeque<u8>, buf: &mut [u8]) -> usize {
    let n = buf.len().min(bytes.len());
    let (front, back) = bytes.as_slices();
    let from_front = n.min(front.len());
    buf[..from_front].copy_from_slice(&front[..from_front]);
    buf[from_front..n].copy_from_slice(&back[..n - from_front]);
    n
}

impl Default for BytePipe {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BytePipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BytePipe").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::BytePipe;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn writes_coalesce() {
        let pipe = BytePipe::new();
        assert_eq!(pipe.write(&[1, 2, 3]), 3);
        assert_eq!(pipe.write(&[4, 5, 6]), 3);

        let mut buf = [0u8; 6];
        assert_eq!(pipe.read(&mut buf), 6);
        assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
        assert!(pipe.is_empty());
    }

    #[test]
    fn partial_reads() {
        let pipe = BytePipe::new();
        pipe.write(b"hello world");

        let mut buf = [0u8; 5];
        assert_eq!(pipe.read(&mut buf), 5);
        assert_eq!(&buf, b"hello");
        assert_eq!(pipe.len(), 6);

        let mut rest = [0u8; 16];
        assert_eq!(pipe.read(&mut rest), 6);
        assert_eq!(&rest[..6], b" world");
        assert_eq!(pipe.read(&mut rest), 0);
    }

    #[test]
    fn peek_across_wrap() {
        let pipe = BytePipe::new();
        let mut buf = [0u8; 4];
        // Move the deque's start forward so the contents can straddle its wrap point.
        for _ in 0..10 {
            pipe.write(&[0; 3]);
            pipe.read(&mut buf[..3]);
        }
        pipe.write(&[1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(pipe.peek(&mut buf), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(pipe.len(), 7);
        assert_eq!(pipe.read(&mut buf), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(pipe.read(&mut buf), 3);
        assert_eq!(&buf[..3], &[5, 6, 7]);
    }

    #[test]
    fn clear_discards() {
        let pipe = BytePipe::new();
        pipe.write(&[9; 32]);
        pipe.clear();
        let mut buf = [0u8; 1];
        assert_eq!(pipe.peek(&mut buf), 0);
        assert_eq!(pipe.len(), 0);
    }

    #[test]
    fn threaded_stream_preserves_order() {
        const TOTAL: usize = 64 * 1024;
        let pipe = Arc::new(BytePipe::new());

        let writer = {
            let pipe = Arc::clone(&pipe);
            thread::spawn(move || {
                let data: Vec<u8> = (0..TOTAL).map(|i| i as u8).collect();
                for chunk in data.chunks(1000) {
                    pipe.write(chunk);
                }
            })
        };

        let mut received = Vec::with_capacity(TOTAL);
        let mut buf = [0u8; 333];
        while received.len() < TOTAL {
            let n = pipe.read(&mut buf);
            if n == 0 {
                thread::yield_now();
            }
            received.extend_from_slice(&buf[..n]);
        }
        writer.join().unwrap();

        assert!(received.iter().enumerate().all(|(i, b)| *b == i as u8));
    }
}
