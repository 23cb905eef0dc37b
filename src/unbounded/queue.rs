use parking_lot::Mutex;
use std::collections::VecDeque;

/// An unbounded, lock-protected FIFO of `T`.
///
/// Unlike [`BlockChannel`](crate::BlockChannel) this never fills up and
/// never blocks: [`push`](Self::push) always succeeds and
/// [`pop`](Self::pop) returns `None` when nothing is queued. It can be
/// shared between any number of threads by reference or `Arc`.
pub struct UnboundedQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> UnboundedQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends `value` at the back.
    #[inline]
    pub fn push(&self, value: T) {
        self.items.lock().push_back(value);
    }

    /// Removes the value at the front, or returns `None` if empty.
    #[inline]
    pub fn pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Drops every queued value.
    pub fn clear(&self) {
        self.items.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T: Clone> UnboundedQueue<T> {
    /// Returns a copy of the front value without removing it.
    pub fn peek(&self) -> Option<T> {
        self.items.lock().front().cloned()
    }
}

impl<T> Default for UnboundedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for UnboundedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnboundedQueue")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::UnboundedQueue;
    use std::sync::Arc;
    use std::thread;

    const COUNT: usize = 100_000;

    #[test]
    fn single_thread_push_pop() {
        let queue = UnboundedQueue::new();
        for i in 0..1000 {
            queue.push(i);
            assert_eq!(queue.peek(), Some(i));
            assert_eq!(queue.pop(), Some(i));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn batch_push_pop() {
        let queue = UnboundedQueue::new();
        for i in 0..COUNT {
            queue.push(i);
        }
        assert_eq!(queue.len(), COUNT);
        for i in 0..COUNT {
            assert_eq!(queue.pop(), Some(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_empties() {
        let queue = UnboundedQueue::new();
        queue.push("a");
        queue.push("b");
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn threaded_push_pop() {
        let queue = Arc::new(UnboundedQueue::new());
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..COUNT {
                    queue.push(i);
                }
            })
        };

        for i in 0..COUNT {
            loop {
                if let Some(v) = queue.pop() {
                    assert_eq!(v, i);
                    break;
                }
                thread::yield_now();
            }
        }
        producer.join().unwrap();
        assert_eq!(queue.pop(), None);
    }
}
