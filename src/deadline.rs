use std::time::{Duration, Instant};

/// How long a blocking call may wait.
///
/// The deadline is fixed once when the call starts. Every wakeup waits only
/// for what is left until that instant, so spurious wakeups neither extend
/// nor shorten the total budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Wait until the condition holds, however long that takes.
    Never,
    /// Do not wait at all.
    Immediate,
    /// Give up once this instant has passed.
    At(Instant),
}

impl Deadline {
    /// Maps a millisecond timeout: negative waits forever, zero does not
    /// wait, positive bounds the wait.
    pub fn from_millis(timeout_ms: i64) -> Self {
        match timeout_ms {
            ms if ms < 0 => Deadline::Never,
            0 => Deadline::Immediate,
            ms => Self::after(Duration::from_millis(ms as u64)),
        }
    }

    /// A deadline `timeout` from now. A zero duration does not wait.
    pub fn after(timeout: Duration) -> Self {
        if timeout.is_zero() {
            return Deadline::Immediate;
        }
        match Instant::now().checked_add(timeout) {
            Some(at) => Deadline::At(at),
            // Too far in the future to represent.
            None => Deadline::Never,
        }
    }

    /// Returns `true` if the caller must stop waiting now.
    #[inline]
    pub fn has_passed(&self) -> bool {
        match self {
            Deadline::Never => false,
            Deadline::Immediate => true,
            Deadline::At(at) => Instant::now() >= *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_convention() {
        assert_eq!(Deadline::from_millis(-1), Deadline::Never);
        assert_eq!(Deadline::from_millis(i64::MIN), Deadline::Never);
        assert_eq!(Deadline::from_millis(0), Deadline::Immediate);
        assert!(matches!(Deadline::from_millis(10), Deadline::At(_)));
    }

    #[test]
    fn passing() {
        assert!(!Deadline::Never.has_passed());
        assert!(Deadline::Immediate.has_passed());
        assert!(!Deadline::after(Duration::from_secs(60)).has_passed());

        let soon = Deadline::after(Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(10));
        assert!(soon.has_passed());
    }

    #[test]
    fn zero_duration_does_not_wait() {
        assert_eq!(Deadline::after(Duration::ZERO), Deadline::Immediate);
    }
}
