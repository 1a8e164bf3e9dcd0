use std::sync::atomic::{AtomicBool, Ordering};

/// Holds a busy flag for its lifetime.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Sets the flag, or returns `None` when it is already set.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_the_guard_drops() {
        let flag = AtomicBool::new(false);

        let guard = BusyGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(flag.load(Ordering::SeqCst));
        assert!(BusyGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::SeqCst));
        assert!(BusyGuard::acquire(&flag).is_some());
    }

    #[test]
    fn flag_is_released_on_early_return() {
        fn fails_while_holding(flag: &AtomicBool) -> Result<(), &'static str> {
            let _guard = BusyGuard::acquire(flag).ok_or("busy")?;
            Err("failed")
        }

        let flag = AtomicBool::new(false);
        assert_eq!(fails_while_holding(&flag), Err("failed"));
        assert!(!flag.load(Ordering::SeqCst));
    }
}
