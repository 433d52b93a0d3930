//! Transient message expiry.
//!
//! Each error or success message arms a timer. Arming a new timer aborts the
//! previous one, and a timer only fires for the generation it was armed for.

use std::{
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;

#[derive(Debug)]
pub(crate) struct MessageExpiry {
    ttl: Duration,
    generation: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl MessageExpiry {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            generation: AtomicU64::new(0),
            pending: Mutex::new(None),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a new generation, invalidating every armed timer.
    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Track `timer` as the pending expiry, aborting the one it replaces.
    pub(crate) fn replace(&self, timer: JoinHandle<()>) {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);

        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for MessageExpiry {
    fn drop(&mut self) {
        if let Some(timer) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_supersede_each_other() {
        let expiry = MessageExpiry::new(Duration::from_secs(5));

        let first = expiry.next_generation();
        let second = expiry.next_generation();

        assert!(!expiry.is_current(first));
        assert!(expiry.is_current(second));
    }

    #[tokio::test]
    async fn replacing_a_timer_aborts_the_previous_one() {
        let expiry = MessageExpiry::new(Duration::from_secs(5));

        let (alive, dropped) = tokio::sync::oneshot::channel::<()>();

        expiry.replace(tokio::spawn(async move {
            let _alive = alive;
            std::future::pending::<()>().await;
        }));
        expiry.replace(tokio::spawn(std::future::pending::<()>()));

        assert!(dropped.await.is_err(), "first timer should have been aborted");
    }
}
