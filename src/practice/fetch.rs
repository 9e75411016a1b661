//! Cancellable loads.
//!
//! A [`FetchSlot`] holds at most one in-flight load. Starting another load
//! aborts the previous one, and dropping the slot aborts whatever is still
//! running. An aborted load resolves to [`DrillError::Cancelled`].

use std::future::Future;

use futures::future::{AbortHandle, Abortable};

use crate::error::{DrillError, Result};

#[derive(Debug, Default)]
pub struct FetchSlot {
    current: Option<AbortHandle>,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `load` so it can be aborted through this slot, aborting the
    /// load started before it.
    ///
    /// The returned future does not borrow the slot.
    pub fn begin<F, T>(&mut self, load: F) -> impl Future<Output = Result<T>> + use<F, T>
    where
        F: Future<Output = Result<T>>,
    {
        self.abort();
        let (handle, registration) = AbortHandle::new_pair();
        self.current = Some(handle);

        async move {
            Abortable::new(load, registration)
                .await
                .unwrap_or(Err(DrillError::Cancelled))
        }
    }

    /// Aborts the in-flight load, if any.
    pub fn abort(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}

impl Drop for FetchSlot {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_load_passes_through() {
        let mut slot = FetchSlot::new();
        let value = slot.begin(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_new_load_supersedes_previous() {
        let mut slot = FetchSlot::new();
        let first = slot.begin(futures::future::pending::<Result<u32>>());
        let second = slot.begin(async { Ok(2) });

        assert!(matches!(first.await, Err(DrillError::Cancelled)));
        assert_eq!(second.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_dropping_slot_aborts_load() {
        let mut slot = FetchSlot::new();
        let load = slot.begin(futures::future::pending::<Result<()>>());
        drop(slot);
        assert!(matches!(load.await, Err(DrillError::Cancelled)));
    }

    #[tokio::test]
    async fn test_abort_cancels_in_flight_load() {
        let mut slot = FetchSlot::new();
        let load = slot.begin(futures::future::pending::<Result<()>>());
        slot.abort();
        assert!(matches!(load.await, Err(DrillError::Cancelled)));
    }
}
