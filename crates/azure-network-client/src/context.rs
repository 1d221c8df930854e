//! Request context carrying cancellation and a deadline.
//!
//! Every provider call takes a [`Context`]. Once the context is cancelled or
//! its deadline passes, calls fail fast with [`AzureError::Cancelled`] or
//! [`AzureError::DeadlineExceeded`] instead of waiting on the network.

use crate::error::AzureError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation and deadline carrier for a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the [`Context`] it was created with, and every clone of it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancels the context. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: None,
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// A cancellable context and the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle { tx })
    }

    /// The reason this context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<AzureError> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(AzureError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(AzureError::DeadlineExceeded);
        }
        None
    }

    /// Drives `fut` to completion unless the context finishes first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, AzureError>
    where
        F: Future<Output = Result<T, AzureError>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        tokio::select! {
            res = fut => res,
            () = self.cancelled() => Err(AzureError::Cancelled),
            () = self.expired() => Err(AzureError::DeadlineExceeded),
        }
    }

    async fn cancelled(&self) {
        let Some(rx) = &self.cancel else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        // Sender dropped without cancelling: this context can no longer be cancelled.
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_context_runs_future() {
        let ctx = Context::background();
        assert!(ctx.err().is_none());
        let value = ctx.run(async { Ok::<_, AzureError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancelled_context_fails_fast() {
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();
        assert!(matches!(ctx.err(), Some(AzureError::Cancelled)));

        let result = ctx.run(async { Ok::<_, AzureError>(()) }).await;
        assert!(matches!(result, Err(AzureError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_call() {
        let (ctx, handle) = Context::with_cancel();
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();

        let call = tokio::spawn({
            let ctx = ctx.clone();
            async move {
                ctx.run(async move {
                    let _ = started_tx.send(());
                    std::future::pending::<()>().await;
                    Ok::<_, AzureError>(())
                })
                .await
            }
        });

        started_rx.await.unwrap();
        handle.cancel();

        let result = tokio::time::timeout(Duration::from_secs(2), call)
            .await
            .expect("cancelled call did not return")
            .unwrap();
        assert!(matches!(result, Err(AzureError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_in_flight_call() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, AzureError>(())
            })
            .await;
        assert!(matches!(result, Err(AzureError::DeadlineExceeded)));
        assert!(matches!(ctx.err(), Some(AzureError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = Context::with_cancel();
        drop(handle);
        let value = ctx.run(async { Ok::<_, AzureError>("done") }).await.unwrap();
        assert_eq!(value, "done");
    }
}
