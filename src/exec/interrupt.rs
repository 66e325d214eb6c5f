// src/exec/interrupt.rs

//! Host-driven interruption of a running gauge process.

use std::sync::Arc;

use tokio::sync::watch;

/// Sender side of the interruption signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl InterruptHandle {
    /// Request interruption. Idempotent.
    pub fn interrupt(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_interrupted(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Create a fresh, not-yet-fired interruption signal.
pub fn interrupt_channel() -> (InterruptHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (InterruptHandle { tx: Arc::new(tx) }, rx)
}

/// Resolve once interruption has been requested.
///
/// Never resolves when there is no receiver, or when every handle was dropped
/// without firing.
pub(crate) async fn interrupted(rx: &mut Option<watch::Receiver<bool>>) {
    match rx {
        Some(rx) => {
            let closed = rx.wait_for(|fired| *fired).await.is_err();
            if closed {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

pub(crate) fn already_interrupted(rx: &Option<watch::Receiver<bool>>) -> bool {
    rx.as_ref().is_some_and(|rx| *rx.borrow())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn fires_after_interrupt() {
        let (handle, rx) = interrupt_channel();
        let mut rx = Some(rx);
        assert!(!already_interrupted(&rx));

        handle.interrupt();

        tokio::time::timeout(Duration::from_secs(1), interrupted(&mut rx))
            .await
            .expect("interruption should resolve");
        assert!(already_interrupted(&rx));
        assert!(handle.is_interrupted());
    }

    #[tokio::test]
    async fn dropped_handle_never_fires() {
        let (handle, rx) = interrupt_channel();
        drop(handle);
        let mut rx = Some(rx);

        let res = tokio::time::timeout(Duration::from_millis(50), interrupted(&mut rx)).await;
        assert!(res.is_err(), "should still be pending");
    }
}
