use crate::utils::errors::{CredHubError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Handle to a CredHub operation running on the tokio runtime.
///
/// Awaiting the handle yields the operation's result. Calling [`cancel`]
/// or dropping the handle aborts the operation, closing its in-flight
/// connection.
///
/// [`cancel`]: CredHubTask::cancel
#[derive(Debug)]
pub struct CredHubTask<T> {
    handle: Option<JoinHandle<Result<T>>>,
}

impl<T: Send + 'static> CredHubTask<T> {
    pub(crate) fn spawn<Fut>(operation: Fut) -> Self
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(operation)),
        }
    }
}

impl<T> CredHubTask<T> {
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("Cancelling CredHub operation");
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl<T> Future for CredHubTask<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(handle) = self.handle.as_mut() else {
            return Poll::Ready(Err(CredHubError::Cancelled));
        };

        let joined = match Pin::new(handle).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(joined) => joined,
        };
        self.handle = None;

        match joined {
            Ok(result) => Poll::Ready(result),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Poll::Ready(Err(CredHubError::Cancelled)),
        }
    }
}

impl<T> Drop for CredHubTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
