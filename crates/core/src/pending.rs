// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handle to a result computed on an active object's worker

use crate::error::DispatchError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

enum State<T> {
    Waiting(oneshot::Receiver<T>),
    Failed(Option<DispatchError>),
}

/// Result of a unit of work submitted to an active object
///
/// Await it from async code, or call [`Pending::wait`] from a plain thread.
/// If the unit of work never runs (the worker died or was torn down first)
/// the result is an error rather than a hang.
pub struct Pending<T> {
    state: State<T>,
}

impl<T> Pending<T> {
    pub(crate) fn waiting(receiver: oneshot::Receiver<T>) -> Self {
        Self {
            state: State::Waiting(receiver),
        }
    }

    pub(crate) fn failed(error: DispatchError) -> Self {
        Self {
            state: State::Failed(Some(error)),
        }
    }

    /// Blocks the calling thread until the result is available.
    ///
    /// Must not be called from inside an async runtime, nor from a listener
    /// callback running on the same worker (that worker would wait on itself).
    pub fn wait(self) -> Result<T, DispatchError> {
        match self.state {
            State::Waiting(receiver) => receiver.blocking_recv().map_err(|_| DispatchError::Dropped),
            State::Failed(error) => Err(error.unwrap_or(DispatchError::Dropped)),
        }
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, DispatchError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Waiting(receiver) => Pin::new(receiver)
                .poll(cx)
                .map(|result| result.map_err(|_| DispatchError::Dropped)),
            State::Failed(error) => Poll::Ready(Err(error.take().unwrap_or(DispatchError::Dropped))),
        }
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Waiting(_) => "waiting",
            State::Failed(_) => "failed",
        };
        f.debug_struct("Pending").field("state", &state).finish()
    }
}
