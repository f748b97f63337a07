// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active objects: state owned by one private worker thread
//!
//! An `ActiveObject<S>` owns a value `S` that only its worker thread ever
//! touches. Other threads reach it by sending messages (`FnOnce(&mut S)`)
//! through an unbounded queue. Messages run one at a time, to completion,
//! in submission order, so the queue boundary acts as the lock around `S`.
//! With `S = ()` this is a plain "run this on one logical thread" executor.
//!
//! The worker sleeps on the queue and is woken by each send, so an idle
//! object costs no CPU and a new message is picked up immediately.
//!
//! A message that panics is not caught. The worker thread dies, every
//! message still queued is dropped (their pending results resolve to
//! [`DispatchError::Dropped`]) and later sends fail with
//! [`ActiveError::Stopped`]. There is no restart.

use crate::error::DispatchError;
use crate::pending::Pending;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Errors that can occur when starting or messaging an active object
#[derive(Debug, Error)]
pub enum ActiveError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("active object {0} is no longer running")]
    Stopped(String),
}

/// A unit of work executed on the worker thread
pub type Message<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

enum Envelope<S> {
    Run(Message<S>),
    Stop,
}

/// Cloneable sending side of an active object
///
/// Handles do not keep the worker alive; once the owning `ActiveObject` is
/// dropped every send through a handle fails.
pub struct ActiveHandle<S> {
    name: Arc<str>,
    sender: mpsc::UnboundedSender<Envelope<S>>,
    running: Arc<AtomicBool>,
}

impl<S: Send + 'static> ActiveHandle<S> {
    /// Queues a message for the worker; never blocks
    pub fn send<F>(&self, message: F) -> Result<(), ActiveError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.sender
            .send(Envelope::Run(Box::new(message)))
            .map_err(|_| ActiveError::Stopped(self.name.to_string()))
    }

    /// Queues a message and returns a handle to its result
    pub fn call<R, F>(&self, message: F) -> Pending<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut S) -> R + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let sent = self.send(move |state| {
            // The caller may have dropped its Pending; nothing to report then
            let _ = tx.send(message(state));
        });
        match sent {
            Ok(()) => Pending::waiting(rx),
            Err(e) => Pending::failed(DispatchError::from(e)),
        }
    }

    /// False once the worker has exited, normally or by panic
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> Clone for ActiveHandle<S> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
            running: Arc::clone(&self.running),
        }
    }
}

impl<S> std::fmt::Debug for ActiveHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveHandle")
            .field("name", &self.name)
            .field("running", &self.running.load(Ordering::Acquire))
            .finish()
    }
}

/// Builder for configuring an active object's worker thread
#[derive(Debug, Clone, Default)]
pub struct ActiveObjectBuilder {
    name: Option<String>,
}

impl ActiveObjectBuilder {
    /// Sets the worker thread name (also used in logs and errors)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Starts a stateless active object
    pub fn spawn(self) -> Result<ActiveObject, ActiveError> {
        self.spawn_with(())
    }

    /// Starts an active object whose worker owns `state`
    pub fn spawn_with<S: Send + 'static>(self, state: S) -> Result<ActiveObject<S>, ActiveError> {
        let name: Arc<str> = self.name.unwrap_or_else(|| "active-object".to_string()).into();
        // Thread names are C strings
        if name.contains('\0') {
            return Err(ActiveError::Spawn(io::Error::new(
                io::ErrorKind::InvalidInput,
                "worker name contains a NUL byte",
            )));
        }
        let (sender, receiver) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));

        let worker = thread::Builder::new().name(name.to_string()).spawn({
            let name = Arc::clone(&name);
            let running = Arc::clone(&running);
            move || run(name, state, receiver, running)
        })?;

        tracing::info!(name = %name, "active object started");

        Ok(ActiveObject {
            handle: ActiveHandle {
                name,
                sender,
                running,
            },
            worker: Some(worker),
        })
    }
}

/// Owner of a private worker thread and the state it guards
///
/// Dropping the object queues a stop message behind everything already
/// sent, then joins the worker. Quiesce other senders before dropping:
/// messages they send after the stop message are discarded unrun.
pub struct ActiveObject<S: Send + 'static = ()> {
    handle: ActiveHandle<S>,
    worker: Option<JoinHandle<()>>,
}

impl ActiveObject {
    /// Starts a stateless active object with default settings
    pub fn new() -> Result<Self, ActiveError> {
        Self::builder().spawn()
    }

    pub fn builder() -> ActiveObjectBuilder {
        ActiveObjectBuilder::default()
    }
}

impl<S: Send + 'static> ActiveObject<S> {
    /// Queues a message for the worker; never blocks
    pub fn send<F>(&self, message: F) -> Result<(), ActiveError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.handle.send(message)
    }

    /// Queues a message and returns a handle to its result
    pub fn call<R, F>(&self, message: F) -> Pending<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut S) -> R + Send + 'static,
    {
        self.handle.call(message)
    }

    /// A cloneable sender for use from other threads
    pub fn handle(&self) -> ActiveHandle<S> {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }
}

impl<S: Send + 'static> Drop for ActiveObject<S> {
    fn drop(&mut self) {
        // Fails only if the worker is already gone
        let _ = self.handle.sender.send(Envelope::Stop);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!(name = %self.handle.name, "active object worker terminated abnormally");
            }
        }
    }
}

impl<S: Send + 'static> std::fmt::Debug for ActiveObject<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveObject")
            .field("handle", &self.handle)
            .finish()
    }
}

/// Clears the running flag however the worker exits
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn run<S>(
    name: Arc<str>,
    mut state: S,
    mut receiver: mpsc::UnboundedReceiver<Envelope<S>>,
    running: Arc<AtomicBool>,
) {
    let _guard = RunningGuard(running);

    while let Some(envelope) = receiver.blocking_recv() {
        match envelope {
            Envelope::Run(message) => message(&mut state),
            Envelope::Stop => break,
        }
    }

    tracing::info!(name = %name, "active object stopped");
}

#[cfg(test)]
#[path = "active_tests.rs"]
mod tests;
