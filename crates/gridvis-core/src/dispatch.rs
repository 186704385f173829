//! Synchronous dispatch onto a render-control thread.
//!
//! Toolkits require drawing and window changes to happen on one owner thread.
//! [`Dispatcher`] abstracts that thread; [`invoke_and_wait`] hands a task to
//! it and blocks until the task has run, executing inline when the caller is
//! already on the owner thread. [`RenderThread`] is a dedicated thread that
//! implements [`Dispatcher`] for backends without their own event loop.

use crate::constants::RENDER_THREAD_NAME;
use crate::error::DispatchError;
use crate::types::Job;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::{self, JoinHandle, ThreadId};
use tracing::{debug, error, trace};

/// The owner thread of a toolkit.
pub trait Dispatcher: Send + Sync {
    /// True when called from the owner thread itself.
    fn is_dispatch_thread(&self) -> bool;

    /// Queue `job` for execution on the owner thread without waiting.
    fn post(&self, job: Job) -> Result<(), DispatchError>;
}

/// Run `task` on the dispatcher's thread and return its result.
///
/// Blocks the calling thread until the task completes. Runs the task inline
/// when already on the dispatch thread, so nested calls cannot deadlock.
pub fn invoke_and_wait<D, F, R>(dispatcher: &D, task: F) -> Result<R, DispatchError>
where
    D: Dispatcher + ?Sized,
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if dispatcher.is_dispatch_thread() {
        trace!("invoke_and_wait: running inline on dispatch thread");
        return Ok(task());
    }

    let (tx, rx) = mpsc::sync_channel(1);
    dispatcher.post(Box::new(move || {
        let outcome = panic::catch_unwind(AssertUnwindSafe(task)).map_err(panic_message);
        // The waiter only disappears if its thread died; nothing to report to.
        let _ = tx.send(outcome);
    }))?;

    match rx.recv() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(message)) => Err(DispatchError::TaskPanicked { message }),
        Err(_) => Err(DispatchError::Disconnected),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A dedicated render-control thread draining a job queue.
///
/// The queue closes and the thread is joined on [`RenderThread::shutdown`]
/// or drop. Jobs already queued still run before the thread exits.
pub struct RenderThread {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    thread_id: ThreadId,
}

impl RenderThread {
    /// Start a render thread with the default name.
    pub fn spawn() -> Result<Self, DispatchError> {
        Self::spawn_named(RENDER_THREAD_NAME)
    }

    /// Start a render thread with a custom name.
    pub fn spawn_named(name: impl Into<String>) -> Result<Self, DispatchError> {
        let name = name.into();
        let (tx, rx) = mpsc::channel::<Job>();

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                debug!("Render thread started");
                while let Ok(job) = rx.recv() {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                        error!("Render job panicked: {}", panic_message(payload));
                    }
                }
                debug!("Render thread stopped");
            })
            .map_err(|e| DispatchError::Spawn {
                reason: format!("{}: {}", name, e),
            })?;

        let thread_id = handle.thread().id();
        Ok(Self {
            sender: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
            thread_id,
        })
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub fn is_running(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Close the queue and wait for the thread to drain it.
    ///
    /// When called from the render thread itself the join is skipped; the
    /// thread exits once the current job returns.
    pub fn shutdown(&self) {
        drop(self.sender.lock().take());

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if thread::current().id() == self.thread_id {
                return;
            }
            if handle.join().is_err() {
                error!("Render thread terminated abnormally");
            }
        }
    }
}

impl Dispatcher for RenderThread {
    fn is_dispatch_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    fn post(&self, job: Job) -> Result<(), DispatchError> {
        let sender = self.sender.lock();
        let sender = sender.as_ref().ok_or(DispatchError::Disconnected)?;
        sender.send(job).map_err(|_| DispatchError::Disconnected)
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for RenderThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderThread")
            .field("thread_id", &self.thread_id)
            .field("running", &self.is_running())
            .finish()
    }
}
