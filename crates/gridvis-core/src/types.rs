//! Type aliases for commonly used shared-state types.
//!
//! State touched from caller threads and from the render-control thread must
//! be `Send + Sync`. Locks are `parking_lot`, whose guards never poison.

use parking_lot::Mutex;
use std::sync::Arc;

/// A unit of work handed to the render-control thread.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
