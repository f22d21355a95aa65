//! Runtime abstraction layer for async operations
//!
//! The engine never blocks its caller: provider calls run as fire-and-forget
//! tasks whose results come back over a channel. This module abstracts how
//! those tasks are driven so the engine does not depend on a specific async
//! runtime. Cancellation is advisory throughout the crate: superseded tasks
//! are left to finish and their results are discarded on arrival, so
//! spawners hand out no join handles.

use futures::future::BoxFuture;
use std::sync::Arc;

/// A trait for spawning fire-and-forget async tasks (object-safe)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future to run to completion in the background
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>);
}

/// Convenience wrapper so callers can spawn unboxed futures
pub fn spawn<F>(spawner: &dyn AsyncSpawner, future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    spawner.spawn_boxed(Box::pin(future));
}

/// Tokio-based async spawner
#[cfg(feature = "tokio-runtime")]
pub struct TokioSpawner;

#[cfg(feature = "tokio-runtime")]
impl AsyncSpawner for TokioSpawner {
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) {
        tokio::spawn(future);
    }
}

/// Spawner that runs each task to completion on the calling thread.
///
/// Tasks execute synchronously and immediately, which makes engine behavior
/// fully deterministic: completions are already queued when the spawn call
/// returns. Only suitable for futures that do not suspend on a timer or I/O.
pub struct BlockingSpawner;

impl AsyncSpawner for BlockingSpawner {
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) {
        futures::executor::block_on(future);
    }
}

/// The default spawner for the current feature set
pub fn default_spawner() -> Arc<dyn AsyncSpawner> {
    #[cfg(feature = "tokio-runtime")]
    {
        Arc::new(TokioSpawner)
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        Arc::new(BlockingSpawner)
    }
}
