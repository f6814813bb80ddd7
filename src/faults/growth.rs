//! Unbounded memory growth.
//!
//! # Responsibilities
//! - Own the leaking buffer shared by `/health` (leak mode) and `/oom`
//! - Double the buffer on every growth step, with no upper bound
//! - Stream `size=<N>` lines while growing, pausing between steps
//!
//! # Design Decisions
//! - One buffer per server runtime, held in `AppState`
//! - Lock is held only for a single doubling, never across an await
//! - Allocation failure is not handled; the process is expected to die

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::body::Bytes;
use futures_util::stream::{self, Stream};

/// A buffer that only ever doubles in length.
#[derive(Debug)]
pub struct GrowthBuffer {
    data: Vec<u8>,
}

impl GrowthBuffer {
    /// Create a buffer holding a single element.
    pub fn new() -> Self {
        Self { data: vec![1] }
    }

    /// Append a full copy of the current contents. Returns the new length.
    pub fn grow(&mut self) -> usize {
        self.data.extend_from_within(..);
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for GrowthBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the buffer shared between handlers.
#[derive(Debug, Clone, Default)]
pub struct SharedGrowth {
    inner: Arc<Mutex<GrowthBuffer>>,
}

impl SharedGrowth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform one doubling step and return the new length.
    pub fn grow(&self) -> usize {
        let size = self.lock().grow();
        tracing::debug!(size, "Growth buffer doubled");
        size
    }

    /// Current length of the buffer.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while doubling leaves the buffer intact, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, GrowthBuffer> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Endless stream of `size=<N>\n` chunks, one doubling per chunk.
    ///
    /// The first chunk is produced immediately; every following chunk waits
    /// `interval` first. The stream ends only when it is dropped.
    pub fn stream(&self, interval: Duration) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        let growth = self.clone();
        stream::unfold((growth, false), move |(growth, started)| async move {
            if started {
                tokio::time::sleep(interval).await;
            }
            let size = growth.grow();
            let line = Bytes::from(format!("size={}\n", size));
            Some((Ok(line), (growth, true)))
        })
    }
}
