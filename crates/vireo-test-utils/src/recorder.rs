//! Recording sink for widget callbacks.

use std::sync::Arc;

use parking_lot::Mutex;

/// Records every value passed to a callback for later assertions.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Widget callbacks are `Fn + Send + Sync` and outlive the test's borrow of
/// the recorder, so the log lives behind `Arc<Mutex<_>>` and each sink holds
/// its own clone.
#[derive(Debug)]
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for CallRecorder<T> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Send + 'static> CallRecorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value.
    pub fn record(&self, value: T) {
        self.calls.lock().push(value);
    }

    /// Callback that records its argument.
    pub fn sink(&self) -> impl Fn(T) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |value| calls.lock().push(value)
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.calls.lock())
    }
}

impl<T: Clone + Send + 'static> CallRecorder<T> {
    /// Copy of everything recorded so far.
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.calls.lock().last().cloned()
    }
}

impl CallRecorder<()> {
    /// Argument-less callback, for click handlers.
    pub fn unit_sink(&self) -> impl Fn() + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move || calls.lock().push(())
    }
}
