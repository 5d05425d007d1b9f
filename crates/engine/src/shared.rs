use std::sync::{Arc, Mutex, PoisonError};

use crate::adapter::BorderAdapter;
use crate::engine::BorderEngine;

/// Cloneable handle to an engine guarded by a single lock.
///
/// Each call to [`with`](Self::with) holds the lock for the whole closure, so an
/// entry point such as `init_border` (which changes membership and then walks
/// the online population) never interleaves with another.
pub struct SharedBorderEngine<A: BorderAdapter> {
    inner: Arc<Mutex<BorderEngine<A>>>,
}

impl<A: BorderAdapter> Clone for SharedBorderEngine<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: BorderAdapter> SharedBorderEngine<A> {
    pub fn new(engine: BorderEngine<A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut BorderEngine<A>) -> R) -> R {
        // A panic inside an adapter call leaves the map consistent: every
        // entry point writes it in a single insert or remove.
        let mut engine = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    /// Take the engine back once every other handle is gone.
    pub fn into_inner(self) -> Option<BorderEngine<A>> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingAdapter;
    use levelborder_common::BorderMode;

    #[test]
    fn concurrent_joins_are_serialized() {
        let mut adapter = RecordingAdapter::new();
        for p in 0..8 {
            adapter.connect(p, 1);
        }
        let engine = BorderEngine::with_mode(adapter, BorderMode::Sum);
        let shared = SharedBorderEngine::new(engine);

        std::thread::scope(|s| {
            for p in 0..8u32 {
                let handle = shared.clone();
                s.spawn(move || handle.with(|e| e.init_border(&p)));
            }
        });

        let engine = shared.into_inner().unwrap();
        assert_eq!(engine.tracked_count(), 8);
        for p in 0..8 {
            assert_eq!(engine.size_of(&p), Some(16.0));
        }
    }

    #[test]
    fn into_inner_fails_while_shared() {
        let shared = SharedBorderEngine::new(BorderEngine::with_mode(
            RecordingAdapter::new(),
            BorderMode::Own,
        ));
        let other = shared.clone();
        assert!(shared.into_inner().is_none());
        assert!(other.into_inner().is_some());
    }
}
