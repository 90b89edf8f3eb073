use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared generation counter bumped every time lit shaders go stale.
///
/// Shader caches remember the generation they were built against and
/// rebuild once [`ShaderGeneration::is_stale`] reports a newer one.
#[derive(Debug, Clone, Default)]
pub struct ShaderGeneration {
    counter: Arc<AtomicU64>,
}

impl ShaderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an invalidation callback suitable for [`crate::LightingParams::new`].
    pub fn callback(&self) -> impl FnMut() + Send + 'static {
        let counter = Arc::clone(&self.counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn is_stale(&self, seen: u64) -> bool {
        self.current() != seen
    }
}
