//! Load generations: lets a completed fetch tell whether it is still wanted

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter bumped by every load request.
///
/// A completion carries the generation it was started with and is applied
/// only while that generation is still current; anything older has been
/// superseded by a later request.
#[derive(Debug, Clone, Default)]
pub struct RenderGeneration {
    counter: Arc<AtomicU64>,
}

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier one
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_request_supersedes() {
        let generation = RenderGeneration::new();
        assert_eq!(generation.current(), 0);

        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = RenderGeneration::new();
        let handle = generation.clone();
        let g = handle.next();
        assert!(generation.is_current(g));
    }
}
