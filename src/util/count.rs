use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::Relaxed;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// Counts how many times a construction step actually ran, across any number of threads.
#[derive(Debug)]
pub struct InitCounter(Arc<AtomicUsize>);

impl InitCounter {
    pub fn new() -> InitCounter {
        InitCounter(Arc::new(AtomicUsize::new(0)))
    }

    pub fn record(&self) {
        self.0.fetch_add(1, Relaxed);
    }

    pub fn count(&self) -> usize {
        self.0.load(Relaxed)
    }
}

/// Counts drops of the [`DropToken`]s it hands out. Unlike a self-counting clone, the counter
/// handle held by the test never contributes to the count.
#[derive(Debug)]
pub struct DropCounter(Arc<AtomicUsize>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter(Arc::new(AtomicUsize::new(0)))
    }

    pub fn token(&self) -> DropToken {
        DropToken(Arc::clone(&self.0))
    }

    pub fn count(&self) -> usize {
        self.0.load(Relaxed)
    }
}

#[derive(Debug)]
pub struct DropToken(Arc<AtomicUsize>);

impl Drop for DropToken {
    fn drop(&mut self) {
        self.0.fetch_add(1, Relaxed);
    }
}
