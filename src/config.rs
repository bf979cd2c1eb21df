/// Configuration for a [`RingFifo`](crate::RingFifo).
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Number of elements in the backing buffer. Fixed for the lifetime of
    /// the FIFO; any value is accepted (no power-of-two requirement).
    pub capacity: usize,
    /// Enable operation counters (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a configuration with the given capacity and metrics disabled.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            enable_metrics: false,
        }
    }

    /// Enables operation counters.
    pub const fn with_metrics(mut self) -> Self {
        self.enable_metrics = true;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(4096)
    }
}
