/// Operation counters for monitoring FIFO usage.
///
/// Updated only when [`Config::enable_metrics`](crate::Config::enable_metrics)
/// is set. Plain counters, no atomics: the FIFO is unsynchronized by
/// contract, so every update happens under the caller's `&mut` access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Elements successfully reserved.
    pub elements_reserved: u64,
    /// Elements successfully committed.
    pub elements_committed: u64,
    /// Elements successfully read out.
    pub elements_read: u64,
    /// Reserve calls rejected for insufficient free space.
    pub failed_reserves: u64,
    /// Commit calls rejected for insufficient reserved space.
    pub failed_commits: u64,
    /// Read calls rejected for insufficient committed data.
    pub failed_reads: u64,
    /// Times the FIFO was reset.
    pub resets: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}
