use crate::invariants::{
    debug_assert_bounded_counts, debug_assert_index_in_range, debug_assert_partition_identity,
};
use crate::{Config, DataBlock, DataBlockMut, FifoError, Metrics};
use std::ops::Range;

// =============================================================================
// PROTOCOL
// =============================================================================
//
// The FIFO hands out aliasing views instead of copying data through its API.
// Writing is a three-phase protocol:
//
//   1. reserve(n)  - claim n elements of free space, get writable views
//   2. (external)  - the caller (e.g. an overlapped-I/O driver) fills them
//   3. commit(n)   - promote the oldest n reserved elements to readable
//
// Reading is one fused step: read_block(n) hands out views over the oldest
// n committed elements and retires them in the same call. peek(n) returns
// the same views without retiring anything.
//
// Walking forward from read_index, the buffer is partitioned cyclically
// into `committed` readable elements, then `reserved` not-yet-committed
// elements, then free space. Two counts and two cursors carry the whole
// state; `write_index` is always `(read_index + reserved + committed)`
// modulo capacity.
//
// Single-threaded by contract: no internal synchronization, no blocking.
// Callers that split producer and consumer across execution contexts must
// serialize access externally.
//
// =============================================================================

/// Fixed-capacity zero-copy ring FIFO.
///
/// Owns one contiguous buffer allocated at construction and never resized.
/// All operations are O(1) bookkeeping; data movement is entirely the
/// caller's, through the views in [`DataBlock`] / [`DataBlockMut`].
///
/// A logical block may wrap past the end of the buffer, in which case its
/// views come back split in two ([`DataBlock::is_split`]). A single block
/// can cross the wrap point at most once since requests never exceed
/// capacity.
pub struct RingFifo<T> {
    /// The backing storage.
    ///
    /// `Box<[T]>` instead of `Vec<T>`: the size is fixed at construction,
    /// and the boxed slice makes that intent explicit.
    buffer: Box<[T]>,
    /// Start of the committed (readable) region.
    read_index: usize,
    /// End of the reserved region; next reserve starts here.
    write_index: usize,
    /// Elements reserved but not yet committed.
    reserved: usize,
    /// Elements committed and not yet read.
    committed: usize,
    /// Operation counters, updated only when enabled.
    metrics: Metrics,
    enable_metrics: bool,
}

impl<T: Default> RingFifo<T> {
    /// Creates a FIFO with the given capacity.
    ///
    /// Elements are default-initialized so the reserve views are safe to
    /// read before the caller writes them. Aborts on allocation failure
    /// like any std collection; use [`try_new`](Self::try_new) to handle
    /// that case.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(Config::new(capacity))
    }

    /// Creates a FIFO from a [`Config`].
    pub fn with_config(config: Config) -> Self {
        let mut storage = Vec::with_capacity(config.capacity);
        storage.resize_with(config.capacity, T::default);
        Self::from_storage(storage, config)
    }

    /// Creates a FIFO, reporting allocation failure instead of aborting.
    pub fn try_new(capacity: usize) -> Result<Self, FifoError> {
        Self::try_with_config(Config::new(capacity))
    }

    /// Fallible counterpart of [`with_config`](Self::with_config).
    pub fn try_with_config(config: Config) -> Result<Self, FifoError> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(config.capacity)
            .map_err(|_| FifoError::ResourceExhausted {
                capacity: config.capacity,
            })?;
        storage.resize_with(config.capacity, T::default);
        Ok(Self::from_storage(storage, config))
    }

    fn from_storage(storage: Vec<T>, config: Config) -> Self {
        Self {
            buffer: storage.into_boxed_slice(),
            read_index: 0,
            write_index: 0,
            reserved: 0,
            committed: 0,
            metrics: Metrics::new(),
            enable_metrics: config.enable_metrics,
        }
    }
}

impl<T> RingFifo<T> {
    // ---------------------------------------------------------------------
    // SIZE QUERIES
    // ---------------------------------------------------------------------

    /// Returns the fixed capacity of the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Free space available for a new [`reserve`](Self::reserve).
    #[inline]
    pub fn reservable_size(&self) -> usize {
        self.buffer.len() - (self.reserved + self.committed)
    }

    /// Reserved-but-uncommitted space available for a [`commit`](Self::commit).
    #[inline]
    pub fn commitable_size(&self) -> usize {
        self.reserved
    }

    /// Committed data available for a [`read_block`](Self::read_block).
    #[inline]
    pub fn readable_size(&self) -> usize {
        self.committed
    }

    /// Returns true if the FIFO holds no reserved and no committed data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reserved == 0 && self.committed == 0
    }

    /// Returns true if no free space remains for a new reserve.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.reservable_size() == 0
    }

    // ---------------------------------------------------------------------
    // WRITE PATH: reserve -> external write -> commit
    // ---------------------------------------------------------------------

    /// Reserves `size` elements for an upcoming write and returns writable
    /// views over the reserved region.
    ///
    /// Pure bookkeeping: no data is written by this call. The caller fills
    /// the views, drops the block, then calls [`commit`](Self::commit).
    ///
    /// `reserve(0)` succeeds and yields an invalid (empty) block without
    /// changing any state. Fails with [`FifoError::CapacityExceeded`] if
    /// `size` exceeds [`reservable_size`](Self::reservable_size); the FIFO
    /// is left untouched on failure.
    pub fn reserve(&mut self, size: usize) -> Result<DataBlockMut<'_, T>, FifoError> {
        let available = self.reservable_size();
        if size > available {
            if self.enable_metrics {
                self.metrics.failed_reserves += 1;
            }
            return Err(FifoError::CapacityExceeded {
                requested: size,
                available,
            });
        }

        let (first, second) = split_ranges(self.buffer.len(), self.write_index, size)?;
        if size > 0 {
            self.write_index = (self.write_index + size) % self.buffer.len();
        }
        self.reserved += size;

        if self.enable_metrics {
            self.metrics.elements_reserved += size as u64;
        }
        self.debug_check();

        Ok(self.writable_views(first, second))
    }

    /// Commits the oldest `size` reserved elements, making them readable.
    ///
    /// Commits consume reservation in issue order; reserve and commit sizes
    /// need not match 1:1 across calls. Fails with
    /// [`FifoError::ReservationExceeded`] if `size` exceeds
    /// [`commitable_size`](Self::commitable_size); state is unchanged on
    /// failure.
    pub fn commit(&mut self, size: usize) -> Result<(), FifoError> {
        let available = self.commitable_size();
        if size > available {
            if self.enable_metrics {
                self.metrics.failed_commits += 1;
            }
            return Err(FifoError::ReservationExceeded {
                requested: size,
                available,
            });
        }

        self.reserved -= size;
        self.committed += size;

        if self.enable_metrics {
            self.metrics.elements_committed += size as u64;
        }
        self.debug_check();

        Ok(())
    }

    // ---------------------------------------------------------------------
    // READ PATH
    // ---------------------------------------------------------------------

    /// Returns views over the oldest `size` committed elements and retires
    /// them from the FIFO in the same call.
    ///
    /// There is no separate release step: by the time the views are handed
    /// out, the data is already consumed as far as the FIFO's bookkeeping
    /// is concerned. The views stay valid until the next mutating call.
    ///
    /// `read_block(0)` succeeds and yields an invalid (empty) block. Fails
    /// with [`FifoError::ReadUnderflow`] if `size` exceeds
    /// [`readable_size`](Self::readable_size); state is unchanged on
    /// failure.
    pub fn read_block(&mut self, size: usize) -> Result<DataBlock<'_, T>, FifoError> {
        let available = self.readable_size();
        if size > available {
            if self.enable_metrics {
                self.metrics.failed_reads += 1;
            }
            return Err(FifoError::ReadUnderflow {
                requested: size,
                available,
            });
        }

        let (first, second) = split_ranges(self.buffer.len(), self.read_index, size)?;
        if size > 0 {
            self.read_index = (self.read_index + size) % self.buffer.len();
        }
        self.committed -= size;

        if self.enable_metrics {
            self.metrics.elements_read += size as u64;
        }
        self.debug_check();

        Ok(DataBlock::new(&self.buffer[first], &self.buffer[second]))
    }

    /// Returns views over the oldest `size` committed elements without
    /// retiring them.
    ///
    /// The same data remains readable afterward; a subsequent
    /// [`read_block`](Self::read_block) of the same size yields the same
    /// contents. Fails with [`FifoError::ReadUnderflow`] like `read_block`.
    pub fn peek(&self, size: usize) -> Result<DataBlock<'_, T>, FifoError> {
        let available = self.readable_size();
        if size > available {
            return Err(FifoError::ReadUnderflow {
                requested: size,
                available,
            });
        }

        let (first, second) = split_ranges(self.buffer.len(), self.read_index, size)?;
        Ok(DataBlock::new(&self.buffer[first], &self.buffer[second]))
    }

    // ---------------------------------------------------------------------
    // LIFECYCLE
    // ---------------------------------------------------------------------

    /// Returns the FIFO to the empty state.
    ///
    /// Zeroes both cursors and both counts unconditionally. Buffer contents
    /// are left as-is; only bookkeeping is cleared.
    pub fn reset(&mut self) {
        self.read_index = 0;
        self.write_index = 0;
        self.reserved = 0;
        self.committed = 0;

        if self.enable_metrics {
            self.metrics.resets += 1;
        }
        self.debug_check();
    }

    /// Snapshot of the operation counters, all zero unless metrics were
    /// enabled in the [`Config`].
    pub fn metrics(&self) -> Metrics {
        if self.enable_metrics {
            self.metrics
        } else {
            Metrics::default()
        }
    }

    // ---------------------------------------------------------------------
    // COPY CONVENIENCE
    // ---------------------------------------------------------------------

    /// Reserves, fills and commits `items.len()` elements in one call.
    ///
    /// All-or-nothing: fails with [`FifoError::CapacityExceeded`] without
    /// writing anything if the items do not fit.
    pub fn write_slice(&mut self, items: &[T]) -> Result<(), FifoError>
    where
        T: Copy,
    {
        let mut block = self.reserve(items.len())?;
        block.copy_from_slice(items);
        self.commit(items.len())
    }

    /// Reads exactly `out.len()` elements into `out`, retiring them.
    ///
    /// All-or-nothing: fails with [`FifoError::ReadUnderflow`] without
    /// consuming anything if not enough data is committed.
    pub fn read_into(&mut self, out: &mut [T]) -> Result<(), FifoError>
    where
        T: Copy,
    {
        let block = self.read_block(out.len())?;
        block.copy_to_slice(out);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // INTERNAL
    // ---------------------------------------------------------------------

    /// Builds disjoint mutable views for the two ranges of a reservation.
    fn writable_views(&mut self, first: Range<usize>, second: Range<usize>) -> DataBlockMut<'_, T> {
        if second.is_empty() {
            DataBlockMut::new(&mut self.buffer[first], &mut [])
        } else {
            // The wrapped remainder ends at or before the start of the first
            // view (the free-space precondition keeps them disjoint), so one
            // split yields both regions.
            let (wrapped, head) = self.buffer.split_at_mut(first.start);
            DataBlockMut::new(&mut head[..first.len()], &mut wrapped[second])
        }
    }

    fn debug_check(&self) {
        debug_assert_bounded_counts!(self.reserved, self.committed, self.buffer.len());
        debug_assert_index_in_range!("read_index", self.read_index, self.buffer.len());
        debug_assert_index_in_range!("write_index", self.write_index, self.buffer.len());
        debug_assert_partition_identity!(
            self.read_index,
            self.reserved,
            self.committed,
            self.write_index,
            self.buffer.len()
        );
    }
}

impl<T> std::fmt::Debug for RingFifo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingFifo")
            .field("capacity", &self.buffer.len())
            .field("read_index", &self.read_index)
            .field("write_index", &self.write_index)
            .field("reserved", &self.reserved)
            .field("committed", &self.committed)
            .finish()
    }
}

/// Splits a logical region of `length` elements starting at `index` into at
/// most two physical ranges of a `capacity`-sized buffer.
///
/// Pure index arithmetic, kept separate from the FIFO bookkeeping so the
/// wraparound math is testable in isolation. The caller advances its cursor
/// to `(index + length) % capacity` afterward.
///
/// Never produces more than two ranges: a region bounded by capacity can
/// cross the wrap point at most once.
pub(crate) fn split_ranges(
    capacity: usize,
    index: usize,
    length: usize,
) -> Result<(Range<usize>, Range<usize>), FifoError> {
    // Hard invariant guard; unreachable through the public API, which checks
    // the tighter reservable/readable preconditions first.
    if length > capacity {
        return Err(FifoError::CapacityExceeded {
            requested: length,
            available: capacity,
        });
    }
    if length == 0 {
        return Ok((0..0, 0..0));
    }

    let tail = capacity - index;
    if length <= tail {
        Ok((index..index + length, 0..0))
    } else {
        Ok((index..capacity, 0..length - tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------
    // split_ranges in isolation
    // -----------------------------------------------------------------

    #[test]
    fn split_ranges_contiguous() {
        let (first, second) = split_ranges(10, 2, 5).unwrap();
        assert_eq!(first, 2..7);
        assert!(second.is_empty());
    }

    #[test]
    fn split_ranges_exact_to_end() {
        let (first, second) = split_ranges(10, 6, 4).unwrap();
        assert_eq!(first, 6..10);
        assert!(second.is_empty());
    }

    #[test]
    fn split_ranges_wraps() {
        let (first, second) = split_ranges(10, 8, 5).unwrap();
        assert_eq!(first, 8..10);
        assert_eq!(second, 0..3);
        assert_eq!(first.len() + second.len(), 5);
    }

    #[test]
    fn split_ranges_full_capacity_from_zero() {
        let (first, second) = split_ranges(10, 0, 10).unwrap();
        assert_eq!(first, 0..10);
        assert!(second.is_empty());
    }

    #[test]
    fn split_ranges_full_capacity_wraps_back_to_start() {
        // Wrapped region ends exactly where the first one starts.
        let (first, second) = split_ranges(10, 4, 10).unwrap();
        assert_eq!(first, 4..10);
        assert_eq!(second, 0..4);
    }

    #[test]
    fn split_ranges_zero_length() {
        let (first, second) = split_ranges(10, 7, 0).unwrap();
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn split_ranges_rejects_over_capacity() {
        let err = split_ranges(10, 0, 11).unwrap_err();
        assert_eq!(
            err,
            FifoError::CapacityExceeded {
                requested: 11,
                available: 10
            }
        );
    }

    // -----------------------------------------------------------------
    // FIFO bookkeeping
    // -----------------------------------------------------------------

    #[test]
    fn fresh_fifo_sizes() {
        let fifo = RingFifo::<u8>::new(16);
        assert_eq!(fifo.capacity(), 16);
        assert_eq!(fifo.reservable_size(), 16);
        assert_eq!(fifo.commitable_size(), 0);
        assert_eq!(fifo.readable_size(), 0);
        assert!(fifo.is_empty());
        assert!(!fifo.is_full());
    }

    #[test]
    fn reserve_moves_space_to_reserved() {
        let mut fifo = RingFifo::<u8>::new(16);
        let block = fifo.reserve(6).unwrap();
        assert!(block.is_valid());
        assert!(!block.is_split());
        assert_eq!(block.len(), 6);
        drop(block);

        assert_eq!(fifo.reservable_size(), 10);
        assert_eq!(fifo.commitable_size(), 6);
        assert_eq!(fifo.readable_size(), 0);
    }

    #[test]
    fn commit_moves_reserved_to_readable() {
        let mut fifo = RingFifo::<u8>::new(16);
        fifo.reserve(6).unwrap();
        fifo.commit(4).unwrap();

        assert_eq!(fifo.reservable_size(), 10);
        assert_eq!(fifo.commitable_size(), 2);
        assert_eq!(fifo.readable_size(), 4);
    }

    #[test]
    fn partial_commits_in_issue_order() {
        let mut fifo = RingFifo::<u8>::new(8);
        let mut block = fifo.reserve(6).unwrap();
        block.copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        drop(block);

        // Two commits covering one reservation.
        fifo.commit(2).unwrap();
        fifo.commit(4).unwrap();

        let block = fifo.read_block(6).unwrap();
        assert_eq!(block.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn read_block_hands_out_and_retires() {
        let mut fifo = RingFifo::<u8>::new(16);
        fifo.write_slice(&[10, 20, 30]).unwrap();

        let block = fifo.read_block(3).unwrap();
        assert_eq!(block.first(), &[10, 20, 30]);
        assert!(!block.is_split());
        drop(block);

        assert_eq!(fifo.readable_size(), 0);
        assert_eq!(fifo.reservable_size(), 16);
    }

    #[test]
    fn zero_size_requests_are_noops() {
        let mut fifo = RingFifo::<u8>::new(8);

        let block = fifo.reserve(0).unwrap();
        assert!(!block.is_valid());
        assert!(!block.is_split());
        assert_eq!(block.len(), 0);
        drop(block);

        let block = fifo.read_block(0).unwrap();
        assert!(!block.is_valid());
        drop(block);

        fifo.commit(0).unwrap();
        assert_eq!(fifo.reservable_size(), 8);
        assert_eq!(fifo.commitable_size(), 0);
        assert_eq!(fifo.readable_size(), 0);
    }

    #[test]
    fn reserve_rejects_over_capacity_without_state_change() {
        let mut fifo = RingFifo::<u8>::new(10);
        let err = fifo.reserve(11).unwrap_err();
        assert_eq!(
            err,
            FifoError::CapacityExceeded {
                requested: 11,
                available: 10
            }
        );
        assert_eq!(fifo.reservable_size(), 10);
    }

    #[test]
    fn commit_rejects_beyond_reservation() {
        let mut fifo = RingFifo::<u8>::new(10);
        fifo.reserve(3).unwrap();
        let err = fifo.commit(4).unwrap_err();
        assert_eq!(
            err,
            FifoError::ReservationExceeded {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(fifo.commitable_size(), 3);
        assert_eq!(fifo.readable_size(), 0);
    }

    #[test]
    fn read_rejects_beyond_committed() {
        let mut fifo = RingFifo::<u8>::new(10);
        let err = fifo.read_block(1).unwrap_err();
        assert_eq!(
            err,
            FifoError::ReadUnderflow {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn wrap_split_after_draining_most_of_buffer() {
        let mut fifo = RingFifo::<u8>::new(10);

        // Consume 9 elements so the write cursor sits one short of the end.
        fifo.write_slice(&[0; 9]).unwrap();
        fifo.read_block(9).unwrap();

        let block = fifo.reserve(3).unwrap();
        assert!(block.is_split());
        assert_eq!(block.first().len(), 1);
        assert_eq!(block.second().len(), 2);
    }

    #[test]
    fn peek_does_not_retire() {
        let mut fifo = RingFifo::<u8>::new(8);
        fifo.write_slice(&[7, 8, 9]).unwrap();

        let peeked = fifo.peek(3).unwrap().to_vec();
        assert_eq!(fifo.readable_size(), 3);

        let read = fifo.read_block(3).unwrap().to_vec();
        assert_eq!(peeked, read);
        assert_eq!(fifo.readable_size(), 0);
    }

    #[test]
    fn reset_clears_bookkeeping() {
        let mut fifo = RingFifo::<u8>::new(10);
        fifo.write_slice(&[1, 2, 3, 4]).unwrap();
        fifo.reserve(2).unwrap();

        fifo.reset();
        assert_eq!(fifo.reservable_size(), 10);
        assert_eq!(fifo.commitable_size(), 0);
        assert_eq!(fifo.readable_size(), 0);

        // Idempotent on an already-empty FIFO.
        fifo.reset();
        assert_eq!(fifo.reservable_size(), 10);
    }

    #[test]
    fn zero_capacity_is_degenerate_but_safe() {
        let mut fifo = RingFifo::<u8>::new(0);
        assert!(fifo.is_full());
        assert!(fifo.is_empty());

        assert!(fifo.reserve(0).is_ok());
        assert!(fifo.reserve(1).is_err());
        assert!(fifo.read_block(1).is_err());
        fifo.reset();
    }

    #[test]
    fn metrics_count_operations_when_enabled() {
        let mut fifo = RingFifo::<u8>::with_config(Config::new(8).with_metrics());
        fifo.write_slice(&[1, 2, 3]).unwrap();
        fifo.read_block(2).unwrap();
        let _ = fifo.reserve(100);

        let m = fifo.metrics();
        assert_eq!(m.elements_reserved, 3);
        assert_eq!(m.elements_committed, 3);
        assert_eq!(m.elements_read, 2);
        assert_eq!(m.failed_reserves, 1);
    }

    #[test]
    fn metrics_stay_zero_when_disabled() {
        let mut fifo = RingFifo::<u8>::new(8);
        fifo.write_slice(&[1, 2, 3]).unwrap();
        assert_eq!(fifo.metrics(), Metrics::default());
    }
}
