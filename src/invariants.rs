//! Debug assertion macros for the FIFO state invariants.
//!
//! Only active in debug builds, so there is zero overhead in release builds.
//! Checked after every mutating call on `RingFifo<T>`.

/// Assert that the reserved and committed counts fit within capacity.
///
/// **Invariant**: `reserved + committed <= capacity`
macro_rules! debug_assert_bounded_counts {
    ($reserved:expr, $committed:expr, $capacity:expr) => {
        debug_assert!(
            $reserved + $committed <= $capacity,
            "bounded-counts violated: reserved {} + committed {} exceeds capacity {}",
            $reserved,
            $committed,
            $capacity
        )
    };
}

/// Assert that a cursor stays within the buffer.
///
/// **Invariant**: `index < capacity` (index 0 when capacity is 0)
macro_rules! debug_assert_index_in_range {
    ($name:literal, $index:expr, $capacity:expr) => {
        debug_assert!(
            $index < $capacity || ($capacity == 0 && $index == 0),
            "cursor out of range: {} is {} with capacity {}",
            $name,
            $index,
            $capacity
        )
    };
}

/// Assert the partition identity between the two cursors and two counts.
///
/// **Invariant**: `write_index == (read_index + reserved + committed) % capacity`
macro_rules! debug_assert_partition_identity {
    ($read:expr, $reserved:expr, $committed:expr, $write:expr, $capacity:expr) => {
        debug_assert!(
            $capacity == 0 || $write == ($read + $reserved + $committed) % $capacity,
            "partition identity violated: write_index {} != (read_index {} + reserved {} + committed {}) mod capacity {}",
            $write,
            $read,
            $reserved,
            $committed,
            $capacity
        )
    };
}

pub(crate) use debug_assert_bounded_counts;
pub(crate) use debug_assert_index_in_range;
pub(crate) use debug_assert_partition_identity;
