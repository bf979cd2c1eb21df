//! RingFifo - Fixed-Capacity Zero-Copy Ring FIFO
//!
//! A single-buffer circular FIFO that exposes direct views into its backing
//! storage instead of copying data through an API. Built for
//! producer/consumer pipelines that delegate the actual transfers to an
//! external I/O driver (asynchronous or overlapped I/O), where avoiding
//! intermediate copies matters for throughput and latency.
//!
//! # Key Features
//!
//! - Three-phase write protocol: reserve, external write, commit
//! - Reads hand out views and retire the data in one step
//! - Wraparound blocks come back as two disjoint, logically contiguous views
//! - Explicit error returns; a failing call never changes FIFO state
//! - Single-threaded by contract: no locks, no atomics, no blocking
//!
//! # Example
//!
//! ```
//! use ringfifo_rs::RingFifo;
//!
//! let mut fifo = RingFifo::<u8>::new(1024);
//!
//! // Claim space, then write directly into the buffer views.
//! let mut block = fifo.reserve(3)?;
//! block.first_mut().copy_from_slice(&[10, 20, 30]);
//! drop(block);
//!
//! // Promote the written elements to readable.
//! fifo.commit(3)?;
//!
//! // Reading hands out views and retires the data in the same call.
//! let block = fifo.read_block(3)?;
//! assert_eq!(block.first(), &[10, 20, 30]);
//! assert!(!block.is_split());
//! # Ok::<(), ringfifo_rs::FifoError>(())
//! ```
//!
//! The FIFO provides no internal synchronization. If producer and consumer
//! run on different execution contexts, the caller must serialize access
//! (e.g. commit only after its own asynchronous write completed).

mod block;
mod config;
mod error;
mod fifo;
mod invariants;
mod metrics;

pub use block::{DataBlock, DataBlockMut};
pub use config::Config;
pub use error::FifoError;
pub use fifo::RingFifo;
pub use metrics::Metrics;
