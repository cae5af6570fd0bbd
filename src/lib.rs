//! # block-sum
//!
//! Sums an integer array by splitting it into equally sized blocks and
//! giving each block to its own worker thread.
//!
//! ## Pipeline
//!
//! 1. **Partition** - `size / num_blocks` elements per block (floor division)
//! 2. **Spawn** - one scoped thread per block, each owning one output slot
//! 3. **Join** - wait for every worker before touching any slot
//! 4. **Reduce** - ordered sum of the slots into the total
//!
//! Each worker walks its block in `stride` interleaved passes. The stride
//! changes the memory access order, never the set of summed elements, so it
//! can be used to measure cache effects.
//!
//! ```
//! use block_sum::sum_array;
//!
//! let array: Vec<i32> = (0..8).collect();
//! let report = sum_array(&array, 2, 1).unwrap();
//! assert_eq!(report.block_sums, vec![6, 22]);
//! assert_eq!(report.total, 28);
//! ```
//!
//! When `num_blocks` does not divide the array length, the trailing
//! `size % num_blocks` elements belong to no block and are not summed.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod partition;
pub mod source;
pub mod verify;
pub mod worker;

pub use config::RunConfig;
pub use coordinator::{sum_array, Coordinator, Phase, SumReport};
pub use error::{ConfigError, SumError};
pub use partition::{partition, BlockDescriptor, Partition};
pub use source::{init_array, ArrayMode};
pub use worker::run_block;
