//! Spawning one worker per block, joining them, and reducing the partial sums.

use std::fmt;
use std::io;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crate::error::SumError;
use crate::partition::{partition, BlockDescriptor};
use crate::worker::run_block;

/// Stages of a single [`Coordinator::run`] call, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the run starts; never reported to an observer.
    Idle,
    Partitioning,
    Spawning,
    Running,
    Joining,
    Reducing,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Partitioning => "partitioning",
            Phase::Spawning => "spawning",
            Phase::Running => "running",
            Phase::Joining => "joining",
            Phase::Reducing => "reducing",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SumReport {
    pub total: i64,
    /// Partial sums indexed by block id.
    pub block_sums: Vec<i64>,
    /// Spawn + run + join + reduce. Partitioning is not included.
    pub elapsed: Duration,
}

impl SumReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for SumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amount of time to execute sumArray: {:.6}s", self.elapsed_secs())?;
        write!(f, "Sum of execution: {}", self.total)
    }
}

/// A validated block count and stride, reusable across arrays.
///
/// Every call to [`Coordinator::run`] allocates its own slots and threads, so
/// one coordinator can serve concurrent callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinator {
    num_blocks: usize,
    stride: usize,
}

impl Coordinator {
    pub fn new(num_blocks: usize, stride: usize) -> Self {
        Self { num_blocks, stride }
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn run(&self, array: &[i32]) -> Result<SumReport, SumError> {
        self.run_observed(array, |_| {})
    }

    /// Like [`Coordinator::run`], calling `observe` on every phase change.
    ///
    /// A failed run stops at the phase it failed in; `Done` is only reported
    /// together with a complete [`SumReport`].
    pub fn run_observed<O>(&self, array: &[i32], observe: O) -> Result<SumReport, SumError>
    where
        O: FnMut(Phase),
    {
        self.run_with(array, run_block, observe)
    }

    pub(crate) fn run_with<W, O>(&self, array: &[i32], work: W, observe: O) -> Result<SumReport, SumError>
    where
        W: Fn(&BlockDescriptor<'_>) -> i64 + Sync,
        O: FnMut(Phase),
    {
        let mut tracker = Tracker::new(observe);

        tracker.enter(Phase::Partitioning);
        let partition = partition(array, self.num_blocks, self.stride)?;
        if partition.excluded() > 0 {
            log::warn!(
                "{} block(s) do not divide {} element(s); the last {} element(s) are not summed",
                self.num_blocks,
                array.len(),
                partition.excluded()
            );
        }
        for block in &partition.blocks {
            log::debug!(
                "block {}: [{}, {}] stride {}",
                block.block_id,
                block.min_idx,
                block.max_idx,
                block.stride
            );
        }

        let start = Instant::now();
        let mut slots = vec![0i64; partition.num_blocks()];
        spawn_and_join(&partition.blocks, &mut slots, &work, &mut tracker)?;

        tracker.enter(Phase::Reducing);
        let total: i64 = slots.iter().sum();
        let elapsed = start.elapsed();
        tracker.enter(Phase::Done);

        log::info!(
            "summed {} of {} element(s) in {} block(s), stride {}: total {} in {:?}",
            partition.covered(),
            array.len(),
            self.num_blocks,
            self.stride,
            total,
            elapsed
        );

        Ok(SumReport {
            total,
            block_sums: slots,
            elapsed,
        })
    }
}

/// Sum `array` with `num_blocks` worker threads, each traversing its block
/// in `stride` interleaved passes.
pub fn sum_array(array: &[i32], num_blocks: usize, stride: usize) -> Result<SumReport, SumError> {
    Coordinator::new(num_blocks, stride).run(array)
}

/// Current phase of one run, starting at `Idle`.
struct Tracker<O> {
    phase: Phase,
    observe: O,
}

impl<O: FnMut(Phase)> Tracker<O> {
    fn new(observe: O) -> Self {
        Self {
            phase: Phase::Idle,
            observe,
        }
    }

    fn enter(&mut self, next: Phase) {
        log::debug!("coordinator: {} -> {}", self.phase, next);
        self.phase = next;
        (self.observe)(next);
    }
}

/// Start one thread per block and wait for all of them.
///
/// Slot `i` is handed to block `i` as the only `&mut` to it. Returns only
/// after every started thread has been joined.
fn spawn_and_join<W, O>(
    blocks: &[BlockDescriptor<'_>],
    slots: &mut [i64],
    work: &W,
    tracker: &mut Tracker<O>,
) -> Result<(), SumError>
where
    W: Fn(&BlockDescriptor<'_>) -> i64 + Sync,
    O: FnMut(Phase),
{
    thread::scope(|scope| {
        tracker.enter(Phase::Spawning);
        let mut handles = Vec::with_capacity(blocks.len());

        for (block, slot) in blocks.iter().zip(slots.iter_mut()) {
            let spawned = thread::Builder::new()
                .name(format!("block-{}", block.block_id))
                .spawn_scoped(scope, move || {
                    *slot = work(block);
                    log::trace!("block {} finished with {}", block.block_id, *slot);
                });

            match spawned {
                Ok(handle) => handles.push((block.block_id, handle)),
                Err(source) => return Err(abort_spawn(handles, block.block_id, source)),
            }
        }

        tracker.enter(Phase::Running);
        log::debug!("{} worker(s) started", handles.len());

        tracker.enter(Phase::Joining);
        let mut panicked = None;
        for (block_id, handle) in handles {
            if handle.join().is_err() {
                log::warn!("worker for block {} panicked", block_id);
                panicked = panicked.or(Some(block_id));
            }
        }

        match panicked {
            Some(block_id) => Err(SumError::WorkerPanicked { block_id }),
            None => Ok(()),
        }
    })
}

/// Join the workers that did start after `block_id` failed to spawn.
fn abort_spawn(
    handles: Vec<(usize, ScopedJoinHandle<'_, ()>)>,
    block_id: usize,
    source: io::Error,
) -> SumError {
    log::warn!("failed to spawn block {}: {}", block_id, source);
    for (started, handle) in handles {
        if handle.join().is_err() {
            log::warn!("worker for block {} panicked while aborting", started);
        }
    }
    SumError::Spawn { block_id, source }
}
