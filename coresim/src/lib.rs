//! Welcome to `coresim`!
//!
//! A discrete-time simulator of a single-core, round-robin scheduler
//! coupled to a pluggable memory manager. Processes are admitted as they
//! arrive, must obtain memory before they may run, and release it when
//! they finish. Every scheduling decision is reported as an [`Event`].

mod process;
mod stats;

pub mod helpe;
pub mod logger;
pub mod memory;
pub mod scheduler;
pub mod workload;

pub use crate::helpe::*;

/// Our fundamental unit of interest. A [`Process`] carries everything the
/// scheduler and the memory manager need to know about a single task:
///
/// 1. Its identity ([`id`](Process::id), [`name`](Process::name)), fixed
///    at load time.
/// 2. Its scheduling state: when it arrived, how much service it asked
///    for, how much it still needs, and where it is in its lifecycle.
/// 3. Its memory state. Exactly one of [`block`](Process::block) or
///    [`frames`](Process::frames) is ever in use during a run, depending
///    on the configured [`Strategy`].
///
/// > ***ATTENTION:*** a process holds memory only while it is
/// > [`Status::Ready`] or [`Status::Running`]. Preemption does *not*
/// > release memory; completion always does. Under paged strategies a
/// > process that is merely Ready may still lose frames to eviction.
#[derive(Debug, Clone)]
pub struct Process {
    pub id:         Pid,
    pub name:       String,
    pub arrival:    SimTime,
    // What the input asked for. Overhead is computed against this.
    pub service:    SimTime,
    pub remaining:  SimTime,
    pub mem_kb:     usize,
    pub status:     Status,
    /// Start offset of the contiguous range (first-fit only).
    pub block:      Option<usize>,
    /// Held frames, in the order they were assigned (paged strategies).
    pub frames:     Vec<FrameIdx>,
}

/// The whole mutable state of one simulation run.
///
/// Tables, queues, counters and the clock all live here and nowhere
/// else. Two [`Simulation`]s never share anything, which is what lets
/// the `sweep` front-end run many of them side by side.
pub struct Simulation {
    procs:      Vec<Process>,
    // Not yet arrived, in input order.
    unready:    std::collections::VecDeque<Pid>,
    ready:      std::collections::VecDeque<Pid>,
    running:    Option<Pid>,
    memory:     MemoryManager,
    clock:      SimTime,
    quantum:    SimTime,
    unfinished: usize,
    tally:      stats::Tally,
}

#[cfg(test)]
mod tests;
